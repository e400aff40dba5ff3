pub mod period_view;
pub mod picker_panel;
pub mod range_view;
pub mod session;
pub mod theme;
pub mod year_panel;

pub use period_view::*;
pub use picker_panel::*;
pub use range_view::*;
pub use session::*;
pub use theme::*;
pub use year_panel::*;
