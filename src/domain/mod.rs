pub mod calendar;
pub mod date_range;
pub mod period;
pub mod picker;
pub mod range;
pub mod year_select;

pub use calendar::*;
pub use date_range::*;
pub use period::*;
pub use picker::*;
pub use range::*;
pub use year_select::*;
