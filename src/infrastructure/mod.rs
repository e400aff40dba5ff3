pub mod hooks;
pub mod logging;
pub mod plugins;

pub use hooks::*;
pub use logging::*;
pub use plugins::*;
