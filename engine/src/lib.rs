pub mod logging;
pub mod macros;
