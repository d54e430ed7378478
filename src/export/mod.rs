//! Export and print adapters
//!
//! Both adapters read the complete record list, never the grid's filtered,
//! sorted or paged view.

pub mod delimited;
pub mod json;
pub mod print;

pub use self::delimited::*;
pub use self::json::*;
pub use self::print::*;
