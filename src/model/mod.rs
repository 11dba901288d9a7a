pub mod filter;
pub mod planet;

pub use filter::*;
pub use planet::*;
