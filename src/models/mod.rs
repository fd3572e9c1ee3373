pub mod cell;
pub mod dimension;
pub mod period;
pub mod record;

pub use cell::*;
pub use dimension::*;
pub use period::*;
pub use record::*;
