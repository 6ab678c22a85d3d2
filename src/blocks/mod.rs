pub mod inject;
pub mod segment;

pub use inject::*;
pub use segment::*;
