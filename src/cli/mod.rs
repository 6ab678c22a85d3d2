pub mod inject;
pub mod interactive;
pub mod show;

pub use inject::*;
pub use interactive::*;
pub use show::*;
