pub mod citation;
pub mod layout;

pub use citation::*;
pub use layout::*;
