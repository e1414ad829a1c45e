pub mod common;
pub mod resource;
pub mod rules;

pub use common::*;
pub use resource::*;
pub use rules::*;
