pub mod frame;
pub mod loop_control;

pub use frame::*;
pub use loop_control::*;
