pub mod bounds;
pub mod math;
pub mod random;
pub mod time;

// Foundation crate: small, well-tested primitives only.
pub use bounds::*;
pub use random::*;
pub use time::*;
