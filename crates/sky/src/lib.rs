pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod meteor;
pub mod render;
pub mod spawner;
pub mod star;
pub mod viewport;

// Night-sky simulation: stars, meteors and the display list they produce.
pub use color::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use meteor::*;
pub use render::*;
pub use spawner::*;
pub use star::*;
pub use viewport::*;
