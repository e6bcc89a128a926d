pub mod fade;
pub mod music;
pub mod nav;
pub mod preference;
pub mod toast;

// Page behaviors around the sky canvas. Pure state and decisions only; the
// web app performs the DOM side effects.
pub use fade::*;
pub use music::*;
pub use nav::*;
pub use preference::*;
pub use toast::*;
