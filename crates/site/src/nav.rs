/// Open/closed state of the mobile navigation menu.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    /// Class toggled on the links container.
    pub const OPEN_CLASS: &'static str = "open";

    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts whatever state the DOM already shows.
    pub fn from_dom(open: bool) -> Self {
        Self { open }
    }

    /// Flips the menu and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Value for the toggle button's `aria-expanded` attribute.
    pub fn aria_expanded(&self) -> &'static str {
        if self.open { "true" } else { "false" }
    }
}
