/// How long a toast stays visible.
pub const TOAST_DURATION_MS: i32 = 2200;

pub const CONTACT_RECEIVED_MESSAGE: &str = "Message received. (Add Formspree later to send emails.)";

/// Identifies one `show` so a stale hide timer can be ignored.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ToastTicket(u64);

/// Tracks the single on-screen toast.
///
/// Showing a new toast supersedes the previous one, including its pending
/// hide: only the hide carrying the latest ticket takes effect.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ToastState {
    generation: u64,
    message: Option<String>,
}

impl ToastState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>) -> ToastTicket {
        self.generation = self.generation.wrapping_add(1);
        self.message = Some(message.into());
        ToastTicket(self.generation)
    }

    /// Returns `true` if this hide applies (the ticket is still current).
    pub fn hide(&mut self, ticket: ToastTicket) -> bool {
        if ticket.0 != self.generation || self.message.is_none() {
            return false;
        }
        self.message = None;
        true
    }

    pub fn visible(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::ToastState;

    #[test]
    fn show_then_hide() {
        let mut t = ToastState::new();
        let ticket = t.show("hello");
        assert_eq!(t.visible(), Some("hello"));
        assert!(t.hide(ticket));
        assert_eq!(t.visible(), None);
        assert!(!t.hide(ticket));
    }

    #[test]
    fn newer_toast_cancels_older_hide() {
        let mut t = ToastState::new();
        let first = t.show("one");
        let second = t.show("two");

        assert!(!t.hide(first));
        assert_eq!(t.visible(), Some("two"));
        assert!(t.hide(second));
    }
}
