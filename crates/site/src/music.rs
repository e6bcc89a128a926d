use crate::preference::MusicPreference;

/// Resting volume once playback has faded in.
pub const MUSIC_VOLUME: f64 = 0.25;
pub const FADE_IN_MS: u32 = 700;
pub const FADE_OUT_MS: u32 = 500;
/// Pause slightly after the fade-out finishes.
pub const PAUSE_AFTER_MS: i32 = 520;
pub const HINT_DELAY_MS: i32 = 900;
pub const MUSIC_HINT_MESSAGE: &str = "Tap anywhere to enable music.";

pub fn music_label(on: bool) -> &'static str {
    if on { "♪ Music: On" } else { "♪ Music: Off" }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MusicAction {
    Play,
    Stop,
    Nothing,
}

/// Result of asking the audio element to play.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    Started,
    /// Autoplay policy refused playback until a user gesture.
    Blocked,
}

/// What the page should do after a play or stop.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MusicEffects {
    pub label_on: bool,
    pub save: Option<MusicPreference>,
}

/// Decides the background-music behavior from the stored preference and
/// the audio element's paused state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MusicController {
    preference: MusicPreference,
}

impl MusicController {
    pub fn new(preference: MusicPreference) -> Self {
        Self { preference }
    }

    pub fn preference(&self) -> MusicPreference {
        self.preference
    }

    /// Label shown before any interaction.
    pub fn initial_label(&self) -> &'static str {
        music_label(self.preference == MusicPreference::On)
    }

    /// The music button toggles on the element's actual state.
    pub fn click(&self, paused: bool) -> MusicAction {
        if paused { MusicAction::Play } else { MusicAction::Stop }
    }

    /// The first pointer press anywhere may start music that autoplay blocked.
    pub fn first_pointer(&self, paused: bool) -> MusicAction {
        if self.preference == MusicPreference::On && paused {
            MusicAction::Play
        } else {
            MusicAction::Nothing
        }
    }

    /// Whether to schedule the "tap anywhere" hint at page load.
    pub fn wants_hint(&self) -> bool {
        self.preference == MusicPreference::On
    }

    /// Whether the scheduled hint should actually show.
    pub fn hint_due(&self, paused: bool) -> bool {
        self.wants_hint() && paused
    }

    pub fn played(&mut self, outcome: PlayOutcome) -> MusicEffects {
        match outcome {
            PlayOutcome::Started => {
                self.preference = MusicPreference::On;
                MusicEffects {
                    label_on: true,
                    save: Some(MusicPreference::On),
                }
            }
            // Keep the intent; the next gesture retries.
            PlayOutcome::Blocked => MusicEffects {
                label_on: true,
                save: None,
            },
        }
    }

    pub fn stopped(&mut self) -> MusicEffects {
        self.preference = MusicPreference::Off;
        MusicEffects {
            label_on: false,
            save: Some(MusicPreference::Off),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MusicAction, MusicController, MusicEffects, PlayOutcome, music_label};
    use crate::preference::MusicPreference;
    use pretty_assertions::assert_eq;

    #[test]
    fn labels() {
        assert_eq!(music_label(true), "♪ Music: On");
        assert_eq!(music_label(false), "♪ Music: Off");
        assert_eq!(MusicController::new(MusicPreference::Off).initial_label(), "♪ Music: Off");
    }

    #[test]
    fn click_follows_paused_state() {
        let c = MusicController::new(MusicPreference::Off);
        assert_eq!(c.click(true), MusicAction::Play);
        assert_eq!(c.click(false), MusicAction::Stop);
    }

    #[test]
    fn first_pointer_only_plays_when_wanted_and_paused() {
        let on = MusicController::new(MusicPreference::On);
        let off = MusicController::new(MusicPreference::Off);
        assert_eq!(on.first_pointer(true), MusicAction::Play);
        assert_eq!(on.first_pointer(false), MusicAction::Nothing);
        assert_eq!(off.first_pointer(true), MusicAction::Nothing);
    }

    #[test]
    fn hint_requires_preference_and_silence() {
        let on = MusicController::new(MusicPreference::On);
        assert!(on.wants_hint());
        assert!(on.hint_due(true));
        assert!(!on.hint_due(false));
        assert!(!MusicController::new(MusicPreference::Off).hint_due(true));
    }

    #[test]
    fn blocked_play_keeps_label_on_without_saving() {
        let mut c = MusicController::new(MusicPreference::On);
        assert_eq!(
            c.played(PlayOutcome::Blocked),
            MusicEffects { label_on: true, save: None }
        );
    }

    #[test]
    fn stop_then_play_round_trips_preference() {
        let mut c = MusicController::new(MusicPreference::On);
        assert_eq!(
            c.stopped(),
            MusicEffects { label_on: false, save: Some(MusicPreference::Off) }
        );
        assert_eq!(c.first_pointer(true), MusicAction::Nothing);
        assert_eq!(
            c.played(PlayOutcome::Started),
            MusicEffects { label_on: true, save: Some(MusicPreference::On) }
        );
        assert_eq!(c.preference(), MusicPreference::On);
    }
}
