/// Run state for a self-resubmitting frame loop.
///
/// The host requests a frame whenever [`LoopControl::start`] or
/// [`LoopControl::should_continue`] returns `true`, and calls
/// [`LoopControl::begin_frame`] when the callback fires. At most one frame is
/// ever outstanding.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoopControl {
    running: bool,
    scheduled: bool,
    frames: u64,
}

impl LoopControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the loop running. Returns `true` if the caller must request a
    /// frame, `false` if one is already outstanding.
    pub fn start(&mut self) -> bool {
        self.running = true;
        if self.scheduled {
            return false;
        }
        self.scheduled = true;
        true
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn begin_frame(&mut self) {
        self.scheduled = false;
    }

    /// Records a completed frame and reports whether to schedule another.
    pub fn should_continue(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.frames = self.frames.wrapping_add(1);
        self.scheduled = true;
        true
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::LoopControl;

    #[test]
    fn start_requests_only_once() {
        let mut ctl = LoopControl::new();
        assert!(ctl.start());
        assert!(!ctl.start());
        assert!(ctl.is_running());
    }

    #[test]
    fn stop_ends_resubmission() {
        let mut ctl = LoopControl::new();
        ctl.start();
        ctl.begin_frame();
        assert!(ctl.should_continue());
        ctl.begin_frame();
        assert!(ctl.should_continue());
        ctl.stop();
        ctl.begin_frame();
        assert!(!ctl.should_continue());
        assert_eq!(ctl.frames(), 2);
    }

    #[test]
    fn restart_while_a_frame_is_pending_does_not_double_schedule() {
        let mut ctl = LoopControl::new();
        ctl.start();
        ctl.begin_frame();
        assert!(ctl.should_continue());
        ctl.stop();
        // The already-requested frame is still outstanding.
        assert!(!ctl.start());
        ctl.begin_frame();
        assert!(ctl.should_continue());
    }

    #[test]
    fn restart_after_the_loop_drained_requests_again() {
        let mut ctl = LoopControl::new();
        ctl.start();
        ctl.stop();
        ctl.begin_frame();
        assert!(!ctl.should_continue());
        assert!(ctl.start());
    }
}
