//! Interaction state management.
//!
//! State machine for the canvas interaction modes and the automatic
//! slow-rotation that fills the idle time: any interaction suspends
//! auto-rotation and starting one cancels a pending resume; 30 seconds
//! after the last interaction ends, rotation resumes. Hovering the
//! tooltip also suspends rotation so the reader can keep up.

/// Current interaction mode on the canvas.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InteractionPhase {
    /// No active interaction; auto-rotation may run.
    #[default]
    Idle,
    /// Pointer drag rotating the globe.
    Dragging,
    /// Scroll/pinch zoom in progress.
    Zooming,
}

impl InteractionPhase {
    pub fn label(&self) -> &'static str {
        match self {
            InteractionPhase::Idle => "Idle",
            InteractionPhase::Dragging => "Dragging",
            InteractionPhase::Zooming => "Zooming",
        }
    }
}

/// Seconds of idle time before auto-rotation resumes.
pub const IDLE_RESUME_SECS: f64 = 30.0;

/// Full interaction state container.
#[derive(Debug, Clone)]
pub struct InteractionState {
    /// Current phase of the machine.
    pub phase: InteractionPhase,
    /// Whether the globe is allowed to auto-rotate right now.
    auto_rotate: bool,
    /// When auto-rotation should resume (seconds on the UI clock).
    resume_at: Option<f64>,
    /// Whether the pointer is over the tooltip.
    tooltip_hovered: bool,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            phase: InteractionPhase::Idle,
            auto_rotate: true,
            resume_at: None,
            tooltip_hovered: false,
        }
    }
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A drag started: stop rotating and cancel any pending resume.
    pub fn begin_drag(&mut self) {
        self.phase = InteractionPhase::Dragging;
        self.suspend();
    }

    /// The drag ended: idle again, rotation resumes after the timeout.
    pub fn end_drag(&mut self, now: f64) {
        self.phase = InteractionPhase::Idle;
        self.schedule_resume(now);
    }

    /// A zoom gesture started.
    pub fn begin_zoom(&mut self) {
        self.phase = InteractionPhase::Zooming;
        self.suspend();
    }

    /// The zoom gesture ended.
    pub fn end_zoom(&mut self, now: f64) {
        self.phase = InteractionPhase::Idle;
        self.schedule_resume(now);
    }

    /// The pointer moved onto the tooltip: hold still while it's read.
    pub fn tooltip_entered(&mut self) {
        self.tooltip_hovered = true;
        self.suspend();
    }

    /// The pointer left the tooltip.
    pub fn tooltip_left(&mut self, now: f64) {
        self.tooltip_hovered = false;
        self.schedule_resume(now);
    }

    /// Re-enables rotation immediately (the reset-view control).
    pub fn resume_now(&mut self) {
        self.phase = InteractionPhase::Idle;
        self.auto_rotate = true;
        self.resume_at = None;
    }

    /// Advances the idle timer. Call once per frame.
    pub fn tick(&mut self, now: f64) {
        if self.phase != InteractionPhase::Idle || self.tooltip_hovered {
            return;
        }
        if let Some(at) = self.resume_at {
            if now >= at {
                self.auto_rotate = true;
                self.resume_at = None;
            }
        }
    }

    /// Whether the globe should auto-rotate this frame.
    pub fn is_auto_rotating(&self) -> bool {
        self.auto_rotate && self.phase == InteractionPhase::Idle && !self.tooltip_hovered
    }

    /// Seconds until rotation resumes, if a resume is pending.
    pub fn resume_countdown(&self, now: f64) -> Option<f64> {
        self.resume_at.map(|at| (at - now).max(0.0))
    }

    fn suspend(&mut self) {
        self.auto_rotate = false;
        self.resume_at = None;
    }

    fn schedule_resume(&mut self, now: f64) {
        self.resume_at = Some(now + IDLE_RESUME_SECS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotates_by_default() {
        let state = InteractionState::new();
        assert!(state.is_auto_rotating());
        assert_eq!(state.phase, InteractionPhase::Idle);
    }

    #[test]
    fn drag_suspends_and_resumes_after_timeout() {
        let mut state = InteractionState::new();

        state.begin_drag();
        assert_eq!(state.phase, InteractionPhase::Dragging);
        assert!(!state.is_auto_rotating());

        state.end_drag(100.0);
        assert_eq!(state.phase, InteractionPhase::Idle);
        assert!(!state.is_auto_rotating());
        assert_eq!(state.resume_countdown(100.0), Some(IDLE_RESUME_SECS));

        // Just before the timeout: still suspended.
        state.tick(100.0 + IDLE_RESUME_SECS - 0.1);
        assert!(!state.is_auto_rotating());

        state.tick(100.0 + IDLE_RESUME_SECS);
        assert!(state.is_auto_rotating());
        assert_eq!(state.resume_countdown(200.0), None);
    }

    #[test]
    fn new_interaction_cancels_a_pending_resume() {
        let mut state = InteractionState::new();
        state.begin_drag();
        state.end_drag(0.0);

        // A zoom starts before the resume fires.
        state.begin_zoom();
        assert_eq!(state.phase, InteractionPhase::Zooming);

        // The old deadline passing must not resume mid-zoom.
        state.tick(IDLE_RESUME_SECS + 1.0);
        assert!(!state.is_auto_rotating());

        state.end_zoom(40.0);
        state.tick(40.0 + IDLE_RESUME_SECS);
        assert!(state.is_auto_rotating());
    }

    #[test]
    fn tooltip_hover_holds_rotation() {
        let mut state = InteractionState::new();
        state.tooltip_entered();
        assert!(!state.is_auto_rotating());

        // Ticking while hovered never resumes.
        state.tick(1_000.0);
        assert!(!state.is_auto_rotating());

        state.tooltip_left(1_000.0);
        state.tick(1_000.0 + IDLE_RESUME_SECS);
        assert!(state.is_auto_rotating());
    }

    #[test]
    fn resume_now_short_circuits_the_timer() {
        let mut state = InteractionState::new();
        state.begin_drag();
        state.end_drag(0.0);
        state.resume_now();
        assert!(state.is_auto_rotating());
    }
}
