use super::types::Clip;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    Once,
    Repeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Stopped,
    Playing,
    /// Finished with clamping; the final pose stays applied.
    Holding,
}

/// Runtime playback handle over a shared clip.
#[derive(Debug, Clone)]
pub struct Action {
    clip: Arc<Clip>,
    time: f32,
    state: ActionState,
    pub loop_mode: LoopMode,
    pub clamp_when_finished: bool,
}

impl Action {
    pub fn new(clip: Arc<Clip>) -> Self {
        Self {
            clip,
            time: 0.0,
            state: ActionState::Stopped,
            loop_mode: LoopMode::Repeat,
            clamp_when_finished: false,
        }
    }

    /// A one-shot action that freezes on its last frame.
    pub fn once_clamped(clip: Arc<Clip>) -> Self {
        Self {
            loop_mode: LoopMode::Once,
            clamp_when_finished: true,
            ..Self::new(clip)
        }
    }

    pub fn clip(&self) -> &Clip {
        &self.clip
    }

    pub fn set_clip(&mut self, clip: Arc<Clip>) {
        self.clip = clip;
        self.time = 0.0;
        self.state = ActionState::Stopped;
    }

    pub fn duration(&self) -> f32 {
        self.clip.duration
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    pub fn play(&mut self) {
        if self.state == ActionState::Stopped {
            self.state = ActionState::Playing;
        }
    }

    pub fn stop(&mut self) {
        self.state = ActionState::Stopped;
        self.time = 0.0;
    }

    /// Rewind to the first frame; playing state is kept.
    pub fn reset(&mut self) {
        self.time = 0.0;
        if self.state == ActionState::Holding {
            self.state = ActionState::Playing;
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == ActionState::Playing
    }

    /// Whether this action contributes to the current pose.
    pub fn is_active(&self) -> bool {
        self.state != ActionState::Stopped
    }

    /// Advance by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.state != ActionState::Playing {
            return;
        }

        let duration = self.clip.duration;
        self.time += dt.max(0.0);
        if self.time < duration {
            return;
        }

        match self.loop_mode {
            LoopMode::Repeat if duration > 0.0 => {
                self.time %= duration;
            }
            _ => {
                if self.clamp_when_finished {
                    self.time = duration;
                    self.state = ActionState::Holding;
                } else {
                    self.stop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn clip(duration: f32) -> Arc<Clip> {
        Arc::new(Clip::with_duration("test", duration, Vec::new()))
    }

    #[test]
    fn clamped_action_holds_last_frame() {
        let mut action = Action::once_clamped(clip(1.0));
        action.play();
        action.update(0.6);
        assert!(action.is_running());
        action.update(0.6);
        assert_eq!(action.state(), ActionState::Holding);
        assert_relative_eq!(action.time(), 1.0);
        assert!(action.is_active());
    }

    #[test]
    fn unclamped_one_shot_stops() {
        let mut action = Action::new(clip(1.0));
        action.loop_mode = LoopMode::Once;
        action.play();
        action.update(2.0);
        assert_eq!(action.state(), ActionState::Stopped);
        assert!(!action.is_active());
    }

    #[test]
    fn repeat_wraps_time() {
        let mut action = Action::new(clip(1.0));
        action.play();
        action.update(1.25);
        assert!(action.is_running());
        assert_relative_eq!(action.time(), 0.25, epsilon = 1e-6);
    }

    #[test]
    fn reset_replays_a_held_action() {
        let mut action = Action::once_clamped(clip(0.5));
        action.play();
        action.update(1.0);
        action.reset();
        action.play();
        assert!(action.is_running());
        assert_eq!(action.time(), 0.0);
    }

    #[test]
    fn stop_rewinds() {
        let mut action = Action::once_clamped(clip(1.0));
        action.play();
        action.update(0.5);
        action.stop();
        assert_eq!(action.time(), 0.0);
        assert_eq!(action.state(), ActionState::Stopped);
    }
}
