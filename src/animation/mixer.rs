// Mixer: owns every action and drives them each frame

use super::action::Action;
use super::types::Clip;
use crate::model::Avatar;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(usize);

pub struct Mixer {
    actions: Vec<Action>,
}

impl Mixer {
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    pub fn add_action(&mut self, action: Action) -> ActionId {
        let id = ActionId(self.actions.len());
        self.actions.push(action);
        id
    }

    /// Swap the clip behind an existing action. The action is stopped.
    pub fn replace_clip(&mut self, id: ActionId, clip: Arc<Clip>) {
        if let Some(action) = self.actions.get_mut(id.0) {
            action.set_clip(clip);
        }
    }

    pub fn action(&self, id: ActionId) -> Option<&Action> {
        self.actions.get(id.0)
    }

    pub fn action_mut(&mut self, id: ActionId) -> Option<&mut Action> {
        self.actions.get_mut(id.0)
    }

    pub fn stop_all_action(&mut self) {
        for action in &mut self.actions {
            action.stop();
        }
    }

    pub fn active_count(&self) -> usize {
        self.actions.iter().filter(|a| a.is_active()).count()
    }

    /// Advance every playing action by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        for action in &mut self.actions {
            action.update(dt);
        }
    }

    /// Reset the avatar to rest, sample active actions onto it, then
    /// apply procedural overrides.
    pub fn apply(&self, avatar: &mut Avatar) {
        avatar.reset_pose();
        for action in self.actions.iter().filter(|a| a.is_active()) {
            let time = action.time();
            for track in &action.clip().tracks {
                if let Some(value) = track.sample(time) {
                    avatar.set_property(&track.joint, track.property, &value);
                }
            }
        }
        avatar.apply_overrides();
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new()
    }
}
