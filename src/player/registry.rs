use crate::animation::{Action, ActionId, Clip, Mixer};
use crate::gloss::GlossName;
use std::collections::HashMap;
use std::sync::Arc;

/// Gloss name to the mixer action playing its clip.
#[derive(Debug, Default)]
pub struct ClipRegistry {
    entries: HashMap<GlossName, ActionId>,
}

impl ClipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a one-shot, clamped action for `clip` under `gloss`. A second
    /// registration for the same gloss swaps the clip in place.
    pub fn register(&mut self, mixer: &mut Mixer, gloss: GlossName, clip: Arc<Clip>) -> ActionId {
        if let Some(&id) = self.entries.get(&gloss) {
            mixer.replace_clip(id, clip);
            return id;
        }
        let id = mixer.add_action(Action::once_clamped(clip));
        self.entries.insert(gloss, id);
        id
    }

    pub fn lookup(&self, gloss: &GlossName) -> Option<ActionId> {
        self.entries.get(gloss).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::LoopMode;

    fn clip(name: &str, duration: f32) -> Arc<Clip> {
        Arc::new(Clip::with_duration(name, duration, Vec::new()))
    }

    #[test]
    fn registered_actions_play_once_and_clamp() {
        let mut mixer = Mixer::new();
        let mut registry = ClipRegistry::new();
        let id = registry.register(&mut mixer, "clap".into(), clip("clap", 1.0));

        assert_eq!(registry.lookup(&"clap".into()), Some(id));
        let action = mixer.action(id).unwrap();
        assert_eq!(action.loop_mode, LoopMode::Once);
        assert!(action.clamp_when_finished);
    }

    #[test]
    fn lookup_of_unknown_gloss_is_none() {
        let registry = ClipRegistry::new();
        assert!(registry.lookup(&"bogus-gloss".into()).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn re_registering_overwrites_the_clip() {
        let mut mixer = Mixer::new();
        let mut registry = ClipRegistry::new();
        let first = registry.register(&mut mixer, "yes".into(), clip("yes", 1.0));
        let second = registry.register(&mut mixer, "yes".into(), clip("yes", 2.0));

        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        assert_eq!(mixer.action_count(), 1);
        assert_eq!(mixer.action(second).unwrap().duration(), 2.0);
    }
}
