use super::fallback::FallbackWave;
use super::queue::PlaybackQueue;
use super::registry::ClipRegistry;
use crate::animation::interpolation::quat_about_z;
use crate::animation::{Clip, Mixer};
use crate::gloss::GlossName;
use crate::model::{Avatar, JointPose};
use crate::settings::{FallbackSettings, PlaybackSettings};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::{Instant, interval_at, sleep, sleep_until};

const EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackKind {
    Clip { duration: Duration },
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Started { gloss: GlossName, kind: PlaybackKind },
    Finished { gloss: GlossName },
    Idle,
    ClipRegistered { gloss: GlossName },
    AvatarAttached { name: String },
}

struct PlayerCore {
    queue: PlaybackQueue,
    registry: ClipRegistry,
    mixer: Mixer,
    avatar: Avatar,
    draining: bool,
}

impl PlayerCore {
    /// Claim the drain loop. Returns false when one is already running.
    fn try_start_drain(&mut self) -> bool {
        if self.draining {
            return false;
        }
        self.draining = true;
        true
    }
}

/// Serial gloss player. Cloning yields another handle to the same player.
#[derive(Clone)]
pub struct Player {
    core: Arc<Mutex<PlayerCore>>,
    playback: PlaybackSettings,
    fallback: FallbackSettings,
    events: broadcast::Sender<PlayerEvent>,
}

impl Player {
    pub fn new(playback: PlaybackSettings, fallback: FallbackSettings) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            core: Arc::new(Mutex::new(PlayerCore {
                queue: PlaybackQueue::new(),
                registry: ClipRegistry::new(),
                mixer: Mixer::new(),
                avatar: Avatar::placeholder(),
                draining: false,
            })),
            playback,
            fallback,
            events,
        }
    }

    fn core(&self) -> MutexGuard<'_, PlayerCore> {
        self.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: PlayerEvent) {
        // No receivers is fine
        let _ = self.events.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.events.subscribe()
    }

    /// Queue a gloss and start draining if the player is idle.
    /// Must be called from within a tokio runtime.
    pub fn enqueue(&self, gloss: GlossName) {
        let start = {
            let mut core = self.core();
            log::debug!("Queued gloss '{}' ({} pending)", gloss, core.queue.len() + 1);
            core.queue.enqueue(gloss);
            core.try_start_drain()
        };
        if start {
            tokio::spawn(self.clone().drain());
        }
    }

    /// Register the clip for `gloss`, replacing any earlier one. Replacing
    /// the clip of the gloss that is playing stops it at once, but the queue
    /// still waits out the old clip's duration before moving on.
    pub fn register_clip(&self, gloss: GlossName, clip: Clip) {
        let duration = clip.duration;
        let mut core = self.core();
        let core = &mut *core;
        core.registry
            .register(&mut core.mixer, gloss.clone(), Arc::new(clip));
        log::info!("Registered clip '{}' ({:.2}s)", gloss, duration);
        self.emit(PlayerEvent::ClipRegistered { gloss });
    }

    /// Replace the avatar the mixer and fallback pose.
    pub fn attach_avatar(&self, avatar: Avatar) {
        let name = avatar.name.clone();
        let mut core = self.core();
        log::info!("Attached avatar '{}' with {} joints", name, avatar.joint_count());
        core.avatar = avatar;
        self.emit(PlayerEvent::AvatarAttached { name });
    }

    pub fn has_clip(&self, gloss: &GlossName) -> bool {
        self.core().registry.lookup(gloss).is_some()
    }

    pub fn pending(&self) -> usize {
        self.core().queue.len()
    }

    pub fn is_draining(&self) -> bool {
        self.core().draining
    }

    pub fn active_actions(&self) -> usize {
        self.core().mixer.active_count()
    }

    pub fn avatar_name(&self) -> String {
        self.core().avatar.name.clone()
    }

    pub fn joint_pose(&self, joint: &str) -> Option<JointPose> {
        self.core().avatar.joint(joint).map(|j| j.pose)
    }

    /// Advance the mixer by one frame and pose the avatar.
    pub fn tick(&self, dt: Duration) {
        let mut core = self.core();
        let core = &mut *core;
        core.mixer.update(dt.as_secs_f32());
        core.mixer.apply(&mut core.avatar);
    }

    async fn drain(self) {
        while let Some((gloss, kind)) = self.next_step() {
            match kind {
                PlaybackKind::Clip { duration } => {
                    sleep(duration.saturating_add(self.playback.hold())).await;
                }
                PlaybackKind::Fallback => {
                    self.run_fallback().await;
                }
            }
            log::debug!("Finished gloss '{}'", gloss);
            self.emit(PlayerEvent::Finished { gloss });
        }
    }

    /// Dequeue and start the next gloss, or go idle when the queue is empty.
    fn next_step(&self) -> Option<(GlossName, PlaybackKind)> {
        let mut core = self.core();
        let core = &mut *core;

        let Some(gloss) = core.queue.dequeue() else {
            core.draining = false;
            log::debug!("Playback queue drained");
            self.emit(PlayerEvent::Idle);
            return None;
        };

        // Only one gloss animates at a time
        core.mixer.stop_all_action();

        let action = core
            .registry
            .lookup(&gloss)
            .and_then(|id| core.mixer.action_mut(id));
        let kind = match action {
            Some(action) => {
                action.reset();
                action.play();
                PlaybackKind::Clip {
                    duration: Duration::try_from_secs_f32(action.duration()).unwrap_or_default(),
                }
            }
            None => PlaybackKind::Fallback,
        };

        log::info!("Playing gloss '{}' ({:?})", gloss, kind);
        self.emit(PlayerEvent::Started {
            gloss: gloss.clone(),
            kind: kind.clone(),
        });
        Some((gloss, kind))
    }

    async fn run_fallback(&self) {
        let deadline = Instant::now() + self.fallback.advance();
        let joint = {
            let core = self.core();
            core.avatar
                .find_joint(&self.fallback.joint_candidates)
                .map(str::to_string)
        };
        if joint.is_none() {
            log::debug!("Avatar '{}' has no fallback joint", self.avatar_name());
        }

        let tick = self.fallback.tick();
        let mut ticker = interval_at(Instant::now() + tick, tick);
        for angle in FallbackWave::new(&self.fallback) {
            ticker.tick().await;
            if let Some(joint) = &joint {
                self.core().avatar.set_override(joint, quat_about_z(angle));
            }
        }
        if let Some(joint) = &joint {
            self.core().avatar.clear_override(joint);
        }

        sleep_until(deadline).await;
    }
}
