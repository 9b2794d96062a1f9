use crate::settings::FallbackSettings;

/// Arm-wave angles, one per tick, used when a gloss has no clip.
///
/// The phase advances by a fixed step each tick and the angle is
/// `sin(phase) * amplitude`. The tick that carries the phase past the
/// limit is the last one.
#[derive(Debug, Clone)]
pub struct FallbackWave {
    amplitude: f32,
    step: f32,
    limit: f32,
    phase: f32,
    done: bool,
}

impl FallbackWave {
    pub fn new(settings: &FallbackSettings) -> Self {
        Self {
            amplitude: settings.amplitude,
            step: settings.phase_step,
            limit: settings.phase_limit,
            phase: 0.0,
            done: false,
        }
    }
}

impl Iterator for FallbackWave {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.done {
            return None;
        }
        self.phase += self.step;
        if self.phase > self.limit || self.step <= 0.0 {
            self.done = true;
        }
        Some(self.phase.sin() * self.amplitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_wave_has_thirteen_ticks_within_amplitude() {
        let settings = FallbackSettings::default();
        let angles: Vec<f32> = FallbackWave::new(&settings).collect();
        assert_eq!(angles.len(), 13);
        assert!(angles.iter().all(|a| a.abs() <= settings.amplitude));
        assert!(angles[0] > 0.0);
    }

    #[test]
    fn non_positive_step_still_terminates() {
        let settings = FallbackSettings {
            phase_step: 0.0,
            ..Default::default()
        };
        assert_eq!(FallbackWave::new(&settings).count(), 1);
    }
}
