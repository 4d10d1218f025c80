//! Volume level with logarithmic gain
//!
//! The level (0-100) is what gets persisted; the gain is what the external
//! transport multiplies samples by. 0% maps to silence, 1-100% to -60..0 dB.

use cadence_core::MAX_VOLUME;

/// Volume level plus mute flag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    level: u8,
    muted: bool,
    linear_gain: f32,
}

impl Volume {
    /// Start unmuted at `level` (clamped to 100)
    pub fn new(level: u8) -> Self {
        let level = level.min(MAX_VOLUME);
        Self {
            level,
            muted: false,
            linear_gain: level_to_gain(level),
        }
    }

    /// Set level (clamped to 100)
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(MAX_VOLUME);
        self.linear_gain = level_to_gain(self.level);
    }

    /// Current level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Flip mute; the level is kept
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Linear gain for the transport, 0.0 while muted
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.linear_gain
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(MAX_VOLUME)
    }
}

/// gain = 10^((level - 100) * 0.6 / 20)
fn level_to_gain(level: u8) -> f32 {
    if level == 0 {
        return 0.0;
    }
    let db = (f32::from(level) - 100.0) * 0.6;
    10.0_f32.powf(db / 20.0)
}
