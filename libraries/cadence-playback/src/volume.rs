//! Volume control
//!
//! Levels are linear (0.0-1.0) because the device applies them directly as
//! output gain. Muting keeps the level so unmuting restores it.

use cadence_storage::VolumeSetting;

/// Volume level plus mute flag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    /// Linear level (0.0-1.0)
    level: f32,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Volume {
    /// Create a volume at `level`, clamped to 0.0-1.0
    ///
    /// Non-finite levels fall back to full volume.
    pub fn new(level: f32) -> Self {
        let level = if level.is_finite() { level.clamp(0.0, 1.0) } else { 1.0 };
        Self { level, muted: false }
    }

    /// Set the level, clamped to 0.0-1.0
    ///
    /// Returns `false` and changes nothing for NaN or infinite input.
    pub fn set_level(&mut self, level: f32) -> bool {
        if !level.is_finite() {
            return false;
        }
        self.level = level.clamp(0.0, 1.0);
        true
    }

    /// Current level (0.0-1.0), regardless of mute
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Mute audio (preserves volume level)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute audio (restores previous volume)
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Gain the device should apply: 0.0 when muted, the level otherwise
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }

    /// Durable representation
    pub fn to_setting(self) -> VolumeSetting {
        VolumeSetting {
            level: self.level,
            muted: self.muted,
        }
    }

    /// Rebuild from the durable representation, clamping stored levels
    pub fn from_setting(setting: VolumeSetting) -> Self {
        let mut volume = Self::new(setting.level);
        volume.muted = setting.muted;
        volume
    }
}
