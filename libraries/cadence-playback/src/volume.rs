//! Volume control
//!
//! The transport surface speaks percent (0-100); the output primitive takes a
//! linear level in `[0.0, 1.0]`.

/// Volume controller with linear scaling
#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,

    /// Cached linear level handed to the output
    linear_gain: f32,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume (0-100, clamped)
    pub fn new(level: u8) -> Self {
        let level = level.min(100);
        Self {
            level,
            linear_gain: Self::calculate_linear_gain(level),
        }
    }

    /// Set volume level (0-100)
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
        self.linear_gain = Self::calculate_linear_gain(self.level);
    }

    /// Get current volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Linear level for the output primitive
    pub fn gain(&self) -> f32 {
        self.linear_gain
    }

    /// Convert volume percentage to a linear level
    ///
    /// - 0%   → 0.0
    /// - 50%  → 0.5
    /// - 100% → 1.0
    fn calculate_linear_gain(level: u8) -> f32 {
        f32::from(level) / 100.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_volume() {
        let vol = Volume::new(80);
        assert_eq!(vol.level(), 80);
        assert_eq!(Volume::default().level(), 100);
    }

    #[test]
    fn set_volume_level() {
        let mut vol = Volume::new(50);
        assert_eq!(vol.level(), 50);

        vol.set_level(75);
        assert_eq!(vol.level(), 75);

        // Clamp to 100
        vol.set_level(150);
        assert_eq!(vol.level(), 100);
    }

    #[test]
    fn gain_is_exact_at_reference_levels() {
        assert_eq!(Volume::new(0).gain(), 0.0);
        assert_eq!(Volume::new(50).gain(), 0.5);
        assert_eq!(Volume::new(100).gain(), 1.0);
    }

    #[test]
    fn gain_is_monotonic() {
        let gains: Vec<f32> = (0..=100).map(|l| Volume::new(l).gain()).collect();
        assert!(gains.windows(2).all(|w| w[0] < w[1]));
    }
}
