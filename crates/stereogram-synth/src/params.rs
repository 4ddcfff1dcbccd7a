//! Algorithm parameters
//!
//! Both parameter sets are plain configuration values: they carry no
//! per-run state and deserialize from partial TOML, missing fields taking
//! their defaults.

use crate::{SynthError, SynthResult};
use serde::{Deserialize, Serialize};

/// Default output resolution in dots per inch.
pub const DEFAULT_DPI: f32 = 72.0;

/// Default eye separation in inches.
pub const DEFAULT_EYE_SEPARATION_INCHES: f32 = 2.5;

/// Default depth of field, as a fraction of the viewing distance.
pub const DEFAULT_MU: f32 = 1.0 / 3.0;

/// Largest eye separation in pixels accepted by [`TiwParams::validate`].
pub const MAX_EYE_SEP: f32 = u16::MAX as f32;

/// Default panel width in pixels for the shift engine.
pub const DEFAULT_PANEL_SIZE: u32 = 64;

/// Default fraction of the panel width used for depth shifting.
pub const DEFAULT_SHIFT_RANGE: f32 = 0.3;

/// Parameters of the Thimbleby-Inglis-Witten engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiwParams {
    /// Output resolution in dots per inch
    pub dpi: f32,
    /// Distance between the viewer's eyes in inches
    pub eye_separation_inches: f32,
    /// Depth of field (fraction of viewing distance).
    ///
    /// Values near 1 suit viewing small parts of the image, values much
    /// smaller than 1 suit viewing the whole image.
    pub mu: f32,
}

impl Default for TiwParams {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            eye_separation_inches: DEFAULT_EYE_SEPARATION_INCHES,
            mu: DEFAULT_MU,
        }
    }
}

impl TiwParams {
    /// Create parameters for a specific output resolution
    pub fn with_dpi(dpi: f32) -> Self {
        Self {
            dpi,
            ..Default::default()
        }
    }

    /// Set the depth of field
    pub fn mu(mut self, mu: f32) -> Self {
        self.mu = mu;
        self
    }

    /// Eye separation in pixels, `round(eye_separation_inches * dpi)`.
    ///
    /// 180 with the defaults.
    pub fn eye_sep(&self) -> f32 {
        (self.eye_separation_inches * self.dpi).round()
    }

    /// Check that every value is finite and in range.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::InvalidParameters`] naming the first bad value.
    pub fn validate(&self) -> SynthResult<()> {
        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(SynthError::InvalidParameters(format!(
                "dpi must be positive, got {}",
                self.dpi
            )));
        }
        if !self.eye_separation_inches.is_finite() || self.eye_separation_inches <= 0.0 {
            return Err(SynthError::InvalidParameters(format!(
                "eye separation must be positive, got {} in",
                self.eye_separation_inches
            )));
        }
        if self.eye_sep() > MAX_EYE_SEP {
            return Err(SynthError::InvalidParameters(format!(
                "eye separation of {} px exceeds {} px",
                self.eye_sep(),
                MAX_EYE_SEP
            )));
        }
        if self.eye_sep() < 1.0 {
            return Err(SynthError::InvalidParameters(format!(
                "eye separation rounds to {} px at {} dpi",
                self.eye_sep(),
                self.dpi
            )));
        }
        if !self.mu.is_finite() || self.mu <= 0.0 || self.mu > 1.0 {
            return Err(SynthError::InvalidParameters(format!(
                "mu must be in (0, 1], got {}",
                self.mu
            )));
        }
        Ok(())
    }
}

/// Parameters of the panel-shifting engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftParams {
    /// Width of the repeating background panel in pixels
    pub panel_size: u32,
    /// Proportion of the panel width used for shifting to create depth
    pub shift_range: f32,
}

impl Default for ShiftParams {
    fn default() -> Self {
        Self {
            panel_size: DEFAULT_PANEL_SIZE,
            shift_range: DEFAULT_SHIFT_RANGE,
        }
    }
}

impl ShiftParams {
    /// Create parameters with a specific panel width
    pub fn with_panel_size(panel_size: u32) -> Self {
        Self {
            panel_size,
            ..Default::default()
        }
    }

    /// Set the shift range
    pub fn shift_range(mut self, shift_range: f32) -> Self {
        self.shift_range = shift_range;
        self
    }

    /// Check that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::InvalidParameters`] naming the first bad value.
    pub fn validate(&self) -> SynthResult<()> {
        if self.panel_size == 0 {
            return Err(SynthError::InvalidParameters(
                "panel size must be at least 1 px".to_string(),
            ));
        }
        if !self.shift_range.is_finite() || !(0.0..=1.0).contains(&self.shift_range) {
            return Err(SynthError::InvalidParameters(format!(
                "shift range must be in [0, 1], got {}",
                self.shift_range
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let tiw = TiwParams::default();
        assert_eq!(tiw.dpi, 72.0);
        assert_eq!(tiw.eye_sep(), 180.0);
        assert!((tiw.mu - 1.0 / 3.0).abs() < 1e-7);
        assert!(tiw.validate().is_ok());

        let shift = ShiftParams::default();
        assert_eq!(shift.panel_size, 64);
        assert_eq!(shift.shift_range, 0.3);
        assert!(shift.validate().is_ok());
    }

    #[test]
    fn test_tiw_validation() {
        assert!(TiwParams::with_dpi(0.0).validate().is_err());
        assert!(TiwParams::with_dpi(f32::NAN).validate().is_err());
        assert!(TiwParams::with_dpi(0.1).validate().is_err());
        assert!(TiwParams::with_dpi(1.0e10).validate().is_err());
        assert!(TiwParams::with_dpi(f32::MAX).validate().is_err());
        // 2.5 in at 26214 dpi rounds to 65535 px, the largest accepted
        assert!(TiwParams::with_dpi(26214.0).validate().is_ok());
        assert!(TiwParams::default().mu(0.0).validate().is_err());
        assert!(TiwParams::default().mu(1.5).validate().is_err());
        assert!(TiwParams::default().mu(1.0).validate().is_ok());
        let p = TiwParams {
            eye_separation_inches: -1.0,
            ..Default::default()
        };
        assert!(matches!(p.validate(), Err(SynthError::InvalidParameters(_))));
    }

    #[test]
    fn test_shift_validation() {
        assert!(ShiftParams::with_panel_size(0).validate().is_err());
        assert!(ShiftParams::default().shift_range(-0.1).validate().is_err());
        assert!(ShiftParams::default().shift_range(1.1).validate().is_err());
        assert!(ShiftParams::default().shift_range(1.0).validate().is_ok());
        assert!(ShiftParams::with_panel_size(1).validate().is_ok());
    }

    #[test]
    fn test_with_dpi_scales_eye_sep() {
        assert_eq!(TiwParams::with_dpi(100.0).eye_sep(), 250.0);
        assert_eq!(TiwParams::with_dpi(75.0).eye_sep(), 188.0);
    }
}
