//! Engine configuration file and command-line overrides

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::Path;
use stereogram_synth::{ShiftParams, TiwParams};

/// Parameters for both engines, as stored in `stereogram.toml`.
///
/// Missing tables and keys fall back to the engine defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StereogramConfig {
    pub tiw: TiwParams,
    pub shift: ShiftParams,
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct ParamOverrides {
    /// Output resolution in dots per inch (TIW engine)
    #[arg(long)]
    pub dpi: Option<f32>,

    /// Depth of field in (0, 1] (TIW engine)
    #[arg(long)]
    pub mu: Option<f32>,

    /// Width of the repeating panel in pixels (shift engine)
    #[arg(long)]
    pub panel_size: Option<u32>,

    /// Fraction of the panel used for depth shifting (shift engine)
    #[arg(long)]
    pub shift_range: Option<f32>,
}

impl StereogramConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: StereogramConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }

    /// Load `path` if given, otherwise start from the defaults, then apply
    /// the overrides and validate the result.
    pub fn resolve(path: Option<&Path>, overrides: &ParamOverrides) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, overrides: &ParamOverrides) {
        if let Some(dpi) = overrides.dpi {
            self.tiw.dpi = dpi;
        }
        if let Some(mu) = overrides.mu {
            self.tiw.mu = mu;
        }
        if let Some(panel_size) = overrides.panel_size {
            self.shift.panel_size = panel_size;
        }
        if let Some(shift_range) = overrides.shift_range {
            self.shift.shift_range = shift_range;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.tiw.validate().context("Invalid [tiw] parameters")?;
        self.shift.validate().context("Invalid [shift] parameters")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_roundtrip() {
        let mut config = StereogramConfig::default();
        config.tiw.dpi = 96.0;
        config.shift.panel_size = 100;
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("[tiw]"));
        assert!(text.contains("[shift]"));
        let back: StereogramConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: StereogramConfig = toml::from_str("[shift]\nshift_range = 0.5\n").unwrap();
        assert_eq!(config.tiw, TiwParams::default());
        assert_eq!(config.shift.panel_size, 64);
        assert_eq!(config.shift.shift_range, 0.5);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config: StereogramConfig =
            toml::from_str("[tiw]\ndpi = 96.0\nmu = 0.5\n[shift]\npanel_size = 80\n").unwrap();
        config.apply_overrides(&ParamOverrides {
            dpi: Some(150.0),
            panel_size: Some(32),
            ..Default::default()
        });
        assert_eq!(config.tiw.dpi, 150.0);
        assert_eq!(config.tiw.mu, 0.5);
        assert_eq!(config.shift.panel_size, 32);
        assert_eq!(config.shift.shift_range, 0.3);
    }

    #[test]
    fn test_resolve_rejects_invalid() {
        let bad = ParamOverrides {
            mu: Some(2.0),
            ..Default::default()
        };
        let err = StereogramConfig::resolve(None, &bad).unwrap_err();
        assert!(format!("{err:#}").contains("mu"));
        let huge_dpi = ParamOverrides {
            dpi: Some(1.0e10),
            ..Default::default()
        };
        let err = StereogramConfig::resolve(None, &huge_dpi).unwrap_err();
        assert!(format!("{err:#}").contains("exceeds"));
        assert!(StereogramConfig::resolve(None, &ParamOverrides::default()).is_ok());
    }

    #[test]
    fn test_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("stereogram_cfg_{}.toml", std::process::id()));
        let mut config = StereogramConfig::default();
        config.shift.shift_range = 0.25;
        config.save_to_file(&path).unwrap();
        let back = StereogramConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(back, config);
    }
}
