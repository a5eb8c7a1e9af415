//! Game settings and preferences
//!
//! Stored as JSON next to the executable (or wherever the host points).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How player input maps to ship controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlScheme {
    /// Rotate with left/right, thrust/brake with up/down, fire and hook on keys
    Keyboard,
    /// Face the cursor, thrust/brake on W/S, fire and hook on mouse buttons
    #[default]
    MouseAim,
}

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particle effects for this preset
    pub fn max_particle_effects(&self) -> usize {
        match self {
            QualityPreset::Low => 16,
            QualityPreset::Medium => 64,
            QualityPreset::High => 256,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Input mapping
    pub control_scheme: ControlScheme,
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (explosions, thrust puffs)
    pub particles: bool,
    /// Hit shake on damaged objects
    pub screen_shake: bool,
    /// Draw the level path polyline (debug aid)
    pub show_path: bool,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            control_scheme: ControlScheme::MouseAim,
            quality: QualityPreset::Medium,
            particles: true,
            screen_shake: true,
            show_path: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle effect cap (0 when particles are disabled)
    pub fn max_particle_effects(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particle_effects()
        }
    }

    /// Read settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Read settings, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings: {}", e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| Error::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "control_scheme": "Keyboard", "seed": 7 }"#).unwrap();
        assert_eq!(settings.control_scheme, ControlScheme::Keyboard);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.quality, QualityPreset::Medium);
        assert!(settings.particles);
    }

    #[test]
    fn test_particles_disabled_caps_to_zero() {
        let settings = Settings {
            particles: false,
            ..Settings::from_preset(QualityPreset::High)
        };
        assert_eq!(settings.max_particle_effects(), 0);
        assert_eq!(Settings::from_preset(QualityPreset::Low).max_particle_effects(), 16);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("path_runner_settings_{}.json", std::process::id()));
        let settings = Settings {
            show_path: true,
            seed: Some(42),
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("/definitely/not/here/settings.json");
        assert!(matches!(Settings::load(path), Err(Error::SettingsIo { .. })));
        assert_eq!(Settings::load_or_default(path), Settings::default());
    }

    #[test]
    fn test_quality_names() {
        assert_eq!(QualityPreset::from_name("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::High.as_str(), "High");
        assert_eq!(QualityPreset::from_name("ultra"), None);
    }
}
