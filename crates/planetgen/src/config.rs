use crate::error::{PlanetGenError, Result};
use glam::Vec3;
use log::warn;
use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

pub const DEFAULT_CONFIG_FILE: &str = "planetgen_config.toml";

static CONFIG: OnceLock<Mutex<PlanetGenConfig>> = OnceLock::new();

/// Get a copy of the current configuration, loading from file if not already loaded.
/// A missing or unreadable file falls back to the defaults.
pub fn get_config() -> PlanetGenConfig {
    let config_mutex = CONFIG.get_or_init(|| {
        let config = PlanetGenConfig::load_from_file(DEFAULT_CONFIG_FILE).unwrap_or_else(|e| {
            warn!("Using default planetgen config: {e}");
            PlanetGenConfig::default()
        });
        Mutex::new(config)
    });
    match config_mutex.lock() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

pub fn reload_config() -> Result<()> {
    reload_config_from_file(DEFAULT_CONFIG_FILE)
}

/// Replace the process-wide configuration with the contents of `path`.
pub fn reload_config_from_file(path: impl AsRef<Path>) -> Result<()> {
    let new_config = PlanetGenConfig::load_from_file(path)?;
    set_config(new_config);
    Ok(())
}

pub fn set_config(config: PlanetGenConfig) {
    let config_mutex = CONFIG.get_or_init(|| Mutex::new(config.clone()));
    match config_mutex.lock() {
        Ok(mut guard) => *guard = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Perlin noise sampled on the unit sphere.
#[derive(Debug, Clone)]
pub struct NoiseConfig {
    perlin: Perlin,
    frequency: f32,
    amplitude: f32,
}

impl NoiseConfig {
    pub fn new(seed: u32, frequency: f32, amplitude: f32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            frequency,
            amplitude,
        }
    }

    pub fn sample(&self, dir: Vec3) -> f32 {
        let p = dir * self.frequency;
        self.perlin.get([p.x as f64, p.y as f64, p.z as f64]) as f32 * self.amplitude
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetGenConfig {
    pub mapping: MappingConfig,
    pub clouds: CloudConfig,
    pub render: RenderConfig,
}

/// Face sizes and fractal variation used when building surface grids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingConfig {
    pub base_face_size: usize,
    pub terrestrial_face_size: usize,
    pub dwarf_face_size: usize,
    pub small_body_face_size: usize,
    pub jovian_face_size: usize,
    pub height_variation: i64,
    pub small_body_variation: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudConfig {
    pub base_face_size: usize,
    pub final_face_size: usize,
    pub variation: i64,
    pub noise_frequency: f32,
    pub noise_amplitude: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub map_width: u32,
    pub orbit_image_size: u32,
}

impl Default for PlanetGenConfig {
    fn default() -> Self {
        Self {
            mapping: MappingConfig {
                base_face_size: 3,
                terrestrial_face_size: 24,
                dwarf_face_size: 24,
                small_body_face_size: 12,
                jovian_face_size: 12,
                height_variation: 24,
                small_body_variation: 12,
            },
            clouds: CloudConfig {
                base_face_size: 12,
                final_face_size: 48,
                variation: 48,
                noise_frequency: 3.0,
                noise_amplitude: 8.0,
            },
            render: RenderConfig {
                map_width: 1024,
                orbit_image_size: 1024,
            },
        }
    }
}

impl PlanetGenConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| PlanetGenError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| PlanetGenError::Config(e.to_string()))
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| PlanetGenError::Config(e.to_string()))?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| PlanetGenError::Config(format!("{}: {e}", path.as_ref().display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_survives_toml() {
        let config = PlanetGenConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("[mapping]"));
        assert!(text.contains("terrestrial_face_size = 24"));
        assert_eq!(PlanetGenConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_a_config_error() {
        let err = PlanetGenConfig::load_from_file("/nonexistent/planetgen.toml").unwrap_err();
        assert!(matches!(err, PlanetGenError::Config(_)));
    }

    #[test]
    fn test_bad_toml_is_a_config_error() {
        let err = PlanetGenConfig::from_toml("[mapping]\nbase_face_size = \"three\"").unwrap_err();
        assert!(matches!(err, PlanetGenError::Config(_)));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("planetgen-{}.toml", std::process::id()));
        let mut config = PlanetGenConfig::default();
        config.render.map_width = 512;
        config.save_to_file(&path).unwrap();
        let loaded = PlanetGenConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.render.map_width, 512);
    }

    #[test]
    fn test_noise_scales_with_amplitude() {
        let noise = NoiseConfig::new(42, 3.0, 8.0);
        for dir in [Vec3::X, Vec3::Y, Vec3::Z, Vec3::new(0.6, 0.0, 0.8)] {
            let v = noise.sample(dir);
            assert!(v.abs() <= 10.0, "{v}");
        }
    }
}
