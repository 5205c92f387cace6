use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::entities::FieldSpec;

pub const CONFIG_ENV_VAR: &str = "SHAPE_MATCH_CONFIG";

/// Game tuning.  Every field is optional in the JSON file; missing ones take
/// the defaults below.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub field_width: f32,
    pub field_height: f32,
    pub shape_size: f32,
    /// Highest type id the spawner produces (inclusive), so the default of 6
    /// yields the seven named kinds.
    pub type_count: u8,
    pub max_shapes: usize,
    pub spawn_interval_ms: u64,
    pub remove_interval_ms: u64,
    pub initial_gravity: u32,
    pub initial_spawn_rate: u32,
    pub frame_ms: u64,
    pub log_file: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 1000.0,
            field_height: 550.0,
            shape_size: 30.0,
            type_count: 6,
            max_shapes: 999,
            spawn_interval_ms: 1000,
            remove_interval_ms: 200,
            initial_gravity: 1,
            initial_spawn_rate: 1,
            frame_ms: 33,
            log_file: "shape_match.log".to_string(),
        }
    }
}

impl GameConfig {
    pub fn field_spec(&self) -> FieldSpec {
        FieldSpec {
            width: self.field_width,
            height: self.field_height,
            shape_size: self.shape_size,
            type_count: self.type_count,
            max_shapes: self.max_shapes,
        }
    }

    /// Field area in square units, shown in the top panel.
    pub fn field_area(&self) -> u64 {
        (self.field_width * self.field_height).round() as u64
    }
}

pub fn load_config_from_path(path: &Path) -> Result<GameConfig, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    parse_config(&raw).map_err(|e| format!("{}: {e}", path.display()))
}

pub fn parse_config(raw: &str) -> Result<GameConfig, String> {
    let config: GameConfig =
        serde_json::from_str(raw).map_err(|e| format!("Failed to parse config JSON: {e}"))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &GameConfig) -> Result<(), String> {
    if config.field_width <= 0.0 || config.field_height <= 0.0 {
        return Err("Config validation failed: field dimensions must be > 0".to_string());
    }
    if config.shape_size <= 0.0 {
        return Err("Config validation failed: shape_size must be > 0".to_string());
    }
    if config.max_shapes == 0 {
        return Err("Config validation failed: max_shapes must be > 0".to_string());
    }
    if config.spawn_interval_ms == 0 || config.remove_interval_ms == 0 || config.frame_ms == 0 {
        return Err("Config validation failed: intervals must be > 0".to_string());
    }
    Ok(())
}
