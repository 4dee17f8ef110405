//! # World Configuration Section
//!
//! The typed config block for one level's entity tracking. The host server
//! owns the config file on disk; this module only defines the section,
//! its defaults, and normalization of missing or nonsensical values.

use obsidian_shared::{DEFAULT_VIEW_RADIUS, TICK_RATE};
use serde::{Deserialize, Serialize};

/// Configuration for one level's entity tracking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Maximum concurrent players, or -1 for unlimited.
    pub max_players: i32,
    /// Radius (world units) inside which a player observes entities.
    pub view_radius: f32,
    /// Simulation tick rate (ticks per second).
    pub tick_rate: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            max_players: -1,
            view_radius: DEFAULT_VIEW_RADIUS,
            tick_rate: TICK_RATE,
        }
    }
}

impl WorldConfig {
    /// Parses the section from TOML.
    ///
    /// Missing fields take their defaults; call [`normalize`](Self::normalize)
    /// afterwards to repair values that parsed but make no sense.
    ///
    /// # Errors
    ///
    /// Returns the TOML parse error for malformed input.
    pub fn from_toml_str(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    /// Serializes the section to TOML.
    ///
    /// # Errors
    ///
    /// Returns the TOML serialization error (practically unreachable for
    /// this struct).
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Repairs nonsensical values in place.
    ///
    /// Returns true if anything changed, so the host knows the file needs
    /// to be rewritten.
    pub fn normalize(&mut self) -> bool {
        let mut changed = false;
        if self.max_players < -1 {
            self.max_players = -1;
            changed = true;
        }
        if !self.view_radius.is_finite() || self.view_radius <= 0.0 {
            self.view_radius = DEFAULT_VIEW_RADIUS;
            changed = true;
        }
        if self.tick_rate == 0 {
            self.tick_rate = TICK_RATE;
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WorldConfig::default();
        assert_eq!(config.max_players, -1);
        assert_eq!(config.tick_rate, TICK_RATE);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = WorldConfig::from_toml_str("max_players = 100\n").unwrap();
        assert_eq!(config.max_players, 100);
        assert_eq!(config.view_radius, DEFAULT_VIEW_RADIUS);
        assert_eq!(config.tick_rate, TICK_RATE);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = WorldConfig {
            max_players: 64,
            view_radius: 96.0,
            tick_rate: 10,
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(WorldConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_normalize_repairs_bad_values() {
        let mut config = WorldConfig {
            max_players: -5,
            view_radius: f32::NAN,
            tick_rate: 0,
        };
        assert!(config.normalize());
        assert_eq!(config, WorldConfig::default());
        assert!(!config.normalize());
    }
}
