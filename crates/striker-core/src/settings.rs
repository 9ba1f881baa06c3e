use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::Vector2;

/// Tunables of the decision engine and the command parser.
///
/// Distances are in field units, angles in degrees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorSettings {
    /// Distance at which the ball counts as "at the feet", and a point as reached.
    pub dist_ball: f64,
    /// Distance at which a ball-carrying goal counts as reached.
    pub dist_flag: f64,
    /// Largest bearing at which the agent dashes instead of turning first.
    pub follow_angle: f64,
    /// Largest distance to the opponent goal from which the agent shoots.
    pub max_goal_dist: f64,
    /// Kick power used when shooting at the goal.
    pub kick_force: f64,
    /// Kick power used to push the ball ahead while dribbling.
    pub dribble_force: f64,
    /// Turn moment used while searching for a target that is not in view.
    pub search_angle: f64,
    /// Dash power used when running towards a target.
    pub speed: f64,
    /// Largest accepted `|x|` for target coordinates.
    pub field_half_length: f64,
    /// Largest accepted `|y|` for target coordinates.
    pub field_half_width: f64,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            dist_ball: 0.5,
            dist_flag: 3.0,
            follow_angle: 20.0,
            max_goal_dist: 35.0,
            kick_force: 125.0,
            dribble_force: 20.0,
            search_angle: 90.0,
            speed: 100.0,
            field_half_length: 57.0,
            field_half_width: 39.0,
        }
    }
}

impl BehaviorSettings {
    /// Whether `point` lies inside the accepted field bounds (edges included).
    pub fn in_bounds(&self, point: Vector2) -> bool {
        point.x.abs() <= self.field_half_length && point.y.abs() <= self.field_half_width
    }

    /// Load the settings from a file, or store the default settings if the file does not
    /// exist. An unparsable file is reported and replaced by the defaults in memory.
    pub fn load_or_insert(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => Ok(settings),
                Err(err) => {
                    log::error!(
                        "Failed to parse behavior settings in {}: {}",
                        path.display(),
                        err
                    );
                    Ok(Self::default())
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let settings = Self::default();
                settings.store(path)?;
                log::info!("Wrote default behavior settings to {}", path.display());
                Ok(settings)
            }
            Err(err) => Err(err)
                .with_context(|| format!("Failed to read behavior settings {}", path.display())),
        }
    }

    /// Store the settings in the given file.
    pub fn store(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write behavior settings {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_bounds() {
        let settings = BehaviorSettings::default();
        assert!(settings.in_bounds(Vector2::new(57.0, -39.0)));
        assert!(settings.in_bounds(Vector2::new(0.0, 0.0)));
        assert!(!settings.in_bounds(Vector2::new(60.0, 0.0)));
        assert!(!settings.in_bounds(Vector2::new(0.0, -39.5)));
    }

    #[test]
    fn test_load_or_insert_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("behavior.json");

        let settings = BehaviorSettings::load_or_insert(&path).unwrap();
        assert_eq!(settings, BehaviorSettings::default());
        assert!(path.exists());

        let reloaded = BehaviorSettings::load_or_insert(&path).unwrap();
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("behavior.json");
        fs::write(&path, r#"{ "speed": 60.0 }"#).unwrap();

        let settings = BehaviorSettings::load_or_insert(&path).unwrap();
        assert_eq!(settings.speed, 60.0);
        assert_eq!(settings.kick_force, 125.0);
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("behavior.json");
        fs::write(&path, "not json").unwrap();

        let settings = BehaviorSettings::load_or_insert(&path).unwrap();
        assert_eq!(settings, BehaviorSettings::default());
    }
}
