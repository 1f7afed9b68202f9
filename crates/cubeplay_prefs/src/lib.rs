//! User preferences.
//!
//! Defaults are baked into the binary from `default.yaml`. A user file, if
//! given, is layered on top of them, so it only needs to contain the keys that
//! differ.

#![allow(missing_docs)] // field docs are on the YAML keys

#[macro_use]
extern crate lazy_static;

use std::path::Path;

use eyre::WrapErr;
use serde::{Deserialize, Serialize};

mod animation;
mod interaction;

pub use animation::*;
pub use interaction::*;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

lazy_static! {
    pub static ref DEFAULT_PREFS: Preferences =
        serde_norway::from_str(DEFAULT_PREFS_STR).expect("error loading default preferences");
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Preferences {
    pub animation: AnimationPreferences,
    pub interaction: InteractionPreferences,
    pub shuffle: ShufflePreferences,
}
impl Preferences {
    /// Loads the default preferences, overridden by `user_file` if it is
    /// given.
    pub fn load(user_file: Option<&Path>) -> eyre::Result<Self> {
        lazy_static::initialize(&DEFAULT_PREFS);

        let mut config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));

        if let Some(path) = user_file {
            log::info!("Loading preferences from {}", path.display());
            config = config.add_source(config::File::from(path).format(PREFS_FILE_FORMAT));
        }

        let prefs: Self = config
            .build()
            .and_then(|c| c.try_deserialize())
            .wrap_err("error loading preferences")?;
        Ok(prefs.sanitized())
    }

    /// Loads preferences like [`Preferences::load()`], falling back to the
    /// defaults if loading fails.
    pub fn load_or_default(user_file: Option<&Path>) -> Self {
        Self::load(user_file).unwrap_or_else(|e| {
            log::warn!("Error loading preferences: {e:#}");
            DEFAULT_PREFS.clone()
        })
    }

    /// Serializes the preferences to YAML.
    pub fn to_yaml(&self) -> eyre::Result<String> {
        serde_norway::to_string(self).wrap_err("error serializing preferences")
    }

    /// Replaces values that would break the simulation with their defaults.
    #[must_use]
    fn sanitized(mut self) -> Self {
        let speed = self.animation.twist_speed;
        if !(speed.is_finite() && speed > 0.0) {
            log::warn!("Ignoring invalid twist speed {speed}");
            self.animation.twist_speed = DEFAULT_PREFS.animation.twist_speed;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_temp_prefs(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "cubeplay_prefs_test_{}_{name}.yaml",
            std::process::id(),
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_default_yaml_matches_default_impl() {
        assert_eq!(*DEFAULT_PREFS, Preferences::default());
    }

    #[test]
    fn test_load_without_user_file() {
        assert_eq!(Preferences::load(None).unwrap(), Preferences::default());
    }

    #[test]
    fn test_user_file_overrides_defaults() {
        let path = write_temp_prefs(
            "override",
            "animation:\n  twist_speed: 360\n  twist_interpolation: cosine\nshuffle:\n  move_count: 5\n",
        );
        let prefs = Preferences::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(prefs.animation.twist_speed, 360.0);
        assert_eq!(prefs.animation.twist_interpolation, InterpolateFn::Cosine);
        assert_eq!(prefs.shuffle.move_count, 5);
        assert_eq!(prefs.interaction, InteractionPreferences::default());
        assert_eq!(prefs.animation.quarter_turn_duration(), 0.25);
    }

    #[test]
    fn test_invalid_twist_speed_is_replaced() {
        let path = write_temp_prefs("invalid", "animation:\n  twist_speed: -10\n");
        let prefs = Preferences::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(prefs.animation.twist_speed, 180.0);
    }

    #[test]
    fn test_missing_user_file() {
        let path = std::env::temp_dir().join("cubeplay_prefs_test_does_not_exist.yaml");
        assert!(Preferences::load(Some(&path)).is_err());
        assert_eq!(Preferences::load_or_default(Some(&path)), Preferences::default());
    }

    #[test]
    fn test_yaml_output_is_loadable() {
        let mut prefs = Preferences::default();
        prefs.interaction.viewer_relative_controls = false;
        prefs.animation.twist_interpolation = InterpolateFn::CosineDecel;

        let yaml = prefs.to_yaml().unwrap();
        assert!(yaml.contains("twist_interpolation: cosine_decel"), "{yaml}");
        let reloaded: Preferences = serde_norway::from_str(&yaml).unwrap();
        assert_eq!(reloaded, prefs);
    }
}
