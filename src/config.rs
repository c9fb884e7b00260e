// Global registry of named mirror coating presets
use crate::physics::MirrorCoating;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;

// Global coating registry, seeded with the built-in presets.
pub static CONFIG: Lazy<Mutex<Config>> = Lazy::new(|| Mutex::new(Config::new()));

/// Registry mapping coating preset names (e.g. "m2") to their
/// [`MirrorCoating`] parameters, plus an optional default preset name.
///
/// A single global instance is exposed via the `CONFIG` static; most code
/// should obtain a guard with [`Config::global`] rather than locking the
/// mutex directly. Presets can also be bulk-loaded from a JSON object of
/// name -> coating entries.
#[derive(Debug, Clone)]
pub struct Config {
    coatings: HashMap<String, MirrorCoating>,
    default_coating: Option<String>,
}

impl Config {
    /// Create a registry seeded with the built-in presets: natural nickel
    /// ("ni", m=1) and the m=2/m=3 supermirrors.
    pub fn new() -> Self {
        let mut coatings = HashMap::new();
        for (name, m) in [("ni", 1.0), ("m2", 2.0), ("m3", 3.0)] {
            coatings.insert(
                name.to_string(),
                MirrorCoating {
                    m,
                    ..MirrorCoating::default()
                },
            );
        }
        Config {
            coatings,
            default_coating: None,
        }
    }

    /// Register (or replace) a named coating preset.
    pub fn set_coating(&mut self, name: &str, coating: MirrorCoating) -> Result<(), String> {
        coating.validate()?;
        self.coatings.insert(name.to_string(), coating);
        Ok(())
    }

    /// Look up a preset by name.
    pub fn get_coating(&self, name: &str) -> Option<MirrorCoating> {
        self.coatings.get(name).copied()
    }

    /// Choose the preset returned by [`Config::default_coating`]. The name
    /// must already be registered.
    pub fn set_default(&mut self, name: &str) -> Result<(), String> {
        if !self.coatings.contains_key(name) {
            return Err(format!(
                "Cannot default to unknown coating preset '{}'",
                name
            ));
        }
        self.default_coating = Some(name.to_string());
        Ok(())
    }

    /// The configured default preset, falling back to the standard m=2
    /// supermirror parameters when none is set.
    pub fn default_coating(&self) -> MirrorCoating {
        self.default_coating
            .as_deref()
            .and_then(|name| self.get_coating(name))
            .unwrap_or_default()
    }

    /// Bulk-load presets from a JSON object of name -> coating entries,
    /// e.g. `{"m4": {"r0": 0.99, "qc": 0.0219, "alpha": 6.07, "m": 4.0,
    /// "w": 0.003}}`. Returns how many presets were loaded.
    pub fn load_from_json(&mut self, json: &str) -> Result<usize, String> {
        let presets: HashMap<String, MirrorCoating> =
            serde_json::from_str(json).map_err(|e| format!("Invalid coating JSON: {}", e))?;
        let count = presets.len();
        for (name, coating) in presets {
            self.set_coating(&name, coating)?;
        }
        Ok(count)
    }

    /// Reset the registry to the built-in presets.
    pub fn clear(&mut self) {
        *self = Config::new();
    }

    /// Get the global configuration instance.
    pub fn global() -> std::sync::MutexGuard<'static, Self> {
        CONFIG
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_presets() {
        let config = Config::new();
        assert_eq!(config.get_coating("ni").unwrap().m, 1.0);
        assert_eq!(config.get_coating("m2").unwrap().m, 2.0);
        assert_eq!(config.get_coating("m3").unwrap().m, 3.0);
        assert!(config.get_coating("m9").is_none());
    }

    #[test]
    fn test_default_falls_back_to_m2_parameters() {
        let config = Config::new();
        assert_eq!(config.default_coating(), MirrorCoating::default());
    }

    #[test]
    fn test_set_default_requires_known_preset() {
        let mut config = Config::new();
        assert!(config.set_default("nope").is_err());
        config.set_default("ni").unwrap();
        assert_eq!(config.default_coating().m, 1.0);
    }

    #[test]
    fn test_set_coating_validates() {
        let mut config = Config::new();
        let bad = MirrorCoating {
            w: -1.0,
            ..MirrorCoating::default()
        };
        assert!(config.set_coating("bad", bad).is_err());
        assert!(config.get_coating("bad").is_none());
    }

    #[test]
    fn test_load_from_json() {
        let mut config = Config::new();
        let json = r#"{
            "m4": {"r0": 0.99, "qc": 0.0219, "alpha": 6.07, "m": 4.0, "w": 0.003},
            "absorber": {"r0": 0.9, "qc": 0.0219, "alpha": 6.07, "m": 0.0, "w": 0.003}
        }"#;
        assert_eq!(config.load_from_json(json).unwrap(), 2);
        assert_eq!(config.get_coating("m4").unwrap().m, 4.0);
        assert_eq!(config.get_coating("absorber").unwrap().r0, 0.9);
    }

    #[test]
    fn test_load_from_json_rejects_garbage() {
        let mut config = Config::new();
        assert!(config.load_from_json("not json").is_err());
        assert!(config
            .load_from_json(r#"{"bad": {"r0": 7.0, "qc": 0.02, "alpha": 6.0, "m": 2.0, "w": 0.003}}"#)
            .is_err());
    }

    #[test]
    fn test_clear_restores_builtins() {
        let mut config = Config::new();
        config
            .set_coating("custom", MirrorCoating::default())
            .unwrap();
        config.clear();
        assert!(config.get_coating("custom").is_none());
        assert!(config.get_coating("m2").is_some());
    }
}
