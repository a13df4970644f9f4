use super::types::{Config, ConfigError, Location};
use crate::debug_println;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that points at an alternate config file
pub const CONFIG_ENV_VAR: &str = "PARCELFARE_CONFIG";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Pick the config file: explicit path, then `PARCELFARE_CONFIG`, then
    /// `~/.parcelfare/config.toml`
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            debug_println!("Config path from command line: {}", path.display());
            return path.to_path_buf();
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                debug_println!("Config path from {}: {}", CONFIG_ENV_VAR, path);
                return PathBuf::from(path);
            }
        }

        Self::default_path()
    }

    /// Get the default config file path (~/.parcelfare/config.toml)
    pub fn default_path() -> PathBuf {
        if let Some(home) = dirs::home_dir() {
            home.join(".parcelfare").join("config.toml")
        } else {
            PathBuf::from(".parcelfare/config.toml")
        }
    }
}

impl Config {
    /// Load configuration from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            debug_println!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = toml::from_str(&content)?;
        debug_println!(
            "Loaded config from {} ({} tiers, {} locations)",
            path.display(),
            config.schedule.distance_tiers.len(),
            config.locations.len()
        );
        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = self.to_toml()?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Write the default config at `path` unless a file already exists.
    /// Returns whether a file was created.
    pub fn init_at(path: &Path) -> Result<bool, ConfigError> {
        if path.exists() {
            return Ok(false);
        }

        Config::default().save_to(path)?;
        Ok(true)
    }

    /// Validate configuration
    pub fn check(&self) -> Result<(), ConfigError> {
        self.schedule.validate()?;

        if self.schedule.currency.trim().is_empty() {
            return Err(ConfigError::Invalid("currency must not be empty".to_string()));
        }

        // Location names are matched case-insensitively, so must be unique that way
        let mut seen = HashSet::new();
        for location in &self.locations {
            if !seen.insert(location.name.to_lowercase()) {
                return Err(ConfigError::Invalid(format!(
                    "Duplicate location: {}",
                    location.name
                )));
            }
            if !(-90.0..=90.0).contains(&location.latitude)
                || !(-180.0..=180.0).contains(&location.longitude)
            {
                return Err(ConfigError::Invalid(format!(
                    "Location '{}' has out-of-range coordinates",
                    location.name
                )));
            }
        }

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Print configuration as TOML
    pub fn print(&self) -> Result<(), ConfigError> {
        println!("{}", self.to_toml()?);
        Ok(())
    }

    /// Find a named location, ignoring case
    pub fn find_location(&self, name: &str) -> Option<&Location> {
        let wanted = name.trim().to_lowercase();
        self.locations
            .iter()
            .find(|l| l.name.to_lowercase() == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{ParcelType, RateSchedule};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_init_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert!(Config::init_at(&path).unwrap());
        assert!(!Config::init_at(&path).unwrap());

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, Config::default());
        assert!(loaded.check().is_ok());
    }

    #[test]
    fn test_custom_schedule_from_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.schedule.weight_penalty_rate = 55.0;
        config.schedule.currency = "UGX".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.schedule.weight_penalty_rate, 55.0);
        assert_eq!(loaded.schedule.currency, "UGX");
        assert_eq!(loaded.schedule.distance_tiers.last().unwrap().max, None);
        assert!(loaded.schedule.parcel_types.contains_key(&ParcelType::Large));
    }

    #[test]
    fn test_hand_written_toml() {
        let content = r#"
[schedule]
weight_penalty_rate = 40.0

[schedule.parcel_types.documents]
max_weight = 1.0
base_price = 200.0
label = "Documents"

[schedule.parcel_types.small]
max_weight = 5.0
base_price = 200.0
label = "Small Box (<5kg)"

[schedule.parcel_types.medium]
max_weight = 15.0
base_price = 250.0
label = "Medium Box (5-15kg)"

[schedule.parcel_types.large]
max_weight = 30.0
base_price = 350.0
label = "Large Box (15-30kg)"

[[schedule.distance_tiers]]
min = 0.0
max = 100.0
rate = 0.0

[[schedule.distance_tiers]]
min = 101.0
rate = 5.0
"#;
        let config: Config = toml::from_str(content).unwrap();
        assert_eq!(config.schedule.currency, "KES");
        assert!(config.locations.is_empty());
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_unknown_parcel_key_is_rejected() {
        let content = r#"
[schedule]
weight_penalty_rate = 40.0
distance_tiers = []

[schedule.parcel_types.crate]
max_weight = 1.0
base_price = 1.0
label = "Crate"
"#;
        let result: Result<Config, _> = toml::from_str(content);
        assert!(result.is_err());
    }

    #[test]
    fn test_corrupted_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "schedule = [not toml").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_check_rejects_duplicate_locations() {
        let mut config = Config::default();
        config
            .locations
            .push(Location::new("nairobi cbd", "Nairobi", -1.0, 36.0));
        assert!(matches!(config.check(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_check_rejects_bad_schedule() {
        let mut config = Config::default();
        config.schedule = RateSchedule {
            distance_tiers: Vec::new(),
            ..RateSchedule::builtin()
        };
        assert!(config.check().is_err());
    }

    #[test]
    fn test_find_location() {
        let config = Config::default();
        let mombasa = config.find_location("  mombasa town ").unwrap();
        assert_eq!(mombasa.county, "Mombasa");
        assert!(config.find_location("Eldoret").is_none());
    }

    #[test]
    fn test_resolve_path_prefers_explicit() {
        let explicit = PathBuf::from("/tmp/custom.toml");
        assert_eq!(ConfigLoader::resolve_path(Some(explicit.as_path())), explicit);
    }
}
