use crate::error::{HarvestError, Result};
use crate::logic::DaytimeWindow;
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub location: LocationConfig,
    #[serde(default)]
    pub daytime: DaytimeConfig,
    #[serde(default)]
    pub forecast: ForecastConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationConfig {
    /// Default place name loaded on startup; free text, resolved via
    /// the geocoder.
    pub name: String,
}

/// Hour range used for representative daytime humidity.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DaytimeConfig {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for DaytimeConfig {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 20,
        }
    }
}

impl DaytimeConfig {
    pub fn window(&self) -> DaytimeWindow {
        DaytimeWindow::new(self.start_hour, self.end_hour)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForecastConfig {
    /// Single fixed timezone for the whole request; day-boundary slicing
    /// relies on it.
    pub timezone: String,
    /// 9 days covers today + tomorrow + the 7-day outlook strip.
    pub days: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            timezone: "Europe/Berlin".into(),
            days: 9,
        }
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(HarvestError::Config(format!(
                "Config file not found at {:?}. Run `harvestcast init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| HarvestError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| HarvestError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.location.name.trim().is_empty() {
            return Err(HarvestError::Config("location.name must not be empty".into()));
        }
        if self.daytime.start_hour > 23 || self.daytime.end_hour > 23 {
            return Err(HarvestError::Config(
                "daytime hours must be within 0-23".into(),
            ));
        }
        if self.daytime.start_hour > self.daytime.end_hour {
            return Err(HarvestError::Config(
                "daytime.start_hour must not exceed daytime.end_hour".into(),
            ));
        }
        if self.forecast.days < 2 {
            return Err(HarvestError::Config(
                "forecast.days must cover at least today and tomorrow".into(),
            ));
        }
        Ok(())
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        // Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("harvestcast").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        // Return XDG path as the default (will trigger "not found" in load)
        let default_path = dirs::config_dir()
            .ok_or_else(|| HarvestError::Config("Cannot determine config directory".into()))?
            .join("harvestcast")
            .join("config.yaml");
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/harvestcast/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HarvestError::Config("Cannot determine config directory".into()))?
            .join("harvestcast");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("No configuration found. Let's set up Harvestcast!");
        println!();

        println!("Location");
        let location_name: String = Input::new()
            .with_prompt("  Default place name")
            .default("Hamburg".into())
            .interact_text()
            .map_err(|e| HarvestError::Config(format!("Input error: {}", e)))?;

        println!();
        println!("Forecast");
        let timezone: String = Input::new()
            .with_prompt("  Timezone (IANA name)")
            .default("Europe/Berlin".into())
            .interact_text()
            .map_err(|e| HarvestError::Config(format!("Input error: {}", e)))?;

        println!();
        println!("Daytime humidity window");
        let start_hour: u32 = Input::new()
            .with_prompt("  Start hour (0-23)")
            .default(8)
            .interact_text()
            .map_err(|e| HarvestError::Config(format!("Input error: {}", e)))?;

        let end_hour: u32 = Input::new()
            .with_prompt("  End hour (0-23)")
            .default(20)
            .interact_text()
            .map_err(|e| HarvestError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            location: LocationConfig {
                name: location_name,
            },
            daytime: DaytimeConfig {
                start_hour,
                end_hour,
            },
            forecast: ForecastConfig {
                timezone,
                days: 9,
            },
        };
        config.validate()?;

        // Write to default config path
        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| HarvestError::Config(format!("Failed to serialize config: {}", e)))?;

        // Write with a header comment
        let content = format!(
            "# Harvestcast Configuration\n# Generated by `harvestcast init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            location: LocationConfig {
                name: "Hamburg".into(),
            },
            daytime: DaytimeConfig::default(),
            forecast: ForecastConfig::default(),
        }
    }
}
