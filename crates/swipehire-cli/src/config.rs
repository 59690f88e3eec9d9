//! Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use swipehire_assistant::CompanyData;

/// Configuration for the swipehire CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Assistant gateway URL
    pub url: Option<String>,
    /// Bearer token for the gateway
    pub api_key: Option<String>,
    /// Company profile sent with every question
    pub company: Option<CompanyProfile>,
}

/// Company profile as stored in the config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    pub industry: Option<String>,
    pub size: Option<String>,
    pub team: Option<Vec<String>>,
}

impl CompanyProfile {
    /// Merge the profile over the default company context
    pub fn to_company_data(&self) -> CompanyData {
        let mut company = CompanyData::default();
        if let Some(ref industry) = self.industry {
            company.industry = industry.clone();
        }
        if let Some(ref size) = self.size {
            company.size = size.clone();
        }
        if let Some(ref team) = self.team {
            company.current_team = team.clone();
        }
        company
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        // Check for SWIPEHIRE_CONFIG_PATH env var first
        if let Ok(path) = std::env::var("SWIPEHIRE_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("swipehire")
            .join("config.toml")
    }

    /// Load config from file
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save config to file
    pub fn save(&self) -> std::io::Result<()> {
        let path = Self::config_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(&path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile_falls_back_to_defaults() {
        let company = CompanyProfile::default().to_company_data();
        assert_eq!(company.industry, "Technology");
        assert_eq!(company.size, "Startup");
        assert_eq!(company.current_team, vec!["Frontend", "Backend", "Design"]);
    }

    #[test]
    fn test_profile_overrides_defaults() {
        let profile = CompanyProfile {
            industry: Some("Fintech".into()),
            size: None,
            team: Some(vec!["Data".into()]),
        };
        let company = profile.to_company_data();
        assert_eq!(company.industry, "Fintech");
        assert_eq!(company.size, "Startup");
        assert_eq!(company.current_team, vec!["Data"]);
    }

    #[test]
    fn test_config_parses_partial_toml() {
        let config: Config = toml::from_str("url = \"https://example.test/assistant\"").unwrap();
        assert_eq!(config.url.as_deref(), Some("https://example.test/assistant"));
        assert!(config.api_key.is_none());
        assert!(config.company.is_none());
    }
}
