// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::ErrorReport;
use crate::error::Fallible;

const SETTINGS_FILE: &str = "settings.toml";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

/// The contents of `settings.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    host: Option<String>,
    port: Option<u16>,
    webhook_url: Option<String>,
    open_browser: Option<bool>,
}

/// Values given on the command line, which win over the settings file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub webhook_url: Option<String>,
    pub no_open: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Where disposition logs are sent. `None` disables sending.
    pub webhook_url: Option<String>,
    pub open_browser: bool,
}

impl Settings {
    pub fn load(directory: Option<&Path>, overrides: Overrides) -> Fallible<Self> {
        let file = match directory.map(|dir| dir.join(SETTINGS_FILE)) {
            Some(path) if path.exists() => {
                log::debug!("Reading settings from {}", path.display());
                let content = read_to_string(&path)?;
                toml::from_str(&content)
                    .map_err(|e| ErrorReport::new(format!("{SETTINGS_FILE}: {e}")))?
            }
            _ => SettingsFile::default(),
        };
        let webhook_url = overrides
            .webhook_url
            .or(file.webhook_url)
            .filter(|url| !url.trim().is_empty());
        Ok(Self {
            host: overrides
                .host
                .or(file.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
            webhook_url,
            open_browser: !overrides.no_open && file.open_browser.unwrap_or(true),
        })
    }

    pub fn bind(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_defaults() -> Fallible<()> {
        let settings = Settings::load(None, Overrides::default())?;
        assert_eq!(
            settings,
            Settings {
                host: "127.0.0.1".to_string(),
                port: 8000,
                webhook_url: None,
                open_browser: true,
            }
        );
        assert_eq!(settings.bind(), "127.0.0.1:8000");
        Ok(())
    }

    #[test]
    fn test_file_and_overrides() -> Fallible<()> {
        let dir = tempdir()?;
        write(
            dir.path().join("settings.toml"),
            "port = 9000\nwebhook_url = \"https://example.com/exec\"\nopen_browser = false\n",
        )?;
        let settings = Settings::load(Some(dir.path()), Overrides::default())?;
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.webhook_url.as_deref(), Some("https://example.com/exec"));
        assert!(!settings.open_browser);

        let overrides = Overrides {
            host: Some("0.0.0.0".to_string()),
            port: Some(9100),
            webhook_url: Some("http://localhost/hook".to_string()),
            no_open: false,
        };
        let settings = Settings::load(Some(dir.path()), overrides)?;
        assert_eq!(settings.bind(), "0.0.0.0:9100");
        assert_eq!(settings.webhook_url.as_deref(), Some("http://localhost/hook"));
        Ok(())
    }

    #[test]
    fn test_blank_webhook_disables_sending() -> Fallible<()> {
        let overrides = Overrides {
            webhook_url: Some("  ".to_string()),
            ..Overrides::default()
        };
        let settings = Settings::load(None, overrides)?;
        assert_eq!(settings.webhook_url, None);
        Ok(())
    }

    #[test]
    fn test_unknown_key() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join("settings.toml"), "colour = \"green\"\n")?;
        let result = Settings::load(Some(dir.path()), Overrides::default());
        assert!(result.is_err());
        Ok(())
    }
}
