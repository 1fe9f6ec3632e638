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
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::rank::OrderContext;

const CONFIG_FILE_NAME: &str = "dokusho.toml";

#[derive(Clone, PartialEq, Eq, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base URL of the storage service.
    pub backend: String,
    /// Port the reader server listens on.
    pub port: u16,
    /// Default ordering of the story list.
    pub view: OrderContext,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: "http://localhost:8080".to_string(),
            port: 8000,
            view: OrderContext::Rank,
        }
    }
}

impl Config {
    /// Loads the config from `path`, or from `dokusho.toml` in the current
    /// directory if no path is given. An explicit path must exist; the
    /// default file is optional.
    pub fn load(path: Option<&Path>) -> Fallible<Self> {
        let path: PathBuf = match path {
            Some(path) => {
                if !path.exists() {
                    return fail(format!("config file {} does not exist.", path.display()));
                }
                path.to_path_buf()
            }
            None => {
                let path = PathBuf::from(CONFIG_FILE_NAME);
                if !path.exists() {
                    log::debug!("No {CONFIG_FILE_NAME}, using defaults.");
                    return Ok(Self::default());
                }
                path
            }
        };
        log::debug!("Loading config from {}", path.display());
        let content = read_to_string(&path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Applies command-line flags on top of the file values.
    pub fn with_overrides(
        self,
        backend: Option<String>,
        port: Option<u16>,
        view: Option<OrderContext>,
    ) -> Self {
        Self {
            backend: backend.unwrap_or(self.backend),
            port: port.unwrap_or(self.port),
            view: view.unwrap_or(self.view),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_parse_full() -> Fallible<()> {
        let config = Config::parse(
            "backend = \"http://10.0.0.2:9000\"\nport = 8123\nview = \"date-added\"\n",
        )?;
        assert_eq!(config.backend, "http://10.0.0.2:9000");
        assert_eq!(config.port, 8123);
        assert_eq!(config.view, OrderContext::DateAdded);
        Ok(())
    }

    #[test]
    fn test_parse_partial_uses_defaults() -> Fallible<()> {
        let config = Config::parse("port = 9001\n")?;
        assert_eq!(config.port, 9001);
        assert_eq!(config.backend, Config::default().backend);
        assert_eq!(config.view, OrderContext::Rank);
        Ok(())
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(Config::parse("colour = \"red\"\n").is_err());
        assert!(Config::parse("view = \"alphabetical\"\n").is_err());
    }

    #[test]
    fn test_load_from_path() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("custom.toml");
        write(&path, "backend = \"http://example.com\"\n")?;
        let config = Config::load(Some(&path))?;
        assert_eq!(config.backend, "http://example.com");
        assert_eq!(config.port, 8000);
        Ok(())
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = Config::load(Some(Path::new("./derpherp.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(None, Some(1234), Some(OrderContext::DateAdded));
        assert_eq!(config.backend, "http://localhost:8080");
        assert_eq!(config.port, 1234);
        assert_eq!(config.view, OrderContext::DateAdded);
    }
}
