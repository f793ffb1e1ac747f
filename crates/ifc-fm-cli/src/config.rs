// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration file loading

use anyhow::{Context, Result};
use ifc_fm_core::{ExtractOptions, GeneratorConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Contents of `ifc-fm.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extract: ExtractOptions,
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Load configuration, falling back to defaults when the file is missing
pub fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    } else {
        info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_fm_core::ContainerPolicy;
    use std::path::PathBuf;

    #[test]
    fn test_partial_file() {
        let config: Config = toml::from_str(
            r#"
[extract]
container_policy = "space_only"

[generator]
model_id = 42
"#,
        )
        .unwrap();

        assert_eq!(config.extract.container_policy, ContainerPolicy::SpaceOnly);
        assert!(!config.extract.strict_placement);
        assert_eq!(config.generator.model_id, 42);
        assert_eq!(config.generator.output, PathBuf::from("sensors.json"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config(Path::new("/nonexistent/ifc-fm.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
