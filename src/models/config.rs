use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::ConversionOptions;

/// Application configuration loaded from a YAML file (`CONFIG_FILE`)
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Preset used when a request names none
    #[serde(default = "default_preset")]
    pub default_preset: String,

    /// Named conversion presets
    #[serde(default)]
    pub presets: HashMap<String, ConversionOptions>,
}

fn default_preset() -> String {
    "default".to_string()
}

impl AppConfig {
    /// Load configuration from the path in `CONFIG_FILE`, or defaults if unset.
    pub fn from_env() -> Self {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::load(Path::new(&path)),
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a file, falling back to defaults on any error.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        path = %path.display(),
                        presets = config.presets.len(),
                        default_preset = %config.default_preset,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), %e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), %e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Look up a preset by name; `None` selects the default preset.
    ///
    /// A missing default preset resolves to plain quantization, while an
    /// explicitly named preset that does not exist is an error (`None`).
    pub fn preset(&self, name: Option<&str>) -> Option<ConversionOptions> {
        match name {
            Some(name) => self.presets.get(name).cloned(),
            None => Some(
                self.presets
                    .get(&self.default_preset)
                    .cloned()
                    .unwrap_or_default(),
            ),
        }
    }

    /// Preset names in sorted order.
    pub fn preset_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.presets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut presets = HashMap::new();
        presets.insert("default".to_string(), ConversionOptions::default());

        Self {
            default_preset: default_preset(),
            presets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.default_preset, "default");
        assert_eq!(config.preset_names(), vec!["default"]);
        assert_eq!(config.preset(None), Some(ConversionOptions::default()));
    }

    #[test]
    fn test_load_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
default_preset: lcd
presets:
  lcd:
    ditherEnabled: true
    ditherAlgorithm: floyd-steinberg
    filter: none
    filterIntensity: 1.0
  thumb:
    resize:
      mode: scale
      scalePercent: 25
"#
        )
        .unwrap();

        let config = AppConfig::load(file.path());
        assert_eq!(config.default_preset, "lcd");
        assert_eq!(config.preset_names(), vec!["lcd", "thumb"]);
        assert!(config.preset(None).unwrap().dither_enabled);

        let thumb = config.preset(Some("thumb")).unwrap();
        assert_eq!(thumb.resize.unwrap().scale_percent, Some(25.0));
    }

    #[test]
    fn test_unknown_preset_is_none() {
        let config = AppConfig::default();
        assert_eq!(config.preset(Some("nope")), None);
    }

    #[test]
    fn test_missing_default_preset_is_plain_quantization() {
        let config = AppConfig {
            default_preset: "gone".to_string(),
            presets: HashMap::new(),
        };
        assert_eq!(config.preset(None), Some(ConversionOptions::default()));
    }

    #[test]
    fn test_invalid_yaml_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "presets: [this is: not a map").unwrap();
        assert_eq!(AppConfig::load(file.path()), AppConfig::default());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("missing.yaml"));
        assert_eq!(config, AppConfig::default());
    }
}
