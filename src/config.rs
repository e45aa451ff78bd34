use crate::constants::{
    BYTES_PER_MB, DEFAULT_INITIAL_QUALITY, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_SIZE_MB,
    DEFAULT_MAX_WIDTH, DEFAULT_MIN_QUALITY,
};
use crate::error::{CompressionError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Settings for one pipeline invocation.
///
/// Qualities are fractions in `(0, 1]`; the budget is kept in bytes so the
/// reducer compares like with like.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionConfig {
    pub max_width: u32,
    pub max_height: u32,
    pub initial_quality: f64,
    pub max_size_bytes: u64,
    pub min_quality: f64,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            initial_quality: DEFAULT_INITIAL_QUALITY,
            max_size_bytes: megabytes_to_bytes(DEFAULT_MAX_SIZE_MB),
            min_quality: DEFAULT_MIN_QUALITY,
        }
    }
}

impl CompressionConfig {
    /// Applies caller overrides on top of the defaults and validates the result.
    pub fn from_overrides(overrides: &CompressionOverrides) -> Result<Self> {
        let max_size_mb = overrides.max_size_mb.unwrap_or(DEFAULT_MAX_SIZE_MB);
        if !max_size_mb.is_finite() || max_size_mb <= 0.0 {
            return Err(CompressionError::InvalidSizeBudget(max_size_mb));
        }

        let config = Self {
            max_width: overrides.max_width.unwrap_or(DEFAULT_MAX_WIDTH),
            max_height: overrides.max_height.unwrap_or(DEFAULT_MAX_HEIGHT),
            initial_quality: overrides.initial_quality.unwrap_or(DEFAULT_INITIAL_QUALITY),
            max_size_bytes: megabytes_to_bytes(max_size_mb),
            min_quality: overrides.min_quality.unwrap_or(DEFAULT_MIN_QUALITY),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(CompressionError::InvalidBounds(
                self.max_width,
                self.max_height,
            ));
        }

        if !(self.initial_quality > 0.0 && self.initial_quality <= 1.0) {
            return Err(CompressionError::InvalidQuality {
                field: "initialQuality",
                value: self.initial_quality,
            });
        }

        if !(self.min_quality > 0.0 && self.min_quality < 1.0) {
            return Err(CompressionError::InvalidQuality {
                field: "minQuality",
                value: self.min_quality,
            });
        }

        if self.max_size_bytes == 0 {
            return Err(CompressionError::InvalidSizeBudget(0.0));
        }

        Ok(())
    }
}

/// Caller-supplied override record. Absent fields fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompressionOverrides {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub initial_quality: Option<f64>,
    #[serde(rename = "maxSizeMB")]
    pub max_size_mb: Option<f64>,
    pub min_quality: Option<f64>,
}

impl CompressionOverrides {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CompressionError::FileNotFound(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Fields set in `other` win.
    pub fn merge(self, other: CompressionOverrides) -> Self {
        Self {
            max_width: other.max_width.or(self.max_width),
            max_height: other.max_height.or(self.max_height),
            initial_quality: other.initial_quality.or(self.initial_quality),
            max_size_mb: other.max_size_mb.or(self.max_size_mb),
            min_quality: other.min_quality.or(self.min_quality),
        }
    }
}

fn megabytes_to_bytes(megabytes: f64) -> u64 {
    (megabytes * BYTES_PER_MB).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = CompressionConfig::default();
        assert_eq!(config.max_width, 1920);
        assert_eq!(config.max_height, 1080);
        assert_eq!(config.initial_quality, 0.8);
        assert_eq!(config.max_size_bytes, 1024 * 1024);
        assert_eq!(config.min_quality, 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_overrides_partial() {
        let overrides = CompressionOverrides {
            max_width: Some(800),
            max_size_mb: Some(0.5),
            ..Default::default()
        };
        let config = CompressionConfig::from_overrides(&overrides).unwrap();
        assert_eq!(config.max_width, 800);
        assert_eq!(config.max_height, 1080);
        assert_eq!(config.max_size_bytes, 512 * 1024);
    }

    #[test]
    fn test_from_overrides_invalid_quality() {
        let overrides = CompressionOverrides {
            initial_quality: Some(1.5),
            ..Default::default()
        };
        let result = CompressionConfig::from_overrides(&overrides);
        assert!(matches!(
            result,
            Err(CompressionError::InvalidQuality {
                field: "initialQuality",
                ..
            })
        ));

        let overrides = CompressionOverrides {
            min_quality: Some(0.0),
            ..Default::default()
        };
        let result = CompressionConfig::from_overrides(&overrides);
        assert!(matches!(
            result,
            Err(CompressionError::InvalidQuality {
                field: "minQuality",
                ..
            })
        ));
    }

    #[test]
    fn test_from_overrides_invalid_budget_and_bounds() {
        let overrides = CompressionOverrides {
            max_size_mb: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(
            CompressionConfig::from_overrides(&overrides),
            Err(CompressionError::InvalidSizeBudget(_))
        ));

        let overrides = CompressionOverrides {
            max_height: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            CompressionConfig::from_overrides(&overrides),
            Err(CompressionError::InvalidBounds(1920, 0))
        ));
    }

    #[test]
    fn test_overrides_from_json() {
        let overrides = CompressionOverrides::from_json_str(
            r#"{ "maxWidth": 1200, "maxSizeMB": 2, "minQuality": 0.2 }"#,
        )
        .unwrap();
        assert_eq!(overrides.max_width, Some(1200));
        assert_eq!(overrides.max_size_mb, Some(2.0));
        assert_eq!(overrides.min_quality, Some(0.2));
        assert_eq!(overrides.max_height, None);
    }

    #[test]
    fn test_overrides_reject_unknown_keys() {
        let result = CompressionOverrides::from_json_str(r#"{ "maxSizeMb": 2 }"#);
        assert!(matches!(result, Err(CompressionError::ConfigParse(_))));
    }

    #[test]
    fn test_overrides_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{ "initialQuality": 0.9 }"#).unwrap();

        let overrides = CompressionOverrides::from_json_file(file.path()).unwrap();
        assert_eq!(overrides.initial_quality, Some(0.9));

        let missing = CompressionOverrides::from_json_file(Path::new("missing-config.json"));
        assert!(matches!(missing, Err(CompressionError::FileNotFound(_))));
    }

    #[test]
    fn test_merge_prefers_later_fields() {
        let file = CompressionOverrides {
            max_width: Some(1000),
            max_height: Some(1000),
            ..Default::default()
        };
        let flags = CompressionOverrides {
            max_width: Some(640),
            ..Default::default()
        };
        let merged = file.merge(flags);
        assert_eq!(merged.max_width, Some(640));
        assert_eq!(merged.max_height, Some(1000));
    }
}
