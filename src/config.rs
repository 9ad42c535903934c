//! Tunable behavior, loaded from JSON.
//!
//! Every field has a default, so a config file only lists what it changes:
//!
//! ```
//! use cubefit::{Config, FitPolicy, OverflowPolicy};
//!
//! let config = Config::from_json_str(r#"{ "overflow": "reject" }"#).unwrap();
//! assert_eq!(config.overflow, OverflowPolicy::Reject);
//! assert_eq!(config.fit_policy, FitPolicy::Uniform);
//! assert_eq!(config.export_file_name, "processed-image.png");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constraint::{CanvasColor, FitPolicy, Size};
use crate::decode::DecodeLimits;
use crate::error::{Error, Result};
use crate::layout::OverflowPolicy;
use crate::render::{EXPORT_FILE_NAME, ResizeFilter};

/// Processor and cube settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Canvas of the single-image processor.
    pub canvas: Size,
    /// Letterbox background.
    pub background: CanvasColor,
    /// Scaling policy of the single-image processor. Cube faces always fit
    /// uniformly.
    pub fit_policy: FitPolicy,
    /// Handling of uploads beyond the free cube faces.
    pub overflow: OverflowPolicy,
    /// File name used by the export action.
    pub export_file_name: String,
    pub resize_filter: ResizeFilter,
    pub limits: DecodeLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas: Size::new(400, 300),
            background: CanvasColor::White,
            fit_policy: FitPolicy::Uniform,
            overflow: OverflowPolicy::Ignore,
            export_file_name: EXPORT_FILE_NAME.to_string(),
            resize_filter: ResizeFilter::Bilinear,
            limits: DecodeLimits::default(),
        }
    }
}

impl Config {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(json).map_err(|e| Error::Config(format!("invalid json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.canvas.is_empty() {
            return Err(Error::Config(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        let name = self.export_file_name.trim();
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(Error::Config(format!(
                "export_file_name must be a bare file name, got {:?}",
                self.export_file_name
            )));
        }
        if self.limits.max_decoded_pixels == 0 || self.limits.max_file_size == 0 {
            return Err(Error::Config("decode limits must be non-zero".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_processor_canvas() {
        let c = Config::default();
        assert_eq!(c.canvas, Size::new(400, 300));
        assert_eq!(c.background, CanvasColor::White);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(Config::from_json_str("{}").unwrap(), Config::default());
    }

    #[test]
    fn json_round_trip() {
        let mut c = Config::default();
        c.fit_policy = FitPolicy::AxisPriority;
        c.background = CanvasColor::Srgb {
            r: 10,
            g: 20,
            b: 30,
            a: 255,
        };
        let json = c.to_json_string().unwrap();
        assert_eq!(Config::from_json_str(&json).unwrap(), c);
    }

    #[test]
    fn rejects_zero_canvas() {
        let err = Config::from_json_str(r#"{ "canvas": { "width": 0, "height": 300 } }"#)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn rejects_path_in_export_name() {
        let err =
            Config::from_json_str(r#"{ "export_file_name": "../out.png" }"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            Config::from_json_str("{ canvas"),
            Err(Error::Config(_))
        ));
    }
}
