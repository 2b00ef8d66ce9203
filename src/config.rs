//! TOML loading and validation for `PipelineConfig`.

use crate::error::TrackerError;
use crate::pipeline::PipelineConfig;
use std::path::Path;
use tracing::info;

impl PipelineConfig {
    /// Parses and validates a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, TrackerError> {
        let config: PipelineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TrackerError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        info!(
            path = %path.display(),
            band = ?config.band,
            min_area = config.selection.min_object_area,
            max_objects = config.selection.max_num_objects,
            "Loaded tracker config"
        );
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, TrackerError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TrackerError> {
        self.band.validate()?;

        let selection = &self.selection;
        if selection.max_num_objects == 0 {
            return Err(TrackerError::Config(
                "max_num_objects must be greater than 0".to_string(),
            ));
        }
        if !selection.min_object_area.is_finite() || selection.min_object_area < 0.0 {
            return Err(TrackerError::Config(format!(
                "min_object_area must be a non-negative number, got {}",
                selection.min_object_area
            )));
        }
        if let Some(max) = selection.max_object_area {
            if !max.is_finite() || max <= selection.min_object_area {
                return Err(TrackerError::Config(format!(
                    "max_object_area ({}) must be greater than min_object_area ({})",
                    max, selection.min_object_area
                )));
            }
        }
        Ok(())
    }
}
