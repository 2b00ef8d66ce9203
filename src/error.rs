//! Error types for hue_tracker.
//!
//! Nothing on the per-frame path returns these: a frame always yields a
//! `DetectionResult`. Errors only come from building frames out of raw buffers,
//! file I/O and configuration parsing.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Inverted {channel} band: min {min} is greater than max {max}")]
    InvalidBand {
        channel: &'static str,
        min: u8,
        max: u8,
    },

    #[error("Unknown band control: {0}")]
    UnknownControl(String),

    #[error("Frame buffer holds {actual} bytes, expected {expected}")]
    FrameSize { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
