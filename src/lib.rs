// THEORY:
// This file is the main entry point for the `hue_tracker` library crate.
// The public face is the `FramePipeline` together with its configuration
// (`PipelineConfig`) and its per-frame answer (`DetectionResult`). A caller hands it
// frames one at a time and gets back where the colored object is, or why it could
// not be reported.
//
// The stages live in `core_modules`, one file each, so they can also be used and
// tested on their own. Acquisition, display and operator controls belong to the
// caller; the `visual_tester` binary shows one way to provide them.

pub mod config;
pub mod core_modules;
pub mod error;
pub mod pipeline;

pub use core_modules::color_band::BandControl;
pub use core_modules::frame::{ChannelOrder, Frame};
pub use core_modules::mask::BinaryMask;
pub use core_modules::pixel::pixel::{HueScale, Pixel};
pub use error::TrackerError;
pub use pipeline::{
    Blob, ColorBand, DetectionResult, FrameAnalysis, FramePipeline, PipelineConfig,
    SelectionPolicy, TrackingStatus,
};
