// THEORY:
// The `pipeline` module is the top-level API of the tracker. It wires the four stages
// together and owns the only state that outlives a frame: the configuration. Each call
// to `process` reads the band and policy as they are at that moment, runs
//
//   ColorBandFilter -> MaskCleaner -> blob_detector -> BlobSelector
//
// to completion and returns a `DetectionResult`. Nothing about the previous frame is
// remembered. Changing the band between frames goes through `set_band`/`set_control`,
// which is the only mutation path; the next frame simply sees the new value.

use crate::core_modules::blob_detector::blob_detector;
use crate::core_modules::blob_selector::BlobSelector;
use crate::core_modules::color_band::{BandControl, ColorBandFilter};
use crate::core_modules::contour::ContourSet;
use crate::core_modules::frame::Frame;
use crate::core_modules::mask::BinaryMask;
use crate::core_modules::mask_cleaner::MaskCleaner;
use crate::core_modules::pixel::pixel::HueScale;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// Re-export key data structures for the public API.
pub use crate::core_modules::blob::Blob;
pub use crate::core_modules::blob_selector::{DetectionResult, SelectionPolicy, TrackingStatus};
pub use crate::core_modules::color_band::ColorBand;

/// Configuration for the FramePipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// How hue is packed into a byte before comparing against the band.
    pub hue_scale: HueScale,
    /// Run the erode/dilate schedule on the mask. Off leaves the raw threshold.
    pub use_morph_ops: bool,
    pub band: ColorBand,
    pub selection: SelectionPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            hue_scale: HueScale::default(),
            use_morph_ops: true,
            band: ColorBand::SQUARE_PRESET,
            selection: SelectionPolicy::default(),
        }
    }
}

/// Everything one frame produced, for callers that want to show the intermediate images.
#[derive(Debug, Clone)]
pub struct FrameAnalysis {
    /// The mask after cleaning (or the raw threshold when morphology is off).
    pub mask: BinaryMask,
    pub contours: ContourSet,
    pub result: DetectionResult,
}

pub struct FramePipeline {
    config: PipelineConfig,
    cleaner: MaskCleaner,
}

impl FramePipeline {
    pub fn new(config: PipelineConfig) -> Self {
        warn_if_inverted(&config.band);
        Self {
            config,
            cleaner: MaskCleaner::default(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn band(&self) -> &ColorBand {
        &self.config.band
    }

    pub fn set_band(&mut self, band: ColorBand) {
        warn_if_inverted(&band);
        self.config.band = band;
    }

    /// Sets one named bound; the value is clamped to 0..=255.
    pub fn set_control(&mut self, control: BandControl, value: i32) {
        self.config.band.set(control, value);
        warn_if_inverted(&self.config.band);
    }

    pub fn set_selection(&mut self, selection: SelectionPolicy) {
        self.config.selection = selection;
    }

    pub fn process(&self, frame: &Frame) -> DetectionResult {
        self.analyze(frame).result
    }

    pub fn analyze(&self, frame: &Frame) -> FrameAnalysis {
        // Stage 1: Color thresholding
        let filter = ColorBandFilter::new(self.config.hue_scale);
        let mut mask = filter.apply(frame, &self.config.band);

        // Stage 2: Noise suppression
        if self.config.use_morph_ops {
            self.cleaner.clean(&mut mask);
        }

        // Stage 3: Contours and moments
        let extraction = blob_detector::find_blobs(&mask);

        // Stage 4: Acceptance policy
        let result = BlobSelector::new(self.config.selection).select(&extraction.candidates);

        debug!(
            status = ?result.status,
            blobs = result.blobs.len(),
            contours = result.contour_count,
            "Processed frame"
        );
        if result.status == TrackingStatus::TooNoisy {
            warn!(
                contours = result.contour_count,
                max = self.config.selection.max_num_objects,
                "Too many regions in band, adjust the filter"
            );
        }

        FrameAnalysis {
            mask,
            contours: extraction.contours,
            result,
        }
    }
}

fn warn_if_inverted(band: &ColorBand) {
    if let Err(e) = band.validate() {
        warn!("{}; frames will match nothing", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::pixel::pixel::Pixel;

    #[test]
    fn default_config_uses_preset_band() {
        let config = PipelineConfig::default();
        assert_eq!(config.band, ColorBand::SQUARE_PRESET);
        assert!(config.use_morph_ops);
        assert_eq!(config.hue_scale, HueScale::HalfDegrees);
    }

    #[test]
    fn set_control_changes_the_band() {
        let mut pipeline = FramePipeline::new(PipelineConfig::default());
        pipeline.set_control(BandControl::HueMin, 300);
        assert_eq!(pipeline.band().hue_min, 255);
        pipeline.set_control(BandControl::HueMin, 10);
        assert_eq!(pipeline.band().hue_min, 10);
    }

    #[test]
    fn analyze_keeps_intermediate_mask() {
        let config = PipelineConfig {
            band: ColorBand::default(),
            use_morph_ops: false,
            ..PipelineConfig::default()
        };
        let frame = Frame::filled(40, 30, Pixel::new(1, 2, 3));
        let analysis = FramePipeline::new(config).analyze(&frame);
        assert_eq!(analysis.mask.count(), 40 * 30);
        assert_eq!(analysis.contours.top_level_count(), 1);
        assert_eq!(analysis.result.status, TrackingStatus::Tracking);
    }

    #[test]
    fn morphology_toggle_keeps_small_specks() {
        let mut image = image::RgbImage::new(50, 50);
        for y in 10..12 {
            for x in 10..12 {
                image.put_pixel(x, y, image::Rgb([255, 255, 255]));
            }
        }
        let frame = Frame::from(image);
        let white = ColorBand::new((0, 255), (0, 0), (200, 255));

        let raw = FramePipeline::new(PipelineConfig {
            band: white,
            use_morph_ops: false,
            ..PipelineConfig::default()
        })
        .analyze(&frame);
        let cleaned = FramePipeline::new(PipelineConfig {
            band: white,
            ..PipelineConfig::default()
        })
        .analyze(&frame);

        assert_eq!(raw.mask.count(), 4);
        assert!(cleaned.mask.is_blank());
    }
}
