// THEORY:
// The color band is the one knob an operator turns while tracking: six inclusive bounds,
// one min/max pair per HSV channel. A pixel belongs to the object when all three of its
// channels fall inside their pair. There is no wraparound on hue, so a pair with
// min > max matches nothing; that is reported by `validate` but never stops a frame.
//
// The `ColorBandFilter` is the first pipeline stage. It is stateless: given a frame and
// the band read at the start of that frame, it produces a fresh mask of the same size.

use crate::core_modules::frame::Frame;
use crate::core_modules::mask::{BinaryMask, ON};
use crate::core_modules::pixel::pixel::{Channel, Hsv, HueScale};
use crate::error::TrackerError;
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inclusive per-channel bounds in HSV space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorBand {
    pub hue_min: Channel,
    pub hue_max: Channel,
    pub saturation_min: Channel,
    pub saturation_max: Channel,
    pub value_min: Channel,
    pub value_max: Channel,
}

impl Default for ColorBand {
    /// Fully open band: every pixel matches.
    fn default() -> Self {
        Self::new((0, 255), (0, 255), (0, 255))
    }
}

impl ColorBand {
    /// Band tuned for the yellow-green test square (half-degree hue).
    pub const SQUARE_PRESET: ColorBand = ColorBand::new((25, 53), (81, 223), (117, 175));

    pub const fn new(
        hue: (Channel, Channel),
        saturation: (Channel, Channel),
        value: (Channel, Channel),
    ) -> Self {
        Self {
            hue_min: hue.0,
            hue_max: hue.1,
            saturation_min: saturation.0,
            saturation_max: saturation.1,
            value_min: value.0,
            value_max: value.1,
        }
    }

    pub fn contains(&self, hsv: Hsv) -> bool {
        (self.hue_min..=self.hue_max).contains(&hsv.hue)
            && (self.saturation_min..=self.saturation_max).contains(&hsv.saturation)
            && (self.value_min..=self.value_max).contains(&hsv.value)
    }

    /// Rejects a band with any inverted channel pair.
    pub fn validate(&self) -> Result<(), TrackerError> {
        let pairs = [
            ("hue", self.hue_min, self.hue_max),
            ("saturation", self.saturation_min, self.saturation_max),
            ("value", self.value_min, self.value_max),
        ];
        for (channel, min, max) in pairs {
            if min > max {
                return Err(TrackerError::InvalidBand { channel, min, max });
            }
        }
        Ok(())
    }

    pub fn get(&self, control: BandControl) -> Channel {
        match control {
            BandControl::HueMin => self.hue_min,
            BandControl::HueMax => self.hue_max,
            BandControl::SatMin => self.saturation_min,
            BandControl::SatMax => self.saturation_max,
            BandControl::ValMin => self.value_min,
            BandControl::ValMax => self.value_max,
        }
    }

    /// Sets one bound, clamping the raw control value to 0..=255.
    pub fn set(&mut self, control: BandControl, value: i32) {
        let value = value.clamp(0, Channel::MAX as i32) as Channel;
        let slot = match control {
            BandControl::HueMin => &mut self.hue_min,
            BandControl::HueMax => &mut self.hue_max,
            BandControl::SatMin => &mut self.saturation_min,
            BandControl::SatMax => &mut self.saturation_max,
            BandControl::ValMin => &mut self.value_min,
            BandControl::ValMax => &mut self.value_max,
        };
        *slot = value;
    }
}

/// The six named numeric controls an operator can tune.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandControl {
    HueMin,
    HueMax,
    SatMin,
    SatMax,
    ValMin,
    ValMax,
}

impl BandControl {
    pub const ALL: [BandControl; 6] = [
        BandControl::HueMin,
        BandControl::HueMax,
        BandControl::SatMin,
        BandControl::SatMax,
        BandControl::ValMin,
        BandControl::ValMax,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BandControl::HueMin => "hueMin",
            BandControl::HueMax => "hueMax",
            BandControl::SatMin => "satMin",
            BandControl::SatMax => "satMax",
            BandControl::ValMin => "valMin",
            BandControl::ValMax => "valMax",
        }
    }
}

impl FromStr for BandControl {
    type Err = TrackerError;

    /// Accepts `hueMin` style names as well as trackbar style `H_MIN`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "hueMin" | "H_MIN" => Ok(BandControl::HueMin),
            "hueMax" | "H_MAX" => Ok(BandControl::HueMax),
            "satMin" | "S_MIN" => Ok(BandControl::SatMin),
            "satMax" | "S_MAX" => Ok(BandControl::SatMax),
            "valMin" | "V_MIN" => Ok(BandControl::ValMin),
            "valMax" | "V_MAX" => Ok(BandControl::ValMax),
            other => Err(TrackerError::UnknownControl(other.to_string())),
        }
    }
}

impl fmt::Display for BandControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Thresholds a frame against a band.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorBandFilter {
    hue_scale: HueScale,
}

impl ColorBandFilter {
    pub fn new(hue_scale: HueScale) -> Self {
        Self { hue_scale }
    }

    pub fn hue_scale(&self) -> HueScale {
        self.hue_scale
    }

    /// Produces a mask with the frame's dimensions; true where the pixel is in the band.
    pub fn apply(&self, frame: &Frame, band: &ColorBand) -> BinaryMask {
        let mut mask = BinaryMask::new(frame.width(), frame.height());
        let scale = self.hue_scale;
        for (slot, pixel) in mask.raw_mut().iter_mut().zip(frame.pixels()) {
            if band.contains(pixel.to_hsv(scale)) {
                *slot = ON;
            }
        }
        mask
    }

    /// The frame's H, S and V planes packed into the three channels of an image.
    pub fn hsv_image(&self, frame: &Frame) -> RgbImage {
        let scale = self.hue_scale;
        let mut out = RgbImage::new(frame.width(), frame.height());
        for (target, pixel) in out.pixels_mut().zip(frame.pixels()) {
            let hsv = pixel.to_hsv(scale);
            target.0 = [hsv.hue, hsv.saturation, hsv.value];
        }
        out
    }
}
