// THEORY:
// The `Pixel` module is the smallest unit of the tracker. It holds one RGB triplet
// and knows how to re-express itself in the hue/saturation/value representation the
// color band is defined in. Nothing here looks at neighbours; all spatial work lives
// in the mask and contour modules.
//
// HSV is used because thresholding on hue and saturation is far less sensitive to
// lighting than thresholding raw channels: a shadow mostly moves V, not H.
//
// Encoding (8-bit):
// - value      = max(R, G, B)
// - saturation = round(255 * (max - min) / max), 0 for black
// - hue        = angle on the color wheel, quantised by `HueScale`
//   • HalfDegrees (default): round(deg / 2), 0..=179
//   • FullByte:              round(deg * 256 / 360), 0..=255
//   Anything that rounds up to the top of the range wraps back to 0.
// Gray pixels (max == min) have hue 0.

pub mod pixel {
    use serde::{Deserialize, Serialize};

    pub type Channel = u8;
    pub type Hue = f32;

    /// How the hue angle is packed into a byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum HueScale {
        /// Degrees halved, 0..=179. The layout the preset band was tuned against.
        #[default]
        HalfDegrees,
        /// Degrees stretched over the whole byte, 0..=255.
        FullByte,
    }

    impl HueScale {
        /// Number of distinct hue codes in this scale.
        pub fn range(self) -> Hue {
            match self {
                HueScale::HalfDegrees => 180.0,
                HueScale::FullByte => 256.0,
            }
        }

        /// Quantises a hue angle in degrees [0, 360) into this scale.
        pub fn encode(self, degrees: Hue) -> Channel {
            let range = self.range();
            let code = (degrees * range / 360.0).round();
            if code >= range || code < 0.0 {
                0
            } else {
                code as Channel
            }
        }
    }

    /// A pixel in hue/saturation/value form.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Hsv {
        pub hue: Channel,
        pub saturation: Channel,
        pub value: Channel,
    }

    /// A "dumb" data container for one pixel, always stored in RGB order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
    }

    impl Pixel {
        pub fn new(red: Channel, green: Channel, blue: Channel) -> Self {
            Self { red, green, blue }
        }

        fn max_channel(&self) -> Channel {
            self.red.max(self.green.max(self.blue))
        }

        fn min_channel(&self) -> Channel {
            self.red.min(self.green.min(self.blue))
        }

        /// HSV value: the brightest channel.
        pub fn value(&self) -> Channel {
            self.max_channel()
        }

        /// Chroma: max(R,G,B) - min(R,G,B).
        pub fn chroma(&self) -> Channel {
            self.max_channel() - self.min_channel()
        }

        /// HSV saturation scaled to 0..=255.
        pub fn saturation(&self) -> Channel {
            let value = self.max_channel() as u32;
            if value == 0 {
                return 0;
            }
            ((self.chroma() as u32 * 255 + value / 2) / value) as Channel
        }

        /// Hue angle in degrees [0, 360).
        pub fn hue_degrees(&self) -> Hue {
            let chroma = self.chroma();
            if chroma == 0 {
                return 0.0;
            }

            let red = self.red as Hue;
            let green = self.green as Hue;
            let blue = self.blue as Hue;
            let inverse_chroma = 1.0 / chroma as Hue;
            let maximum_channel = self.max_channel();

            let (base_difference, sector_offset) = if maximum_channel == self.red {
                (green - blue, 0.0)
            } else if maximum_channel == self.green {
                (blue - red, 2.0)
            } else {
                (red - green, 4.0)
            };

            let mut hue_degrees = (base_difference * inverse_chroma + sector_offset) * 60.0;
            if hue_degrees < 0.0 {
                hue_degrees += 360.0;
            }
            hue_degrees
        }

        pub fn to_hsv(&self, scale: HueScale) -> Hsv {
            Hsv {
                hue: scale.encode(self.hue_degrees()),
                saturation: self.saturation(),
                value: self.value(),
            }
        }
    }

    impl From<[Channel; 3]> for Pixel {
        fn from(rgb: [Channel; 3]) -> Self {
            Pixel::new(rgb[0], rgb[1], rgb[2])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::pixel::*;

    #[test]
    fn primaries_in_half_degrees() {
        let red = Pixel::new(255, 0, 0).to_hsv(HueScale::HalfDegrees);
        let green = Pixel::new(0, 255, 0).to_hsv(HueScale::HalfDegrees);
        let blue = Pixel::new(0, 0, 255).to_hsv(HueScale::HalfDegrees);

        assert_eq!(red, Hsv { hue: 0, saturation: 255, value: 255 });
        assert_eq!(green.hue, 60);
        assert_eq!(blue.hue, 120);
    }

    #[test]
    fn full_byte_scale_stretches_hue() {
        let green = Pixel::new(0, 255, 0).to_hsv(HueScale::FullByte);
        assert_eq!(green.hue, 85);
        let blue = Pixel::new(0, 0, 255).to_hsv(HueScale::FullByte);
        assert_eq!(blue.hue, 171);
    }

    #[test]
    fn gray_has_no_hue_or_saturation() {
        let gray = Pixel::new(128, 128, 128).to_hsv(HueScale::HalfDegrees);
        assert_eq!(gray, Hsv { hue: 0, saturation: 0, value: 128 });

        let black = Pixel::default().to_hsv(HueScale::HalfDegrees);
        assert_eq!(black, Hsv::default());
    }

    #[test]
    fn hue_near_full_circle_wraps_to_zero() {
        // 359.76 degrees rounds to 180 in the half-degree scale.
        let almost_red = Pixel::new(255, 0, 1);
        assert!(almost_red.hue_degrees() > 359.0);
        assert_eq!(almost_red.to_hsv(HueScale::HalfDegrees).hue, 0);
    }

    #[test]
    fn saturation_is_rounded() {
        // chroma 100 over value 200 -> 127.5 -> 128
        let pixel = Pixel::new(200, 100, 150);
        assert_eq!(pixel.saturation(), 128);
        assert_eq!(pixel.value(), 200);
    }
}
