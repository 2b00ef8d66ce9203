// THEORY:
// A `Frame` is one image handed to the tracker by whatever produces images (a camera,
// a decoded file, a test fixture). The tracker never writes to it. It is a flat,
// row-major buffer of 3-channel 8-bit pixels plus the order those channels come in,
// since cameras commonly deliver BGR while decoded files are RGB.

use crate::core_modules::pixel::pixel::Pixel;
use crate::error::TrackerError;
use image::{DynamicImage, RgbImage};

pub const CHANNELS: usize = 3;

/// Byte order of the three channels inside each pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    order: ChannelOrder,
    /// Row-major, `CHANNELS` bytes per pixel.
    data: Vec<u8>,
}

impl Frame {
    /// Wraps a raw interleaved buffer. The length must be exactly width * height * 3.
    pub fn from_raw(
        width: u32,
        height: u32,
        order: ChannelOrder,
        data: Vec<u8>,
    ) -> Result<Self, TrackerError> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(TrackerError::FrameSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            order,
            data,
        })
    }

    /// A frame where every pixel is the same RGB color.
    pub fn filled(width: u32, height: u32, color: Pixel) -> Self {
        let pixel_count = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixel_count * CHANNELS);
        for _ in 0..pixel_count {
            data.extend_from_slice(&[color.red, color.green, color.blue]);
        }
        Self {
            width,
            height,
            order: ChannelOrder::Rgb,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn order(&self) -> ChannelOrder {
        self.order
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn decode(order: ChannelOrder, bytes: &[u8]) -> Pixel {
        match order {
            ChannelOrder::Rgb => Pixel::new(bytes[0], bytes[1], bytes[2]),
            ChannelOrder::Bgr => Pixel::new(bytes[2], bytes[1], bytes[0]),
        }
    }

    /// Iterates pixels in raster order, already normalised to RGB.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        let order = self.order;
        self.data
            .chunks_exact(CHANNELS)
            .map(move |bytes| Self::decode(order, bytes))
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * CHANNELS;
        self.data
            .get(start..start + CHANNELS)
            .map(|bytes| Self::decode(self.order, bytes))
    }

    /// Copies the frame into an RGB image, swapping channels if needed.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let pixel = self.pixel(x, y).unwrap_or_default();
            image::Rgb([pixel.red, pixel.green, pixel.blue])
        })
    }
}

impl From<RgbImage> for Frame {
    fn from(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            order: ChannelOrder::Rgb,
            data: image.into_raw(),
        }
    }
}

impl From<&DynamicImage> for Frame {
    fn from(image: &DynamicImage) -> Self {
        Frame::from(image.to_rgb8())
    }
}
