//! Binary masks.
//!
//! A `BinaryMask` is a thin wrapper over a `GrayImage` holding only 0 and 255, so it can
//! be handed straight to `imageproc` and written out as a PNG. Reads outside the image
//! are `false`, which is the border policy the morphology stage relies on.

use image::{GrayImage, Luma};

pub const ON: u8 = 255;
pub const OFF: u8 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    image: GrayImage,
}

impl BinaryMask {
    /// An all-false mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::new(width, height),
        }
    }

    pub fn from_fn<F>(width: u32, height: u32, mut predicate: F) -> Self
    where
        F: FnMut(u32, u32) -> bool,
    {
        let image = GrayImage::from_fn(width, height, |x, y| {
            Luma([if predicate(x, y) { ON } else { OFF }])
        });
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Signed lookup; anything outside the mask reads as false.
    pub fn get(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return false;
        }
        self.image.get_pixel(x as u32, y as u32).0[0] != OFF
    }

    /// Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, on: bool) {
        if x < self.width() && y < self.height() {
            self.image.put_pixel(x, y, Luma([if on { ON } else { OFF }]));
        }
    }

    /// Sets every pixel of the rectangle to true, clipped to the mask.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32) {
        let x_end = x.saturating_add(width).min(self.width());
        let y_end = y.saturating_add(height).min(self.height());
        for row in y..y_end {
            for column in x..x_end {
                self.image.put_pixel(column, row, Luma([ON]));
            }
        }
    }

    /// Number of true pixels.
    pub fn count(&self) -> usize {
        self.raw().iter().filter(|&&value| value != OFF).count()
    }

    pub fn is_blank(&self) -> bool {
        self.raw().iter().all(|&value| value == OFF)
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.image
    }

    /// Copy of the mask surrounded by `border` false pixels on every side.
    pub(crate) fn padded(&self, border: u32) -> GrayImage {
        let (width, height) = self.dimensions();
        let mut padded = GrayImage::new(width + 2 * border, height + 2 * border);
        image::imageops::replace(&mut padded, &self.image, border as i64, border as i64);
        padded
    }

    pub(crate) fn raw(&self) -> &[u8] {
        &self.image
    }

    pub(crate) fn raw_mut(&mut self) -> &mut [u8] {
        &mut self.image
    }
}
