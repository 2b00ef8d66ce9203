// THEORY:
// The `MaskCleaner` is the noise-suppression stage. Raw thresholding leaves specks of
// stray pixels and ragged, split object regions. A short erosion removes everything
// thinner than the kernel; a longer dilation then regrows what survived and closes the
// small gaps inside it, so each object comes out as one solid, convex-ish region.
//
// Default schedule:
//   Stage 1: erode  3x3   (kills specks)
//   Stage 2: erode  1x1   (identity pass, kept so the schedule matches the tuned one)
//   Stage 3: dilate 3x3   (restores survivors to their pre-erosion extent)
//   Stage 4: dilate 8x8   (grows and consolidates)
//
// Each op builds a rectangular `imageproc` mask and runs grayscale erosion or dilation
// over the 0/255 image. Samples outside the mask are false: erosion runs on a copy padded
// with a false border as wide as the window, so any pixel whose window leaves the image
// is cleared; dilation just ignores the missing samples. For an extent k the anchor sits
// at k/2, so the window covers offsets -(k/2) ..= k-1-k/2.

use crate::core_modules::mask::{BinaryMask, ON};
use image::{GrayImage, Luma};
use imageproc::morphology::{Mask, grayscale_dilate, grayscale_erode};

/// Largest extent an element can have; anchors are stored as bytes.
const MAX_EXTENT: u32 = u8::MAX as u32;

/// Rectangular structuring element. Extents are clamped to 1..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuringElement {
    pub width: u32,
    pub height: u32,
}

impl StructuringElement {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    fn extents(&self) -> (u32, u32) {
        (
            self.width.clamp(1, MAX_EXTENT),
            self.height.clamp(1, MAX_EXTENT),
        )
    }

    /// The element as an `imageproc` mask anchored at (width/2, height/2).
    fn to_mask(self) -> Mask {
        let (width, height) = self.extents();
        let shape = GrayImage::from_pixel(width, height, Luma([ON]));
        Mask::from_image(&shape, (width / 2) as u8, (height / 2) as u8)
    }

    /// Widest reach of the window past its anchor in any direction.
    fn reach(&self) -> u32 {
        let (width, height) = self.extents();
        let (low_x, high_x) = window(width);
        let (low_y, high_y) = window(height);
        [low_x.abs(), high_x, low_y.abs(), high_y]
            .into_iter()
            .max()
            .unwrap_or(0) as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphOp {
    Erode(StructuringElement),
    Dilate(StructuringElement),
}

/// Inclusive offset range covered by an element of the given extent.
fn window(extent: u32) -> (i64, i64) {
    let extent = extent.clamp(1, MAX_EXTENT) as i64;
    let anchor = extent / 2;
    (-anchor, extent - 1 - anchor)
}

/// A pixel stays true only if its whole window is true and inside the mask.
pub fn erode(mask: &mut BinaryMask, element: StructuringElement) {
    let (width, height) = mask.dimensions();
    let border = element.reach();
    let eroded = grayscale_erode(&mask.padded(border), &element.to_mask());
    let cropped = image::imageops::crop_imm(&eroded, border, border, width, height).to_image();
    mask.raw_mut().copy_from_slice(cropped.as_raw());
}

/// A pixel becomes true if anything in its window is true.
pub fn dilate(mask: &mut BinaryMask, element: StructuringElement) {
    let dilated = grayscale_dilate(mask.as_image(), &element.to_mask());
    mask.raw_mut().copy_from_slice(dilated.as_raw());
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskCleaner {
    steps: Vec<MorphOp>,
}

impl Default for MaskCleaner {
    fn default() -> Self {
        Self::new(vec![
            MorphOp::Erode(StructuringElement::square(3)),
            MorphOp::Erode(StructuringElement::square(1)),
            MorphOp::Dilate(StructuringElement::square(3)),
            MorphOp::Dilate(StructuringElement::square(8)),
        ])
    }
}

impl MaskCleaner {
    pub fn new(steps: Vec<MorphOp>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[MorphOp] {
        &self.steps
    }

    /// Runs every step in order, in place.
    pub fn clean(&self, mask: &mut BinaryMask) {
        for step in &self.steps {
            match *step {
                MorphOp::Erode(element) => erode(mask, element),
                MorphOp::Dilate(element) => dilate(mask, element),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_offsets_follow_anchor() {
        assert_eq!(window(1), (0, 0));
        assert_eq!(window(3), (-1, 1));
        assert_eq!(window(8), (-4, 3));
        assert_eq!(window(0), (0, 0));
        assert_eq!(StructuringElement::square(8).reach(), 4);
        assert_eq!(StructuringElement::new(1, 3).reach(), 1);
    }

    #[test]
    fn erosion_window_is_anchored_like_dilation() {
        // 8 wide: a pixel survives only if x-4 ..= x+3 are all set.
        let mut mask = BinaryMask::new(30, 1);
        mask.fill_rect(10, 0, 8, 1);
        erode(&mut mask, StructuringElement::new(8, 1));
        assert_eq!(mask.count(), 1);
        assert!(mask.get(14, 0));
    }

    #[test]
    fn erosion_clears_the_border() {
        let mut mask = BinaryMask::from_fn(10, 10, |_, _| true);
        erode(&mut mask, StructuringElement::square(3));
        assert_eq!(mask.count(), 64);
        assert!(!mask.get(0, 5));
        assert!(mask.get(1, 1));
    }

    #[test]
    fn dilation_uses_asymmetric_window() {
        let mut mask = BinaryMask::new(30, 30);
        mask.set(10, 10, true);
        dilate(&mut mask, StructuringElement::square(8));
        assert_eq!(mask.count(), 64);
        assert!(mask.get(7, 7));
        assert!(mask.get(14, 14));
        assert!(!mask.get(6, 10));
        assert!(!mask.get(15, 10));
    }

    #[test]
    fn unit_element_is_identity() {
        let mut mask = BinaryMask::from_fn(12, 9, |x, y| (x + y) % 3 == 0);
        let before = mask.clone();
        erode(&mut mask, StructuringElement::square(1));
        dilate(&mut mask, StructuringElement::square(1));
        assert_eq!(mask, before);
    }

    #[test]
    fn default_schedule_removes_specks() {
        let mut mask = BinaryMask::new(64, 64);
        mask.fill_rect(5, 5, 2, 2);
        mask.set(40, 12, true);
        MaskCleaner::default().clean(&mut mask);
        assert!(mask.is_blank());
    }

    #[test]
    fn default_schedule_grows_surviving_blob() {
        let mut mask = BinaryMask::new(64, 64);
        mask.fill_rect(20, 20, 10, 10);
        MaskCleaner::default().clean(&mut mask);
        // [20, 29] becomes [17, 33] on both axes.
        assert_eq!(mask.count(), 17 * 17);
        assert!(mask.get(17, 17));
        assert!(mask.get(33, 33));
        assert!(!mask.get(34, 20));
        assert_eq!(MaskCleaner::default().steps().len(), 4);
    }
}
