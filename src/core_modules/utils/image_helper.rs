pub mod image_helper {
    use crate::core_modules::frame::Frame;
    use crate::core_modules::mask::BinaryMask;
    use crate::error::TrackerError;
    use image::ImageEncoder;
    use image::RgbImage;
    use std::path::Path;

    /// Decodes any image file `image` understands into an RGB frame.
    pub fn load_frame<P: AsRef<Path>>(path: P) -> Result<Frame, TrackerError> {
        let decoded = image::open(path)?;
        Ok(Frame::from(&decoded))
    }

    /// Writes a mask as an 8-bit grayscale PNG (0 or 255).
    pub fn save_mask<P: AsRef<Path>>(path: P, mask: &BinaryMask) -> Result<(), TrackerError> {
        let output = std::fs::File::create(path)?;
        let encoder = image::codecs::png::PngEncoder::new(output);
        let (width, height) = mask.dimensions();

        encoder.write_image(
            mask.as_image().as_raw(),
            width,
            height,
            image::ExtendedColorType::L8,
        )?;

        Ok(())
    }

    pub fn save_rgb<P: AsRef<Path>>(path: P, image: &RgbImage) -> Result<(), TrackerError> {
        let output = std::fs::File::create(path)?;
        let encoder = image::codecs::png::PngEncoder::new(output);

        encoder.write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgb8,
        )?;

        Ok(())
    }
}
