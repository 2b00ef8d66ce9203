pub mod blob;
pub mod blob_detector;
pub mod blob_selector;
pub mod color_band;
pub mod contour;
pub mod frame;
pub mod mask;
pub mod mask_cleaner;
pub mod moment;
pub mod pixel;
pub mod utils;
