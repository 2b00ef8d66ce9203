use hue_tracker::{DetectionResult, Frame, TrackingStatus};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_cross_mut, draw_hollow_circle_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

const MARKER: Rgb<u8> = Rgb([0, 255, 0]);
const NOISE_BORDER: Rgb<u8> = Rgb([255, 0, 0]);
const MARKER_RADIUS: i32 = 10;

/// Copies the frame and draws a marker on every blob, or a red border for a noisy frame.
pub fn draw_result(frame: &Frame, result: &DetectionResult) -> RgbImage {
    let mut canvas = frame.to_rgb_image();

    for blob in &result.blobs {
        let centre = blob.position();
        draw_hollow_circle_mut(&mut canvas, centre, MARKER_RADIUS, MARKER);
        draw_hollow_circle_mut(&mut canvas, centre, MARKER_RADIUS + 1, MARKER);
        draw_cross_mut(&mut canvas, MARKER, centre.0, centre.1);
    }

    if result.status == TrackingStatus::TooNoisy {
        let (width, height) = canvas.dimensions();
        if width > 0 && height > 0 {
            draw_hollow_rect_mut(&mut canvas, Rect::at(0, 0).of_size(width, height), NOISE_BORDER);
            if width > 2 && height > 2 {
                draw_hollow_rect_mut(
                    &mut canvas,
                    Rect::at(1, 1).of_size(width - 2, height - 2),
                    NOISE_BORDER,
                );
            }
        }
    }

    canvas
}
