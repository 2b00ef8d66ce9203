use hue_tracker::BinaryMask;
use hue_tracker::core_modules::mask_cleaner::{MaskCleaner, MorphOp, StructuringElement, dilate};

/// (min_x, min_y, max_x, max_y) of the true pixels.
fn bounds(mask: &BinaryMask) -> Option<(u32, u32, u32, u32)> {
    let mut found: Option<(u32, u32, u32, u32)> = None;
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if mask.get(x as i64, y as i64) {
                found = Some(match found {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
    }
    found
}

fn centred_square() -> BinaryMask {
    // 200x200 at x 220..=419, y 140..=339.
    let mut mask = BinaryMask::new(640, 480);
    mask.fill_rect(220, 140, 200, 200);
    mask
}

#[test]
fn first_clean_grows_the_square() {
    let mut mask = centred_square();
    MaskCleaner::default().clean(&mut mask);

    assert_eq!(bounds(&mask), Some((217, 137, 423, 343)));
    assert_eq!(mask.count(), 207 * 207);
}

#[test]
fn opening_is_a_fixed_point_on_a_cleaned_blob() {
    let mut cleaned = centred_square();
    MaskCleaner::default().clean(&mut cleaned);

    let opening = MaskCleaner::new(vec![
        MorphOp::Erode(StructuringElement::square(3)),
        MorphOp::Erode(StructuringElement::square(1)),
        MorphOp::Dilate(StructuringElement::square(3)),
    ]);
    let mut again = cleaned.clone();
    opening.clean(&mut again);

    assert_eq!(again, cleaned);
}

#[test]
fn second_clean_only_adds_the_final_dilation() {
    let mut once = centred_square();
    MaskCleaner::default().clean(&mut once);

    let mut twice = once.clone();
    MaskCleaner::default().clean(&mut twice);

    let mut expected = once.clone();
    dilate(&mut expected, StructuringElement::square(8));

    assert_eq!(twice, expected);
    assert_eq!(bounds(&twice), Some((214, 134, 427, 347)));
    // Nothing the first pass kept was removed.
    for y in 0..once.height() {
        for x in 0..once.width() {
            if once.get(x as i64, y as i64) {
                assert!(twice.get(x as i64, y as i64));
            }
        }
    }
}

#[test]
fn isolated_noise_is_removed_and_blob_survives() {
    let mut mask = centred_square();
    for &(x, y) in &[(10, 10), (600, 20), (35, 400), (500, 460)] {
        mask.set(x, y, true);
    }
    mask.fill_rect(100, 100, 2, 2);

    MaskCleaner::default().clean(&mut mask);
    assert_eq!(bounds(&mask), Some((217, 137, 423, 343)));
}

#[test]
fn blob_touching_the_border_loses_its_edge_row_then_regrows() {
    let mut mask = BinaryMask::new(100, 100);
    mask.fill_rect(0, 0, 50, 50);

    MaskCleaner::default().clean(&mut mask);

    // Erosion clears x=0, dilation 3 restores it, dilation 8 grows right/down by 4.
    assert_eq!(bounds(&mask), Some((0, 0, 53, 53)));
    assert_eq!(mask.count(), 54 * 54);
}
