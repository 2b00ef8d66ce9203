// THEORY:
// The `BlobDetector` is the measurement stage. It takes a cleaned mask, traces its
// boundaries into a two-level `ContourSet`, then walks the top-level sibling chain and
// measures each outer boundary with polygon moments. Holes are never measured; a ring
// is reported with the area of its outer edge.
//
// It is a stateless utility: one mask in, one `Extraction` out, no memory between
// frames. Deciding which candidates count as objects is left to the `BlobSelector`.

use crate::core_modules::contour::ContourSet;
use crate::core_modules::mask::BinaryMask;
use crate::core_modules::moment::Moments;

/// One measured top-level contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Index into `Extraction::contours`.
    pub contour_index: usize,
    pub moments: Moments,
}

impl Candidate {
    pub fn area(&self) -> f64 {
        self.moments.area()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub contours: ContourSet,
    /// One entry per top-level contour, in traversal order.
    pub candidates: Vec<Candidate>,
}

pub mod blob_detector {
    use super::*;

    /// Traces and measures every top-level region of the mask.
    pub fn find_blobs(mask: &BinaryMask) -> Extraction {
        // --- 1. Boundary tracing ---
        let contours = ContourSet::extract(mask);

        // --- 2. Measure each top-level contour ---
        let candidates = contours
            .top_level()
            .map(|(contour_index, contour)| Candidate {
                contour_index,
                moments: Moments::from_polygon(&contour.points),
            })
            .collect();

        Extraction {
            contours,
            candidates,
        }
    }
}
