// THEORY:
// The `BlobSelector` turns measured candidates into the frame's verdict. It is a small
// state machine recomputed from scratch every frame:
//
// - More top-level regions than `max_num_objects` means the band lets too much through.
//   The frame is `TooNoisy` and nothing is reported.
// - Otherwise every candidate with an area above `min_object_area` (and, when an upper
//   bound is configured, not above `max_object_area`) becomes a `Blob`, in traversal
//   order. In `largest_only` mode just the single largest of those survives.
// - At least one blob means `Tracking`; none means `NoneFound`.

use crate::core_modules::blob::Blob;
use crate::core_modules::blob_detector::Candidate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest accepted area, a 20x20 region.
pub const MIN_OBJECT_AREA: f64 = 400.0;
/// Region count above which a frame is considered noise.
pub const MAX_NUM_OBJECTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionPolicy {
    /// Candidates must be strictly larger than this.
    pub min_object_area: f64,
    /// Ceiling on the number of top-level regions in one frame.
    pub max_num_objects: usize,
    /// Optional upper bound, inclusive. Off unless set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_object_area: Option<f64>,
    /// Report only the largest accepted blob.
    pub largest_only: bool,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            min_object_area: MIN_OBJECT_AREA,
            max_num_objects: MAX_NUM_OBJECTS,
            max_object_area: None,
            largest_only: false,
        }
    }
}

impl SelectionPolicy {
    /// Upper bound that rejects anything covering about two thirds of the frame.
    pub fn max_area_for_frame(width: u32, height: u32) -> f64 {
        width as f64 * height as f64 / 1.5
    }

    pub fn with_min_object_area(mut self, area: f64) -> Self {
        self.min_object_area = area;
        self
    }

    pub fn with_max_num_objects(mut self, count: usize) -> Self {
        self.max_num_objects = count;
        self
    }

    pub fn with_max_object_area(mut self, area: Option<f64>) -> Self {
        self.max_object_area = area;
        self
    }

    pub fn with_largest_only(mut self, largest_only: bool) -> Self {
        self.largest_only = largest_only;
        self
    }

    pub fn accepts(&self, area: f64) -> bool {
        if area <= 0.0 || area <= self.min_object_area {
            return false;
        }
        match self.max_object_area {
            Some(max) => area <= max,
            None => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrackingStatus {
    Tracking,
    TooNoisy,
    NoneFound,
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let caption = match self {
            TrackingStatus::Tracking => "Tracking Object",
            TrackingStatus::TooNoisy => "TOO MUCH NOISE! ADJUST FILTER",
            TrackingStatus::NoneFound => "No Object Found",
        };
        f.write_str(caption)
    }
}

/// The pipeline's answer for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionResult {
    pub blobs: Vec<Blob>,
    pub status: TrackingStatus,
    /// Number of top-level regions seen before any filtering.
    pub contour_count: usize,
}

impl DetectionResult {
    pub fn is_tracking(&self) -> bool {
        self.status == TrackingStatus::Tracking
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlobSelector {
    policy: SelectionPolicy,
}

impl BlobSelector {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self { policy }
    }

    pub fn select(&self, candidates: &[Candidate]) -> DetectionResult {
        let contour_count = candidates.len();

        if contour_count > self.policy.max_num_objects {
            return DetectionResult {
                blobs: Vec::new(),
                status: TrackingStatus::TooNoisy,
                contour_count,
            };
        }

        let accepted = candidates
            .iter()
            .filter(|candidate| self.policy.accepts(candidate.area()))
            .filter_map(|candidate| Blob::from_moments(&candidate.moments));

        let blobs: Vec<Blob> = if self.policy.largest_only {
            // First of equal areas wins.
            let mut largest: Option<Blob> = None;
            for blob in accepted {
                if largest.is_none_or(|best| blob.area > best.area) {
                    largest = Some(blob);
                }
            }
            largest.into_iter().collect()
        } else {
            accepted.collect()
        };

        let status = if blobs.is_empty() {
            TrackingStatus::NoneFound
        } else {
            TrackingStatus::Tracking
        };

        DetectionResult {
            blobs,
            status,
            contour_count,
        }
    }
}
