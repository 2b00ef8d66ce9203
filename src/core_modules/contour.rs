// THEORY:
// Boundary tracing turns a cleaned mask into closed point sequences. `imageproc` follows
// Suzuki's border-following algorithm and reports every border with its type (outer
// edge of a region or edge of a hole) and its parent border. That full tree is more than
// the tracker needs, so it is flattened into two levels:
//
//   level 0: every outer boundary, in the order the tracer found them
//   level 1: the holes of each outer boundary
//
// An object sitting inside another object's hole becomes its own top-level entry. The
// contours are stored so each outer boundary is directly followed by its holes, and the
// `HierarchyNode` links (next / previous / first_child / parent) describe the forest.
// `None` plays the role of the "no link" sentinel. Walking `next` from entry 0 visits
// each top-level contour exactly once.
//
// The tracer only starts a border at a pixel with a background neighbour inside the
// image, so regions touching the frame edge would be missed. Tracing therefore runs on
// a copy with a one-pixel false border, and points are shifted back afterwards.

use crate::core_modules::mask::BinaryMask;
use imageproc::contours::{BorderType, find_contours};

pub use imageproc::point::Point;

/// Width of the false frame added around the mask before tracing.
const TRACE_BORDER: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    /// Boundary pixels in tracing order. The polygon is implicitly closed.
    pub points: Vec<Point<i32>>,
    pub is_hole: bool,
}

/// Links of one contour inside the two-level forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HierarchyNode {
    pub next: Option<usize>,
    pub previous: Option<usize>,
    pub first_child: Option<usize>,
    pub parent: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContourSet {
    contours: Vec<Contour>,
    hierarchy: Vec<HierarchyNode>,
}

impl ContourSet {
    /// Traces every boundary in the mask and arranges them outer-then-holes.
    pub fn extract(mask: &BinaryMask) -> Self {
        let traced = find_contours::<i32>(&mask.padded(TRACE_BORDER));
        let unpad = |points: &[Point<i32>]| -> Vec<Point<i32>> {
            points
                .iter()
                .map(|point| Point::new(point.x - TRACE_BORDER as i32, point.y - TRACE_BORDER as i32))
                .collect()
        };

        // Holes bucketed under their parent in one pass.
        let mut outers: Vec<usize> = Vec::new();
        let mut holes_of: Vec<Vec<usize>> = vec![Vec::new(); traced.len()];
        for (index, contour) in traced.iter().enumerate() {
            match (contour.border_type, contour.parent) {
                (BorderType::Outer, _) => outers.push(index),
                (BorderType::Hole, Some(parent)) if parent < traced.len() => {
                    holes_of[parent].push(index)
                }
                (BorderType::Hole, _) => {}
            }
        }

        let mut contours = Vec::with_capacity(traced.len());
        let mut hierarchy: Vec<HierarchyNode> = Vec::with_capacity(traced.len());
        let mut previous_outer: Option<usize> = None;

        for &outer in &outers {
            let outer_slot = contours.len();
            contours.push(Contour {
                points: unpad(&traced[outer].points),
                is_hole: false,
            });
            hierarchy.push(HierarchyNode {
                previous: previous_outer,
                ..HierarchyNode::default()
            });
            if let Some(previous) = previous_outer {
                hierarchy[previous].next = Some(outer_slot);
            }
            previous_outer = Some(outer_slot);

            let mut previous_hole: Option<usize> = None;
            for &hole in &holes_of[outer] {
                let hole_slot = contours.len();
                contours.push(Contour {
                    points: unpad(&traced[hole].points),
                    is_hole: true,
                });
                hierarchy.push(HierarchyNode {
                    previous: previous_hole,
                    parent: Some(outer_slot),
                    ..HierarchyNode::default()
                });
                match previous_hole {
                    Some(previous) => hierarchy[previous].next = Some(hole_slot),
                    None => hierarchy[outer_slot].first_child = Some(hole_slot),
                }
                previous_hole = Some(hole_slot);
            }
        }

        Self {
            contours,
            hierarchy,
        }
    }

    pub fn len(&self) -> usize {
        self.contours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub fn hierarchy(&self) -> &[HierarchyNode] {
        &self.hierarchy
    }

    pub fn get(&self, index: usize) -> Option<&Contour> {
        self.contours.get(index)
    }

    /// Walks the sibling chain from the first entry.
    pub fn top_level(&self) -> TopLevel<'_> {
        TopLevel {
            set: self,
            cursor: if self.contours.is_empty() { None } else { Some(0) },
            remaining: self.contours.len(),
        }
    }

    pub fn top_level_count(&self) -> usize {
        self.top_level().count()
    }
}

/// Iterator over `(index, contour)` for every top-level contour.
pub struct TopLevel<'a> {
    set: &'a ContourSet,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for TopLevel<'a> {
    type Item = (usize, &'a Contour);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        // Bounded by the number of entries so a malformed chain cannot loop forever.
        if self.remaining == 0 {
            self.cursor = None;
            return None;
        }
        self.remaining -= 1;

        let contour = self.set.contours.get(index)?;
        self.cursor = self.set.hierarchy.get(index).and_then(|node| node.next);
        Some((index, contour))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mask_has_no_contours() {
        let set = ContourSet::extract(&BinaryMask::new(20, 20));
        assert!(set.is_empty());
        assert_eq!(set.top_level().count(), 0);
    }

    #[test]
    fn separate_regions_are_siblings() {
        let mut mask = BinaryMask::new(50, 50);
        mask.fill_rect(5, 5, 10, 10);
        mask.fill_rect(30, 30, 10, 10);
        let set = ContourSet::extract(&mask);

        assert_eq!(set.len(), 2);
        assert_eq!(set.top_level_count(), 2);
        assert_eq!(set.hierarchy()[0].next, Some(1));
        assert_eq!(set.hierarchy()[1].previous, Some(0));
        assert_eq!(set.hierarchy()[1].next, None);
    }

    #[test]
    fn holes_follow_their_outer_boundary() {
        // A ring: 20x20 square with a 6x6 hole in the middle.
        let mut mask = BinaryMask::new(40, 40);
        mask.fill_rect(10, 10, 20, 20);
        for y in 17..23 {
            for x in 17..23 {
                mask.set(x, y, false);
            }
        }
        let set = ContourSet::extract(&mask);

        assert_eq!(set.len(), 2);
        assert!(!set.contours()[0].is_hole);
        assert!(set.contours()[1].is_hole);
        assert_eq!(set.hierarchy()[0].first_child, Some(1));
        assert_eq!(set.hierarchy()[1].parent, Some(0));
        assert_eq!(set.top_level_count(), 1);
    }

    #[test]
    fn regions_on_the_frame_edge_are_traced() {
        let mut corner = BinaryMask::new(100, 100);
        corner.fill_rect(0, 0, 50, 50);
        let set = ContourSet::extract(&corner);
        assert_eq!(set.top_level_count(), 1);
        let points = &set.contours()[0].points;
        assert!(points.iter().all(|p| p.x >= 0 && p.y >= 0 && p.x <= 49 && p.y <= 49));
        assert!(points.contains(&Point::new(0, 0)));

        let mut edge = BinaryMask::new(100, 100);
        edge.fill_rect(0, 20, 50, 50);
        assert_eq!(ContourSet::extract(&edge).top_level_count(), 1);

        let full = BinaryMask::from_fn(64, 48, |_, _| true);
        let set = ContourSet::extract(&full);
        assert_eq!(set.top_level_count(), 1);
        assert!(set.contours()[0].points.contains(&Point::new(63, 47)));
    }

    #[test]
    fn many_holes_keep_their_parents() {
        // One slab with a grid of single-pixel holes.
        let mut mask = BinaryMask::from_fn(41, 41, |_, _| true);
        for y in (2..40).step_by(4) {
            for x in (2..40).step_by(4) {
                mask.set(x, y, false);
            }
        }
        let set = ContourSet::extract(&mask);
        assert_eq!(set.top_level_count(), 1);
        assert_eq!(set.len(), 1 + 10 * 10);
        assert!(set.hierarchy()[1..].iter().all(|node| node.parent == Some(0)));
    }

    #[test]
    fn object_inside_a_hole_is_top_level() {
        let mut mask = BinaryMask::new(60, 60);
        mask.fill_rect(5, 5, 50, 50);
        for y in 15..45 {
            for x in 15..45 {
                mask.set(x, y, false);
            }
        }
        mask.fill_rect(25, 25, 10, 10);
        let set = ContourSet::extract(&mask);

        assert_eq!(set.len(), 3);
        assert_eq!(set.top_level_count(), 2);
        assert!(set.top_level().all(|(_, contour)| !contour.is_hole));
    }
}
