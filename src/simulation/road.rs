//! Straight multi-lane road that supplies lane centres and border segments.

use geo::Line;

use super::geometry::{Point, Segment, lerp};

/// Distance used for the "infinite" top and bottom of the road.
const INFINITY: f32 = 1_000_000.0;

/// A vertical road with evenly sized lanes.
#[derive(Debug, Clone)]
pub struct Road {
    left: f32,
    right: f32,
    lane_count: usize,
    borders: Vec<Segment>,
}

impl Road {
    /// Creates a road centred on `center_x`.
    ///
    /// # Arguments
    ///
    /// * `center_x` - Horizontal centre of the road
    /// * `width` - Distance between the two borders
    /// * `lane_count` - Number of lanes (at least one)
    pub fn new(center_x: f32, width: f32, lane_count: usize) -> Self {
        let left = center_x - width / 2.0;
        let right = center_x + width / 2.0;
        let top = -INFINITY;
        let bottom = INFINITY;

        let borders = vec![
            Line::new(Point { x: left, y: top }, Point { x: left, y: bottom }),
            Line::new(Point { x: right, y: top }, Point { x: right, y: bottom }),
        ];

        Self {
            left,
            right,
            lane_count: lane_count.max(1),
            borders,
        }
    }

    /// Returns the x-coordinate of the centre of lane `index`.
    ///
    /// Indices past the last lane are clamped to it.
    pub fn lane_center(&self, index: usize) -> f32 {
        let lane_width = self.width() / self.lane_count as f32;
        self.left + lane_width / 2.0 + index.min(self.lane_count - 1) as f32 * lane_width
    }

    /// The segments bounding the drivable area, left border first.
    pub fn borders(&self) -> &[Segment] {
        &self.borders
    }

    /// Number of lanes.
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    /// Distance between the borders.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// X-coordinates of the dividers between neighbouring lanes.
    pub fn lane_dividers(&self) -> impl Iterator<Item = f32> + '_ {
        (1..self.lane_count)
            .map(|i| lerp(self.left, self.right, i as f32 / self.lane_count as f32))
    }

    /// X-coordinate of the left border.
    pub fn left(&self) -> f32 {
        self.left
    }

    /// X-coordinate of the right border.
    pub fn right(&self) -> f32 {
        self.right
    }
}
