//! Distance sensor - a fan of rays cast from the car's centre.
//!
//! Each ray reports the nearest road border or traffic hull edge it crosses.
//! Readings are turned into a bounded feature vector for the network where a
//! close obstruction is a high activation.

use geo::Line;
use ndarray::Array1;

use super::super::geometry::{Hull, Point, Reading, Segment, intersect, lerp};

/// Fan of distance rays with fixed count, length and spread.
#[derive(Debug, Clone)]
pub struct Sensor {
    ray_count: usize,
    ray_length: f32,
    ray_spread: f32,
    rays: Vec<Segment>,
    readings: Vec<Option<Reading>>,
}

impl Sensor {
    /// Creates a sensor.
    ///
    /// # Arguments
    ///
    /// * `ray_count` - Number of rays, fixed for the sensor's lifetime
    /// * `ray_length` - Length of every ray
    /// * `ray_spread` - Field of view covered by the fan, in radians
    pub fn new(ray_count: usize, ray_length: f32, ray_spread: f32) -> Self {
        let origin = Point { x: 0.0, y: 0.0 };
        Self {
            ray_count,
            ray_length,
            ray_spread,
            rays: vec![Line::new(origin, origin); ray_count],
            readings: vec![None; ray_count],
        }
    }

    /// Number of rays.
    pub fn ray_count(&self) -> usize {
        self.ray_count
    }

    /// Length of every ray.
    pub fn ray_length(&self) -> f32 {
        self.ray_length
    }

    /// Field of view in radians.
    pub fn ray_spread(&self) -> f32 {
        self.ray_spread
    }

    /// Rays from the last update, leftmost first.
    pub fn rays(&self) -> &[Segment] {
        &self.rays
    }

    /// Readings from the last update, one per ray in ray order.
    pub fn readings(&self) -> &[Option<Reading>] {
        &self.readings
    }

    /// Headings of the rays for a car facing `heading`, leftmost first.
    ///
    /// A single ray points straight along the heading.
    pub fn ray_headings(&self, heading: f32) -> impl Iterator<Item = f32> + '_ {
        let half = self.ray_spread / 2.0;
        (0..self.ray_count).map(move |i| {
            let t = if self.ray_count == 1 {
                0.5
            } else {
                i as f32 / (self.ray_count - 1) as f32
            };
            heading + lerp(half, -half, t)
        })
    }

    /// Recasts the rays and recomputes every reading.
    ///
    /// # Arguments
    ///
    /// * `origin` - Car centre the rays start from
    /// * `heading` - Car heading in radians
    /// * `borders` - Road border segments
    /// * `obstacles` - Hulls of the other cars
    pub fn update<'a, I>(&mut self, origin: Point, heading: f32, borders: &[Segment], obstacles: I)
    where
        I: Iterator<Item = &'a Hull> + Clone,
    {
        let length = self.ray_length;
        let rays: Vec<Segment> = self
            .ray_headings(heading)
            .map(|angle| {
                let end = Point {
                    x: origin.x - angle.sin() * length,
                    y: origin.y - angle.cos() * length,
                };
                Line::new(origin, end)
            })
            .collect();

        self.readings = rays
            .iter()
            .map(|ray| nearest_reading(ray, borders, obstacles.clone()))
            .collect();
        self.rays = rays;
    }

    /// Converts readings into network inputs in `[0, 1]`.
    ///
    /// No obstruction reads `0`; otherwise the value is `1 - offset`, so an
    /// obstruction touching the car reads close to `1`.
    pub fn features(&self) -> Array1<f32> {
        self.readings
            .iter()
            .map(|reading| reading.map_or(0.0, |r| 1.0 - r.offset))
            .collect()
    }
}

/// Finds the closest crossing between `ray` and any border or hull edge.
fn nearest_reading<'a>(
    ray: &Segment,
    borders: &[Segment],
    obstacles: impl Iterator<Item = &'a Hull>,
) -> Option<Reading> {
    let border_hits = borders.iter().filter_map(|border| intersect(ray, border));
    let hull_hits = obstacles
        .flat_map(move |hull| hull.edges().filter_map(move |edge| intersect(ray, &edge)));

    border_hits
        .chain(hull_hits)
        .min_by(|a, b| a.offset.total_cmp(&b.offset))
}
