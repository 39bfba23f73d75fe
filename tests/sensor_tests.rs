#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use evodrive::simulation::geometry::{Hull, Point, Segment};
use evodrive::simulation::vehicle::Sensor;
use geo::Line;

const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

fn vertical_border(x: f32) -> Segment {
    Line::new(Point { x, y: -1e6 }, Point { x, y: 1e6 })
}

#[test]
fn test_no_obstacles_reads_nothing() {
    let mut sensor = Sensor::new(5, 150.0, FRAC_PI_2);
    sensor.update(ORIGIN, 0.0, &[], std::iter::empty::<&Hull>());

    assert!(sensor.readings().iter().all(Option::is_none));
    assert!(sensor.features().iter().all(|&value| value == 0.0));
}

#[test]
fn test_out_of_range_border_reads_nothing() {
    let mut sensor = Sensor::new(5, 150.0, FRAC_PI_2);
    sensor.update(ORIGIN, 0.0, &[vertical_border(-500.0)], std::iter::empty());

    assert!(sensor.features().iter().all(|&value| value == 0.0));
}

#[test]
fn test_ray_zero_is_leftmost() {
    let sensor = Sensor::new(5, 150.0, FRAC_PI_2);
    let headings: Vec<f32> = sensor.ray_headings(0.0).collect();

    assert_eq!(headings.len(), 5);
    assert!((headings[0] - FRAC_PI_4).abs() < 1e-6);
    assert!(headings[2].abs() < 1e-6);
    assert!((headings[4] + FRAC_PI_4).abs() < 1e-6);
}

#[test]
fn test_single_ray_points_along_heading() {
    let sensor = Sensor::new(1, 150.0, FRAC_PI_2);
    let headings: Vec<f32> = sensor.ray_headings(0.3).collect();
    assert_eq!(headings, vec![0.3]);
}

#[test]
fn test_left_border_is_seen_by_left_rays_only() {
    let mut sensor = Sensor::new(5, 150.0, FRAC_PI_2);
    sensor.update(ORIGIN, 0.0, &[vertical_border(-50.0)], std::iter::empty());

    let readings = sensor.readings();
    // Leftmost ray heads up-left at 45 degrees and reaches x = -50 after
    // 50 / (150 * sin 45°) of its length.
    let expected = 50.0 / (150.0 * FRAC_PI_4.sin());
    let leftmost = readings[0].expect("leftmost ray hits the border");
    assert!((leftmost.offset - expected).abs() < 1e-4);
    assert!((leftmost.point.x + 50.0).abs() < 1e-3);

    assert!(readings[1].is_some());
    assert!(readings[2].is_none());
    assert!(readings[3].is_none());
    assert!(readings[4].is_none());

    let features = sensor.features();
    assert!((features[0] - (1.0 - expected)).abs() < 1e-4);
    assert_eq!(features[4], 0.0);
}

#[test]
fn test_nearest_obstacle_wins() {
    let near = Hull::new(Point { x: 0.0, y: -50.0 }, 0.0, 30.0, 50.0);
    let far = Hull::new(Point { x: 0.0, y: -100.0 }, 0.0, 30.0, 50.0);
    let mut sensor = Sensor::new(3, 150.0, FRAC_PI_2);

    // Far hull first so ordering cannot decide the result.
    sensor.update(ORIGIN, 0.0, &[], [far, near].iter());

    let straight = sensor.readings()[1].expect("centre ray hits the near car");
    assert!((straight.point.y + 25.0).abs() < 1e-3);
    assert!((straight.offset - 25.0 / 150.0).abs() < 1e-4);
}

#[test]
fn test_feature_count_matches_ray_count() {
    let obstacle = Hull::new(Point { x: 10.0, y: -60.0 }, 0.2, 30.0, 50.0);
    for ray_count in [1, 3, 7] {
        let mut sensor = Sensor::new(ray_count, 100.0, FRAC_PI_2);
        sensor.update(
            ORIGIN,
            0.4,
            &[vertical_border(-40.0), vertical_border(40.0)],
            std::iter::once(&obstacle),
        );

        assert_eq!(sensor.rays().len(), ray_count);
        assert_eq!(sensor.readings().len(), ray_count);
        assert_eq!(sensor.features().len(), ray_count);
        assert!(
            sensor
                .features()
                .iter()
                .all(|&value| (0.0..=1.0).contains(&value))
        );
    }
}

#[test]
fn test_rays_start_at_origin_with_full_length() {
    let origin = Point { x: 12.0, y: 30.0 };
    let mut sensor = Sensor::new(4, 80.0, 1.0);
    sensor.update(origin, 1.2, &[], std::iter::empty());

    for ray in sensor.rays() {
        assert_eq!(ray.start, origin);
        let length = (ray.end.x - origin.x).hypot(ray.end.y - origin.y);
        assert!((length - 80.0).abs() < 1e-3);
    }
}
