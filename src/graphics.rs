use evodrive::simulation::geometry::Point;
use evodrive::simulation::road::Road;
use evodrive::simulation::vehicle::{Car, Sensor};
use evodrive::simulation::world::Simulation;
use macroquad::prelude::*;

/// Fraction of the screen height above the best car.
const FOLLOW_OFFSET: f32 = 0.7;
const LANE_DASH: f32 = 20.0;

const ROAD_COLOR: Color = Color::new(0.83, 0.83, 0.83, 1.0);
const TRAFFIC_COLOR: Color = Color::new(0.85, 0.15, 0.15, 1.0);
const AI_COLOR: Color = Color::new(0.1, 0.3, 0.9, 0.2);
const BEST_COLOR: Color = Color::new(0.1, 0.3, 0.9, 1.0);
const KEYBOARD_COLOR: Color = Color::new(0.1, 0.6, 0.2, 1.0);

trait ToScreen {
    fn to_screen(&self) -> Vec2;
}

impl ToScreen for Point {
    fn to_screen(&self) -> Vec2 {
        vec2(self.x, self.y)
    }
}

/// Camera that keeps the best car (or the keyboard car) in view with the road
/// running from the bottom to the top of the screen.
pub fn follow_camera(simulation: &Simulation) -> Camera2D {
    let followed = simulation
        .keyboard_car()
        .or_else(|| simulation.best())
        .map_or(simulation.params().ai_start_y, |car| car.pos.y);
    let road = simulation.road();

    Camera2D {
        target: vec2(
            (road.left() + road.right()) / 2.0,
            followed - screen_height() * (FOLLOW_OFFSET - 0.5),
        ),
        // Negative y keeps world y growing downwards like screen space.
        zoom: vec2(2.0 / screen_width(), -2.0 / screen_height()),
        ..Default::default()
    }
}

/// Draws the road, traffic, AI cars and sensors in world coordinates.
///
/// Expects the camera from [`follow_camera`] to be active.
pub fn draw_simulation(simulation: &Simulation, camera: &Camera2D) {
    let top = camera.target.y - screen_height() / 2.0;
    let bottom = camera.target.y + screen_height() / 2.0;

    draw_road(simulation.road(), top, bottom);

    for car in simulation.traffic() {
        draw_car(car, TRAFFIC_COLOR);
    }

    for (index, car) in simulation.cars().iter().enumerate() {
        if index != simulation.best_index() {
            draw_car(car, AI_COLOR);
        }
    }

    if let Some(best) = simulation.best() {
        if let Some(sensor) = best.sensor() {
            draw_sensor(sensor);
        }
        draw_car(best, BEST_COLOR);
    }

    if let Some(car) = simulation.keyboard_car() {
        if let Some(sensor) = car.sensor() {
            draw_sensor(sensor);
        }
        draw_car(car, KEYBOARD_COLOR);
    }
}

fn draw_road(road: &Road, top: f32, bottom: f32) {
    draw_rectangle(road.left(), top, road.width(), bottom - top, ROAD_COLOR);

    for x in road.lane_dividers() {
        // Dash phase is anchored to world y so dashes scroll with the road.
        let mut y = (top / (2.0 * LANE_DASH)).floor() * 2.0 * LANE_DASH;
        while y < bottom {
            draw_line(x, y, x, y + LANE_DASH, 3.0, WHITE);
            y += 2.0 * LANE_DASH;
        }
    }

    for border in road.borders() {
        draw_line(border.start.x, top, border.end.x, bottom, 5.0, WHITE);
    }
}

fn draw_car(car: &Car, color: Color) {
    let color = if car.is_damaged() { GRAY } else { color };
    let [a, b, c, d] = (*car.hull().corners()).map(|corner| corner.to_screen());
    draw_triangle(a, b, c, color);
    draw_triangle(a, c, d, color);
}

fn draw_sensor(sensor: &Sensor) {
    for (ray, reading) in sensor.rays().iter().zip(sensor.readings()) {
        let start = ray.start.to_screen();
        let end = ray.end.to_screen();
        match reading {
            Some(reading) => {
                let hit = reading.point.to_screen();
                draw_line(start.x, start.y, hit.x, hit.y, 2.0, YELLOW);
                draw_line(hit.x, hit.y, end.x, end.y, 2.0, BLACK);
            }
            None => draw_line(start.x, start.y, end.x, end.y, 2.0, YELLOW),
        }
    }
}
