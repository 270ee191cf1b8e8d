//! A jittery swarm circling the pointer.

use cgmath::{Vector2, Zero, vec2};
use rand::Rng;

use crate::canvas::Color;
use crate::sketch::{Frame, Sketch, map_range, normalize_or_zero};

pub const POINTS: usize = 150;
const ORBIT_RADIUS: f32 = 75.0;
const JITTER: f32 = 4.0;
const SPEED: f32 = 2.0;
const DOT_SIZE: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
}

impl Point {
    pub fn new(position: Vector2<f32>) -> Self {
        Self {
            position,
            velocity: Vector2::zero(),
        }
    }

    /// The slot on the orbit around `pointer` that point `index` heads for.
    pub fn target(index: usize, pointer: Vector2<f32>) -> Vector2<f32> {
        let phase = map_range(index as f32, 0.0, POINTS as f32, 0.0, 360.0).to_radians();
        pointer + vec2(phase.sin(), phase.cos()) * ORBIT_RADIUS
    }

    /// Moves one unit towards the target plus jitter, doubled. Returns the applied step.
    pub fn walk(&mut self, index: usize, pointer: Vector2<f32>, rng: &mut (impl Rng + ?Sized)) -> Vector2<f32> {
        let jitter = vec2(rng.gen_range(-JITTER..JITTER), rng.gen_range(-JITTER..JITTER));
        let heading = normalize_or_zero(Self::target(index, pointer) - self.position);
        let step = (heading + jitter) * SPEED;
        self.position += step;
        step
    }
}

#[derive(Default)]
pub struct Swarm {
    points: Vec<Point>,
}

impl Swarm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl Sketch for Swarm {
    fn name(&self) -> &'static str {
        "swarm"
    }

    fn setup(&mut self, frame: &mut Frame<'_>) {
        self.points = vec![Point::new(frame.center()); POINTS];
        frame.canvas.background(Color::BLACK);
    }

    fn draw(&mut self, frame: &mut Frame<'_>, _signal: f32) {
        frame.canvas.background(Color::gray_alpha(15.0, 80.0));
        frame.canvas.stroke(Some(Color::gray_alpha(255.0, 80.0)));
        for (i, point) in self.points.iter_mut().enumerate() {
            point.walk(i, frame.pointer, &mut *frame.rng);
            frame.canvas.ellipse(point.position, DOT_SIZE);
        }
    }

    fn on_midi_note(&mut self, _note: u8, _velocity: u8) {}

    fn entity_count(&self) -> usize {
        self.points.len()
    }
}
