//! Random walkers leaving faint trails on a canvas that is never cleared.

use cgmath::Vector2;
use rand::Rng;

use crate::canvas::Color;
use crate::sketch::{Frame, Sketch};

pub const WALKERS: usize = 250;
const SCALE: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Walker {
    pub position: Vector2<f32>,
}

impl Walker {
    pub fn new(position: Vector2<f32>) -> Self {
        Self { position }
    }

    /// Takes one step of `SCALE` on each axis in a direction drawn from {-1, 0, 1}.
    pub fn step(&mut self, rng: &mut (impl Rng + ?Sized), width: f32, height: f32) {
        let step_x = rng.gen_range(-1..=1) as f32;
        let step_y = rng.gen_range(-1..=1) as f32;
        self.keep_on_screen(width, height);
        self.position.x += step_x * SCALE;
        self.position.y += step_y * SCALE;
    }

    /// Nudges the walker back by one step if it sits on or past an edge.
    /// Only the first offending edge is corrected per call.
    pub fn keep_on_screen(&mut self, width: f32, height: f32) {
        let p = &mut self.position;
        if p.x < 1.0 {
            p.x += SCALE;
        } else if p.x > width - 1.0 {
            p.x -= SCALE;
        } else if p.y < 1.0 {
            p.y += SCALE;
        } else if p.y > height - 1.0 {
            p.y -= SCALE;
        }
    }
}

#[derive(Default)]
pub struct Walkers {
    walkers: Vec<Walker>,
}

impl Walkers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn walkers(&self) -> &[Walker] {
        &self.walkers
    }
}

impl Sketch for Walkers {
    fn name(&self) -> &'static str {
        "walker"
    }

    fn setup(&mut self, frame: &mut Frame<'_>) {
        self.walkers = vec![Walker::new(frame.center()); WALKERS];
        frame.canvas.background(Color::BLACK);
    }

    fn draw(&mut self, frame: &mut Frame<'_>, _signal: f32) {
        frame.canvas.stroke(None);
        frame.canvas.fill(Some(Color::gray_alpha(255.0, 10.0)));
        for walker in &mut self.walkers {
            frame.canvas.ellipse(walker.position, SCALE);
            walker.step(&mut *frame.rng, frame.width, frame.height);
        }
    }

    fn on_midi_note(&mut self, _note: u8, _velocity: u8) {}

    fn entity_count(&self) -> usize {
        self.walkers.len()
    }
}
