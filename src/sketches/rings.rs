//! Hypnotic rings: concentric circles that swell with the signal and drift
//! outwards until they leave the screen.

use cgmath::{Vector2, Zero};
use log::debug;

use crate::canvas::Color;
use crate::sketch::{Frame, PingPong, Sketch, map_range};

pub const INITIAL_RINGS: usize = 100;
pub const MAX_RINGS: usize = 100;
const START_SIZE: f32 = 25.0;
const GROWTH: f32 = 20.0;
const SPAWN_THRESHOLD: f32 = 4.5;
const SWELL_THRESHOLD: f32 = 6.0;
const EVICT_MARGIN: f32 = 200.0;
const RING_NOTE: u8 = 1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ring {
    pub center: Vector2<f32>,
    pub size: f32,
    pub color: f32,
}

impl Ring {
    pub fn new(center: Vector2<f32>) -> Self {
        Self {
            center,
            size: START_SIZE,
            color: 0.0,
        }
    }

    /// Younger rings (higher `index`) drift outwards more slowly.
    pub fn grow(&mut self, index: usize, signal: f32) {
        let color_step = map_range(signal, 0.0, 100.0, 0.0, 255.0);
        if signal > SWELL_THRESHOLD {
            self.size += signal;
            self.color += color_step;
        } else if signal > 0.0 {
            self.size -= signal;
        } else {
            self.color -= color_step.abs();
        }
        self.size += GROWTH / (index + 1) as f32;
    }

    pub fn stroke_color(&self) -> Color {
        Color::rgb(self.color, self.color / 2.0, self.color / 4.0)
    }
}

pub struct Rings {
    red: PingPong,
    green: PingPong,
    blue: PingPong,
    center: Vector2<f32>,
    rings: Vec<Ring>,
}

impl Rings {
    pub fn new() -> Self {
        Self {
            red: PingPong::new(1.0, 0.3, 0.0, 50.0),
            green: PingPong::new(1.0, 0.5, 0.0, 50.0),
            blue: PingPong::new(1.0, 0.8, 0.0, 50.0),
            center: Vector2::zero(),
            rings: Vec::with_capacity(MAX_RINGS),
        }
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn background(&self) -> Color {
        Color::rgb(self.red.value(), self.green.value(), self.blue.value())
    }

    fn spawn(&mut self) -> bool {
        if self.rings.len() < MAX_RINGS {
            self.rings.push(Ring::new(self.center));
            true
        } else {
            false
        }
    }
}

impl Default for Rings {
    fn default() -> Self {
        Self::new()
    }
}

impl Sketch for Rings {
    fn name(&self) -> &'static str {
        "rings"
    }

    fn setup(&mut self, frame: &mut Frame<'_>) {
        self.center = frame.center();
        self.rings.clear();
        self.rings
            .extend(std::iter::repeat_n(Ring::new(self.center), INITIAL_RINGS));

        frame.canvas.fill(None);
        frame.canvas.stroke_weight(3.0);
    }

    fn draw(&mut self, frame: &mut Frame<'_>, signal: f32) {
        self.red.advance();
        self.green.advance();
        self.blue.advance();
        frame.canvas.background(self.background());

        for (i, ring) in self.rings.iter_mut().enumerate() {
            ring.grow(i, signal);
            frame.canvas.stroke(Some(ring.stroke_color()));
            frame.canvas.ellipse(ring.center, ring.size);
        }

        if self
            .rings
            .first()
            .is_some_and(|ring| ring.size > frame.width + EVICT_MARGIN)
        {
            let evicted = self.rings.remove(0);
            debug!("rings: evicted ring of size {:.1}", evicted.size);
        }

        if signal > SPAWN_THRESHOLD {
            self.spawn();
        }
    }

    fn on_midi_note(&mut self, note: u8, velocity: u8) {
        if velocity > 0 && note == RING_NOTE && !self.spawn() {
            debug!("rings: note {note} ignored, already at {MAX_RINGS} rings");
        }
    }

    fn entity_count(&self) -> usize {
        self.rings.len()
    }
}
