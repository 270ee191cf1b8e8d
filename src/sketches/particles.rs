//! Falling particles of increasing size; holding the pointer down turns the
//! wind on.

use cgmath::{Vector2, Zero, vec2};

use crate::canvas::Color;
use crate::sketch::{Frame, Sketch, map_range, normalize_or_zero};

pub const PARTICLES: usize = 100;
const GRAVITY: f32 = 0.2;
const WIND: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    pub acceleration: Vector2<f32>,
    /// Drawn diameter, and the divisor applied to every force.
    pub size: f32,
}

impl Particle {
    pub fn new(size: f32, position: Vector2<f32>) -> Self {
        Self {
            position,
            velocity: Vector2::zero(),
            acceleration: Vector2::zero(),
            size,
        }
    }

    pub fn gravity(&self) -> Vector2<f32> {
        vec2(0.0, GRAVITY * self.size)
    }

    pub fn wind() -> Vector2<f32> {
        vec2(WIND, 0.0)
    }

    /// Replaces the acceleration with the force's direction scaled down by size.
    /// Forces are not summed: the last one applied in a frame wins.
    pub fn apply_force(&mut self, force: Vector2<f32>) {
        let direction = normalize_or_zero(force);
        self.acceleration = if self.size != 0.0 {
            direction / self.size
        } else {
            direction
        };
    }

    pub fn update(&mut self) {
        self.velocity += self.acceleration;
        self.position += self.velocity;
    }

    /// Bounces off each edge of a `width` × `height` canvas.
    pub fn edges(&mut self, width: f32, height: f32) {
        macro_rules! handle_boundary {
            ($coord:expr, $vel:expr, $max:expr) => {
                if $coord > $max {
                    $vel *= -1.0;
                    $coord = $max;
                }
                if $coord < 0.0 {
                    $vel *= -1.0;
                    $coord = 0.0;
                }
            };
        }

        handle_boundary!(self.position.y, self.velocity.y, height);
        handle_boundary!(self.position.x, self.velocity.x, width);
    }
}

#[derive(Default)]
pub struct Particles {
    particles: Vec<Particle>,
}

impl Particles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

impl Sketch for Particles {
    fn name(&self) -> &'static str {
        "new"
    }

    fn setup(&mut self, frame: &mut Frame<'_>) {
        let (width, height) = (frame.width, frame.height);
        self.particles = (0..PARTICLES)
            .map(|i| {
                let x = map_range(i as f32, 0.0, PARTICLES as f32, 0.0, width);
                Particle::new(i as f32, vec2(x, height / 2.0))
            })
            .collect();
        frame.canvas.background(Color::BLACK);
    }

    fn draw(&mut self, frame: &mut Frame<'_>, _signal: f32) {
        frame.canvas.background(Color::BLACK);
        frame.canvas.fill(Some(Color::WHITE));
        for particle in &mut self.particles {
            particle.apply_force(particle.gravity());
            if frame.pointer_down {
                particle.apply_force(Particle::wind());
            }
            particle.update();
            particle.edges(frame.width, frame.height);
            frame.canvas.ellipse(particle.position, particle.size);
        }
    }

    fn on_midi_note(&mut self, _note: u8, _velocity: u8) {}

    fn entity_count(&self) -> usize {
        self.particles.len()
    }
}
