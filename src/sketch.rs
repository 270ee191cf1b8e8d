use cgmath::{InnerSpace, Vector2, Zero};
use rand::RngCore;

use crate::canvas::Canvas;

/// Everything a sketch may read from (or paint onto) during one call.
pub struct Frame<'a> {
    pub canvas: &'a mut dyn Canvas,
    pub rng: &'a mut dyn RngCore,
    pub width: f32,
    pub height: f32,
    /// Pointer position in canvas coordinates; the origin until the host moves it.
    pub pointer: Vector2<f32>,
    pub pointer_down: bool,
}

impl<'a> Frame<'a> {
    pub fn new(canvas: &'a mut dyn Canvas, rng: &'a mut dyn RngCore, width: f32, height: f32) -> Self {
        Self {
            canvas,
            rng,
            width,
            height,
            pointer: Vector2::zero(),
            pointer_down: false,
        }
    }

    pub fn with_pointer(mut self, pointer: Vector2<f32>, pointer_down: bool) -> Self {
        self.pointer = pointer;
        self.pointer_down = pointer_down;
        self
    }

    pub fn center(&self) -> Vector2<f32> {
        cgmath::vec2(self.width / 2.0, self.height / 2.0)
    }
}

/// An animated program driven by a host: `setup` once, `draw` every frame,
/// `on_midi_note` whenever a note arrives.
pub trait Sketch {
    fn name(&self) -> &'static str;

    /// (Re)initialises all entities. Hosts call this before the first `draw`
    /// and again to restart the sketch.
    fn setup(&mut self, frame: &mut Frame<'_>);

    fn draw(&mut self, frame: &mut Frame<'_>, signal: f32);

    fn on_midi_note(&mut self, note: u8, velocity: u8);

    fn entity_count(&self) -> usize;
}

/// Linear remap of `value` from one range to another, without clamping.
pub fn map_range(value: f32, in_lo: f32, in_hi: f32, out_lo: f32, out_hi: f32) -> f32 {
    out_lo + (value - in_lo) * (out_hi - out_lo) / (in_hi - in_lo)
}

/// Unit vector in the direction of `v`, or zero for a zero vector.
pub fn normalize_or_zero(v: Vector2<f32>) -> Vector2<f32> {
    if v.magnitude2() > 0.0 {
        v.normalize()
    } else {
        Vector2::zero()
    }
}

/// A value bouncing between two bounds by a fixed step.
///
/// Overshooting a bound clamps to it and reverses the direction, so the
/// value never leaves `[lo, hi]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PingPong {
    value: f32,
    step: f32,
    lo: f32,
    hi: f32,
    direction: f32,
}

impl PingPong {
    pub fn new(value: f32, step: f32, lo: f32, hi: f32) -> Self {
        Self {
            value,
            step,
            lo,
            hi,
            direction: 1.0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    /// Moves the value without changing the direction of travel.
    pub fn set_value(&mut self, value: f32) {
        self.value = value;
    }

    pub fn advance(&mut self) -> f32 {
        self.value += self.step * self.direction;
        if self.value >= self.hi {
            self.value = self.hi;
            self.direction = -1.0;
        } else if self.value <= self.lo {
            self.value = self.lo;
            self.direction = 1.0;
        }
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::vec2;

    #[test]
    fn map_range_is_linear_and_unclamped() {
        assert_eq!(map_range(50.0, 0.0, 100.0, 0.0, 255.0), 127.5);
        assert_eq!(map_range(127.0, 0.0, 127.0, 0.0, 100.0), 100.0);
        assert_eq!(map_range(-10.0, 0.0, 100.0, 0.0, 255.0), -25.5);
        assert_eq!(map_range(90.0, 0.0, 360.0, 0.0, 400.0), 100.0);
    }

    #[test]
    fn normalize_handles_zero() {
        assert_eq!(normalize_or_zero(Vector2::zero()), Vector2::zero());
        let n = normalize_or_zero(vec2(3.0, 4.0));
        assert!((n.x - 0.6).abs() < 1e-6 && (n.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn ping_pong_reverses_at_bounds() {
        let mut p = PingPong::new(49.0, 0.8, 0.0, 50.0);
        p.advance();
        assert!((p.value() - 49.8).abs() < 1e-4);
        assert_eq!(p.direction(), 1.0);
        p.advance();
        assert_eq!(p.value(), 50.0);
        assert_eq!(p.direction(), -1.0);
        p.advance();
        assert!((p.value() - 49.2).abs() < 1e-4);

        let mut q = PingPong::new(0.2, 0.5, 0.0, 50.0);
        q = PingPong { direction: -1.0, ..q };
        q.advance();
        assert_eq!(q.value(), 0.0);
        assert_eq!(q.direction(), 1.0);
    }

    #[test]
    fn set_value_keeps_direction() {
        let mut p = PingPong::new(49.9, 0.5, 0.0, 50.0);
        p.advance();
        assert_eq!(p.direction(), -1.0);
        p.set_value(1.0);
        assert_eq!(p.direction(), -1.0);
        assert!((p.advance() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn ping_pong_stays_in_bounds() {
        for step in [0.3_f32, 0.5, 0.8, 7.0] {
            let mut p = PingPong::new(1.0, step, 0.0, 50.0);
            for _ in 0..10_000 {
                let v = p.advance();
                assert!((0.0..=50.0).contains(&v), "step {step} escaped with {v}");
            }
        }
    }
}
