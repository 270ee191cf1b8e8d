//! A fan of lines hung from the top edge, their far ends sweeping around a
//! circle centred on the bottom edge.

use cgmath::{Vector2, Zero, vec2};

use crate::canvas::Color;
use crate::sketch::{Frame, PingPong, Sketch, map_range};

pub const LINES: usize = 360;
const TIMER_START: f32 = 1.0;
const TIMER_STEP: f32 = 0.05;
const TIMER_LIMIT: f32 = 100.0;
const DEFAULT_MULTIPLIER: f32 = 1.1;
const MULTIPLIER_NOTE: u8 = 15;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialLine {
    pub from: Vector2<f32>,
    pub to: Vector2<f32>,
}

impl RadialLine {
    pub fn wave(&mut self, index: usize, timer: f32, center: Vector2<f32>, radius: f32, width: f32) {
        let angle = (index as f32).to_radians() * timer;
        self.to = center + vec2(angle.sin(), angle.cos()) * radius;
        self.from = vec2(map_range(index as f32, 0.0, LINES as f32, 0.0, width), 0.0);
    }
}

pub struct Ball {
    lines: Vec<RadialLine>,
    timer: PingPong,
    multiplier: f32,
    center: Vector2<f32>,
    radius: f32,
}

impl Ball {
    pub fn new() -> Self {
        Self {
            lines: Vec::with_capacity(LINES),
            timer: PingPong::new(TIMER_START, TIMER_STEP, -TIMER_LIMIT, TIMER_LIMIT),
            multiplier: DEFAULT_MULTIPLIER,
            center: Vector2::zero(),
            radius: 0.0,
        }
    }

    pub fn lines(&self) -> &[RadialLine] {
        &self.lines
    }

    pub fn timer(&self) -> f32 {
        self.timer.value()
    }

    pub fn direction(&self) -> f32 {
        self.timer.direction()
    }

    /// Scales the seeded far-end angles; takes effect on the next `setup`.
    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

impl Sketch for Ball {
    fn name(&self) -> &'static str {
        "ball"
    }

    fn setup(&mut self, frame: &mut Frame<'_>) {
        // a restart rewinds the timer but keeps its sweep direction
        self.timer.set_value(TIMER_START);
        self.center = vec2(frame.width / 2.0, frame.height);
        self.radius = frame.width.min(frame.height) / 2.0;

        let (center, radius, multiplier) = (self.center, self.radius, self.multiplier);
        self.lines = (0..LINES)
            .map(|i| {
                let angle = (i as f32).to_radians();
                let bent = angle * multiplier;
                RadialLine {
                    from: center + vec2(angle.sin(), angle.cos()) * radius,
                    to: center + vec2(bent.sin(), bent.cos()) * radius,
                }
            })
            .collect();

        frame.canvas.background(Color::BLACK);
    }

    fn draw(&mut self, frame: &mut Frame<'_>, _signal: f32) {
        let timer = self.timer.advance();
        frame.canvas.background(Color::gray_alpha(10.0, 30.0));
        frame.canvas.stroke(Some(Color::gray_alpha(100.0, 60.0)));
        for (i, line) in self.lines.iter_mut().enumerate() {
            line.wave(i, timer, self.center, self.radius, frame.width);
            frame.canvas.line(line.from, line.to);
        }
    }

    fn on_midi_note(&mut self, note: u8, velocity: u8) {
        if note == MULTIPLIER_NOTE {
            self.multiplier = map_range(velocity as f32, 0.0, 127.0, 0.0, 100.0);
        }
    }

    fn entity_count(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Recorder, Shape};
    use rand::{SeedableRng, rngs::StdRng};

    const EPS: f32 = 1e-3;

    #[test]
    fn setup_seeds_a_circle_of_lines() {
        let mut canvas = Recorder::new(1);
        let mut rng = StdRng::seed_from_u64(0);
        let mut frame = Frame::new(&mut canvas, &mut rng, 400.0, 300.0);
        let mut ball = Ball::new();
        ball.setup(&mut frame);

        assert_eq!(ball.entity_count(), LINES);
        // radius is half the shorter side, centre on the bottom edge
        let line = ball.lines()[90];
        assert!((line.from.x - 350.0).abs() < EPS);
        assert!((line.from.y - 300.0).abs() < EPS);
        let line = ball.lines()[0];
        assert!((line.from.x - 200.0).abs() < EPS);
        assert!((line.from.y - 450.0).abs() < EPS);
    }

    #[test]
    fn wave_hangs_lines_from_the_top_edge() {
        let mut canvas = Recorder::new(1);
        let mut rng = StdRng::seed_from_u64(0);
        let mut ball = Ball::new();
        ball.setup(&mut Frame::new(&mut canvas, &mut rng, 360.0, 200.0));
        canvas.begin_frame();
        ball.draw(&mut Frame::new(&mut canvas, &mut rng, 360.0, 200.0), 0.0);

        let timer = ball.timer();
        assert!((timer - 1.05).abs() < 1e-5);
        for (i, line) in ball.lines().iter().enumerate() {
            assert!((line.from.x - i as f32).abs() < EPS);
            assert_eq!(line.from.y, 0.0);
            let angle = (i as f32).to_radians() * timer;
            assert!((line.to.x - (180.0 + angle.sin() * 100.0)).abs() < EPS);
            assert!((line.to.y - (200.0 + angle.cos() * 100.0)).abs() < EPS);
        }

        let frame = canvas.current_frame();
        assert_eq!(frame.len(), 1 + LINES);
        assert_eq!(frame[0], Shape::Background(Color::gray_alpha(10.0, 30.0)));
    }

    #[test]
    fn timer_bounces_between_limits() {
        let mut canvas = Recorder::new(1);
        let mut rng = StdRng::seed_from_u64(0);
        let mut ball = Ball::new();
        ball.setup(&mut Frame::new(&mut canvas, &mut rng, 20.0, 20.0));

        let mut flips = 0;
        for _ in 0..10_000 {
            let before = ball.direction();
            canvas.begin_frame();
            ball.draw(&mut Frame::new(&mut canvas, &mut rng, 20.0, 20.0), 0.0);
            let timer = ball.timer();
            assert!((-TIMER_LIMIT..=TIMER_LIMIT).contains(&timer), "timer {timer}");
            if ball.direction() != before {
                flips += 1;
                assert_eq!(timer.abs(), TIMER_LIMIT);
            }
        }
        // 99 up to the top, then 200 per sweep: 1980 + 4000 + 4000 frames
        assert_eq!(flips, 3);
    }

    #[test]
    fn restart_rewinds_timer_but_keeps_direction() {
        let mut canvas = Recorder::new(1);
        let mut rng = StdRng::seed_from_u64(0);
        let mut ball = Ball::new();
        ball.setup(&mut Frame::new(&mut canvas, &mut rng, 20.0, 20.0));
        while ball.direction() > 0.0 {
            canvas.begin_frame();
            ball.draw(&mut Frame::new(&mut canvas, &mut rng, 20.0, 20.0), 0.0);
        }
        canvas.begin_frame();
        ball.draw(&mut Frame::new(&mut canvas, &mut rng, 20.0, 20.0), 0.0);
        assert!(ball.timer() < TIMER_LIMIT);

        ball.setup(&mut Frame::new(&mut canvas, &mut rng, 20.0, 20.0));
        assert_eq!(ball.timer(), TIMER_START);
        assert_eq!(ball.direction(), -1.0);

        canvas.begin_frame();
        ball.draw(&mut Frame::new(&mut canvas, &mut rng, 20.0, 20.0), 0.0);
        assert!((ball.timer() - 0.95).abs() < 1e-5);
    }

    #[test]
    fn note_fifteen_sets_multiplier_for_next_setup() {
        let mut ball = Ball::new();
        ball.on_midi_note(14, 127);
        assert!((ball.multiplier() - DEFAULT_MULTIPLIER).abs() < 1e-6);
        ball.on_midi_note(MULTIPLIER_NOTE, 127);
        assert!((ball.multiplier() - 100.0).abs() < 1e-4);
        ball.on_midi_note(MULTIPLIER_NOTE, 0);
        assert_eq!(ball.multiplier(), 0.0);

        let mut canvas = Recorder::new(1);
        let mut rng = StdRng::seed_from_u64(0);
        let mut frame = Frame::new(&mut canvas, &mut rng, 200.0, 200.0);
        ball.setup(&mut frame);
        // a zero multiplier folds every far end onto angle 0
        assert!(ball
            .lines()
            .iter()
            .all(|l| (l.to.x - 100.0).abs() < EPS && (l.to.y - 300.0).abs() < EPS));
    }
}
