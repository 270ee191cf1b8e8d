//! A p5-style drawing surface.
//!
//! Sketches talk to a [`Canvas`] the way p5 sketches talk to the global
//! drawing state: set a fill / stroke, then emit shapes that pick up the
//! current style. The [`Recorder`] keeps those shapes in memory so a host can
//! replay them (and tests can inspect them).

use std::collections::VecDeque;

use cgmath::Vector2;

/// RGBA color with channels on the 0..=255 scale.
///
/// Channels are kept as `f32` because sketches compute them (ring colors
/// grow without bound); they are clamped only when turned into pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::gray(0.0);
    pub const WHITE: Self = Self::gray(255.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 255.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn gray(v: f32) -> Self {
        Self::rgb(v, v, v)
    }

    pub const fn gray_alpha(v: f32, a: f32) -> Self {
        Self::rgba(v, v, v, a)
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 255.0
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let channel = |v: f32| v.clamp(0.0, 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }
}

/// Drawing state applied to the next shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_weight: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Some(Color::WHITE),
            stroke: Some(Color::BLACK),
            stroke_weight: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Covers the whole canvas; translucent backgrounds leave trails.
    Background(Color),
    Ellipse {
        center: Vector2<f32>,
        diameter: f32,
        style: Style,
    },
    Line {
        from: Vector2<f32>,
        to: Vector2<f32>,
        style: Style,
    },
}

pub trait Canvas {
    fn background(&mut self, color: Color);
    fn fill(&mut self, color: Option<Color>);
    fn stroke(&mut self, color: Option<Color>);
    fn stroke_weight(&mut self, weight: f32);
    fn ellipse(&mut self, center: Vector2<f32>, diameter: f32);
    fn line(&mut self, from: Vector2<f32>, to: Vector2<f32>);
}

/// In-memory canvas holding the shapes of recent frames.
///
/// Only frames since the last opaque background are retained (anything
/// older is fully covered), and at most `capacity` of them.
pub struct Recorder {
    style: Style,
    frames: VecDeque<Vec<Shape>>,
    capacity: usize,
}

impl Recorder {
    pub fn new(capacity: usize) -> Self {
        Self {
            style: Style::default(),
            frames: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn begin_frame(&mut self) {
        self.frames.push_back(Vec::new());
        while self.frames.len() > self.capacity {
            self.frames.pop_front();
        }
    }

    /// Drops every retained shape and resets the style, as a fresh canvas.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.style = Style::default();
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.frames.len() > self.capacity {
            self.frames.pop_front();
        }
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn current_frame(&self) -> &[Shape] {
        self.frames.back().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn retained_frames(&self) -> usize {
        self.frames.len()
    }

    /// All retained shapes, oldest first, in paint order.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.frames.iter().flatten()
    }

    pub fn shape_count(&self) -> usize {
        self.frames.iter().map(Vec::len).sum()
    }

    fn push(&mut self, shape: Shape) {
        if self.frames.is_empty() {
            self.frames.push_back(Vec::new());
        }
        if let Some(frame) = self.frames.back_mut() {
            frame.push(shape);
        }
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Canvas for Recorder {
    fn background(&mut self, color: Color) {
        if color.is_opaque() {
            self.frames.clear();
        }
        self.push(Shape::Background(color));
    }

    fn fill(&mut self, color: Option<Color>) {
        self.style.fill = color;
    }

    fn stroke(&mut self, color: Option<Color>) {
        self.style.stroke = color;
    }

    fn stroke_weight(&mut self, weight: f32) {
        self.style.stroke_weight = weight;
    }

    fn ellipse(&mut self, center: Vector2<f32>, diameter: f32) {
        let style = self.style;
        self.push(Shape::Ellipse {
            center,
            diameter,
            style,
        });
    }

    fn line(&mut self, from: Vector2<f32>, to: Vector2<f32>) {
        let style = self.style;
        self.push(Shape::Line { from, to, style });
    }
}
