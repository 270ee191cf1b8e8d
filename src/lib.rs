//! Small generative sketches driven frame by frame by a host.
//!
//! Each sketch implements [`Sketch`]: the host calls `setup` once, `draw`
//! every frame with a scalar signal, and `on_midi_note` as notes arrive.
//! Sketches paint through the p5-style [`Canvas`] in [`canvas`].

pub mod canvas;
pub mod config;
pub mod registry;
pub mod session;
pub mod signal;
pub mod sketch;
pub mod sketches;

pub use canvas::{Canvas, Color, Recorder, Shape, Style};
pub use config::{HostConfig, MidiPad, WindowConfig};
pub use registry::SketchRegistry;
pub use signal::SignalSource;
pub use sketch::{Frame, PingPong, Sketch, map_range, normalize_or_zero};
