//! Drives the active sketch the way a host harness does: `setup` before the
//! first frame, queued notes, then `draw` once per step into a [`Recorder`].

use anyhow::{Result, bail};
use cgmath::{Vector2, Zero};
use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};

use crate::canvas::Recorder;
use crate::config::HostConfig;
use crate::registry::SketchRegistry;
use crate::signal::SignalSource;
use crate::sketch::Frame;

pub struct Session {
    registry: SketchRegistry,
    active: String,
    canvas: Recorder,
    rng: StdRng,
    signal: SignalSource,
    frame_index: u64,
    last_signal: f32,
    needs_setup: bool,
    pending_notes: Vec<(u8, u8)>,
    pub pointer: Vector2<f32>,
    pub pointer_down: bool,
}

impl Session {
    pub fn new(config: &HostConfig) -> Result<Self> {
        let registry = SketchRegistry::builtin();
        if !registry.contains(&config.sketch) {
            bail!(
                "unknown sketch '{}' (available: {})",
                config.sketch,
                registry.available()
            );
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            registry,
            active: config.sketch.clone(),
            canvas: Recorder::new(config.trail_frames),
            rng,
            signal: config.signal,
            frame_index: 0,
            last_signal: 0.0,
            needs_setup: true,
            pending_notes: Vec::new(),
            pointer: Vector2::zero(),
            pointer_down: false,
        })
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    /// Switches to another sketch; it is set up again on the next step.
    pub fn select(&mut self, name: &str) -> Result<()> {
        if !self.registry.contains(name) {
            bail!("unknown sketch '{name}'");
        }
        if self.active != name {
            info!("switching sketch {} -> {name}", self.active);
            self.active = name.to_owned();
        }
        self.restart();
        Ok(())
    }

    pub fn restart(&mut self) {
        self.needs_setup = true;
        self.pending_notes.clear();
    }

    pub fn signal(&self) -> SignalSource {
        self.signal
    }

    pub fn set_signal(&mut self, signal: SignalSource) {
        self.signal = signal;
    }

    pub fn last_signal(&self) -> f32 {
        self.last_signal
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn set_trail_frames(&mut self, frames: usize) {
        self.canvas.set_capacity(frames);
    }

    pub fn queue_note(&mut self, note: u8, velocity: u8) {
        self.pending_notes.push((note, velocity));
    }

    pub fn canvas(&self) -> &Recorder {
        &self.canvas
    }

    pub fn entity_count(&self) -> usize {
        self.registry
            .get(&self.active)
            .map_or(0, |sketch| sketch.entity_count())
    }

    /// Runs a pending setup, delivers queued notes, then draws `frames` frames
    /// on a `width` × `height` canvas.
    pub fn step(&mut self, width: f32, height: f32, frames: u32) -> Result<()> {
        if self.needs_setup {
            self.canvas.clear();
        }
        let Some(sketch) = self.registry.get_mut(&self.active) else {
            bail!(
                "unknown sketch '{}' (available: {})",
                self.active,
                self.registry.available()
            );
        };
        if self.needs_setup {
            self.canvas.begin_frame();
            let mut frame = Frame::new(&mut self.canvas, &mut self.rng, width, height)
                .with_pointer(self.pointer, self.pointer_down);
            sketch.setup(&mut frame);
            self.needs_setup = false;
            info!("{}: set up {} entities on {width}x{height}", self.active, sketch.entity_count());
        }

        for (note, velocity) in self.pending_notes.drain(..) {
            debug!("{}: note {note} velocity {velocity}", self.active);
            sketch.on_midi_note(note, velocity);
        }

        for _ in 0..frames {
            let signal = self.signal.value(self.frame_index);
            self.canvas.begin_frame();
            let mut frame = Frame::new(&mut self.canvas, &mut self.rng, width, height)
                .with_pointer(self.pointer, self.pointer_down);
            sketch.draw(&mut frame, signal);
            self.last_signal = signal;
            self.frame_index += 1;
        }
        Ok(())
    }
}
