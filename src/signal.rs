use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

/// Where the per-frame signal handed to `Sketch::draw` comes from.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub enum SignalSource {
    Constant(f32),
    /// Swings between 0 and `amplitude` once every `period_frames` frames.
    Sine { amplitude: f32, period_frames: f32 },
    /// `low` on even frames, `high` on odd ones.
    Alternating { low: f32, high: f32 },
}

impl Default for SignalSource {
    fn default() -> Self {
        Self::Sine {
            amplitude: 12.0,
            period_frames: 240.0,
        }
    }
}

impl SignalSource {
    pub fn value(&self, frame: u64) -> f32 {
        match *self {
            Self::Constant(v) => v,
            Self::Sine {
                amplitude,
                period_frames,
            } => {
                if period_frames <= 0.0 {
                    return 0.0;
                }
                let phase = (frame as f64 / period_frames as f64).fract() as f32;
                amplitude * (0.5 + 0.5 * (TAU * phase).sin())
            }
            Self::Alternating { low, high } => {
                if frame % 2 == 0 {
                    low
                } else {
                    high
                }
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Constant(_) => "Manual",
            Self::Sine { .. } => "Sine",
            Self::Alternating { .. } => "Alternating",
        }
    }
}
