//! Host configuration, read from RON.
//!
//! Every struct is `#[serde(default)]`, so a file only needs the fields it
//! changes. Suspicious values are reported by [`HostConfig::validate`] as
//! warnings rather than errors.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::registry::SketchRegistry;
use crate::signal::SignalSource;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
            title: "Sketchbook".into(),
        }
    }
}

/// A button in the host that plays one note.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MidiPad {
    pub label: String,
    pub note: u8,
    pub velocity: u8,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct HostConfig {
    pub window: WindowConfig,
    pub sketch: String,
    /// Sketch frames per second, independent of the repaint rate.
    pub frame_rate: f32,
    /// Frames kept for translucent-background trails.
    pub trail_frames: usize,
    pub seed: Option<u64>,
    pub signal: SignalSource,
    pub pads: Vec<MidiPad>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            window: Default::default(),
            sketch: "rings".into(),
            frame_rate: 60.0,
            trail_frames: 120,
            seed: None,
            signal: Default::default(),
            pads: vec![
                MidiPad {
                    label: "Ring".into(),
                    note: 1,
                    velocity: 127,
                },
                MidiPad {
                    label: "Fan".into(),
                    note: 15,
                    velocity: 64,
                },
            ],
        }
    }
}

impl HostConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        ron::from_str(&data).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(format!("{e:#}"))),
        }
    }

    /// Human-readable warnings about values that are probably unintended.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push(format!(
                "window dimensions must be > 0 (got {}x{})",
                self.window.width, self.window.height
            ));
        }
        let registry = SketchRegistry::builtin();
        if !registry.contains(&self.sketch) {
            w.push(format!(
                "unknown sketch '{}'; expected one of {}",
                self.sketch,
                registry.available()
            ));
        }
        if !(self.frame_rate > 0.0 && self.frame_rate <= 240.0) {
            w.push(format!("frame_rate {} outside 0..=240", self.frame_rate));
        }
        if self.trail_frames == 0 {
            w.push("trail_frames is 0; treated as 1".into());
        }
        if let SignalSource::Sine { period_frames, .. } = self.signal {
            if period_frames <= 0.0 {
                w.push(format!("signal period_frames {period_frames} must be > 0; signal stays at 0"));
            }
        }
        for pad in &self.pads {
            if pad.note > 127 {
                w.push(format!("pad '{}' note {} above 127", pad.label, pad.note));
            }
            if pad.velocity > 127 {
                w.push(format!("pad '{}' velocity {} above 127", pad.label, pad.velocity));
            }
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let cfg = HostConfig::default();
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
        assert_eq!(cfg.sketch, "rings");
    }

    #[test]
    fn load_or_default_missing_file() {
        let (cfg, err) = HostConfig::load_or_default("this/file/does/not/exist.ron");
        let err = err.expect("missing file should report an error");
        assert!(err.contains("reading config"), "{err}");
        assert_eq!(cfg, HostConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let sample = r#"(
            window: (width: 640.0),
            sketch: "swarm",
            seed: Some(7),
            signal: Alternating(low: 0.0, high: 10.0),
        )"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample.as_bytes()).unwrap();
        let cfg = HostConfig::load_from_file(file.path()).expect("parse config");
        assert_eq!(cfg.window.width, 640.0);
        assert_eq!(cfg.window.height, WindowConfig::default().height);
        assert_eq!(cfg.sketch, "swarm");
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.signal, SignalSource::Alternating { low: 0.0, high: 10.0 });
        assert_eq!(cfg.pads.len(), 2);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"(window: (width: \"wide\"))").unwrap();
        let err = HostConfig::load_from_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parsing config"));
    }

    #[test]
    fn validate_flags_suspicious_values() {
        let cfg = HostConfig {
            window: WindowConfig {
                width: 0.0,
                ..Default::default()
            },
            sketch: "spiral".into(),
            frame_rate: 0.0,
            trail_frames: 0,
            seed: None,
            signal: SignalSource::Sine {
                amplitude: 5.0,
                period_frames: -1.0,
            },
            pads: vec![MidiPad {
                label: "Loud".into(),
                note: 200,
                velocity: 130,
            }],
        };
        let warnings = cfg.validate();
        let joined = warnings.join("\n");
        assert!(joined.contains("window dimensions"));
        assert!(joined.contains("unknown sketch 'spiral'"));
        assert!(joined.contains("frame_rate"));
        assert!(joined.contains("trail_frames"));
        assert!(joined.contains("period_frames"));
        assert!(joined.contains("note 200"));
        assert!(joined.contains("velocity 130"));
        assert_eq!(warnings.len(), 7, "{joined}");
    }
}
