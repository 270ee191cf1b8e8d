use std::collections::BTreeMap;

use crate::sketch::Sketch;
use crate::sketches::{Ball, Particles, Rings, Swarm, Walkers};

/// Sketches by name. Each entry owns its own state; nothing is shared.
#[derive(Default)]
pub struct SketchRegistry {
    sketches: BTreeMap<&'static str, Box<dyn Sketch>>,
}

impl SketchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding one fresh instance of every built-in sketch.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(Rings::new()));
        registry.register(Box::new(Walkers::new()));
        registry.register(Box::new(Ball::new()));
        registry.register(Box::new(Swarm::new()));
        registry.register(Box::new(Particles::new()));
        registry
    }

    /// Adds a sketch under its own name, returning any sketch it replaced.
    pub fn register(&mut self, sketch: Box<dyn Sketch>) -> Option<Box<dyn Sketch>> {
        self.sketches.insert(sketch.name(), sketch)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sketches.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sketches.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.sketches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sketches.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&(dyn Sketch + 'static)> {
        self.sketches.get(name).map(|sketch| &**sketch)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Sketch + 'static)> {
        self.sketches.get_mut(name).map(|sketch| &mut **sketch)
    }

    /// Comma-separated sketch names, for error messages.
    pub fn available(&self) -> String {
        self.names().collect::<Vec<_>>().join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Recorder;
    use crate::sketch::Frame;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn builtin_registers_all_sketches() {
        let registry = SketchRegistry::builtin();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["ball", "new", "rings", "swarm", "walker"]);
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn unknown_name_finds_nothing() {
        let mut registry = SketchRegistry::builtin();
        assert!(registry.get_mut("spiral").is_none());
        assert!(registry.get("spiral").is_none());
        assert_eq!(registry.available(), "ball, new, rings, swarm, walker");
    }

    #[test]
    fn sketches_do_not_share_state() {
        let mut registry = SketchRegistry::builtin();
        let mut canvas = Recorder::new(1);
        let mut rng = StdRng::seed_from_u64(4);
        let mut frame = Frame::new(&mut canvas, &mut rng, 200.0, 200.0);

        let expected = [("ball", 360), ("new", 100), ("rings", 100), ("swarm", 150), ("walker", 250)];
        for (name, count) in expected {
            let sketch = registry.get_mut(name).unwrap();
            assert_eq!(sketch.entity_count(), 0);
            sketch.setup(&mut frame);
            sketch.draw(&mut frame, 10.0);
            sketch.on_midi_note(1, 127);
            assert_eq!(sketch.entity_count(), count, "{name}");
        }
        // drawing one sketch leaves the others untouched
        let rings_before = registry.get_mut("rings").unwrap().entity_count();
        registry.get_mut("walker").unwrap().draw(&mut frame, 10.0);
        assert_eq!(registry.get_mut("rings").unwrap().entity_count(), rings_before);
        assert_eq!(registry.get_mut("ball").unwrap().entity_count(), 360);
    }
}
