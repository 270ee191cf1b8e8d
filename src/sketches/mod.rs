//! The built-in sketches.

pub mod ball;
pub mod particles;
pub mod rings;
pub mod swarm;
pub mod walker;

pub use ball::Ball;
pub use particles::Particles;
pub use rings::Rings;
pub use swarm::Swarm;
pub use walker::Walkers;
