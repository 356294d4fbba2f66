//! Sea-surface model: layered waves and drifting particles.
//!
//! Everything here is a pure function of (parameters, elapsed time, surface
//! size). Nothing accumulates between frames, so any frame can be redrawn
//! for any time value.

mod particles;
mod waves;

// Re-export public types
pub use particles::{Bubble, Fish, Particles};
pub use waves::{wave_height, wave_height_bound};
