//! Parameter definitions with units and documented semantics.
//!
//! Every constant the renderer depends on lives here:
//! - Colour stops and wave layers (compile-time, never mutated)
//! - Particle counts and generation ranges
//! - Window and recording settings

mod ocean;
mod render;

// Re-export all types
pub use ocean::{
    OverlayAsset, ParticleParams, Rgb, WaveLayer, COL_DEEP, COL_MID, COL_SHALLOW, COL_SURF,
    DEPTH_STOPS, STATIC_OVERLAYS, WAVE_LAYERS,
};
pub use render::{RecordingConfig, RenderConfig};
