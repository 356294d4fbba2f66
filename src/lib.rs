//! Oceanview library - animated procedural ocean backdrops
//!
//! Frames are drawn in software onto a [`canvas::Canvas`] and either shown
//! in a window through wgpu or written to PNG files.

pub mod app;
pub mod canvas;
pub mod cli;
pub mod error;
pub mod event;
pub mod lifecycle;
pub mod noise;
pub mod ocean;
pub mod params;
pub mod recording;
pub mod rendering;
pub mod scene;

pub use error::{Error, Result};
