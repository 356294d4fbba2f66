//! Headless recording: render a fixed-rate frame sequence to PNG files.

use std::fs;

use log::{debug, info};

use crate::canvas::Pixmap;
use crate::error::Result;
use crate::lifecycle::{HeadlessHost, OceanView};
use crate::params::RecordingConfig;

/// Render `config.total_frames()` frames at `width`x`height` into the
/// frames directory, returning the number written
pub fn record(
    view: &mut OceanView<Pixmap>,
    config: &RecordingConfig,
    width: u32,
    height: u32,
) -> Result<usize> {
    fs::create_dir_all(config.frames_dir())?;

    let total = config.total_frames();
    println!(
        "Recording {} frames ({:.1}s at {} fps) to {}",
        total,
        config.duration_secs,
        config.fps,
        config.frames_dir().display()
    );

    let mut host = HeadlessHost::new(width, height);
    view.mount(&mut host)?;

    let mut written = 0;
    for frame_num in 0..total {
        // Each frame is driven by the request the previous one left behind
        if host.take_pending().is_none() {
            break;
        }
        let Some(surface) = view.frame(&mut host, config.frame_time_ms(frame_num)) else {
            break;
        };

        let path = config.frame_path(frame_num);
        if let Err(e) = surface.to_rgba_image().save(&path) {
            view.unmount(&mut host);
            return Err(e.into());
        }
        debug!("Wrote {}", path.display());
        written += 1;

        if config.fps > 0 && written % config.fps as usize == 0 {
            info!("Recorded {}/{} frames", written, total);
        }
    }

    view.unmount(&mut host);
    println!("Recording complete: {} frames", written);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParticleParams;
    use crate::scene::{Backdrop, SceneKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_record_writes_numbered_frames() {
        let output_dir =
            std::env::temp_dir().join(format!("oceanview-rec-{}", std::process::id()));
        let config = RecordingConfig {
            duration_secs: 1.0,
            output_dir: output_dir.clone(),
            fps: 3,
        };

        let mut rng = StdRng::seed_from_u64(5);
        let backdrop = Backdrop::build(SceneKind::Realistic, &mut rng, &ParticleParams::default());
        let mut view = OceanView::new(backdrop);

        let written = record(&mut view, &config, 48, 32).unwrap();
        assert_eq!(written, 3);
        assert!(!view.is_running());

        for n in 0..3 {
            let img = image::open(config.frame_path(n)).unwrap().to_rgba8();
            assert_eq!(img.dimensions(), (48, 32));
        }
        assert!(config.frame_path(0).ends_with("frames/frame_00000.png"));
        assert!(!config.frame_path(3).exists());

        fs::remove_dir_all(&output_dir).unwrap();
    }
}
