//! Oceanview - animated procedural ocean backdrop
//!
//! Opens a window showing the selected backdrop, or renders a fixed-length
//! PNG sequence with `--record`.

use clap::Parser;

use oceanview::app::App;
use oceanview::canvas::Pixmap;
use oceanview::cli::Args;
use oceanview::lifecycle::OceanView;
use oceanview::params::ParticleParams;
use oceanview::recording;
use oceanview::scene::Backdrop;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    println!("Oceanview - procedural ocean backdrop");
    println!("Scene: {:?}", args.scene);

    let mut rng = args.rng();
    let backdrop = Backdrop::build(args.scene, &mut rng, &ParticleParams::default());

    if let Some(config) = args.recording_config() {
        let mut view: OceanView<Pixmap> = OceanView::new(backdrop);
        recording::record(&mut view, &config, args.width, args.height)?;
        return Ok(());
    }

    println!("Initializing window...\n");
    App::new(backdrop, args.render_config()).run()?;
    Ok(())
}
