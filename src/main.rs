use std::convert::TryFrom;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{ error, info };

use whitted_tracer::consts::DEFAULT_RECURSION_DEPTH;
use whitted_tracer::config::{ RenderConfig, Sampling };
use whitted_tracer::scene::Scene;
use whitted_tracer::error::Result;

/// Renders a JSON scene description to a PPM image.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Options {
    /// Scene description (JSON).
    #[clap(short, long, parse(from_os_str))]
    file: PathBuf,

    /// Output image; defaults to the scene path with a `.ppm` extension.
    #[clap(short, long, parse(from_os_str))]
    out: Option<PathBuf>,

    /// Maximum number of reflection/refraction bounces.
    #[clap(short, long, default_value_t = DEFAULT_RECURSION_DEPTH)]
    recurse: usize,

    /// Override the image width from the scene.
    #[clap(short, long)]
    width: Option<usize>,

    /// Override the image height from the scene.
    #[clap(short = 'H', long)]
    height: Option<usize>,

    /// Rays traced through each pixel: 1, 4 or 16.
    #[clap(short = 's', long, default_value_t = 1)]
    rays_per_pixel: usize,

    /// Render on a single thread.
    #[clap(long)]
    sequential: bool,
}

fn run(options: &Options) -> Result<()> {
    let config = RenderConfig {
        depth: options.recurse,
        sampling: Sampling::try_from(options.rays_per_pixel)?,
        parallel: !options.sequential,
    };

    let Scene { world, mut camera } = Scene::load(&options.file)?;

    if options.width.is_some() || options.height.is_some() {
        let hsize = options.width.unwrap_or(camera.hsize);
        let vsize = options.height.unwrap_or(camera.vsize);
        camera.resize(hsize, vsize)?;
    }

    let image = camera.render(&world, &config);

    let out = options.out.clone()
        .unwrap_or_else(|| options.file.with_extension("ppm"));
    image.save(&out)?;
    info!("wrote {}", out.display());

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let options = Options::parse();
    if let Err(e) = run(&options) {
        error!("{}", e);
        process::exit(1);
    }
}
