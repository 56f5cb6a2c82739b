#[macro_use]
extern crate log;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use voronoise::raster::load_density_map;
use voronoise::sampling::{SamplingDomain, DEFAULT_ATTEMPTS};
use voronoise::{Config, NamedColor, Pipeline};

#[derive(Parser, Debug)]
#[clap(about, version, author)]
struct Args {
    /// RGB24 BMP density map, `image-size` pixels square. Its blue channel
    /// is the probability of keeping a sample at that pixel.
    density_map: Option<PathBuf>,

    /// Asks for the size, cell size, line width and colors on stdin.
    #[clap(long, short)]
    interactive: bool,

    /// Output image resolution, 256-4096.
    #[clap(long, default_value_t = 512)]
    image_size: u32,

    /// Cell size, 1-1000. Larger cells mean fewer points.
    #[clap(long, default_value_t = 500)]
    cell_size: u32,

    /// Width of the rendered Voronoi edges in pixels, 1-30.
    #[clap(long, default_value_t = 2)]
    line_width: u32,

    /// Cell fill color, by palette number or name.
    #[clap(long, default_value = "white")]
    cell_color: NamedColor,

    /// Edge color, by palette number or name.
    #[clap(long, default_value = "black")]
    edge_color: NamedColor,

    #[clap(long, value_enum, default_value_t = Domain::Square)]
    domain: Domain,

    /// Seed for reproducible output. Random when omitted.
    #[clap(long)]
    seed: Option<u64>,

    /// Candidates tried around each active sample.
    #[clap(long, default_value_t = DEFAULT_ATTEMPTS)]
    max_attempts: usize,

    /// Directory the output files are written to.
    #[clap(long, short, default_value = ".")]
    output_dir: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Domain {
    Square,
    Disc,
}

impl From<Domain> for SamplingDomain {
    fn from(d: Domain) -> Self {
        match d {
            Domain::Square => SamplingDomain::Square,
            Domain::Disc => SamplingDomain::Disc,
        }
    }
}

impl Args {
    fn config(&self) -> voronoise::Result<Config> {
        let config = Config {
            image_size: self.image_size,
            cell_size: self.cell_size,
            line_width: self.line_width,
            cell_color: self.cell_color,
            edge_color: self.edge_color,
            domain: self.domain.into(),
            seed: self.seed,
            max_attempts: self.max_attempts,
        };
        if self.interactive {
            let stdin = std::io::stdin();
            config.prompt(&mut stdin.lock(), &mut std::io::stdout())
        } else {
            Ok(config)
        }
    }
}

fn run(args: &Args) -> voronoise::Result<()> {
    let config = args.config()?;
    let pipeline = Pipeline::new(config)?;

    let density = match &args.density_map {
        Some(path) => {
            info!("loading density map {}", path.display());
            Some(load_density_map(path, pipeline.config().image_size)?)
        }
        None => None,
    };

    let diagram = pipeline.run(density.as_ref(), &mut pipeline.rng())?;
    std::fs::create_dir_all(&args.output_dir)?;
    diagram.write_outputs(&args.output_dir, pipeline.config())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
