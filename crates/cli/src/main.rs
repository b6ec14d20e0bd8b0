use anyhow::{bail, Context};
use config::{Config, File};
use log::{info, LevelFilter};
use overworld::{timed, ProceduralWorld, TileSample, WorldConfig};
use simple_logger::SimpleLogger;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    process,
};
use structopt::StructOpt;
use strum::{Display, EnumString};

/// CLI for inspecting worlds generated by the Overworld kit.
#[derive(Debug, StructOpt)]
#[structopt(name = "overworld")]
struct Opt {
    /// Path to a config file that defines the world to inspect. Supported
    /// formats: JSON, TOML. Omitting this uses the default config with a
    /// freshly drawn seed
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Seed override. An integer is used directly; any other text is hashed
    #[structopt(short, long)]
    seed: Option<String>,

    /// X coordinate of the chunk to materialize, in chunk units
    #[structopt(long, default_value = "0", allow_hyphen_values = true)]
    chunk_x: i64,

    /// Y coordinate of the chunk to materialize, in chunk units
    #[structopt(long, default_value = "0", allow_hyphen_values = true)]
    chunk_y: i64,

    /// Side length of the chunk, in tiles
    #[structopt(long, default_value = "16")]
    chunk_size: usize,

    /// If given, outputs are written to files in this directory; otherwise
    /// they are printed to stdout
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// The format(s) to output the chunk in. Supported formats:
    ///
    /// ascii - One glyph per tile, one line per row. Good for eyeballing
    ///   terrain shapes in a terminal
    ///
    /// json - The chunk's (tile, biome) samples as a 2D JSON array
    ///
    /// cfg - The full resolved config for the world, in TOML format. Useful
    ///   for pinning down a world that used a random seed
    #[structopt(short = "f", long, default_value = "ascii")]
    output_formats: Vec<OutputFormat>,

    /// The logging level to use. See
    /// https://docs.rs/log/0.4/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

/// Different output formats.
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    /// Render the chunk as a glyph grid
    Ascii,
    /// Serialize the chunk's samples as JSON
    Json,
    /// Export the world's full config in a human-readable file
    Cfg,
}

impl OutputFormat {
    fn file_name(self) -> &'static str {
        match self {
            Self::Ascii => "chunk.txt",
            Self::Json => "chunk.json",
            Self::Cfg => "world.toml",
        }
    }
}

fn load_config(config_path: &Path) -> anyhow::Result<WorldConfig> {
    let mut settings = Config::new();
    let config_path = config_path.to_str().with_context(|| {
        format!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

/// Render a chunk as one glyph per tile, one line per row
fn render_ascii(chunk: &[Vec<TileSample>]) -> String {
    let mut out = String::new();
    for row in chunk {
        for sample in row {
            out.push(sample.tile.glyph());
        }
        out.push('\n');
    }
    out
}

/// Generate one output form of the chunk/world in the given format.
fn generate_bytes(
    output_format: OutputFormat,
    world: &ProceduralWorld,
    chunk: &[Vec<TileSample>],
) -> Vec<u8> {
    match output_format {
        OutputFormat::Ascii => render_ascii(chunk).into_bytes(),
        OutputFormat::Json => {
            // Panic here indicates an internal bug in the data format
            serde_json::to_string_pretty(chunk)
                .expect("error serializing chunk")
                .into_bytes()
        }
        OutputFormat::Cfg => toml::to_string_pretty(world.config())
            // Panics only if the config format isn't serializable (a bug)
            .expect("error serializing config")
            .into_bytes(),
    }
}

/// Write one output format into the output directory.
fn gen_output(
    output_dir: &Path,
    output_format: OutputFormat,
    world: &ProceduralWorld,
    chunk: &[Vec<TileSample>],
) -> anyhow::Result<()> {
    let output_file_path = output_dir.join(output_format.file_name());

    timed!(
        format!(
            "Generating {} output and writing to {:?}",
            output_format, &output_file_path
        ),
        log::Level::Info,
        {
            let bytes = generate_bytes(output_format, world, chunk);
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&output_file_path)
                .with_context(|| {
                    format!("error opening output file {:?}", &output_file_path)
                })?;
            file.write_all(&bytes).with_context(|| {
                format!("error writing to file {:?}", &output_file_path)
            })?;
        }
    );

    Ok(())
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    if opt.chunk_size == 0 || opt.chunk_size > 512 {
        bail!("--chunk-size must be between 1 and 512");
    }
    if opt.output_formats.is_empty() {
        bail!("no output formats were given");
    }

    let mut config = match &opt.config {
        Some(config_path) => load_config(config_path)?,
        None => WorldConfig::default(),
    };
    if let Some(seed) = &opt.seed {
        config.seed = seed.as_str().into();
    }

    let mut world = ProceduralWorld::new(config)?;
    let chunk = timed!(
        "Chunk generation",
        log::Level::Info,
        world.generate_chunk(opt.chunk_x, opt.chunk_y, opt.chunk_size)
    );
    info!(
        "Generated chunk ({}, {}) of {} tiles",
        opt.chunk_x,
        opt.chunk_y,
        opt.chunk_size * opt.chunk_size
    );

    match &opt.output {
        Some(output_dir) => {
            fs::create_dir_all(output_dir)?;
            for output_format in opt.output_formats {
                gen_output(output_dir, output_format, &world, &chunk)?;
            }
        }
        None => {
            for output_format in opt.output_formats {
                let bytes = generate_bytes(output_format, &world, &chunk);
                // Output is text in every format we support
                print!("{}", String::from_utf8_lossy(&bytes));
            }
        }
    }

    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
