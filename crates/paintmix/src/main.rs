use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use image::RgbImage;

use paintmix::logging::{init_logging, LoggingConfig};
use paintmix::render::MixingPlane;
use paintmix::{Float, MixOptions, MixingContext, Palette};

#[derive(Debug, Parser)]
#[command(author, version, about = "Predict the colors of mixed paints", long_about = None)]
struct Cli {
    /// Increase log verbosity, once for debug and twice for trace output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a plane of white, yellow, and blue mixtures as PNG image
    Render {
        /// Width in pixels of the generated image
        #[arg(short = 'W', long, value_parser = clap::value_parser!(u32).range(1..), default_value_t = 256)]
        width: u32,

        /// Height in pixels of the generated image
        #[arg(short = 'H', long, value_parser = clap::value_parser!(u32).range(1..), default_value_t = 256)]
        height: u32,

        #[arg(short, long, default_value = "mix.png")]
        output: PathBuf,

        #[command(flatten)]
        setup: Setup,
    },

    /// Mix pigments with the given weights and print the resulting color
    Mix {
        /// Comma-separated weights, one per pigment
        #[arg(short, long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
        weights: Vec<Float>,

        #[command(flatten)]
        setup: Setup,
    },

    /// List the pigments of a palette
    Pigments {
        #[command(flatten)]
        setup: Setup,
    },
}

#[derive(Debug, Args)]
struct Setup {
    /// JSON file with mixing options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON file with pigment definitions
    #[arg(long, conflicts_with = "pigment")]
    pigments: Option<PathBuf>,

    /// Built-in pigment to use, repeated in palette order
    #[arg(short, long)]
    pigment: Vec<String>,
}

impl Setup {
    fn palette(&self) -> Result<Palette> {
        if let Some(path) = &self.pigments {
            Palette::from_json_file(path)
                .with_context(|| format!("could not load pigments from {}", path.display()))
        } else if self.pigment.is_empty() {
            Ok(Palette::reference())
        } else {
            Ok(Palette::select(&self.pigment)?)
        }
    }

    fn options(&self) -> Result<MixOptions> {
        self.config.as_ref().map_or_else(
            || Ok(MixOptions::default()),
            |path| {
                MixOptions::from_json_file(path)
                    .with_context(|| format!("could not load options from {}", path.display()))
            },
        )
    }

    fn context(&self) -> Result<MixingContext> {
        Ok(MixingContext::new(self.palette()?, self.options()?)?)
    }
}

#[allow(clippy::print_stdout)]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig::with_verbosity(cli.verbose));

    match cli.command {
        Command::Render {
            width,
            height,
            output,
            setup,
        } => {
            let context = setup.context()?;
            let plane = MixingPlane::new(width, height)?;
            let pixels = plane.render_24bit(&context)?;

            let image = RgbImage::from_raw(width, height, pixels)
                .context("rendered pixels do not fit image dimensions")?;
            image
                .save(&output)
                .with_context(|| format!("could not write {}", output.display()))?;
            log::info!("wrote {}x{} mixing plane to {}", width, height, output.display());
        }
        Command::Mix { weights, setup } => {
            let context = setup.context()?;
            let evaluation = context.evaluate_detailed(&weights)?;

            let [x, y, z] = evaluation.xyz;
            let [r, g, b] = evaluation.linear_rgb;
            println!("xyz        {:.5} {:.5} {:.5}", x, y, z);
            println!("linear rgb {:.5} {:.5} {:.5}", r, g, b);
            println!("rgb        {:.5}", evaluation.rgb);
            println!("hex        {}", evaluation.rgb.to_hex());

            if evaluation.reflectance.is_none() {
                log::warn!("degenerate mixture resolved to black");
            }
        }
        Command::Pigments { setup } => {
            let palette = setup.palette()?;
            for pigment in palette.pigments() {
                println!(
                    "{:<12} K {:.3}..={:.3}  S {:.3}..={:.3}",
                    pigment.name(),
                    pigment.k().minimum(),
                    pigment.k().maximum(),
                    pigment.s().minimum(),
                    pigment.s().maximum()
                );
            }
        }
    }

    Ok(())
}
