// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand, ValueEnum};
use snapcam::app::AppModel;
use snapcam::backends::camera::CameraFacing;
use snapcam::i18n;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "snapcam")]
#[command(about = "Camera for the COSMIC desktop")]
#[command(version = env!("GIT_VERSION"))]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available cameras
    List,

    /// Take a photo
    Photo {
        /// Camera to use
        #[arg(short, long, value_enum, default_value_t = Facing::Back)]
        facing: Facing,

        /// Output directory (default: configured photo directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Facing {
    Front,
    Back,
}

impl From<Facing> for CameraFacing {
    fn from(facing: Facing) -> Self {
        match facing {
            Facing::Front => CameraFacing::Front,
            Facing::Back => CameraFacing::Back,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=snapcam=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List) => Ok(cli::list_cameras()?),
        Some(Commands::Photo { facing, output }) => Ok(cli::take_photo(facing.into(), output)?),
        None => run_gui(),
    }
}

fn run_gui() -> Result<(), Box<dyn std::error::Error>> {
    // Get the system's preferred languages.
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();

    // Enable localizations to be applied.
    i18n::init(&requested_languages);

    let settings = cosmic::app::Settings::default().size_limits(
        cosmic::iced::Limits::NONE
            .min_width(360.0)
            .min_height(480.0),
    );

    // Starts the application's event loop with `()` as the application's flags.
    cosmic::app::run::<AppModel>(settings, ())?;

    Ok(())
}
