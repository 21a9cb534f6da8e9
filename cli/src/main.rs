use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gw2bl_cli::commands;
use gw2bl_core::{DecodeOptions, settings};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Keep a library of build template chat codes")]
struct Cli {
    /// Library file (defaults to the configured one)
    #[arg(short, long, global = true)]
    library: Option<PathBuf>,

    /// Write logs to a daily file in the data directory instead of stderr
    #[arg(long, global = true)]
    log_file: bool,

    /// Reject codes naming specializations this build does not know
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stored templates
    List {
        #[arg(short, long)]
        profession: Option<String>,
    },
    /// Show one template and its specializations
    Show { index: i32 },
    /// Store a chat code (read from stdin when CODE is omitted)
    Add {
        #[arg(short, long)]
        index: Option<i32>,
        code: Option<String>,
    },
    Remove { index: i32 },
    Rename { index: i32, name: String },
    /// Merge templates from another library file
    Import { path: PathBuf },
    /// Write the templates to another file
    Export { path: PathBuf },
    /// Decode a chat code without touching the library
    Decode { code: String },
    /// Show settings, optionally storing a new default library file
    Config {
        #[arg(long)]
        set_library: Option<PathBuf>,
    },
}

fn main() -> Result<(), String> {
    let cli = Cli::parse();
    init_logging(cli.log_file);

    let options = DecodeOptions {
        strict_specializations: cli.strict,
    };
    if let Commands::Decode { code } = &cli.command {
        return commands::decode(code, options).map(|_| ());
    }

    let mut settings = settings::load_settings();
    if let Commands::Config { set_library } = &cli.command {
        return commands::config(&mut settings, set_library.clone());
    }

    let path = cli
        .library
        .clone()
        .unwrap_or_else(|| settings::library_path(&settings));

    let mut library = commands::open_library(&path, options, settings.save_window_state)?;

    let changed = match &cli.command {
        Commands::List { profession } => {
            let filter = match profession {
                Some(name) => commands::parse_profession(name)?,
                None => commands::parse_profession(&settings.profession_filter)?,
            };
            commands::list(&library, filter)
        }
        Commands::Show { index } => commands::show(&library, *index),
        Commands::Add { index, code } => commands::add(&mut library, *index, code.clone()),
        Commands::Remove { index } => commands::remove(&mut library, *index),
        Commands::Rename { index, name } => commands::rename(&mut library, *index, name),
        Commands::Import { path } => commands::import(&mut library, path),
        Commands::Export { path } => commands::export(&library, path),
        Commands::Decode { .. } | Commands::Config { .. } => Ok(false),
    }?;

    if changed && !library.save(&path, settings.save_window_state) {
        return Err(format!("Failed to save build library to {}", path.display()));
    }

    Ok(())
}

fn init_logging(log_to_file: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::WARN.into())
        .from_env_lossy();

    if log_to_file {
        let appender = settings::default_data_dir().and_then(|dir| {
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(settings::APP_NAME)
                .filename_suffix("log")
                .build(dir.join("logs"))
                .ok()
        });

        if let Some(appender) = appender {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(appender)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
