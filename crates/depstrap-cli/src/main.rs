mod commands;

use clap::{Parser, Subcommand};
use commands::exit_code_for;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "depstrap",
    version,
    about = "Generate relocatable dependency bootstrap manifests"
)]
struct Cli {
    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate the bootstrap manifest from a build description.
    Generate {
        /// Path to the build description TOML file.
        #[arg(default_value = "depstrap.toml")]
        description: PathBuf,
        /// Write the manifest here instead of <build_dir>/depstrap/depstrap.json.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Output a structured JSON summary.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show the contents of a generated manifest.
    Inspect {
        /// Path to the manifest file.
        #[arg(default_value = "build/depstrap/depstrap.json")]
        manifest: PathBuf,
        /// Output as structured JSON with decoded namespaces.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe")
            || msg.contains("broken pipe")
            || msg.contains("os error 32")
            || msg.contains("failed printing to stdout")
        {
            std::process::exit(0);
        }
        default_hook(info);
    }));

    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("DEPSTRAP_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let result = match cli.command {
        Commands::Generate {
            description,
            output,
            json,
        } => commands::generate::run(&description, output.as_deref(), json),
        Commands::Inspect { manifest, json } => commands::inspect::run(&manifest, json),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            ExitCode::from(exit_code_for(&msg))
        }
    }
}
