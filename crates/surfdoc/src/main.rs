use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use surfdoc::config::TargetName;
use surfdoc::{Sources, SurfdocConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "surfdoc")]
#[command(version)]
#[command(about = "Generate JavaScript and Python API help from a documented reference corpus")]
struct Cli {
    /// Root of the documented C# reference sources
    #[arg(value_name = "REFERENCE_ROOT", required_unless_present = "list_emitters")]
    reference_root: Option<PathBuf>,

    /// Root of the native binding sources
    #[arg(value_name = "BINDINGS_ROOT", required_unless_present = "list_emitters")]
    bindings_root: Option<PathBuf>,

    /// Directory the generated files are written under
    #[arg(value_name = "OUTPUT_ROOT", required_unless_present = "list_emitters")]
    output_root: Option<PathBuf>,

    /// Config file path (default: .surfdoc/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emitter to run; repeat for several (default: all)
    #[arg(long = "emit", value_name = "NAME")]
    emit: Vec<String>,

    /// Only run emitters for this runtime
    #[arg(long, value_enum, value_name = "TARGET")]
    target: Option<TargetName>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print the built-in emitter names and exit
    #[arg(long)]
    list_emitters: bool,
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match (quiet, verbose) {
            (true, _) => "error",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        };
        EnvFilter::new(level)
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.list_emitters {
        for name in surfdoc_emit::emitter_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let (Some(reference_root), Some(bindings_root), Some(output_root)) =
        (cli.reference_root, cli.bindings_root, cli.output_root)
    else {
        anyhow::bail!("REFERENCE_ROOT, BINDINGS_ROOT and OUTPUT_ROOT are required");
    };

    let mut config = SurfdocConfig::load(cli.config.as_deref())?;
    if !cli.emit.is_empty() {
        config.output.emitters = cli.emit;
    }
    if cli.target.is_some() {
        config.output.target = cli.target;
    }

    let sources = Sources {
        reference_root,
        bindings_root,
    };
    let written = surfdoc::run(&config, &sources, &output_root)?;
    tracing::info!(files = written.len(), root = %output_root.display(), "done");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
