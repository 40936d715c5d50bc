//! probin-gen CLI
//!
//! Usage:
//!   probin-gen -t <TEMPLATE> -o <OUT_FILE> -n <NAMELIST> --pa "<FILES>" [OPTIONS]
//!
//! Options:
//!   --cxx_prefix <PREFIX>  Prefix for the C++ artifacts (default: extern)
//!   --managed              Managed-memory declarations
//!   -c, --config <FILE>    Manifest with defaults for all of the above (TOML)
//!   -q, --quiet            Only log warnings and errors
//!   -h, --help             Print help

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use probin_gen::{run, split_path_list, Manifest};

#[derive(Parser)]
#[command(name = "probin-gen")]
#[command(about = "Generate Fortran runtime parameter modules and their C++ bridge")]
struct Cli {
    /// Template for the Fortran module
    #[arg(short = 't', long)]
    template: Option<PathBuf>,

    /// Generated Fortran file
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Namelist group name
    #[arg(short = 'n', long)]
    namelist: Option<String>,

    /// Parameter files, whitespace separated, in priority-resolution order
    #[arg(long = "pa", value_name = "FILES")]
    parameter_files: Option<String>,

    /// Name prefix for the C++ files
    #[arg(long = "cxx_prefix", value_name = "PREFIX")]
    cxx_prefix: Option<String>,

    /// Use CUDA managed memory for the parameters
    #[arg(long)]
    managed: bool,

    /// Manifest file with default inputs (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> Manifest {
        Manifest {
            template: self.template.clone(),
            output: self.output.clone(),
            namelist: self.namelist.clone(),
            cxx_prefix: self.cxx_prefix.clone(),
            managed: self.managed.then_some(true),
            parameter_files: self.parameter_files.as_deref().map(split_path_list),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    let manifest = match &cli.config {
        Some(path) => match Manifest::from_file(path) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("Error loading manifest '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Manifest::default(),
    };

    let job = match manifest.merge(cli.overrides()).into_job() {
        Ok(job) => job,
        Err(e) => {
            eprintln!("probin-gen: ERROR: {}", e);
            std::process::exit(1);
        }
    };

    match run(&job) {
        Ok(artifacts) => {
            if !artifacts.warnings.is_empty() {
                warn!("finished with {} warning(s)", artifacts.warnings.len());
            }
            info!("generated {} files", artifacts.iter().count());
        }
        Err(e) => {
            eprintln!("probin-gen: ERROR: {}", e.report());
            std::process::exit(1);
        }
    }
}

fn init_tracing(quiet: bool) {
    let default = if quiet { "probin_gen=warn" } else { "probin_gen=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
