//! launch_inventory CLI

use clap::{Args, Parser, Subcommand};
use launch_inventory::{
    extract_inventory,
    record::write_inventory,
    substitution::{CachingLocator, ChainLocator, EnvPrefixLocator, RospackLocator, StaticLocator},
    ExtractOptions, OutputFormat, PathResolver, RecordKind,
};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    process,
    time::Duration,
};

#[derive(Parser)]
#[command(name = "launch_inventory")]
#[command(about = "Inventory of parameters and nodes declared in ROS launch files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    verbose: bool,

    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List parameters as `parent,namespace,name,type,value`
    Params {
        /// Root launch file
        path: PathBuf,

        /// Output format: csv, json or extended
        #[arg(long, default_value = "csv")]
        format: OutputFormat,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// List nodes as `package,name,type`
    Nodes {
        /// Root launch file
        path: PathBuf,

        /// Output format: csv or json
        #[arg(long, default_value = "csv", value_parser = parse_node_format)]
        format: OutputFormat,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// List parameters in the 14-column extended schema
    Extended {
        /// Root launch file
        path: PathBuf,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Write parameters and nodes as one JSON document
    Inventory {
        /// Root launch file
        path: PathBuf,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Output file path (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Package location override (name=path), consulted before the locator
    #[arg(long = "package", value_parser = parse_package_override)]
    packages: Vec<(String, PathBuf)>,

    /// Package lookup: rospack or env
    #[arg(long, default_value = "rospack")]
    locator: LocatorKind,

    /// Maximum include nesting below the root file
    #[arg(long, default_value_t = ExtractOptions::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Abort the extraction after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Traverse sibling includes in parallel
    #[arg(long)]
    parallel: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum LocatorKind {
    Rospack,
    Env,
}

fn parse_node_format(s: &str) -> Result<OutputFormat, String> {
    let format: OutputFormat = s.parse()?;
    format
        .check(RecordKind::Nodes)
        .map_err(|e| e.to_string())?;
    Ok(format)
}

fn parse_package_override(s: &str) -> Result<(String, PathBuf), String> {
    match s.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok((name.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("Invalid package override (expected name=path): {}", s)),
    }
}

impl CommonArgs {
    fn resolver(&self) -> PathResolver {
        let overrides: StaticLocator = self.packages.iter().cloned().collect();
        let chain = ChainLocator::new().with(overrides);
        let chain = match self.locator {
            LocatorKind::Rospack => {
                let rospack = RospackLocator::new();
                match self.timeout_secs {
                    Some(secs) => chain.with(rospack.with_timeout(Duration::from_secs(secs))),
                    None => chain.with(rospack),
                }
            }
            LocatorKind::Env => chain.with(EnvPrefixLocator::from_env()),
        };
        PathResolver::new(CachingLocator::new(chain))
    }

    fn options(&self, kind: RecordKind) -> ExtractOptions {
        ExtractOptions {
            kind,
            max_depth: self.max_depth,
            timeout: self.timeout_secs.map(Duration::from_secs),
            parallel_includes: self.parallel,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Params {
            path,
            format,
            common,
        } => run(&path, RecordKind::Parameters, format, &common),
        Commands::Nodes {
            path,
            format,
            common,
        } => run(&path, RecordKind::Nodes, format, &common),
        Commands::Extended { path, common } => {
            run(&path, RecordKind::Parameters, OutputFormat::Extended, &common)
        }
        Commands::Inventory { path, common } => {
            run(&path, RecordKind::All, OutputFormat::Json, &common)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(
    launch_path: &Path,
    kind: RecordKind,
    format: OutputFormat,
    common: &CommonArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    format.check(kind)?;
    let resolver = common.resolver();
    let inventory = extract_inventory(launch_path, &resolver, &common.options(kind))?;

    let out: Box<dyn Write> = match &common.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut writer = format.writer(out, kind)?;
    write_inventory(writer.as_mut(), &inventory, kind)?;

    if let Some(path) = &common.output {
        log::info!("Wrote {}", path.display());
    }
    Ok(())
}
