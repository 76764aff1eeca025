//! adi_imu_launch CLI

use adi_imu_launch::{
    generate_launch_description, resolve_launch, resource::AmentIndex, BringupConfig,
};
use clap::{Parser, ValueEnum};
use std::{collections::HashMap, path::PathBuf, process};

#[derive(Parser)]
#[command(name = "adi_imu_launch")]
#[command(about = "Bring-up descriptor for the ADIS16470 IMU pipeline", long_about = None)]
#[command(version)]
struct Cli {
    /// Launch arguments (key:=value)
    #[arg(value_parser = parse_launch_arg)]
    args: Vec<(String, String)>,

    /// YAML file overriding the package and document names
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Install prefix to search for packages (overrides AMENT_PREFIX_PATH)
    #[arg(long = "prefix")]
    prefixes: Vec<PathBuf>,

    /// Emit the resolved launch record instead of the descriptor
    #[arg(long)]
    resolve: bool,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,

    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

fn parse_launch_arg(s: &str) -> Result<(String, String), String> {
    let parts: Vec<&str> = s.split(":=").collect();
    if parts.len() != 2 || parts[0].is_empty() {
        return Err(format!("Invalid launch argument format: {}", s));
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
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

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => BringupConfig::from_yaml_file(path)?,
        None => BringupConfig::default(),
    };

    let index = if cli.prefixes.is_empty() {
        AmentIndex::from_env()
    } else {
        AmentIndex::new(cli.prefixes.clone())
    };

    let descriptor = generate_launch_description(&index, &config)?;
    log::info!(
        "Assembled {} nodes, {} arguments, {} environment directives",
        descriptor.nodes().len(),
        descriptor.arguments().len(),
        descriptor.environment().len()
    );

    let text = if cli.resolve {
        let overrides: HashMap<String, String> = cli.args.into_iter().collect();
        let record = resolve_launch(&descriptor, &overrides, &index)?;
        log::info!(
            "  {} nodes to spawn, {} skipped",
            record.node.len(),
            record.skipped.len()
        );
        match cli.format {
            Format::Json => record.to_json()?,
            Format::Yaml => record.to_yaml()?,
        }
    } else {
        if !cli.args.is_empty() {
            log::warn!("Launch arguments are only applied with --resolve");
        }
        match cli.format {
            Format::Json => descriptor.to_json()?,
            Format::Yaml => descriptor.to_yaml()?,
        }
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, text)?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{}", text),
    }

    Ok(())
}
