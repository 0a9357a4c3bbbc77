mod cli;

use clap::Parser;
use cli::Cli;
use constgen_core::{
    CONSTANT_CLASSES, GenerationReport, GeneratorConfig, error::Result, generate_to_writer,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over -v/-q. Logs go to stderr because stdout
    // may carry the generated source.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if cli.list {
        return list_classes();
    }

    let mut config = match GeneratorConfig::load(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };
    if cli.strict {
        config.strict = true;
    }
    debug!(?config, "Configuration resolved");

    let report = match run(&cli, &config) {
        Ok(report) => report,
        Err(e) => {
            error!("Constant generation failed: {}", e);
            return Err(e);
        }
    };

    for class in &report.classes {
        info!(
            class = class.name,
            seeded = class.seeded,
            scanned = class.scanned,
            "Generated constant class"
        );
    }
    info!(
        total = report.total_constants(),
        "Constant generation completed successfully"
    );
    Ok(())
}

fn run(cli: &Cli, config: &GeneratorConfig) -> Result<GenerationReport> {
    let input: Box<dyn io::Read> = match &cli.input {
        Some(path) => {
            debug!("Reading header from {:?}", path);
            Box::new(File::open(path)?)
        }
        None => Box::new(io::stdin().lock()),
    };

    match &cli.output {
        Some(path) => {
            // Generate fully before creating the file so a failed run leaves
            // any previous output untouched.
            let mut buffer = Vec::new();
            let report = generate_to_writer(input, &mut buffer, config)?;
            let mut file = BufWriter::new(File::create(path)?);
            file.write_all(&buffer)?;
            file.flush()?;
            info!("Generated source written to {:?}", path);
            Ok(report)
        }
        None => generate_to_writer(input, io::stdout().lock(), config),
    }
}

fn list_classes() -> Result<()> {
    let mut stdout = io::stdout().lock();
    for class in CONSTANT_CLASSES {
        writeln!(
            stdout,
            "{}\t{}\t{}\texclude={}\tseeded={}",
            class.name,
            class.kind,
            class.pattern,
            class.exclude.unwrap_or("-"),
            class.seeded.len()
        )?;
    }
    Ok(())
}
