// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ifc-fm - extract facility data from IFC documents
//!
//! Every subcommand reads the whole document into memory, runs one pipeline
//! and prints a JSON envelope on stdout. Logs go to stderr (`RUST_LOG`).

mod config;
mod envelope;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use envelope::{Failure, Success};
use ifc_fm_core::{ContainerPolicy, GeneratedSensor};
use ifc_fm_model::IfcModel;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "ifc-fm")]
#[command(about = "Sensor, containment and inventory extraction from IFC models")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "ifc-fm.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Locate every sensor with its containing space
    Process {
        /// IFC document
        file: PathBuf,

        /// Only report IfcSpace containers
        #[arg(long)]
        space_only: bool,

        /// Fail on the first sensor without a usable placement
        #[arg(long)]
        strict: bool,
    },
    /// List the elements contained in every space
    Inventory {
        /// IFC document
        file: PathBuf,
    },
    /// Place one sensor at the centroid of every space
    Generate {
        /// IFC document
        file: PathBuf,

        /// Model ID stored in each record
        #[arg(long)]
        model_id: Option<i64>,

        /// Output path for the generated records
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            print_json(&Failure::new(format!("{err:#}")));
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = config::load_config(&args.config)?;

    match args.command {
        Command::Process {
            file,
            space_only,
            strict,
        } => {
            if space_only {
                config.extract.container_policy = ContainerPolicy::SpaceOnly;
            }
            if strict {
                config.extract.strict_placement = true;
            }

            let model = load(&file)?;
            let report = ifc_fm_core::process(model.as_ref(), &config.extract)?;
            print_json(&Success::new(report.sensors).with_failures(report.failures));
        }
        Command::Inventory { file } => {
            let model = load(&file)?;
            print_json(&Success::new(ifc_fm_core::inventory(model.as_ref())));
        }
        Command::Generate {
            file,
            model_id,
            output,
        } => {
            if let Some(model_id) = model_id {
                config.generator.model_id = model_id;
            }
            if let Some(output) = output {
                config.generator.output = output;
            }

            let model = load(&file)?;
            let records = ifc_fm_core::generate_sensors(model.as_ref(), &config.generator);
            write_records(&records, &config.generator.output)?;
            print_json(&Success::new(GenerateSummary {
                output: &config.generator.output,
                count: records.len(),
            }));
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct GenerateSummary<'a> {
    output: &'a Path,
    count: usize,
}

fn load(path: &Path) -> Result<Arc<dyn IfcModel>> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let model =
        ifc_fm_core::load(&bytes).with_context(|| format!("loading {}", path.display()))?;

    let metadata = model.metadata();
    info!(
        schema = %metadata.schema_version,
        source = metadata.originating_system.as_deref().unwrap_or("unknown"),
        "Loaded {}",
        path.display()
    );
    Ok(model)
}

fn write_records(records: &[GeneratedSensor], path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    ifc_fm_core::write_sensors_json(records, &mut writer)
        .with_context(|| format!("writing {}", path.display()))?;
    writer.flush()?;
    info!(count = records.len(), "Wrote {}", path.display());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!("Could not serialize response: {e}"),
    }
}
