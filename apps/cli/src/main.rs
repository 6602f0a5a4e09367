// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! TreeCloud CLI - point-cloud extraction for SpeedTree XML exports.
//!
//! # Usage
//!
//! ```bash
//! # All classified points as "x y z" lines
//! treecloud tree.xml
//!
//! # Leaf points as CSV into a file
//! treecloud tree.xml --category leaf --format csv --output leaves.csv
//!
//! # Bucket and name-prefix statistics
//! treecloud tree.xml --summary
//! ```
//!
//! # Environment
//!
//! - `TREECLOUD_FORMAT` - default output format (`xyz`, `csv`, `json`)
//! - `TREECLOUD_CLASSIFY` - `independent` or `first-match`
//! - `TREECLOUD_PRECISION` - digits after the decimal point
//! - `RUST_LOG` - log filter (logs go to stderr)

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use treecloud_core::{ClassifyMode, Selection, TreeModel};

mod config;
mod output;

use config::Config;
use output::{supports_summary, write_cloud, write_summary, OutputFormat, SummaryReport};

#[derive(Debug, Parser)]
#[command(name = "treecloud")]
#[command(about = "Extract trunk, branch and leaf point clouds from SpeedTree XML exports", long_about = None)]
struct Cli {
    /// SpeedTree XML export
    input: PathBuf,

    /// Points to extract: all, trunk, branch or leaf
    #[arg(short, long, default_value = "all")]
    category: Selection,

    /// Output format: xyz, csv or json [env: TREECLOUD_FORMAT]
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Overlap handling: independent or first-match [env: TREECLOUD_CLASSIFY]
    #[arg(long)]
    classify: Option<ClassifyMode>,

    /// Digits after the decimal point in text output [env: TREECLOUD_PRECISION]
    #[arg(long)]
    precision: Option<usize>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print bucket and name-prefix statistics instead of points (xyz prints a
    /// text table, json a report; csv is rejected)
    #[arg(long)]
    summary: bool,
}

impl Cli {
    /// Merge flags over the environment configuration.
    fn resolve(&self, env: Config) -> Result<Config> {
        let config = Config {
            format: self.format.unwrap_or(env.format),
            classify: self.classify.unwrap_or(env.classify),
            precision: self.precision.or(env.precision),
        };
        if self.summary && !supports_summary(config.format) {
            bail!("--summary cannot be written as {}; use xyz or json", config.format);
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so point data on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn,treecloud=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.resolve(Config::from_env())?;

    tracing::info!(
        input = %cli.input.display(),
        category = %cli.category,
        format = %config.format,
        classify = ?config.classify,
        "Extracting point cloud"
    );

    let model = TreeModel::from_path(&cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?
        .with_mode(config.classify);

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    if cli.summary {
        let report = SummaryReport::from_model(&model);
        write_summary(&mut out, &report, config.format).context("failed to write summary")?;
    } else {
        let cloud = model.points(cli.category);
        tracing::info!(points = cloud.len(), "Writing points");
        write_cloud(&mut out, &cloud, config.format, config.precision)
            .context("failed to write points")?;
    }

    out.flush().context("failed to flush output")?;
    Ok(())
}
