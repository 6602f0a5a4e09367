// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point and summary writers.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use serde::Serialize;
use treecloud_core::{Bounds, Category, CategoryStats, PointCloud, TreeModel};

/// Output format for point data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One `x y z` line per point.
    Xyz,
    /// `x,y,z` header, then one row per point.
    Csv,
    /// `{"x": [...], "y": [...], "z": [...]}`.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xyz" | "txt" => Ok(OutputFormat::Xyz),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown format '{other}' (expected xyz, csv or json)"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Xyz => "xyz",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        })
    }
}

/// Write `cloud` in `format`. `precision` only affects text formats.
pub fn write_cloud<W: Write>(
    out: &mut W,
    cloud: &PointCloud,
    format: OutputFormat,
    precision: Option<usize>,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, cloud)?;
            writeln!(out)
        }
        OutputFormat::Xyz => write_rows(out, cloud, ' ', precision),
        OutputFormat::Csv => {
            writeln!(out, "x,y,z")?;
            write_rows(out, cloud, ',', precision)
        }
    }
}

fn write_rows<W: Write>(
    out: &mut W,
    cloud: &PointCloud,
    sep: char,
    precision: Option<usize>,
) -> io::Result<()> {
    for (x, y, z) in cloud.points() {
        match precision {
            Some(p) => writeln!(out, "{x:.p$}{sep}{y:.p$}{sep}{z:.p$}")?,
            None => writeln!(out, "{x}{sep}{y}{sep}{z}")?,
        }
    }
    Ok(())
}

/// Node and point totals of one bucket.
#[derive(Debug, Clone, Serialize)]
pub struct BucketReport {
    pub category: Category,
    pub nodes: usize,
    pub points: usize,
    pub bounds: Option<Bounds>,
}

/// Statistics of one category key.
#[derive(Debug, Clone, Serialize)]
pub struct KeyReport {
    pub key: String,
    #[serde(flatten)]
    pub stats: CategoryStats,
    pub classified: bool,
}

/// Overview of a loaded model.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub nodes: usize,
    pub buckets: Vec<BucketReport>,
    pub keys: Vec<KeyReport>,
}

impl SummaryReport {
    pub fn from_model(model: &TreeModel) -> Self {
        let buckets = model.buckets();
        let summary = model.summary();
        let unclassified: Vec<&str> = summary.unclassified().collect();

        Self {
            nodes: model.nodes().len(),
            buckets: Category::ALL
                .iter()
                .map(|&category| {
                    let cloud = buckets.flatten(category);
                    BucketReport {
                        category,
                        nodes: buckets.get(category).len(),
                        points: cloud.len(),
                        bounds: cloud.bounds(),
                    }
                })
                .collect(),
            keys: summary
                .iter()
                .map(|(key, stats)| KeyReport {
                    key: key.to_string(),
                    stats: *stats,
                    classified: !unclassified.contains(&key),
                })
                .collect(),
        }
    }
}

/// Returns true if `format` can render a summary report.
pub fn supports_summary(format: OutputFormat) -> bool {
    format != OutputFormat::Csv
}

/// Write `report` as JSON or as a plain-text table (`xyz`).
pub fn write_summary<W: Write>(
    out: &mut W,
    report: &SummaryReport,
    format: OutputFormat,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, report)?;
        return writeln!(out);
    }

    writeln!(out, "nodes: {}", report.nodes)?;
    writeln!(out)?;
    writeln!(out, "{:<8} {:>8} {:>10}  bounds (extent)", "bucket", "nodes", "points")?;
    for bucket in &report.buckets {
        let bounds = match &bucket.bounds {
            Some(b) => format!("{:?} .. {:?} ({:?})", b.min, b.max, b.extent()),
            None => "-".to_string(),
        };
        writeln!(
            out,
            "{:<8} {:>8} {:>10}  {}",
            bucket.category, bucket.nodes, bucket.points, bounds
        )?;
    }
    writeln!(out)?;
    writeln!(out, "{:<20} {:>8} {:>10}", "key", "nodes", "points")?;
    for key in &report.keys {
        let marker = if key.classified { "" } else { "  (unclassified)" };
        writeln!(
            out,
            "{:<20} {:>8} {:>10}{}",
            key.key, key.stats.count, key.stats.total_points, marker
        )?;
    }
    Ok(())
}
