//! Terminal files in, result records out.
//!
//! Inputs
//! - `.csv`: columns `x` and `y`, read lazily with polars. Other columns are
//!   ignored. Null cells are an error.
//! - `.json`: either `[[x, y], ...]` or `{"terminals": [[x, y], ...]}`.
//!
//! Outputs are JSON documents (`SolveRecord`, or a list of them) plus the CSV
//! written by `random`.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use rsteiner::api::{Point, SteinerTree, Strategy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum TerminalsJson {
    Pairs(Vec<(f64, f64)>),
    Wrapped { terminals: Vec<(f64, f64)> },
}

/// Load terminals from a CSV or JSON file, keeping file order.
pub fn read_terminals(path: &Path) -> Result<Vec<Point>> {
    match extension(path).as_deref() {
        Some("csv") => read_csv(path),
        Some("json") => read_json(path),
        _ => bail!("unsupported terminal file {} (expected .csv or .json)", path.display()),
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
}

fn read_csv(path: &Path) -> Result<Vec<Point>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    let xs = df.column("x")?.cast(&DataType::Float64)?;
    let ys = df.column("y")?.cast(&DataType::Float64)?;
    let mut out = Vec::with_capacity(df.height());
    for (row, (x, y)) in xs.f64()?.into_iter().zip(ys.f64()?.into_iter()).enumerate() {
        match (x, y) {
            (Some(x), Some(y)) => out.push(Point::new(x, y)),
            _ => bail!("{}: row {row} has an empty coordinate", path.display()),
        }
    }
    tracing::debug!(rows = out.len(), path = %path.display(), "terminals_csv");
    Ok(out)
}

fn read_json(path: &Path) -> Result<Vec<Point>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let parsed: TerminalsJson = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing {}", path.display()))?;
    let pairs = match parsed {
        TerminalsJson::Pairs(p) => p,
        TerminalsJson::Wrapped { terminals } => terminals,
    };
    Ok(pairs.into_iter().map(Point::from).collect())
}

/// Write terminals as an `x,y` CSV.
pub fn write_terminals_csv(path: &Path, terminals: &[Point]) -> Result<()> {
    let xs: Vec<f64> = terminals.iter().map(|p| p.x()).collect();
    let ys: Vec<f64> = terminals.iter().map(|p| p.y()).collect();
    let mut df = df!("x" => xs, "y" => ys)?;
    ensure_parent(path)?;
    let mut file =
        fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Serialize `value` as pretty JSON, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

/// One strategy run, as written to disk.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SolveRecord {
    pub strategy: String,
    pub terminals: usize,
    pub found: bool,
    pub cost: Option<f64>,
    pub edges: Vec<[(f64, f64); 2]>,
    pub elapsed_ms: f64,
}

impl SolveRecord {
    pub fn new(
        strategy: Strategy,
        terminals: usize,
        tree: Option<&SteinerTree>,
        elapsed_ms: f64,
    ) -> Self {
        let edges = tree
            .map(|t| {
                t.edges()
                    .iter()
                    .map(|e| [(e.a.x(), e.a.y()), (e.b.x(), e.b.y())])
                    .collect()
            })
            .unwrap_or_default();
        Self {
            strategy: strategy.to_string(),
            terminals,
            found: tree.is_some(),
            cost: tree.map(SteinerTree::cost),
            edges,
            elapsed_ms,
        }
    }
}
