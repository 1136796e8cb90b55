//! `water-names`: resolve nearby water features for every CSV row and append
//! one NDJSON record per row.
//!
//! The output file is opened in append mode and flushed after every row, so
//! an interrupted run loses at most the row in flight. A partial last line
//! from such a run is closed off before new records are appended. With
//! `resume`, rows whose `row_number` already appears in the output are
//! skipped.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use aquaname_core::ScoredMatch;
use aquaname_places::PlacesClient;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::input::InputRow;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub(crate) struct MatchRecord {
    pub(crate) name: String,
    pub(crate) distance_m: f64,
    pub(crate) types: Vec<String>,
    pub(crate) lat: f64,
    pub(crate) lon: f64,
}

impl From<&ScoredMatch> for MatchRecord {
    fn from(m: &ScoredMatch) -> Self {
        let candidate = m.candidate();
        Self {
            name: candidate.name.clone(),
            distance_m: m.distance_meters(),
            types: candidate.category_tags.clone(),
            lat: candidate.location.lat(),
            lon: candidate.location.lon(),
        }
    }
}

/// One output line.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct OutputRecord {
    pub(crate) row_number: usize,
    pub(crate) original_name: String,
    pub(crate) matches: Vec<MatchRecord>,
}

#[derive(Debug)]
pub(crate) struct WaterNamesOptions {
    pub(crate) input: PathBuf,
    pub(crate) output: PathBuf,
    pub(crate) radius_m: u32,
    pub(crate) resume: bool,
    pub(crate) limit: Option<usize>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct WaterNamesSummary {
    pub(crate) written: usize,
    pub(crate) with_matches: usize,
    pub(crate) already_done: usize,
    pub(crate) invalid: usize,
}

#[derive(Deserialize)]
struct RowNumberOnly {
    row_number: usize,
}

/// Row numbers already present in an existing output file.
///
/// A missing file means nothing is done yet. Lines that do not parse (for
/// example a partial line from a killed run) are skipped with a warning.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub(crate) fn completed_rows(path: &Path) -> anyhow::Result<HashSet<usize>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashSet::new()),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to open {}", path.display()));
        }
    };

    let mut done = HashSet::new();
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("failed to read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<RowNumberOnly>(&line) {
            Ok(r) => {
                done.insert(r.row_number);
            }
            Err(e) => {
                tracing::warn!(line = line_no + 1, error = %e, "ignoring unreadable output line");
            }
        }
    }
    Ok(done)
}

pub(crate) fn progress_bar(len: usize) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

/// Ends a partial last line left by an interrupted run so the next record
/// starts on its own line. Returns `true` if a newline was written.
pub(crate) fn terminate_partial_line(file: &mut File) -> std::io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    if last[0] == b'\n' {
        return Ok(false);
    }
    file.write_all(b"\n")?;
    Ok(true)
}

/// Runs the `water-names` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the output cannot be
/// written. Bad rows and upstream failures never abort the run.
pub(crate) async fn run_water_names(
    client: &PlacesClient,
    opts: &WaterNamesOptions,
) -> anyhow::Result<WaterNamesSummary> {
    let done = if opts.resume {
        let done = completed_rows(&opts.output)?;
        tracing::info!(rows = done.len(), "resuming; skipping rows already written");
        done
    } else {
        HashSet::new()
    };

    let mut reader = csv::Reader::from_path(&opts.input)
        .with_context(|| format!("failed to open input {}", opts.input.display()))?;
    let rows: Vec<csv::Result<InputRow>> = reader
        .deserialize()
        .take(opts.limit.unwrap_or(usize::MAX))
        .collect();

    let mut out = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(&opts.output)
        .with_context(|| format!("failed to open output {}", opts.output.display()))?;
    if terminate_partial_line(&mut out)
        .with_context(|| format!("failed to inspect output {}", opts.output.display()))?
    {
        tracing::warn!(
            output = %opts.output.display(),
            "output ended mid-line; starting a new line"
        );
    }
    let mut out = BufWriter::new(out);

    let pb = progress_bar(rows.len())?;
    let mut summary = WaterNamesSummary::default();

    for (row_number, row) in rows.into_iter().enumerate() {
        pb.inc(1);
        if done.contains(&row_number) {
            summary.already_done += 1;
            continue;
        }

        let row = match row {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!(row_number, error = %e, "skipping unreadable row");
                summary.invalid += 1;
                continue;
            }
        };
        let origin = match row.coordinate() {
            Ok(origin) => origin,
            Err(e) => {
                tracing::warn!(row_number, error = %e, "skipping row without usable coordinates");
                summary.invalid += 1;
                continue;
            }
        };

        let matches = client.resolve(origin, opts.radius_m).await;
        let record = OutputRecord {
            row_number,
            original_name: row.google_name.unwrap_or_default(),
            matches: matches.iter().map(MatchRecord::from).collect(),
        };
        if !record.matches.is_empty() {
            summary.with_matches += 1;
        }
        pb.set_message(record.original_name.clone());

        serde_json::to_writer(&mut out, &record).context("failed to encode output record")?;
        out.write_all(b"\n")?;
        out.flush()
            .with_context(|| format!("failed to write {}", opts.output.display()))?;
        summary.written += 1;
    }

    pb.finish_with_message("done");
    Ok(summary)
}

#[cfg(test)]
#[path = "water_test.rs"]
mod tests;
