//! `validate-city`: reverse-geocode each row's coordinate and compare the
//! resulting city with the row's `City` column.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use aquaname_places::PlacesClient;
use csv::StringRecord;

use crate::input::InputRow;
use crate::water::progress_bar;

/// Written to `validated_city` when no city could be determined.
pub(crate) const UNKNOWN_CITY: &str = "Unknown";

#[derive(Debug)]
pub(crate) struct ValidateCityOptions {
    pub(crate) input: PathBuf,
    pub(crate) output: PathBuf,
    pub(crate) pause_every: usize,
    pub(crate) pause: Duration,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ValidateCitySummary {
    pub(crate) rows: usize,
    pub(crate) valid: usize,
    pub(crate) unknown: usize,
}

/// `record` padded with empty fields, or cut, to exactly `width` fields so
/// ragged rows line up with the header.
fn fit_to_width(record: &StringRecord, width: usize) -> StringRecord {
    if record.len() > width {
        tracing::warn!(fields = record.len(), width, "dropping fields beyond the header");
    }
    let mut fitted: StringRecord = record.iter().take(width).collect();
    while fitted.len() < width {
        fitted.push_field("");
    }
    fitted
}

/// Case-insensitive comparison of the recorded and looked-up city.
pub(crate) fn cities_match(recorded: Option<&str>, found: Option<&str>) -> bool {
    match (recorded, found) {
        (Some(recorded), Some(found)) => {
            recorded.trim().to_lowercase() == found.trim().to_lowercase()
        }
        _ => false,
    }
}

/// Runs the `validate-city` command. Every input column is copied through;
/// `validated_city` and `city_valid` are appended.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the output cannot be
/// written.
pub(crate) async fn run_validate_city(
    client: &PlacesClient,
    opts: &ValidateCityOptions,
) -> anyhow::Result<ValidateCitySummary> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(&opts.input)
        .with_context(|| format!("failed to open input {}", opts.input.display()))?;
    let headers = reader.headers()?.clone();
    let records: Vec<csv::Result<StringRecord>> = reader.records().collect();

    let mut writer = csv::Writer::from_path(&opts.output)
        .with_context(|| format!("failed to create output {}", opts.output.display()))?;
    let mut out_headers = headers.clone();
    out_headers.push_field("validated_city");
    out_headers.push_field("city_valid");
    writer.write_record(&out_headers)?;

    let pb = progress_bar(records.len())?;
    let mut summary = ValidateCitySummary::default();

    for (idx, record) in records.into_iter().enumerate() {
        pb.inc(1);
        let record = match record {
            Ok(record) => fit_to_width(&record, headers.len()),
            Err(e) => {
                tracing::warn!(row = idx, error = %e, "unreadable row; city unknown");
                fit_to_width(&StringRecord::new(), headers.len())
            }
        };
        let (recorded, found) = match record.deserialize::<InputRow>(Some(&headers)) {
            Ok(row) => match row.coordinate() {
                Ok(origin) => (row.city, client.reverse_geocode_city(origin).await),
                Err(e) => {
                    tracing::warn!(row = idx, error = %e, "no usable coordinates; city unknown");
                    (row.city, None)
                }
            },
            Err(e) => {
                tracing::warn!(row = idx, error = %e, "unreadable row; city unknown");
                (None, None)
            }
        };

        let valid = cities_match(recorded.as_deref(), found.as_deref());
        summary.rows += 1;
        if valid {
            summary.valid += 1;
        }
        if found.is_none() {
            summary.unknown += 1;
        }

        let mut out = record;
        out.push_field(found.as_deref().unwrap_or(UNKNOWN_CITY));
        out.push_field(if valid { "true" } else { "false" });
        writer.write_record(&out)?;
        writer.flush()?;

        if opts.pause_every > 0 && (idx + 1) % opts.pause_every == 0 {
            tokio::time::sleep(opts.pause).await;
        }
    }

    pb.finish_with_message("done");
    Ok(summary)
}

#[cfg(test)]
#[path = "city_test.rs"]
mod tests;
