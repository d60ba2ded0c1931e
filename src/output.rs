//! Serialization of polled clients
//!
//! The `lines` format is consumed by existing scripts; its field order,
//! the `;` delimiter and the `d` suffix on raw byte counters must not change.

use std::io::Write;

use chrono::{DateTime, Utc};
use color_eyre::Result;
use serde::Serialize;

use crate::wireless::{ClientRecord, ClientStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One `;`-separated line per client
    #[default]
    Lines,
    /// A single JSON document
    Json,
}

/// One client as a `;`-separated line (no trailing newline)
pub fn render_line(record: &ClientRecord) -> String {
    let s = &record.stats;
    format!(
        "{};{};{};{};{};{};{};{}d;{}d;{};{};{};{}",
        record.identity().mac,
        s.uptime,
        s.strength,
        s.tx0,
        s.rx0,
        s.tx1,
        s.rx1,
        s.tx_bytes,
        s.rx_bytes,
        s.tx_volume,
        s.rx_volume,
        s.tx_rate,
        s.rx_rate,
    )
}

#[derive(Debug, Serialize)]
struct PollReport<'a> {
    polled_at: DateTime<Utc>,
    target: &'a str,
    clients: Vec<&'a ClientRecord>,
}

/// Write every record, last discovered first
pub fn write_store<W: Write>(
    out: &mut W,
    store: &ClientStore,
    format: OutputFormat,
    target: &str,
    polled_at: DateTime<Utc>,
) -> Result<()> {
    match format {
        OutputFormat::Lines => {
            for record in store.iter_rev() {
                writeln!(out, "{}", render_line(record))?;
            }
        }
        OutputFormat::Json => {
            let report = PollReport {
                polled_at,
                target,
                clients: store.iter_rev().collect(),
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
