//! Results rendering for stdout.

use std::fmt::{self, Write as _};

use anyhow::Result;
use serde::Serialize;

use crate::bench::Record;
use crate::log::LogFormat;

#[derive(Debug, Serialize)]
struct Report<'a> {
    seed: u64,
    records: &'a [Record],
}

pub fn render(records: &[Record], seed: u64, format: LogFormat) -> Result<String> {
    match format {
        LogFormat::Json => {
            let mut out = serde_json::to_string_pretty(&Report { seed, records })?;
            out.push('\n');
            Ok(out)
        }
        LogFormat::Plain => Ok(render_plain(records, seed)?),
    }
}

/// Sections per workload, one block per size and round.
fn render_plain(records: &[Record], seed: u64) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "seed = {seed}")?;
    let mut section = None;
    let mut block = None;
    for record in records {
        if section != Some(record.workload) {
            section = Some(record.workload);
            block = None;
            writeln!(out, "\n{}", record.workload.title())?;
            writeln!(out, "========================")?;
        }
        if block != Some((record.size, record.round)) {
            block = Some((record.size, record.round));
            writeln!(out, "\ncount elements = {} (round {})", record.size, record.round + 1)?;
        }
        write!(
            out,
            "  {:<10}{:>12.3} ms",
            record.container.name(),
            record.elapsed_ms
        )?;
        if let (Some(levels), Some(nodes)) = (record.level_count, record.node_count) {
            write!(out, "  (levels {levels}, nodes {nodes})")?;
        }
        out.push('\n');
    }
    Ok(out)
}
