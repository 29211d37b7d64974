//! Text output of a run: the size report or a bandersnatch deny-list block.

use crate::aggregate::Summary;
use crate::common::StatsSnapshot;
use std::io::{self, Write};

/// Format bytes with binary magnitude suffixes (KiB, MiB, GiB, TiB, PiB).
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["KiB", "MiB", "GiB", "TiB", "PiB"];
    const KIB: f64 = 1024.0;

    if bytes == 1 {
        return "1 byte".to_string();
    }
    if bytes < 1024 {
        return format!("{bytes} bytes");
    }
    let mut value = bytes as f64 / KIB;
    let mut unit = 0;
    while value >= KIB && unit < UNITS.len() - 1 {
        value /= KIB;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

pub fn write_deny_list<W: Write>(out: &mut W, snapshot: &StatsSnapshot) -> io::Result<()> {
    writeln!(out, "[blacklist]")?;
    writeln!(out, "packages =")?;
    for entry in &snapshot.entries {
        writeln!(out, "    {}", entry.name)?;
    }
    Ok(())
}

pub fn write_report<W: Write>(
    out: &mut W,
    snapshot: &StatsSnapshot,
    summary: &Summary,
) -> io::Result<()> {
    writeln!(out, "Top PyPI Disk Users:")?;
    for entry in &snapshot.entries {
        writeln!(out, "{}: {}", entry.name, format_size(entry.size_bytes))?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Top Packages consume {}",
        format_size(summary.top_total_bytes)
    )?;
    writeln!(out, "- This is {}% of PyPI", summary.percentage)?;
    Ok(())
}
