use crate::common::{Result, SizeEntry, StatsSnapshot};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Deserialize)]
struct PackageStats {
    size: u64,
}

#[derive(Deserialize)]
struct StatsDocument {
    top_packages: HashMap<String, PackageStats>,
    total_packages_size: u64,
}

/// Builds a snapshot from the JSON stats document, largest package first.
pub fn parse(body: &str) -> Result<StatsSnapshot> {
    let document: StatsDocument = serde_json::from_str(body)?;
    let mut entries: Vec<SizeEntry> = document
        .top_packages
        .into_iter()
        .map(|(name, stats)| SizeEntry::new(name, stats.size))
        .collect();
    entries.sort_by(|a, b| {
        b.size_bytes
            .cmp(&a.size_bytes)
            .then_with(|| a.name.cmp(&b.name))
    });
    Ok(StatsSnapshot {
        entries,
        total_index_size_bytes: Some(document.total_packages_size),
    })
}
