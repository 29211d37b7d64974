use crate::common::{Error, Result, StatsSnapshot};
use log::warn;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Summary {
    pub top_total_bytes: u64,
    /// Share of the index taken by the top packages, rounded down.
    pub percentage: u64,
}

pub fn summarize(snapshot: &StatsSnapshot) -> Result<Summary> {
    let total = match snapshot.total_index_size_bytes {
        None => return Err(Error::MissingTotal),
        Some(0) => return Err(Error::ZeroTotal),
        Some(total) => total,
    };
    let top_total_bytes: u64 = snapshot.entries.iter().map(|e| e.size_bytes).sum();
    if top_total_bytes > total {
        warn!("top packages ({top_total_bytes} bytes) exceed the reported index size ({total} bytes)");
    }
    let percentage = (u128::from(top_total_bytes) * 100 / u128::from(total)) as u64;
    Ok(Summary {
        top_total_bytes,
        percentage,
    })
}
