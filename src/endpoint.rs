use crate::common::{Result, StatsSnapshot};
use crate::fetch::Fetcher;
use crate::{html_table, json_stats};

/// Shape of the statistics endpoint's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Rendered stats page, sizes scraped from its table cells.
    #[cfg_attr(not(test), allow(dead_code))]
    Html,
    /// Structured document served when JSON is requested.
    Json,
}

impl Endpoint {
    pub fn accept(self) -> Option<&'static str> {
        match self {
            Endpoint::Html => None,
            Endpoint::Json => Some("application/json"),
        }
    }

    pub fn parse(self, body: &str) -> Result<StatsSnapshot> {
        match self {
            Endpoint::Html => Ok(html_table::parse(body)),
            Endpoint::Json => json_stats::parse(body),
        }
    }

    /// Fetches `url` and parses the body. `Ok(None)` means nothing usable
    /// came back from the server.
    pub async fn fetch_stats(
        self,
        fetcher: &Fetcher,
        url: &str,
    ) -> Result<Option<StatsSnapshot>> {
        match fetcher.get(url, self.accept()).await {
            Some(body) => self.parse(&body).map(Some),
            None => Ok(None),
        }
    }
}
