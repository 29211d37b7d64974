use crate::common::{Error, Result};
use http::header::ACCEPT;
use http::StatusCode;
use log::{debug, error};

const USER_AGENT: &'static str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::CreateClient(e))?;
        Ok(Fetcher { client })
    }

    #[cfg(test)]
    pub fn with_client(client: reqwest::Client) -> Self {
        Fetcher { client }
    }

    /// Issues one GET to `url` and returns the body of a 200 response.
    ///
    /// Anything else (transport failure, other status, unreadable body) is
    /// logged and reported as `None`. There are no retries.
    pub async fn get(&self, url: &str, accept: Option<&str>) -> Option<String> {
        let mut request = self.client.get(url);
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Error HTTP get to {url}: {e}");
                return None;
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                error!("Error reading response body from {url} ({status}): {e}");
                return None;
            }
        };

        if status != StatusCode::OK {
            error!("Error HTTP get to {url}: Returned {}", status.as_u16());
            debug!("Response body from {url}: {body}");
            return None;
        }

        debug!("Fetched {} bytes from {url}", body.len());
        Some(body)
    }
}
