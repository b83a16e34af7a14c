use thiserror::Error;

use crate::feed::{self, FeatureCollection, Timeframe};

#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(String),
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
    #[error("failed to decode {what}: {message}")]
    Decode { what: &'static str, message: String },
}

/// HTTP GET abstraction so feed fetching can be tested with a mock client.
#[allow(async_fn_in_trait)]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Real client backed by reqwest with a 30 second timeout.
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| FetchError::Http(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Http(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| FetchError::Http(format!("failed to read response: {}", e)))
    }
}

/// Fetches the two GeoJSON documents the map is built from.
pub struct FeedClient<C: HttpClient> {
    http_client: C,
}

impl<C: HttpClient> FeedClient<C> {
    pub fn new(http_client: C) -> Self {
        Self { http_client }
    }

    /// Downloads and decodes the earthquake summary feed for one window.
    pub async fn fetch_earthquakes(
        &self,
        timeframe: Timeframe,
    ) -> Result<FeatureCollection, FetchError> {
        let url = feed::feed_url(timeframe);
        tracing::info!(%url, "fetching earthquake feed");
        let body = self.http_client.get(&url).await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
            what: "earthquake feed",
            message: e.to_string(),
        })
    }

    /// Downloads the tectonic plate boundaries. Kept as a raw JSON value:
    /// the page draws them without data-driven styling, so there is nothing
    /// to type beyond "valid JSON".
    pub async fn fetch_plate_boundaries(&self) -> Result<serde_json::Value, FetchError> {
        tracing::info!(url = feed::TECTONIC_PLATES_URL, "fetching plate boundaries");
        let body = self.http_client.get(feed::TECTONIC_PLATES_URL).await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
            what: "plate boundaries",
            message: e.to_string(),
        })
    }

    /// Fetches both documents concurrently and joins the results.
    pub async fn fetch_all(
        &self,
        timeframe: Timeframe,
    ) -> Result<(FeatureCollection, serde_json::Value), FetchError> {
        let (earthquakes, plates) = tokio::join!(
            self.fetch_earthquakes(timeframe),
            self.fetch_plate_boundaries()
        );
        Ok((earthquakes?, plates?))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Mock client that answers every GET with a canned response.
    pub struct MockHttpClient {
        pub response: Result<Vec<u8>, FetchError>,
    }

    impl HttpClient for MockHttpClient {
        async fn get(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
            self.response.clone()
        }
    }

    fn sample_feed() -> Vec<u8> {
        br#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "properties": {"mag": 3.2, "place": "Offshore", "time": 1700000000000},
                    "geometry": {"type": "Point", "coordinates": [140.0, 35.0, 40.0]}
                }
            ]
        }"#
        .to_vec()
    }

    #[tokio::test]
    async fn test_fetch_earthquakes_decodes_feed() {
        let client = FeedClient::new(MockHttpClient {
            response: Ok(sample_feed()),
        });

        let collection = client
            .fetch_earthquakes(Timeframe::AllDay)
            .await
            .expect("feed should decode");
        assert_eq!(collection.features.len(), 1);
        assert_eq!(collection.features[0].properties.mag, Some(3.2));
    }

    #[tokio::test]
    async fn test_fetch_earthquakes_propagates_http_status() {
        let client = FeedClient::new(MockHttpClient {
            response: Err(FetchError::Status {
                status: 503,
                url: "https://earthquake.usgs.gov/...".to_string(),
            }),
        });

        let result = client.fetch_earthquakes(Timeframe::AllWeek).await;
        match result {
            Err(FetchError::Status { status, .. }) => assert_eq!(status, 503),
            _ => panic!("expected Status error"),
        }
    }

    #[tokio::test]
    async fn test_fetch_earthquakes_reports_decode_failure() {
        let client = FeedClient::new(MockHttpClient {
            response: Ok(b"<html>not json</html>".to_vec()),
        });

        let result = client.fetch_earthquakes(Timeframe::AllDay).await;
        match result {
            Err(FetchError::Decode { what, .. }) => assert_eq!(what, "earthquake feed"),
            _ => panic!("expected Decode error"),
        }
    }

    #[tokio::test]
    async fn test_fetch_plates_passes_json_through() {
        let client = FeedClient::new(MockHttpClient {
            response: Ok(br#"{"type": "FeatureCollection", "features": []}"#.to_vec()),
        });

        let plates = client
            .fetch_plate_boundaries()
            .await
            .expect("plates should decode");
        assert_eq!(plates["type"], "FeatureCollection");
    }

    #[tokio::test]
    async fn test_fetch_all_joins_both_documents() {
        let client = FeedClient::new(MockHttpClient {
            response: Ok(sample_feed()),
        });

        let (earthquakes, plates) = client
            .fetch_all(Timeframe::AllMonth)
            .await
            .expect("both fetches should succeed");
        assert_eq!(earthquakes.features.len(), 1);
        assert!(plates.is_object());
    }

    #[tokio::test]
    async fn test_fetch_all_fails_when_either_fetch_fails() {
        let client = FeedClient::new(MockHttpClient {
            response: Err(FetchError::Http("connection refused".to_string())),
        });

        assert!(client.fetch_all(Timeframe::AllDay).await.is_err());
    }
}
