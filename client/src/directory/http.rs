//! Farm directory backed by the CropKeeper record API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use shared::{Farm, FarmId, FarmInput};

use super::FarmDirectory;
use crate::error::{DirectoryError, DirectoryResult};

/// Record API client
#[derive(Clone)]
pub struct HttpFarmDirectory {
    client: Client,
    farms_url: Url,
}

/// `GET /farms` response body
#[derive(Debug, Deserialize)]
struct FarmListResponse {
    farms: Vec<Farm>,
}

/// Error body returned by the record API
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl HttpFarmDirectory {
    /// Create a client for the API rooted at `base_url` (e.g. `http://host/api/v1`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> DirectoryResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DirectoryError::Unreachable(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = base_url.into();
        let farms_url = Url::parse(&format!("{}/farms", base_url.trim_end_matches('/')))
            .map_err(|e| {
                DirectoryError::Unreachable(format!("Invalid farm API URL {}: {}", base_url, e))
            })?;
        if farms_url.cannot_be_a_base() {
            return Err(DirectoryError::Unreachable(format!(
                "Invalid farm API URL {}",
                base_url
            )));
        }

        Ok(Self { client, farms_url })
    }

    fn farms_url(&self) -> Url {
        self.farms_url.clone()
    }

    /// Farm URL with the id percent-encoded as a single path segment
    fn farm_url(&self, id: &FarmId) -> Url {
        let mut url = self.farms_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id.as_str());
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> DirectoryResult<Response> {
        request
            .send()
            .await
            .map_err(|e| DirectoryError::Unreachable(format!("Farm API request failed: {}", e)))
    }

    /// Turn a non-success response into a rejection, keeping the API's message
    async fn rejection(response: Response) -> DirectoryError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|parsed| parsed.error.message)
            .unwrap_or(body);

        DirectoryError::Rejected {
            status: status.as_u16(),
            message,
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> DirectoryResult<T> {
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| DirectoryError::Malformed(format!("Failed to parse farm response: {}", e)))
    }
}

#[async_trait]
impl FarmDirectory for HttpFarmDirectory {
    async fn list(&self) -> DirectoryResult<Vec<Farm>> {
        let response = self.send(self.client.get(self.farms_url())).await?;
        let body: FarmListResponse = Self::parse(response).await?;
        tracing::debug!("Fetched {} farms", body.farms.len());
        Ok(body.farms)
    }

    async fn get_by_id(&self, id: &FarmId) -> DirectoryResult<Farm> {
        let response = self.send(self.client.get(self.farm_url(id))).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(DirectoryError::NotFound(id.clone()));
        }
        Self::parse(response).await
    }

    async fn create(&self, input: FarmInput) -> DirectoryResult<Farm> {
        let response = self
            .send(self.client.post(self.farms_url()).json(&input))
            .await?;
        Self::parse(response).await
    }

    async fn update(&self, id: &FarmId, input: FarmInput) -> DirectoryResult<Farm> {
        let response = self
            .send(self.client.put(self.farm_url(id)).json(&input))
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(DirectoryError::NotFound(id.clone()));
        }
        Self::parse(response).await
    }

    async fn delete(&self, id: &FarmId) -> DirectoryResult<bool> {
        let response = self.send(self.client.delete(self.farm_url(id))).await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            _ => Err(Self::rejection(response).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory(base_url: &str) -> HttpFarmDirectory {
        HttpFarmDirectory::new(base_url, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_farm_url_escapes_id() {
        let directory = directory("http://localhost:3000/api/v1/");
        assert_eq!(
            directory.farm_url(&FarmId::new("7")).as_str(),
            "http://localhost:3000/api/v1/farms/7"
        );
        assert_eq!(
            directory.farm_url(&FarmId::new("a/b?c#d")).as_str(),
            "http://localhost:3000/api/v1/farms/a%2Fb%3Fc%23d"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(matches!(
            HttpFarmDirectory::new("not a url", Duration::from_secs(1)),
            Err(DirectoryError::Unreachable(_))
        ));
    }
}
