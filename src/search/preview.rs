use crate::error::SearchError;
use crate::models::{PreviewState, ResultItem};
use crate::search::client::HttpSearchClient;
use futures::future::join_all;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

impl HttpSearchClient {
    /// Preview URL for a listing: the listing URL percent-encoded under the preview endpoint.
    pub fn preview_url(&self, listing_url: &str) -> String {
        format!(
            "{}/{}",
            self.config().preview_endpoint.trim_end_matches('/'),
            urlencoding::encode(listing_url)
        )
    }

    /// Fetch preview images for one listing.
    ///
    /// An `image/*` response is itself the preview, so the request URL is returned
    /// as the single image. Otherwise the body must be a JSON array of image URLs.
    pub async fn fetch_preview(&self, listing_url: &str) -> Result<Vec<String>, SearchError> {
        let url = self.preview_url(listing_url);
        debug!("Fetching preview: {}", url);

        let response = self.http().get(&url).send().await?;
        if !response.status().is_success() {
            return Err(SearchError::transport(format!(
                "preview endpoint returned {}",
                response.status()
            )));
        }

        let is_image = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("image/"));
        if is_image {
            return Ok(vec![url]);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|_| SearchError::Format)
    }

    /// Resolve previews for every item concurrently. Each item records its own
    /// outcome; a failed lookup leaves the other items untouched.
    pub async fn load_previews(&self, items: &mut [ResultItem]) {
        let outcomes = join_all(items.iter().map(|item| self.fetch_preview(&item.url))).await;

        for (item, outcome) in items.iter_mut().zip(outcomes) {
            item.preview = match outcome {
                Ok(images) => PreviewState::Loaded(images),
                Err(e) => {
                    warn!("Preview failed for {}: {}", item.url, e);
                    PreviewState::Failed(e.to_string())
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ClientConfig;
    use crate::search::client::HttpSearchClient;

    #[test]
    fn listing_url_is_encoded_into_path() {
        let client =
            HttpSearchClient::with_config(ClientConfig::for_base_url("http://localhost:5001")).unwrap();
        assert_eq!(
            client.preview_url("https://www.airbnb.com/rooms/42?adults=1"),
            "http://localhost:5001/api/preview/https%3A%2F%2Fwww.airbnb.com%2Frooms%2F42%3Fadults%3D1"
        );
    }
}
