use crate::error::SearchError;
use crate::models::{ResultItem, SearchPreferences};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Payload produced by the query builder: the provider URL plus the preferences it was built from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchRequest {
    /// Provider search URL
    pub query: String,
    pub user_pref: SearchPreferences,
}

/// Body posted to the search endpoint
#[derive(Debug, Serialize)]
pub(crate) struct SearchEnvelope<'a> {
    pub query: &'a SearchRequest,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListingRecord {
    pub url: String,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SortedListings {
    pub sorted_listings: Vec<String>,
}

/// Accepts `T` only from a JSON object. Derived struct impls also take positional arrays.
#[derive(Debug)]
pub(crate) struct Object<T>(pub T);

impl<'de, T: DeserializeOwned> Deserialize<'de> for Object<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        serde_json::from_value(Value::Object(map))
            .map(Object)
            .map_err(de::Error::custom)
    }
}

/// Listing collections the backend is known to answer with
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListingsResponse {
    Sorted(Object<SortedListings>),
    Urls(Vec<String>),
    Detailed(Vec<Object<ListingRecord>>),
}

impl ListingsResponse {
    /// Parses a raw response body, rejecting anything that is not a listing collection.
    pub fn parse(body: &str) -> Result<Self, SearchError> {
        serde_json::from_str(body).map_err(|_| SearchError::Format)
    }

    pub fn into_items(self) -> Vec<ResultItem> {
        match self {
            ListingsResponse::Sorted(Object(SortedListings { sorted_listings: urls }))
            | ListingsResponse::Urls(urls) => urls.into_iter().map(ResultItem::new).collect(),
            ListingsResponse::Detailed(records) => records
                .into_iter()
                .map(|Object(record)| ResultItem::with_summary(record.url, record.summary))
                .collect(),
        }
    }
}

/// Response of the example-query endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct ExampleQueryResponse {
    pub example_query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_listings_shape() {
        let items = ListingsResponse::parse(r#"{"sorted_listings": ["a", "b"]}"#)
            .unwrap()
            .into_items();
        assert_eq!(items, vec![ResultItem::new("a"), ResultItem::new("b")]);
    }

    #[test]
    fn flat_url_array_shape() {
        let items = ListingsResponse::parse(r#"["https://x/rooms/1"]"#).unwrap().into_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url, "https://x/rooms/1");
        assert_eq!(items[0].summary, None);
    }

    #[test]
    fn record_array_shape() {
        let items = ListingsResponse::parse(
            r#"[{"url": "https://x/rooms/1", "summary": "Loft near the beach"}, {"url": "https://x/rooms/2"}]"#,
        )
        .unwrap()
        .into_items();

        assert_eq!(items[0].summary.as_deref(), Some("Loft near the beach"));
        assert_eq!(items[1].summary, None);
    }

    #[test]
    fn unrecognised_shapes_are_format_errors() {
        for body in [
            r#"{"foo": 1}"#,
            r#"{"sorted_listings": "a"}"#,
            r#"[1, 2]"#,
            r#"[["a", "b"]]"#,
            r#"[["a"]]"#,
            r#"[{"url": "a"}, ["b", "c"]]"#,
            r#"{"success": true, "message": "Search request received"}"#,
            "not json",
        ] {
            assert_eq!(ListingsResponse::parse(body).unwrap_err(), SearchError::Format, "{body}");
        }
    }

    #[test]
    fn envelope_wraps_request() {
        let request = SearchRequest {
            query: "https://www.airbnb.com/s/Paris/homes".to_string(),
            user_pref: SearchPreferences::new("Paris"),
        };
        let body = serde_json::to_value(SearchEnvelope { query: &request }).unwrap();
        assert_eq!(body["query"]["query"], "https://www.airbnb.com/s/Paris/homes");
        assert_eq!(body["query"]["user_pref"]["location"], "Paris");
    }
}
