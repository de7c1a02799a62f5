//! OpenStreetMap Overpass API client for infrastructure points of interest.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info};

use horizon_core::config::RetryPolicy;
use horizon_core::enums::InfrastructureCategory;
use horizon_core::types::GeoPoint;
use horizon_geo::BoundingBox;

use super::retry::with_retry;
use super::sources::{PoiFeature, PoiSource, SourceError};

/// Blocking Overpass client with per-request timeout and bounded retries.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    endpoint: String,
    http: Client,
    timeout: Duration,
    retry: RetryPolicy,
}

impl OverpassClient {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, SourceError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("impact-horizon/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::Permanent(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: endpoint.into(),
            http,
            timeout,
            retry,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn post_query(&self, query: &str) -> Result<String, SourceError> {
        let response = self
            .http
            .post(&self.endpoint)
            .form(&[("data", query)])
            .send()
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }
        response.text().map_err(request_error)
    }
}

impl PoiSource for OverpassClient {
    fn label(&self) -> String {
        format!("overpass {}", self.endpoint)
    }

    fn features_within(&self, bbox: &BoundingBox) -> Result<Vec<PoiFeature>, SourceError> {
        let query = build_query(bbox, self.timeout.as_secs().max(1));
        debug!(endpoint = %self.endpoint, %query, "Querying Overpass");

        let body = with_retry(&self.retry, "overpass", |_| self.post_query(&query))?;
        let features = parse_response(&body)?;
        info!(count = features.len(), "Overpass returned infrastructure features");
        Ok(features)
    }
}

/// Overpass QL union of every infrastructure tag rule inside `bbox`.
///
/// Categories sharing a tag key are merged into one regex clause. Ways and
/// relations are returned with their center point.
pub fn build_query(bbox: &BoundingBox, timeout_secs: u64) -> String {
    let mut clauses: Vec<(&str, Vec<&str>)> = Vec::new();
    for category in InfrastructureCategory::ALL {
        let (key, values) = category.tag_rule();
        match clauses.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => existing.extend_from_slice(values),
            None => clauses.push((key, values.to_vec())),
        }
    }

    // Overpass bbox order: south, west, north, east
    let area = format!(
        "({},{},{},{})",
        bbox.south, bbox.west, bbox.north, bbox.east
    );

    let mut query = format!("[out:json][timeout:{timeout_secs}];\n(\n");
    for (key, values) in clauses {
        let filter = if values.len() == 1 {
            format!("[\"{key}\"=\"{}\"]", values[0])
        } else {
            format!("[\"{key}\"~\"^({})$\"]", values.join("|"))
        };
        query.push_str(&format!("  nwr{filter}{area};\n"));
    }
    query.push_str(");\nout center tags;\n");
    query
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
    remark: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OverpassCenter>,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

/// Parse an Overpass JSON body into features.
///
/// Elements without a usable position are skipped. A server-side runtime
/// error reported in `remark` (query timeout, memory limit) is transient.
pub fn parse_response(body: &str) -> Result<Vec<PoiFeature>, SourceError> {
    let response: OverpassResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::Format(format!("invalid Overpass response: {e}")))?;

    if let Some(remark) = response.remark.as_deref() {
        if remark.contains("runtime error") {
            return Err(SourceError::Transient(remark.to_string()));
        }
    }

    let features = response
        .elements
        .into_iter()
        .filter_map(|element| {
            let (lat, lon) = match (element.lat, element.lon, element.center) {
                (Some(lat), Some(lon), _) => (lat, lon),
                (_, _, Some(center)) => (center.lat, center.lon),
                _ => return None,
            };
            Some(PoiFeature {
                location: GeoPoint::new(lat, lon),
                tags: element.tags,
            })
        })
        .collect();
    Ok(features)
}

fn request_error(e: reqwest::Error) -> SourceError {
    if e.is_timeout() || e.is_connect() || e.is_request() || e.is_body() {
        SourceError::Transient(e.to_string())
    } else {
        SourceError::Permanent(e.to_string())
    }
}

fn status_error(status: StatusCode) -> SourceError {
    let message = format!("Overpass returned HTTP {status}");
    if status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
        || status.is_server_error()
    {
        SourceError::Transient(message)
    } else {
        SourceError::Permanent(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_merges_shared_keys() {
        let query = build_query(&BoundingBox::new(72.7, 18.9, 73.1, 19.3), 25);
        assert!(query.starts_with("[out:json][timeout:25];"));
        assert!(query.contains(r#"nwr["amenity"~"^(hospital|university|school)$"](18.9,72.7,19.3,73.1);"#));
        assert!(query.contains(r#"nwr["power"~"^(plant|substation)$"]"#));
        assert!(query.contains(r#"nwr["aeroway"="aerodrome"]"#));
        assert!(query.contains(r#"nwr["harbour"="yes"]"#));
        assert!(query.contains(r#"nwr["railway"="station"]"#));
        assert_eq!(query.matches("nwr[").count(), 5);
        assert!(query.trim_end().ends_with("out center tags;"));
    }

    #[test]
    fn test_parse_nodes_and_centers() {
        let body = r#"{
            "elements": [
                {"type": "node", "id": 1, "lat": 19.0, "lon": 72.8,
                 "tags": {"amenity": "hospital", "name": "KEM Hospital"}},
                {"type": "way", "id": 2, "center": {"lat": 19.1, "lon": 72.9},
                 "tags": {"aeroway": "aerodrome"}},
                {"type": "relation", "id": 3, "tags": {"railway": "station"}}
            ]
        }"#;
        let features = parse_response(body).unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].name(), Some("KEM Hospital"));
        assert_eq!(features[1].location, GeoPoint::new(19.1, 72.9));
        assert_eq!(features[1].name(), None);
    }

    #[test]
    fn test_parse_empty_and_malformed() {
        assert!(parse_response(r#"{"elements": []}"#).unwrap().is_empty());
        assert!(parse_response("{}").unwrap().is_empty());
        let err = parse_response("<html>busy</html>").unwrap_err();
        assert!(matches!(err, SourceError::Format(_)));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_runtime_remark_is_transient() {
        let body = r#"{"elements": [], "remark": "runtime error: Query timed out in \"query\""}"#;
        assert!(parse_response(body).unwrap_err().is_transient());
    }

    #[test]
    fn test_status_classification() {
        assert!(status_error(StatusCode::TOO_MANY_REQUESTS).is_transient());
        assert!(status_error(StatusCode::GATEWAY_TIMEOUT).is_transient());
        assert!(status_error(StatusCode::SERVICE_UNAVAILABLE).is_transient());
        assert!(!status_error(StatusCode::BAD_REQUEST).is_transient());
        assert!(!status_error(StatusCode::FORBIDDEN).is_transient());
    }

    #[test]
    fn test_unreachable_endpoint_fails_without_panic() {
        let client = OverpassClient::new(
            "http://127.0.0.1:9/api/interpreter",
            Duration::from_millis(200),
            RetryPolicy::no_retry(),
        )
        .unwrap();
        let result = client.features_within(&BoundingBox::new(0.0, 0.0, 0.1, 0.1));
        assert!(result.is_err());
    }
}
