//! Annotation backend: the data-source trait, record decoding, and an HTTP
//! implementation.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use foundation::math::{GeoPosition, round_to};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Endpoints;
use crate::record::{PlotId, PlotRecord};

/// Boxed, sendable future returned by the data-source traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug)]
pub struct SourceError {
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as _)
    }
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Range query around the camera centre. Coordinates are already encoded by
/// the session's `RecordCodec`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    pub is_query_owner: bool,
}

impl PlotQuery {
    /// Everything the user can see, no spatial filter.
    pub fn all(owner_only: bool) -> Self {
        Self {
            is_query_owner: owner_only,
            ..Self::default()
        }
    }

    pub fn is_range(&self) -> bool {
        self.radius.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoFlyQuery {
    pub lng: String,
    pub lat: String,
    pub radius: f64,
}

/// `[latitude + 90, longitude + 180]`, both rounded to 7 decimals first.
pub fn no_fly_lat_lngs(vertices: &[GeoPosition]) -> Vec<[f64; 2]> {
    vertices
        .iter()
        .map(|p| [round_to(p.latitude, 7) + 90.0, round_to(p.longitude, 7) + 180.0])
        .collect()
}

/// Transport encoding of query coordinates and stored records. Deployments
/// that encrypt their payloads plug their scheme in here.
pub trait RecordCodec: Send + Sync {
    fn encode_longitude(&self, longitude: f64) -> String;
    fn encode_latitude(&self, latitude: f64) -> String;
    fn decode(&self, raw: Value) -> Result<PlotRecord, SourceError>;
}

/// Plain JSON, coordinates as decimal text.
#[derive(Debug, Copy, Clone, Default)]
pub struct PlainCodec;

impl RecordCodec for PlainCodec {
    fn encode_longitude(&self, longitude: f64) -> String {
        longitude.to_string()
    }

    fn encode_latitude(&self, latitude: f64) -> String {
        latitude.to_string()
    }

    fn decode(&self, raw: Value) -> Result<PlotRecord, SourceError> {
        serde_json::from_value(raw).map_err(|e| SourceError::with_source("Invalid plot record", e))
    }
}

/// Remote annotation store. Records come back undecoded.
pub trait PlotDataSource: Send + Sync {
    fn area_draw(&self, query: PlotQuery) -> BoxFuture<'_, Result<Vec<Value>, SourceError>>;

    /// `Ok(None)` when the id is unknown.
    fn plot_details(&self, id: PlotId) -> BoxFuture<'_, Result<Option<Value>, SourceError>>;

    fn no_fly_zones(&self, query: NoFlyQuery) -> BoxFuture<'_, Result<Vec<Value>, SourceError>>;

    /// True when the ring intersects or lies inside a no-fly zone.
    fn no_fly_zone_check(&self, lat_lngs: Vec<[f64; 2]>)
    -> BoxFuture<'_, Result<bool, SourceError>>;
}

/// Newest first, decoded `chunk` records at a time. Undecodable records are
/// logged and dropped.
pub fn decode_records(mut raw: Vec<Value>, chunk: usize, codec: &dyn RecordCodec) -> Vec<PlotRecord> {
    raw.reverse();
    let mut out = Vec::with_capacity(raw.len());
    for (index, group) in raw.chunks(chunk.max(1)).enumerate() {
        debug!(chunk = index, len = group.len(), "decoding plot records");
        for item in group {
            match codec.decode(item.clone()) {
                Ok(record) => out.push(record),
                Err(e) => warn!(error = %e, "skipping undecodable plot record"),
            }
        }
    }
    out
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    code: i64,
    #[serde(default)]
    msg: Option<String>,
    data: Option<T>,
}

#[derive(Serialize)]
struct IdBody {
    id: PlotId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckBody {
    lat_lngs: Vec<[f64; 2]>,
}

/// JSON-over-HTTP backend. Every endpoint takes a POST body and answers with
/// a `{code, msg, data}` envelope; `code == 200` is success.
pub struct HttpPlotSource {
    endpoints: Endpoints,
    client: reqwest::Client,
}

impl HttpPlotSource {
    pub const OK_CODE: i64 = 200;

    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<Option<T>, SourceError>
    where
        B: Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let url = self.endpoints.url(path);
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| SourceError::with_source("HTTP request failed", e))?;

        if !resp.status().is_success() {
            return Err(SourceError::new(format!("HTTP error: {}", resp.status())));
        }

        let envelope: Envelope<T> = resp
            .json()
            .await
            .map_err(|e| SourceError::with_source("Failed to read response", e))?;
        decode_envelope(envelope)
    }
}

/// Unwraps a backend answer. A non-200 `code` is an error; a missing or
/// `null` `data` is `Ok(None)`.
fn decode_envelope<T>(envelope: Envelope<T>) -> Result<Option<T>, SourceError> {
    if envelope.code != HttpPlotSource::OK_CODE {
        return Err(SourceError::new(format!(
            "backend error {}: {}",
            envelope.code,
            envelope.msg.unwrap_or_default()
        )));
    }
    Ok(envelope.data)
}

impl PlotDataSource for HttpPlotSource {
    fn area_draw(&self, query: PlotQuery) -> BoxFuture<'_, Result<Vec<Value>, SourceError>> {
        Box::pin(async move {
            let data: Option<Vec<Value>> = self.post(&self.endpoints.area_draw, &query).await?;
            Ok(data.unwrap_or_default())
        })
    }

    fn plot_details(&self, id: PlotId) -> BoxFuture<'_, Result<Option<Value>, SourceError>> {
        Box::pin(async move {
            let data: Option<Value> = self.post(&self.endpoints.plot_details, &IdBody { id }).await?;
            Ok(data.filter(|v| !v.is_null()))
        })
    }

    fn no_fly_zones(&self, query: NoFlyQuery) -> BoxFuture<'_, Result<Vec<Value>, SourceError>> {
        Box::pin(async move {
            let data: Option<Vec<Value>> = self.post(&self.endpoints.no_fly_zones, &query).await?;
            Ok(data.unwrap_or_default())
        })
    }

    fn no_fly_zone_check(
        &self,
        lat_lngs: Vec<[f64; 2]>,
    ) -> BoxFuture<'_, Result<bool, SourceError>> {
        Box::pin(async move {
            let body = CheckBody { lat_lngs };
            let data: Option<bool> = self.post(&self.endpoints.no_fly_zone_check, &body).await?;
            Ok(data.unwrap_or(false))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Envelope, PlainCodec, PlotQuery, RecordCodec, SourceError, decode_envelope, decode_records,
        no_fly_lat_lngs,
    };
    use crate::record::PlotId;
    use foundation::math::GeoPosition;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn decode_reverses_and_skips_bad_records() {
        let raw: Vec<_> = (1..=25)
            .map(|id| json!({"id": id, "towerName": format!("p{id}")}))
            .chain(std::iter::once(json!({"towerName": "no id"})))
            .collect();
        let records = decode_records(raw, 10, &PlainCodec);
        assert_eq!(records.len(), 25);
        assert_eq!(records[0].id, PlotId(25));
        assert_eq!(records[24].id, PlotId(1));
    }

    #[test]
    fn lat_lngs_are_shifted_and_rounded() {
        let out = no_fly_lat_lngs(&[GeoPosition::new(117.123_456_789, -39.5, 0.0)]);
        assert_eq!(out.len(), 1);
        assert!((out[0][0] - 50.5).abs() < 1e-9);
        assert!((out[0][1] - 297.123_456_8).abs() < 1e-9);
    }

    #[test]
    fn plain_codec_encodes_decimal_text() {
        assert_eq!(PlainCodec.encode_longitude(117.5), "117.5");
        assert_eq!(PlainCodec.encode_latitude(-3.0), "-3");
    }

    #[test]
    fn queries_serialize_camel_case() {
        let query = PlotQuery {
            longitude: Some("1".to_string()),
            latitude: Some("2".to_string()),
            radius: Some(3000.0),
            is_query_owner: true,
        };
        let value = serde_json::to_value(&query).expect("json");
        assert_eq!(
            value,
            json!({"longitude": "1", "latitude": "2", "radius": 3000.0, "isQueryOwner": true})
        );
        assert!(query.is_range());
        assert_eq!(serde_json::to_value(PlotQuery::all(false)).expect("json"), json!({"isQueryOwner": false}));
    }

    #[test]
    fn source_error_keeps_cause() {
        let io = std::io::Error::other("boom");
        let err = SourceError::with_source("wrapped", io);
        assert_eq!(err.to_string(), "wrapped");
        assert!(std::error::Error::source(&err).is_some());
    }

    fn envelope<T: serde::de::DeserializeOwned>(body: &str) -> Envelope<T> {
        serde_json::from_str(body).expect("envelope")
    }

    #[test]
    fn envelope_success_yields_data() {
        let data: Option<Vec<serde_json::Value>> =
            decode_envelope(envelope(r#"{"code": 200, "msg": "ok", "data": [{"id": 1}]}"#))
                .expect("ok");
        assert_eq!(data, Some(vec![json!({"id": 1})]));

        let conflict: Option<bool> =
            decode_envelope(envelope(r#"{"code": 200, "data": true}"#)).expect("ok");
        assert_eq!(conflict, Some(true));
    }

    #[test]
    fn envelope_error_code_is_an_error() {
        let err = decode_envelope::<Vec<serde_json::Value>>(envelope(
            r#"{"code": 500, "msg": "database down", "data": null}"#,
        ))
        .expect_err("backend error");
        assert_eq!(err.to_string(), "backend error 500: database down");

        let err = decode_envelope::<bool>(envelope(r#"{"code": 401}"#)).expect_err("backend error");
        assert_eq!(err.to_string(), "backend error 401: ");
    }

    #[test]
    fn envelope_null_or_missing_data_is_none() {
        let list: Option<Vec<serde_json::Value>> =
            decode_envelope(envelope(r#"{"code": 200, "msg": "ok", "data": null}"#)).expect("ok");
        assert_eq!(list.unwrap_or_default(), Vec::<serde_json::Value>::new());

        let check: Option<bool> = decode_envelope(envelope(r#"{"code": 200}"#)).expect("ok");
        assert!(!check.unwrap_or(false));

        let details: Option<serde_json::Value> =
            decode_envelope(envelope(r#"{"code": 200, "data": null}"#)).expect("ok");
        assert_eq!(details.filter(|v| !v.is_null()), None);
    }
}
