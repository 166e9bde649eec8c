//! Response schema of the EFA JSON endpoints
//!
//! EFA encodes most numbers as strings and collapses one-element lists into
//! a `{"point": {...}}` wrapper, so the helpers below accept both forms.
//! Fields the monitor relies on are required; anything else is optional.

use domain::{Departure, StopMatch};
use serde::{Deserialize, Deserializer};

use crate::error::VvmError;

/// Body of an `XML_DM_REQUEST` answer
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DmResponse {
    /// Upcoming departures; `null` upstream means none
    #[serde(deserialize_with = "nullable_list")]
    pub departure_list: Vec<RawDeparture>,

    /// Departure-monitor block with the resolved stop and status messages
    #[serde(default)]
    pub dm: Option<DmBlock>,
}

impl DmResponse {
    /// Name of the first stop point the monitor resolved, if any
    #[must_use]
    pub fn resolved_stop_name(&self) -> Option<&str> {
        self.dm
            .as_ref()
            .and_then(|dm| dm.points.first())
            .and_then(|point| point.name.as_deref())
    }

    /// Status messages of the departure-monitor block
    #[must_use]
    pub fn messages(&self) -> &[DmMessage] {
        match &self.dm {
            Some(dm) => dm.message.as_slice(),
            None => &[],
        }
    }
}

/// The `dm` block of a departure-monitor answer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DmBlock {
    /// Stop points the query resolved to
    #[serde(default, deserialize_with = "point_list")]
    pub points: Vec<DmPoint>,

    /// Status messages (`code`, `error`, ...)
    #[serde(default, deserialize_with = "nullable_list")]
    pub message: Vec<DmMessage>,
}

/// A stop point resolved by the departure monitor
#[derive(Debug, Clone, Deserialize)]
pub struct DmPoint {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
}

/// A name/value status entry of the departure monitor
#[derive(Debug, Clone, Deserialize)]
pub struct DmMessage {
    /// Entry name, e.g. `code` or `error`
    pub name: String,
    /// Entry value
    #[serde(default, deserialize_with = "optional_text")]
    pub value: Option<String>,
}

/// One entry of `departureList`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDeparture {
    /// Minutes until departure
    #[serde(deserialize_with = "integer")]
    pub countdown: i64,
    /// Line serving this departure
    pub serving_line: RawServingLine,
}

/// The `servingLine` object of a departure
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawServingLine {
    /// Vehicle type
    pub name: String,
    /// Line number
    #[serde(deserialize_with = "text")]
    pub number: String,
    /// Destination
    pub direction: String,
    /// Origin
    pub direction_from: String,
    /// Delay in minutes
    #[serde(deserialize_with = "integer")]
    pub delay: i64,
}

impl From<RawDeparture> for Departure {
    fn from(raw: RawDeparture) -> Self {
        let line = raw.serving_line;
        Self {
            left: raw.countdown,
            delay: line.delay,
            kind: line.name,
            line: line.number,
            to: line.direction,
            from: line.direction_from,
        }
    }
}

/// Body of an `XML_STOPFINDER_REQUEST` answer
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopFinderResponse {
    /// The stop finder block
    pub stop_finder: StopFinderBlock,
}

/// The `stopFinder` block
#[derive(Debug, Clone, Deserialize)]
pub struct StopFinderBlock {
    /// Candidate points of any kind (stops, streets, POIs, ...)
    #[serde(default, deserialize_with = "point_list")]
    pub points: Vec<RawStopPoint>,
}

/// A candidate point of the stop finder
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStopPoint {
    /// Point type, `any` for stop-finder hits
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Refined type, `stop` for transit stops
    #[serde(default)]
    pub any_type: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Stable identifier usable as a stop id
    #[serde(default)]
    pub stateless: Option<String>,
}

impl RawStopPoint {
    /// Whether this point is an exact stop hit
    #[must_use]
    pub fn is_stop(&self) -> bool {
        self.kind.as_deref() == Some("any") && self.any_type.as_deref() == Some("stop")
    }

    /// Convert a stop hit into a [`StopMatch`]
    ///
    /// # Errors
    ///
    /// Returns [`VvmError::MalformedResponse`] if name or identifier is missing.
    pub fn into_stop_match(self) -> Result<StopMatch, VvmError> {
        match (self.name, self.stateless) {
            (Some(name), Some(id)) => Ok(StopMatch::new(name, id)),
            (name, _) => Err(VvmError::MalformedResponse(format!(
                "stop point {} lacks name or stateless id",
                name.as_deref().unwrap_or("<unnamed>")
            ))),
        }
    }
}

// --- Lenient field decoders ---

#[derive(Deserialize)]
#[serde(untagged)]
enum PointList<T> {
    Many(Vec<T>),
    Single { point: T },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// A list that may be `null`
fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A list that may be `null`, a JSON array, or a `{"point": {...}}` wrapper
fn point_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<PointList<T>>::deserialize(deserializer)? {
        Some(PointList::Many(points)) => points,
        Some(PointList::Single { point }) => vec![point],
        None => Vec::new(),
    })
}

/// An integer given either as a JSON number or a numeric string
fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Int(i) => Ok(i),
        Scalar::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("expected an integer, got {s:?}"))),
        Scalar::Float(f) => Err(serde::de::Error::custom(format!(
            "expected an integer, got {f}"
        ))),
    }
}

/// A string given either as a JSON string or a number
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Scalar::deserialize(deserializer)?.into_text())
}

/// Like [`text`], but `null` is allowed
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_departure_list() {
        let json = r#"{"departureList":[{"countdown":"5","servingLine":{"delay":"2","name":"Bus","number":"12","direction":"Downtown","directionFrom":"Uptown"}}]}"#;

        let response: DmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.departure_list.len(), 1);
        assert!(response.dm.is_none());

        let departure = Departure::from(response.departure_list[0].clone());
        assert_eq!(departure.left, 5);
        assert_eq!(departure.delay, 2);
        assert_eq!(departure.kind, "Bus");
        assert_eq!(departure.line, "12");
        assert_eq!(departure.to, "Downtown");
        assert_eq!(departure.from, "Uptown");
    }

    #[test]
    fn test_numeric_fields_accept_numbers() {
        let json = r#"{"departureList":[{"countdown":0,"servingLine":{"delay":-1,"name":"Straßenbahn","number":4,"direction":"Sanderau","directionFrom":"Zellerau"}}]}"#;

        let response: DmResponse = serde_json::from_str(json).unwrap();
        let departure = Departure::from(response.departure_list[0].clone());
        assert_eq!(departure.left, 0);
        assert_eq!(departure.delay, -1);
        assert_eq!(departure.line, "4");
    }

    #[test]
    fn test_null_departure_list_is_empty() {
        let response: DmResponse = serde_json::from_str(r#"{"departureList":null}"#).unwrap();
        assert!(response.departure_list.is_empty());
    }

    #[test]
    fn test_missing_departure_list_is_rejected() {
        let result = serde_json::from_str::<DmResponse>(r#"{"dm":null}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_serving_line_field_is_rejected() {
        let json = r#"{"departureList":[{"countdown":"5","servingLine":{"name":"Bus","number":"12","direction":"Downtown","directionFrom":"Uptown"}}]}"#;
        assert!(serde_json::from_str::<DmResponse>(json).is_err());
    }

    #[test]
    fn test_non_numeric_countdown_is_rejected() {
        let json = r#"{"departureList":[{"countdown":"soon","servingLine":{"delay":"0","name":"Bus","number":"12","direction":"Downtown","directionFrom":"Uptown"}}]}"#;
        let err = serde_json::from_str::<DmResponse>(json).unwrap_err();
        assert!(err.to_string().contains("soon"));
    }

    #[test]
    fn test_resolved_stop_name_from_wrapped_point() {
        let json = r#"{
            "departureList": null,
            "dm": { "points": { "point": { "name": "Würzburg, Sanderring" } } }
        }"#;
        let response: DmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.resolved_stop_name(), Some("Würzburg, Sanderring"));
    }

    #[test]
    fn test_resolved_stop_name_from_point_array() {
        let json = r#"{
            "departureList": [],
            "dm": { "points": [ { "name": "First" }, { "name": "Second" } ] }
        }"#;
        let response: DmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.resolved_stop_name(), Some("First"));
    }

    #[test]
    fn test_messages_accept_numeric_values() {
        let json = r#"{
            "departureList": [],
            "dm": { "message": [ { "name": "code", "value": -8011 }, { "name": "error", "value": "" } ] }
        }"#;
        let response: DmResponse = serde_json::from_str(json).unwrap();
        let messages = response.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].value.as_deref(), Some("-8011"));
        assert_eq!(messages[1].value.as_deref(), Some(""));
    }

    #[test]
    fn test_stop_finder_single_point_wrapper() {
        let json = r#"{
            "stopFinder": {
                "points": { "point": { "type": "any", "anyType": "stop", "name": "Würzburg, Hbf", "stateless": "6000177" } }
            }
        }"#;
        let response: StopFinderResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.stop_finder.points.len(), 1);
        assert!(response.stop_finder.points[0].is_stop());
    }

    #[test]
    fn test_stop_finder_null_points() {
        let response: StopFinderResponse =
            serde_json::from_str(r#"{"stopFinder":{"points":null}}"#).unwrap();
        assert!(response.stop_finder.points.is_empty());
    }

    #[test]
    fn test_stop_point_classification() {
        let street = RawStopPoint {
            kind: Some("any".to_string()),
            any_type: Some("street".to_string()),
            name: Some("Sanderstraße".to_string()),
            stateless: Some("streetID:1".to_string()),
        };
        assert!(!street.is_stop());

        let incomplete = RawStopPoint {
            kind: Some("any".to_string()),
            any_type: Some("stop".to_string()),
            name: Some("Nameless".to_string()),
            stateless: None,
        };
        assert!(incomplete.is_stop());
        assert!(matches!(
            incomplete.into_stop_match(),
            Err(VvmError::MalformedResponse(_))
        ));
    }
}
