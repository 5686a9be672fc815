//! Wire query types
//!
//! Field names are the backend's abbreviated JSON keys and must not change.

use serde::{Deserialize, Deserializer, Serialize};

/// Filter on one property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireFilter {
    /// Property category: `event` or `user`
    pub en: String,
    /// Logical operator joining this entry to the previous one
    pub lop: String,
    pub op: String,
    pub pr: String,
    /// Property datatype
    pub ty: String,
    pub va: String,
}

/// An event with its property filters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireEvent {
    pub na: String,
    #[serde(default)]
    pub pr: Vec<WireFilter>,
}

/// Group-by property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireGroupBy {
    pub pr: String,
    pub en: String,
    pub pty: String,
    /// Owning event name (`$present` for global breakdowns)
    #[serde(default)]
    pub ena: String,
    /// 1-based owning event index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eni: Option<usize>,
    /// Datetime bucket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grn: Option<String>,
}

/// Datetime filter window, JSON-encoded into [`WireFilter::va`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeValue {
    pub fr: i64,
    pub to: i64,
    #[serde(default)]
    pub ovp: bool,
}

/// One backend query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireQuery {
    pub cl: String,
    pub ty: String,
    #[serde(default)]
    pub ec: String,
    #[serde(default)]
    pub ewp: Vec<WireEvent>,
    #[serde(default)]
    pub gbp: Vec<WireGroupBy>,
    #[serde(default, deserialize_with = "group_by_timestamp")]
    pub gbt: String,
    #[serde(default)]
    pub tz: String,
    pub fr: i64,
    pub to: i64,
}

// Saved queries from old dashboards carry gbt as a boolean.
fn group_by_timestamp<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Bool(true) => Ok("date".to_string()),
        serde_json::Value::Bool(false) | serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!("invalid gbt {}", other))),
    }
}

/// What the builder produces: one query or a group run together
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryPayload {
    Single(WireQuery),
    Group(Vec<WireQuery>),
}

impl QueryPayload {
    pub fn queries(&self) -> &[WireQuery] {
        match self {
            QueryPayload::Single(q) => std::slice::from_ref(q),
            QueryPayload::Group(qs) => qs,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, QueryPayload::Group(_))
    }

    /// Body for the query endpoint; groups are wrapped as `query_group`
    pub fn to_request_body(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            QueryPayload::Single(q) => serde_json::to_value(q),
            QueryPayload::Group(qs) => Ok(serde_json::json!({ "query_group": serde_json::to_value(qs)? })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_query() -> WireQuery {
        WireQuery {
            cl: "events".to_string(),
            ty: "unique_users".to_string(),
            ec: "each_given_event".to_string(),
            ewp: vec![WireEvent { na: "page_view".to_string(), pr: vec![] }],
            gbp: vec![],
            gbt: "date".to_string(),
            tz: "UTC".to_string(),
            fr: 1704067200,
            to: 1704671999,
        }
    }

    #[test]
    fn test_wire_query_field_names() {
        let json = serde_json::to_string(&sample_query()).unwrap();
        assert_eq!(
            json,
            r#"{"cl":"events","ty":"unique_users","ec":"each_given_event","ewp":[{"na":"page_view","pr":[]}],"gbp":[],"gbt":"date","tz":"UTC","fr":1704067200,"to":1704671999}"#
        );
    }

    #[test]
    fn test_group_by_skips_absent_fields() {
        let gbp = WireGroupBy {
            pr: "$country".to_string(),
            en: "user".to_string(),
            pty: "categorical".to_string(),
            ena: "$present".to_string(),
            eni: None,
            grn: None,
        };
        let json = serde_json::to_string(&gbp).unwrap();
        assert_eq!(json, r#"{"pr":"$country","en":"user","pty":"categorical","ena":"$present"}"#);
    }

    #[test]
    fn test_legacy_boolean_gbt() {
        let json = r#"{"cl":"events","ty":"events_occurrence","gbt":true,"fr":0,"to":10}"#;
        let query: WireQuery = serde_json::from_str(json).unwrap();
        assert_eq!(query.gbt, "date");
        assert!(query.ewp.is_empty());
    }

    #[test]
    fn test_group_request_body() {
        let payload = QueryPayload::Group(vec![sample_query(), sample_query()]);
        let body = payload.to_request_body().unwrap();
        assert_eq!(body["query_group"].as_array().unwrap().len(), 2);

        let single = QueryPayload::Single(sample_query()).to_request_body().unwrap();
        assert_eq!(single["cl"], "events");
    }
}
