use crate::har::RawHarDocument;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Marker for sizes and timing phases the capture did not record
pub const UNKNOWN: i64 = -1;

const UNKNOWN_MS: f64 = -1.0;

/// HTTP request header, passed through as captured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// One HAR entry flattened into the fields the rule engine and reports use.
///
/// Sizes and timing phases keep the HAR `-1` sentinel for "not captured".
/// Use [`crate::derive::floor_unknown`] before summing or plotting them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub url: String,
    pub method: String,
    pub status: i64,
    pub start_time: String,
    pub time_ms: f64,
    pub mime_type: String,
    pub response_size: i64,
    pub wait_time: f64,
    pub blocked_time: f64,
    pub connect_time: f64,
    pub dns_time: f64,
    pub ssl_time: f64,
    pub redirect_time: f64,
    pub send_time: f64,
    pub receive_time: f64,
    pub server_ip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    pub referer: String,
    pub request_headers: Vec<Header>,
    pub cache: Value,
}

impl Default for RequestRecord {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: String::new(),
            status: 0,
            start_time: String::new(),
            time_ms: 0.0,
            mime_type: String::new(),
            response_size: UNKNOWN,
            wait_time: UNKNOWN_MS,
            blocked_time: UNKNOWN_MS,
            connect_time: UNKNOWN_MS,
            dns_time: UNKNOWN_MS,
            ssl_time: UNKNOWN_MS,
            redirect_time: UNKNOWN_MS,
            send_time: UNKNOWN_MS,
            receive_time: UNKNOWN_MS,
            server_ip: String::new(),
            priority: None,
            referer: String::new(),
            request_headers: Vec::new(),
            cache: Value::Object(Map::new()),
        }
    }
}

impl RequestRecord {
    /// Build a record from a single `log.entries[]` element.
    ///
    /// Never fails: anything missing or mistyped takes its default.
    pub fn from_entry(entry: &Value) -> Self {
        let request = entry.get("request").unwrap_or(&Value::Null);
        let response = entry.get("response").unwrap_or(&Value::Null);
        let timings = entry.get("timings").unwrap_or(&Value::Null);
        let content = response.get("content").unwrap_or(&Value::Null);

        let request_headers: Vec<Header> = request
            .get("headers")
            .and_then(Value::as_array)
            .map(|headers| {
                headers
                    .iter()
                    .map(|h| Header {
                        name: str_field(h, "name"),
                        value: str_field(h, "value"),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let cache = entry
            .get("cache")
            .filter(|c| !c.is_null())
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));

        let mut record = Self {
            url: str_field(request, "url"),
            method: str_field(request, "method"),
            status: int_field(response, "status", 0),
            start_time: str_field(entry, "startedDateTime"),
            time_ms: num_field(entry, "time", 0.0),
            mime_type: str_field(content, "mimeType"),
            response_size: int_field(response, "bodySize", UNKNOWN),
            wait_time: num_field(timings, "wait", UNKNOWN_MS),
            blocked_time: num_field(timings, "blocked", UNKNOWN_MS),
            connect_time: num_field(timings, "connect", UNKNOWN_MS),
            dns_time: num_field(timings, "dns", UNKNOWN_MS),
            ssl_time: num_field(timings, "ssl", UNKNOWN_MS),
            redirect_time: num_field(timings, "redirect", UNKNOWN_MS),
            send_time: num_field(timings, "send", UNKNOWN_MS),
            receive_time: num_field(timings, "receive", UNKNOWN_MS),
            server_ip: str_field(entry, "serverIPAddress"),
            priority: entry
                .get("_priority")
                .and_then(Value::as_str)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            referer: String::new(),
            request_headers,
            cache,
        };

        record.referer = record
            .request_header("referer")
            .unwrap_or_default()
            .to_string();
        record
    }

    /// Get a request header value, matching the name case-insensitively
    pub fn request_header(&self, name: &str) -> Option<&str> {
        self.request_headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }
}

/// Flatten every entry of a HAR document into a [`RequestRecord`].
///
/// A document without `log.entries` yields an empty vector.
pub fn extract(doc: &RawHarDocument) -> Vec<RequestRecord> {
    let records: Vec<RequestRecord> = doc
        .entries()
        .iter()
        .map(RequestRecord::from_entry)
        .collect();

    tracing::debug!("Extracted {} request records", records.len());

    records
}

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn num_field(value: &Value, key: &str, default: f64) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(default)
}

fn int_field(value: &Value, key: &str, default: i64) -> i64 {
    value
        .get(key)
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_entry() -> Value {
        json!({
            "startedDateTime": "2024-03-01T10:00:00.000Z",
            "time": 812.4,
            "serverIPAddress": "10.0.0.7",
            "_priority": "High",
            "request": {
                "method": "GET",
                "url": "https://api.example.com/v1/items",
                "headers": [
                    {"name": "Accept", "value": "application/json"},
                    {"name": "Referer", "value": "https://app.example.com/"}
                ]
            },
            "response": {
                "status": 200,
                "bodySize": 2048,
                "content": {"size": 2048, "mimeType": "application/json"}
            },
            "cache": {"beforeRequest": null},
            "timings": {
                "blocked": 1.5,
                "dns": 12.0,
                "connect": 30.0,
                "ssl": 20.0,
                "send": 0.2,
                "wait": 640.0,
                "receive": 4.1
            }
        })
    }

    #[test]
    fn test_extract_full_entry() {
        let record = RequestRecord::from_entry(&full_entry());

        assert_eq!(record.url, "https://api.example.com/v1/items");
        assert_eq!(record.method, "GET");
        assert_eq!(record.status, 200);
        assert_eq!(record.start_time, "2024-03-01T10:00:00.000Z");
        assert_eq!(record.time_ms, 812.4);
        assert_eq!(record.mime_type, "application/json");
        assert_eq!(record.response_size, 2048);
        assert_eq!(record.wait_time, 640.0);
        assert_eq!(record.blocked_time, 1.5);
        assert_eq!(record.dns_time, 12.0);
        assert_eq!(record.connect_time, 30.0);
        assert_eq!(record.ssl_time, 20.0);
        assert_eq!(record.receive_time, 4.1);
        assert_eq!(record.redirect_time, -1.0);
        assert_eq!(record.server_ip, "10.0.0.7");
        assert_eq!(record.priority.as_deref(), Some("High"));
        assert_eq!(record.referer, "https://app.example.com/");
        assert_eq!(record.request_headers.len(), 2);
        assert_eq!(record.cache, json!({"beforeRequest": null}));
    }

    #[test]
    fn test_missing_timings_are_unknown() {
        let mut entry = full_entry();
        entry.as_object_mut().unwrap().remove("timings");

        let record = RequestRecord::from_entry(&entry);
        for phase in [
            record.wait_time,
            record.blocked_time,
            record.connect_time,
            record.dns_time,
            record.ssl_time,
            record.redirect_time,
            record.send_time,
            record.receive_time,
        ] {
            assert_eq!(phase, -1.0);
        }
    }

    #[test]
    fn test_missing_mime_type_is_empty() {
        let mut entry = full_entry();
        entry["response"]["content"]
            .as_object_mut()
            .unwrap()
            .remove("mimeType");

        let record = RequestRecord::from_entry(&entry);
        assert_eq!(record.mime_type, "");
    }

    #[test]
    fn test_empty_entry_uses_defaults() {
        let record = RequestRecord::from_entry(&json!({}));
        assert_eq!(record, RequestRecord::default());
        assert_eq!(record.status, 0);
        assert_eq!(record.response_size, UNKNOWN);
        assert_eq!(record.time_ms, 0.0);
        assert!(record.priority.is_none());
    }

    #[test]
    fn test_mistyped_fields_use_defaults() {
        let entry = json!({
            "request": {"url": 42, "headers": "none"},
            "response": {"status": "200", "bodySize": null},
            "timings": {"wait": "slow"}
        });

        let record = RequestRecord::from_entry(&entry);
        assert_eq!(record.url, "");
        assert_eq!(record.status, 0);
        assert_eq!(record.response_size, -1);
        assert_eq!(record.wait_time, -1.0);
        assert!(record.request_headers.is_empty());
    }

    #[test]
    fn test_referer_case_insensitive() {
        let entry = json!({
            "request": {
                "headers": [{"name": "REFERER", "value": "https://x"}]
            }
        });

        let record = RequestRecord::from_entry(&entry);
        assert_eq!(record.referer, "https://x");
    }

    #[test]
    fn test_referer_first_match_wins() {
        let entry = json!({
            "request": {
                "headers": [
                    {"name": "referer", "value": "https://first"},
                    {"name": "Referer", "value": "https://second"}
                ]
            }
        });

        let record = RequestRecord::from_entry(&entry);
        assert_eq!(record.referer, "https://first");
    }

    #[test]
    fn test_request_header_lookup() {
        let record = RequestRecord::from_entry(&full_entry());

        assert_eq!(record.request_header("accept"), Some("application/json"));
        assert_eq!(record.request_header("ACCEPT"), Some("application/json"));
        assert_eq!(record.request_header("cookie"), None);
    }

    #[test]
    fn test_headers_normalized_to_name_value() {
        let entry = json!({
            "request": {
                "headers": [
                    {"name": "X", "value": 7, "comment": "extra"},
                    {"value": null}
                ]
            },
            "cache": null
        });

        let record = RequestRecord::from_entry(&entry);
        assert_eq!(
            record.request_headers,
            vec![
                Header {
                    name: "X".to_string(),
                    value: String::new(),
                },
                Header {
                    name: String::new(),
                    value: String::new(),
                },
            ]
        );
        assert_eq!(record.cache, json!({}));
    }

    #[test]
    fn test_float_status_truncates() {
        let record = RequestRecord::from_entry(&json!({"response": {"status": 404.0}}));
        assert_eq!(record.status, 404);
    }

    #[test]
    fn test_extract_preserves_entry_count() {
        let doc = RawHarDocument::new(json!({
            "log": {"entries": [full_entry(), {}, "garbage", null]}
        }));

        let records = extract(&doc);
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].method, "GET");
        assert_eq!(records[2], RequestRecord::default());
    }

    #[test]
    fn test_extract_empty_document() {
        assert!(extract(&RawHarDocument::new(json!({}))).is_empty());
    }
}
