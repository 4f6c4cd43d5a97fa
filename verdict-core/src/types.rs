use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One input object exactly as it appeared in the imported batch.
///
/// Kept verbatim so export can reproduce every field the engine does not know
/// about, in its original order.
pub type RawItem = Map<String, Value>;

/// The review decision attached to a single record.
///
/// Serialized as `"accepted"`, `"rejected"`, or `"none"`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "accepted")]
    Accepted,
    #[serde(rename = "rejected")]
    Rejected,
    /// Not yet decided (the default).
    #[default]
    #[serde(rename = "none")]
    Undecided,
}

impl Decision {
    /// Returns the wire value written to the `status` field on export.
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Accepted => "accepted",
            Decision::Rejected => "rejected",
            Decision::Undecided => "none",
        }
    }

    /// Parses a `status` value. Anything other than the three wire strings is `None`.
    pub fn from_status(value: &Value) -> Option<Self> {
        match value.as_str()? {
            "accepted" => Some(Decision::Accepted),
            "rejected" => Some(Decision::Rejected),
            "none" => Some(Decision::Undecided),
            _ => None,
        }
    }
}

/// Which decisions the record view shows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    All,
    Accepted,
    Rejected,
    Undecided,
}

impl Filter {
    /// All filters in display order.
    pub const ALL: [Filter; 4] = [Filter::All, Filter::Accepted, Filter::Rejected, Filter::Undecided];

    /// Returns `true` when a record with `decision` passes this filter.
    pub fn matches(self, decision: Decision) -> bool {
        match self {
            Filter::All => true,
            Filter::Accepted => decision == Decision::Accepted,
            Filter::Rejected => decision == Decision::Rejected,
            Filter::Undecided => decision == Decision::Undecided,
        }
    }

    /// Returns the filter that follows `self` in display order (wraps around).
    pub fn next(self) -> Self {
        match self {
            Filter::All => Filter::Accepted,
            Filter::Accepted => Filter::Rejected,
            Filter::Rejected => Filter::Undecided,
            Filter::Undecided => Filter::All,
        }
    }

    /// Position of this filter within [`Filter::ALL`].
    pub fn position(self) -> usize {
        match self {
            Filter::All => 0,
            Filter::Accepted => 1,
            Filter::Rejected => 2,
            Filter::Undecided => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Accepted => "Accepted",
            Filter::Rejected => "Rejected",
            Filter::Undecided => "Undecided",
        }
    }
}

/// Token accounting reported alongside a response. Purely informational.
#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: Option<f64>,
    #[serde(default)]
    pub completion_tokens: Option<f64>,
    #[serde(default)]
    pub total_tokens: Option<f64>,
}

/// One reviewable unit: a file path, the response under review, and usage metadata.
///
/// Typed fields are extracted leniently at import: a field with the wrong JSON
/// type is treated as absent rather than failing the whole batch. The original
/// object is retained in `raw` and never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    raw: RawItem,
    file_path: Option<String>,
    response: Option<String>,
    usage: Option<Usage>,
}

impl Record {
    /// Builds a record from an imported object.
    pub fn from_raw(raw: RawItem) -> Self {
        let text = |key: &str| raw.get(key).and_then(Value::as_str).map(str::to_owned);
        let file_path = text("filePath");
        let response = text("response");
        let usage = raw
            .get("usage")
            .filter(|v| v.is_object())
            .and_then(|v| serde_json::from_value::<Usage>(v.clone()).ok());
        Self { raw, file_path, response, usage }
    }

    pub fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }

    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    pub fn usage(&self) -> Option<&Usage> {
        self.usage.as_ref()
    }

    /// The original imported object.
    pub fn raw(&self) -> &RawItem {
        &self.raw
    }

    /// The decision carried in the object's own `status` field, if valid.
    pub fn prior_decision(&self) -> Option<Decision> {
        self.raw.get("status").and_then(Decision::from_status)
    }

    /// Display label: the file path, or `"Item N"` (1-based) when it is missing.
    pub fn label(&self, index: usize) -> String {
        match &self.file_path {
            Some(path) => path.clone(),
            None => format!("Item {}", index + 1),
        }
    }

    /// Returns `true` when `needle` (already lower-cased) occurs in the file path
    /// or the response, ignoring case.
    pub(crate) fn contains_lowercase(&self, needle: &str) -> bool {
        let hit = |field: &Option<String>| {
            field.as_deref().is_some_and(|s| s.to_lowercase().contains(needle))
        };
        hit(&self.file_path) || hit(&self.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawItem {
        match value {
            Value::Object(map) => map,
            _ => panic!("test fixture must be an object"),
        }
    }

    #[test]
    fn record_extracts_known_fields() {
        let record = Record::from_raw(raw(json!({
            "filePath": "src/lib.rs",
            "response": "ok",
            "usage": { "promptTokens": 10, "totalTokens": 12 }
        })));
        assert_eq!(record.file_path(), Some("src/lib.rs"));
        assert_eq!(record.response(), Some("ok"));
        let usage = record.usage().copied().unwrap_or_default();
        assert_eq!(usage.prompt_tokens, Some(10.0));
        assert_eq!(usage.completion_tokens, None);
        assert_eq!(usage.total_tokens, Some(12.0));
    }

    #[test]
    fn wrongly_typed_fields_are_treated_as_absent() {
        let record = Record::from_raw(raw(json!({ "filePath": 3, "response": null, "usage": "many" })));
        assert_eq!(record.file_path(), None);
        assert_eq!(record.response(), None);
        assert!(record.usage().is_none());
        assert_eq!(record.label(4), "Item 5");
    }

    #[test]
    fn prior_status_only_accepts_wire_values() {
        let accepted = Record::from_raw(raw(json!({ "status": "accepted" })));
        let bogus = Record::from_raw(raw(json!({ "status": "maybe" })));
        assert_eq!(accepted.prior_decision(), Some(Decision::Accepted));
        assert_eq!(bogus.prior_decision(), None);
    }

    #[test]
    fn filter_cycle_visits_every_filter() {
        let mut f = Filter::All;
        for expected in Filter::ALL.iter().skip(1).chain(std::iter::once(&Filter::All)) {
            f = f.next();
            assert_eq!(f, *expected);
        }
        assert!(Filter::All.matches(Decision::Rejected));
        assert!(!Filter::Accepted.matches(Decision::Undecided));
    }
}
