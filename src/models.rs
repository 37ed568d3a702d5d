use serde::Serialize;
use serde_json::{Number, Value};

/// One accepted entry in the thought ledger.
///
/// Optional fields are kept exactly as the caller sent them; only their
/// truthiness is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtRecord {
    pub thought: String,
    pub thought_number: Number,
    pub total_thoughts: Number,
    pub next_thought_needed: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_revision: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub revises_thought: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_from_thought: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub needs_more_thoughts: Option<Value>,
}

impl ThoughtRecord {
    /// Create a plain record with no revision or branch metadata
    pub fn new(
        thought: impl Into<String>,
        thought_number: impl Into<Number>,
        total_thoughts: impl Into<Number>,
        next_thought_needed: bool,
    ) -> Self {
        Self {
            thought: thought.into(),
            thought_number: thought_number.into(),
            total_thoughts: total_thoughts.into(),
            next_thought_needed,
            is_revision: None,
            revises_thought: None,
            branch_from_thought: None,
            branch_id: None,
            needs_more_thoughts: None,
        }
    }

    /// Branch this record should be indexed under.
    ///
    /// Both `branchFromThought` and `branchId` must be truthy. A non-string
    /// id is keyed by its string form, so `7` and `"7"` share a branch.
    pub fn branch_key(&self) -> Option<String> {
        if !is_truthy(self.branch_from_thought.as_ref()) || !is_truthy(self.branch_id.as_ref()) {
            return None;
        }
        self.branch_id.as_ref().map(js_string)
    }

    /// Whether the declared position is past the declared total
    pub fn exceeds_total(&self) -> bool {
        match (self.thought_number.as_f64(), self.total_thoughts.as_f64()) {
            (Some(number), Some(total)) => number > total,
            _ => false,
        }
    }
}

/// Truthiness of an optional payload value: absent, null, false, 0 and ""
/// are falsy, everything else is truthy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// String form of a payload value, as used for branch keys and display
pub fn js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Numbers print without a trailing `.0` when they are whole
pub fn number_string(number: &Number) -> String {
    if number.is_f64() {
        if let Some(f) = number.as_f64() {
            if f.fract() == 0.0 && f.abs() < 1e21 {
                return format!("{}", f as i128);
            }
            return f.to_string();
        }
    }
    number.to_string()
}

/// Status returned to the caller after a thought is recorded
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtSummary {
    pub thought_number: Number,
    pub total_thoughts: Number,
    pub next_thought_needed: bool,
    pub branches: Vec<String>,
    pub thought_history_length: usize,
}

/// Body returned when a call fails
#[derive(Debug, Serialize)]
pub struct FailurePayload {
    pub error: String,
    pub status: &'static str,
}

impl FailurePayload {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status: "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_serializes_with_wire_names() {
        let mut record = ThoughtRecord::new("look again", 3, 4, true);
        record.is_revision = Some(json!(true));
        record.revises_thought = Some(json!(1));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "thought": "look again",
                "thoughtNumber": 3,
                "totalThoughts": 4,
                "nextThoughtNeeded": true,
                "isRevision": true,
                "revisesThought": 1
            })
        );
    }

    #[test]
    fn test_branch_key_requires_both_fields() {
        let mut record = ThoughtRecord::new("alt", 2, 3, true);
        assert_eq!(record.branch_key(), None);

        record.branch_id = Some(json!("alt-a"));
        assert_eq!(record.branch_key(), None);

        record.branch_from_thought = Some(json!(1));
        assert_eq!(record.branch_key().as_deref(), Some("alt-a"));
    }

    #[test]
    fn test_branch_key_treats_falsy_values_as_unset() {
        let mut record = ThoughtRecord::new("alt", 2, 3, true);
        record.branch_id = Some(json!("alt-a"));
        for from in [json!(0), json!(""), json!(false), json!(null)] {
            record.branch_from_thought = Some(from);
            assert_eq!(record.branch_key(), None);
        }

        record.branch_from_thought = Some(json!(1));
        for id in [json!(""), json!(0), json!(false)] {
            record.branch_id = Some(id);
            assert_eq!(record.branch_key(), None);
        }
    }

    #[test]
    fn test_branch_key_accepts_untyped_values() {
        let mut record = ThoughtRecord::new("alt", 2, 3, true);
        record.branch_from_thought = Some(json!("1"));
        record.branch_id = Some(json!("x"));
        assert_eq!(record.branch_key().as_deref(), Some("x"));

        record.branch_from_thought = Some(json!(1));
        record.branch_id = Some(json!(7));
        assert_eq!(record.branch_key().as_deref(), Some("7"));

        record.branch_id = Some(json!(true));
        assert_eq!(record.branch_key().as_deref(), Some("true"));
    }

    #[test]
    fn test_js_string_forms() {
        assert_eq!(js_string(&json!(2.0)), "2");
        assert_eq!(js_string(&json!(1.5)), "1.5");
        assert_eq!(js_string(&json!(-3)), "-3");
        assert_eq!(js_string(&json!(["a", 1, null])), "a,1,");
        assert_eq!(js_string(&json!({ "k": 1 })), "[object Object]");
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&json!(0.0))));
        assert!(is_truthy(Some(&json!(-1))));
        assert!(is_truthy(Some(&json!("no"))));
        assert!(is_truthy(Some(&json!([]))));
    }

    #[test]
    fn test_exceeds_total_compares_numerically() {
        assert!(ThoughtRecord::new("x", 5, 3, true).exceeds_total());
        assert!(!ThoughtRecord::new("x", 3, 3, true).exceeds_total());

        let mut record = ThoughtRecord::new("x", 1, 1, true);
        record.thought_number = Number::from_f64(1.5).unwrap();
        assert!(record.exceeds_total());
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = ThoughtSummary {
            thought_number: 1.into(),
            total_thoughts: 3.into(),
            next_thought_needed: true,
            branches: vec![],
            thought_history_length: 1,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["thoughtHistoryLength"], json!(1));
        assert_eq!(value["branches"], json!([]));
        assert_eq!(value["nextThoughtNeeded"], json!(true));
    }

    #[test]
    fn test_failure_payload_status() {
        let value = serde_json::to_value(FailurePayload::new("boom")).unwrap();
        assert_eq!(value, json!({ "error": "boom", "status": "failed" }));
    }
}
