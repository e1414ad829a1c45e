use serde_json::{json, Value};

use crate::model::ResourceKind;

/// One field declaration: "|"-separated rule names plus an optional
/// default value used by the write-path clean step.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub field: String,
    pub rules: String,
    pub default: Option<Value>,
}

/// Declarative write rules for one resource kind. Declaration order is
/// the order checks run in, and the declared fields double as the write
/// allow-list: anything else in a payload is dropped before storage.
#[derive(Debug, Clone, Default)]
pub struct FieldRuleSet {
    pub fields: Vec<FieldSpec>,
}

impl FieldRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, rules: &str) -> Self {
        self.fields.push(FieldSpec {
            field: name.to_string(),
            rules: rules.to_string(),
            default: None,
        });
        self
    }

    pub fn field_with_default(mut self, name: &str, rules: &str, default: Value) -> Self {
        self.fields.push(FieldSpec {
            field: name.to_string(),
            rules: rules.to_string(),
            default: Some(default),
        });
        self
    }
}

/// The rule table the write handlers compile a validator from.
pub fn rules_for(kind: ResourceKind) -> FieldRuleSet {
    match kind {
        ResourceKind::Tweets => FieldRuleSet::new()
            .field("message", "required|string")
            .field("user_id", "number|positive"),
        ResourceKind::Users => FieldRuleSet::new()
            .field("firstname", "required|string")
            .field("lastname", "required|string"),
        ResourceKind::Likes => FieldRuleSet::new()
            .field("tweet_id", "required|number|positive")
            .field("user_id", "required|number|positive"),
        ResourceKind::Videos => FieldRuleSet::new()
            .field("title", "required|string")
            .field_with_default("description", "string", json!(""))
            .field("src", "required|string")
            .field("length", "required|number|positive")
            .field_with_default("playcount", "number|positive", json!(0))
            .field_with_default("ranking", "number|positive", json!(0)),
    }
}
