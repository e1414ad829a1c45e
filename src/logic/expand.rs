use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::logic::annotate::{annotate_list, annotate_record, HrefBase};
use crate::model::{record_id, Record, Relation};

pub struct Expander;

impl Expander {
    /// Parses the comma-separated `expand` query parameter into the set
    /// of requested relation names.
    pub fn requested(param: Option<&str>) -> HashSet<String> {
        param
            .map(|p| {
                p.split(',')
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Attaches the relation sub-object to `parent`.
    ///
    /// The sub-object is always present so the response shape is stable:
    /// unexpanded it carries only its collection-level href; expanded it
    /// additionally nests the matching children (each with their own
    /// href) under `items`. Children are matched by an order-preserving
    /// linear scan of the child collection snapshot.
    pub fn attach(
        parent: &mut Record,
        relation: &Relation,
        requested: &HashSet<String>,
        children: &[Record],
        base: &HrefBase,
        parent_path: &str,
    ) {
        let mut nested = Map::new();

        if requested.contains(relation.name) {
            let mut items = Self::children_of(parent, relation, children);
            annotate_list(&mut items, base, relation.child.path());
            nested.insert(
                "items".to_string(),
                Value::Array(items.into_iter().map(Value::Object).collect()),
            );
        }

        let relation_path = match record_id(parent) {
            Some(id) => format!("{}/{}/{}", parent_path, id, relation.name),
            None => format!("{}//{}", parent_path, relation.name),
        };
        annotate_record(&mut nested, base, &relation_path, None);

        parent.insert(relation.name.to_string(), Value::Object(nested));
    }

    /// The children whose foreign-key field equals the parent's id, in
    /// the child collection's storage order.
    pub fn children_of(parent: &Record, relation: &Relation, children: &[Record]) -> Vec<Record> {
        let Some(parent_id) = record_id(parent) else {
            return Vec::new();
        };
        children
            .iter()
            .filter(|child| {
                child.get(relation.foreign_key).and_then(Value::as_i64) == Some(parent_id)
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TWEET_LIKES;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().expect("object literal")
    }

    fn base() -> HrefBase {
        HrefBase::new("http", "localhost:3000")
    }

    fn likes() -> Vec<Record> {
        vec![
            record(json!({"id": 105, "tweet_id": 101, "user_id": 104})),
            record(json!({"id": 106, "tweet_id": 102, "user_id": 103})),
            record(json!({"id": 107, "tweet_id": 101, "user_id": 103})),
        ]
    }

    #[test]
    fn test_requested_set_parsing() {
        assert!(Expander::requested(None).is_empty());
        assert!(Expander::requested(Some("")).is_empty());
        let set = Expander::requested(Some("likes,comments"));
        assert!(set.contains("likes"));
        assert!(set.contains("comments"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_unexpanded_relation_is_a_stable_placeholder() {
        let mut tweet = record(json!({"id": 101, "message": "hi"}));
        Expander::attach(
            &mut tweet,
            &TWEET_LIKES,
            &HashSet::new(),
            &likes(),
            &base(),
            "tweets",
        );

        let nested = tweet.get("likes").and_then(Value::as_object).expect("likes");
        assert_eq!(
            nested.get("href"),
            Some(&json!("http://localhost:3000/tweets/101/likes/"))
        );
        assert!(nested.get("items").is_none());
    }

    #[test]
    fn test_expanded_relation_nests_matching_children() {
        let mut tweet = record(json!({"id": 101, "message": "hi"}));
        let requested = Expander::requested(Some("likes"));
        Expander::attach(&mut tweet, &TWEET_LIKES, &requested, &likes(), &base(), "tweets");

        let nested = tweet.get("likes").and_then(Value::as_object).expect("likes");
        let items = nested.get("items").and_then(Value::as_array).expect("items");
        assert_eq!(items.len(), 2);
        // storage order of the child collection is preserved
        assert_eq!(items[0].get("id"), Some(&json!(105)));
        assert_eq!(items[1].get("id"), Some(&json!(107)));
        assert_eq!(
            items[0].get("href"),
            Some(&json!("http://localhost:3000/likes/105"))
        );
    }

    #[test]
    fn test_expansion_without_matches_nests_empty_list() {
        let mut tweet = record(json!({"id": 999}));
        let requested = Expander::requested(Some("likes"));
        Expander::attach(&mut tweet, &TWEET_LIKES, &requested, &likes(), &base(), "tweets");

        let nested = tweet.get("likes").and_then(Value::as_object).expect("likes");
        assert_eq!(nested.get("items"), Some(&json!([])));
    }
}
