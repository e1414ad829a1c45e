use serde_json::Value;

use crate::model::{record_id, Id, Record};

/// Scheme/host pair self-links are built from. Carried explicitly so the
/// annotator stays a pure function over the data it is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HrefBase {
    scheme: String,
    host: String,
}

impl HrefBase {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    /// `<scheme>://<host>/<path>/<id-or-empty>`. A missing id yields an
    /// empty trailing segment, never an error.
    pub fn url(&self, path: &str, id: Option<Id>) -> String {
        match id {
            Some(id) => format!("{}://{}/{}/{}", self.scheme, self.host, path, id),
            None => format!("{}://{}/{}/", self.scheme, self.host, path),
        }
    }
}

/// Sets `href` on the record, from the explicit id when given and the
/// record's own `id` field otherwise. Overwrites any previous value, so
/// re-annotating with the same parameters is idempotent.
pub fn annotate_record(record: &mut Record, base: &HrefBase, path: &str, id: Option<Id>) {
    let id = id.or_else(|| record_id(record));
    record.insert("href".to_string(), Value::String(base.url(path, id)));
}

/// Sets `href` on every element from that element's own id. No element's
/// href depends on any other element.
pub fn annotate_list(records: &mut [Record], base: &HrefBase, path: &str) {
    for record in records.iter_mut() {
        annotate_record(record, base, path, None);
    }
}
