use serde_json::Map;

use crate::errors::PipelineError;
use crate::model::Record;

/// Parses the comma-separated `filter` query parameter. Empty or absent
/// means no projection.
pub fn requested_fields(param: Option<&str>) -> Vec<String> {
    param
        .map(|p| {
            p.split(',')
                .filter(|field| !field.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Copies exactly the requested fields out of `record`. A requested
/// field absent from the record fails the whole projection; the source
/// record is never modified. An empty field list is the identity.
pub fn project_record(record: &Record, fields: &[String]) -> Result<Record, PipelineError> {
    if fields.is_empty() {
        return Ok(record.clone());
    }
    let mut projected = Map::new();
    for field in fields {
        match record.get(field) {
            Some(value) => {
                projected.insert(field.clone(), value.clone());
            }
            None => return Err(PipelineError::FieldNotFound(field.clone())),
        }
    }
    Ok(projected)
}

/// Projects every record in the list; the first missing field anywhere
/// rejects the whole list.
pub fn project_list(records: &[Record], fields: &[String]) -> Result<Vec<Record>, PipelineError> {
    records
        .iter()
        .map(|record| project_record(record, fields))
        .collect()
}
