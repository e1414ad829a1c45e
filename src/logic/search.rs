use serde_json::Value;

use crate::errors::PipelineError;
use crate::model::Record;

/// Keeps the records matching every search term: string fields match on
/// substring containment, numeric fields on exact equality with the term
/// parsed as a number. A term naming a field a record does not carry is
/// an error. Terms are intersected, so their order does not matter.
pub fn search_records(
    records: Vec<Record>,
    terms: &[(String, String)],
) -> Result<Vec<Record>, PipelineError> {
    let mut items = records;
    for (key, term) in terms {
        let mut kept = Vec::with_capacity(items.len());
        for record in items {
            match record.get(key.as_str()) {
                Some(Value::String(text)) => {
                    if text.contains(term.as_str()) {
                        kept.push(record);
                    }
                }
                Some(Value::Number(number)) => {
                    let matches = term
                        .parse::<f64>()
                        .map(|wanted| number.as_f64() == Some(wanted))
                        .unwrap_or(false);
                    if matches {
                        kept.push(record);
                    }
                }
                Some(Value::Null) | None => {
                    return Err(PipelineError::FieldNotFound(key.clone()))
                }
                // other value types are not searchable and pass through
                Some(_) => kept.push(record),
            }
        }
        items = kept;
    }
    Ok(items)
}
