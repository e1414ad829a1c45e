use crate::errors::PipelineError;
use crate::model::Record;

/// Offset/limit window parsed from the raw query parameter strings.
/// Applies to list results only; single-record results never see it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

impl PageWindow {
    /// Parses the raw `offset`/`limit` strings. Offset must be a
    /// non-negative integer, limit a positive one.
    pub fn parse(offset: Option<&str>, limit: Option<&str>) -> Result<Self, PipelineError> {
        let offset = match offset {
            Some(raw) => {
                let value: i64 = raw.parse().map_err(|_| {
                    PipelineError::InvalidRange(format!("given offset is not a valid number {}", raw))
                })?;
                if value < 0 {
                    return Err(PipelineError::InvalidRange("offset is negative".to_string()));
                }
                Some(value as usize)
            }
            None => None,
        };
        let limit = match limit {
            Some(raw) => {
                let value: i64 = raw.parse().map_err(|_| {
                    PipelineError::InvalidRange(format!("given limit is not a valid number {}", raw))
                })?;
                if value < 1 {
                    return Err(PipelineError::InvalidRange(
                        "limit is zero or negative".to_string(),
                    ));
                }
                Some(value as usize)
            }
            None => None,
        };
        Ok(Self { offset, limit })
    }

    /// Skip-then-take over a list result: offset drops leading elements
    /// and must stay strictly inside the list, limit then truncates.
    pub fn apply(&self, mut items: Vec<Record>) -> Result<Vec<Record>, PipelineError> {
        if let Some(offset) = self.offset {
            if offset >= items.len() {
                return Err(PipelineError::InvalidRange(
                    "offset must not be bigger than the source length".to_string(),
                ));
            }
            items.drain(..offset);
        }
        if let Some(limit) = self.limit {
            items.truncate(limit);
        }
        Ok(items)
    }
}
