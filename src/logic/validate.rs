use serde_json::Value;

use crate::errors::PipelineError;
use crate::model::{FieldRuleSet, Record};

/// The checks a rule name can resolve to. Textual names resolve through
/// this table exactly once, when the validator is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Required,
    IsString,
    IsNumber,
    Positive,
}

impl Check {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "required" => Some(Check::Required),
            "string" => Some(Check::IsString),
            "number" => Some(Check::IsNumber),
            "positive" => Some(Check::Positive),
            _ => None,
        }
    }

    fn run(&self, field: &str, value: Option<&Value>) -> Result<(), PipelineError> {
        match self {
            Check::Required => {
                if !is_set(value) {
                    return Err(PipelineError::MissingField(field.to_string()));
                }
            }
            Check::IsString => {
                if is_set(value) && !value.is_some_and(Value::is_string) {
                    return Err(PipelineError::WrongType {
                        field: field.to_string(),
                        expected: "string",
                    });
                }
            }
            Check::IsNumber => {
                if is_set(value) && !value.is_some_and(Value::is_number) {
                    return Err(PipelineError::WrongType {
                        field: field.to_string(),
                        expected: "number",
                    });
                }
            }
            Check::Positive => {
                if let Some(number) = value.and_then(Value::as_f64) {
                    if number < 0.0 {
                        return Err(PipelineError::InvalidValue(format!(
                            "{} has to be positive!",
                            field
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Absent and JSON-falsy values count as unset: `required` rejects
/// empty strings and zeros, and the type checks skip unset values so
/// optional fields stay optional.
fn is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Number(number)) => number.as_f64() != Some(0.0),
        Some(_) => true,
    }
}

#[derive(Debug)]
struct CompiledField {
    field: String,
    checks: Vec<Check>,
    default: Option<Value>,
}

/// Write-path validator compiled from a declarative rule set.
#[derive(Debug)]
pub struct Validator {
    fields: Vec<CompiledField>,
}

impl Validator {
    /// Resolves every rule name against the check table. An unknown name
    /// is a configuration defect and fails compilation, never a request.
    pub fn compile(rules: &FieldRuleSet) -> Result<Self, PipelineError> {
        let mut fields = Vec::with_capacity(rules.fields.len());
        for spec in &rules.fields {
            let mut checks = Vec::new();
            for name in spec.rules.split('|').filter(|name| !name.is_empty()) {
                match Check::from_name(name) {
                    Some(check) => checks.push(check),
                    None => return Err(PipelineError::UnknownRule(name.to_string())),
                }
            }
            fields.push(CompiledField {
                field: spec.field.clone(),
                checks,
                default: spec.default.clone(),
            });
        }
        Ok(Self { fields })
    }

    /// Runs each field's checks in declared order against the raw
    /// payload. The first failing check aborts the whole validation.
    pub fn validate(&self, payload: &Record) -> Result<(), PipelineError> {
        for field in &self.fields {
            let value = payload.get(&field.field);
            for check in &field.checks {
                check.run(&field.field, value)?;
            }
        }
        Ok(())
    }

    /// Fills configured defaults for unset fields and narrows the
    /// payload to exactly the declared fields. Extraneous keys,
    /// including any client-supplied `href`, are dropped.
    pub fn clean(&self, payload: &Record) -> Record {
        let mut cleaned = Record::new();
        for field in &self.fields {
            let value = payload.get(&field.field);
            if !is_set(value) {
                if let Some(default) = &field.default {
                    cleaned.insert(field.field.clone(), default.clone());
                    continue;
                }
            }
            if let Some(value) = value {
                cleaned.insert(field.field.clone(), value.clone());
            }
        }
        cleaned
    }

    /// Validates the raw payload first, then cleans. Validating before
    /// defaulting catches omissions the defaults would otherwise paper
    /// over.
    pub fn check(&self, payload: &Record) -> Result<Record, PipelineError> {
        self.validate(payload)?;
        Ok(self.clean(payload))
    }
}
