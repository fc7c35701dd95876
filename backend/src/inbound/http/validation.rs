//! Field-level request validation shared by HTTP handlers.
//!
//! Handlers collect every offending field before responding so clients see
//! all problems at once. The resulting error carries
//! `details.fields[] = {field, code, message, value?}`.

use actix_web::web;
use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};

use crate::domain::Error;

/// Machine-readable reason attached to each field issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldErrorCode {
    MissingField,
    InvalidType,
    InvalidChoice,
    InvalidNumber,
    InvalidValue,
}

impl FieldErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidType => "invalid_type",
            Self::InvalidChoice => "invalid_choice",
            Self::InvalidNumber => "invalid_number",
            Self::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
struct FieldIssue {
    field: FieldName,
    code: FieldErrorCode,
    message: String,
    value: Option<Value>,
}

/// Accumulates field issues for a single request.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors {
    issues: Vec<FieldIssue>,
}

impl FieldErrors {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(
        &mut self,
        field: FieldName,
        code: FieldErrorCode,
        message: impl Into<String>,
        value: Option<&Value>,
    ) {
        self.issues.push(FieldIssue {
            field,
            code,
            message: message.into(),
            value: value.cloned(),
        });
    }

    pub(crate) fn missing(&mut self, field: FieldName) {
        let name = field.as_str();
        self.push(
            field,
            FieldErrorCode::MissingField,
            format!("missing required field: {name}"),
            None,
        );
    }

    /// Record the outcome of a field parser, keeping the value on success.
    pub(crate) fn check<T>(&mut self, result: Result<T, FieldRejection>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(rejection) => {
                self.issues.push(rejection.0);
                None
            }
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Convert into `Ok(())` when empty or an `invalid_request` error.
    pub(crate) fn finish(self) -> Result<(), Error> {
        if self.issues.is_empty() {
            return Ok(());
        }
        let message = match self.issues.as_slice() {
            [only] => only.message.clone(),
            many => format!("{} fields failed validation", many.len()),
        };
        let fields: Vec<Value> = self
            .issues
            .into_iter()
            .map(|issue| {
                let mut entry = json!({
                    "field": issue.field.as_str(),
                    "code": issue.code.as_str(),
                    "message": issue.message,
                });
                if let Some(value) = issue.value {
                    entry["value"] = value;
                }
                entry
            })
            .collect();
        Err(Error::invalid_request(message).with_details(json!({ "fields": fields })))
    }
}

/// A single rejected field, produced by the parsing helpers below.
#[derive(Debug)]
pub(crate) struct FieldRejection(FieldIssue);

impl FieldRejection {
    pub(crate) fn new(
        field: FieldName,
        code: FieldErrorCode,
        message: impl Into<String>,
        value: &Value,
    ) -> Self {
        Self(FieldIssue {
            field,
            code,
            message: message.into(),
            value: Some(value.clone()),
        })
    }

    /// Report this rejection on its own.
    pub(crate) fn into_error(self) -> Error {
        let mut errors = FieldErrors::new();
        errors.issues.push(self.0);
        match errors.finish() {
            Err(error) => error,
            Ok(()) => Error::invalid_request("validation failed"),
        }
    }
}

/// Accept a JSON string.
pub(crate) fn parse_string(value: &Value, field: FieldName) -> Result<&str, FieldRejection> {
    value.as_str().ok_or_else(|| {
        FieldRejection::new(
            field,
            FieldErrorCode::InvalidType,
            format!("{} must be a string", field.as_str()),
            value,
        )
    })
}

/// Accept a JSON boolean only; `0`, `1`, and `"true"` are rejected.
pub(crate) fn parse_strict_bool(value: &Value, field: FieldName) -> Result<bool, FieldRejection> {
    value.as_bool().ok_or_else(|| {
        FieldRejection::new(
            field,
            FieldErrorCode::InvalidType,
            format!("{} must be a boolean", field.as_str()),
            value,
        )
    })
}

/// Keep an explicit JSON `null` as `Some(Value::Null)`.
///
/// Paired with `#[serde(default)]`, an absent key stays `None` so optional
/// fields can tell "omitted" apart from "sent as null".
pub(crate) fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Accept a finite JSON number or a string holding one.
pub(crate) fn parse_number(value: &Value, field: FieldName) -> Result<f64, FieldRejection> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|number| number.is_finite()).ok_or_else(|| {
        FieldRejection::new(
            field,
            FieldErrorCode::InvalidNumber,
            format!("{} must be a valid number", field.as_str()),
            value,
        )
    })
}

/// Reject `value` for `field` with a caller-provided reason.
pub(crate) fn invalid_value(
    field: FieldName,
    code: FieldErrorCode,
    message: impl Into<String>,
    value: &Value,
) -> FieldRejection {
    FieldRejection::new(field, code, message, value)
}

/// JSON body extractor settings reporting malformed payloads as domain
/// errors.
pub(crate) fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid JSON body: {err}")).into()
    })
}

/// Query string extractor settings matching [`json_config`].
pub(crate) fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid query string: {err}")).into()
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    const PRICE: FieldName = FieldName::new("price");
    const AVAILABLE: FieldName = FieldName::new("available");

    #[rstest]
    #[case(json!(60), 60.0)]
    #[case(json!(59.99), 59.99)]
    #[case(json!(" 12.5 "), 12.5)]
    fn numbers_and_numeric_strings_parse(#[case] raw: Value, #[case] expected: f64) {
        assert_eq!(parse_number(&raw, PRICE).expect("valid number"), expected);
    }

    #[rstest]
    #[case(json!("abc"))]
    #[case(json!("NaN"))]
    #[case(json!("inf"))]
    #[case(json!(true))]
    #[case(json!(null))]
    fn non_numbers_are_rejected(#[case] raw: Value) {
        assert!(parse_number(&raw, PRICE).is_err());
    }

    #[rstest]
    #[case(json!(2))]
    #[case(json!(1))]
    #[case(json!("true"))]
    fn booleans_are_strict(#[case] raw: Value) {
        assert!(parse_strict_bool(&raw, AVAILABLE).is_err());
    }

    #[rstest]
    fn every_issue_is_reported() {
        let mut errors = FieldErrors::new();
        errors.missing(FieldName::new("name"));
        errors.check(parse_strict_bool(&json!(2), AVAILABLE));
        let error = errors.finish().expect_err("two issues");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().expect("details");
        let fields = details["fields"].as_array().expect("fields array");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0]["code"], "missing_field");
        assert_eq!(fields[1]["field"], "available");
        assert_eq!(fields[1]["value"], 2);
    }

    #[rstest]
    fn single_issue_keeps_its_message() {
        let error = parse_number(&json!("abc"), PRICE)
            .expect_err("not a number")
            .into_error();
        assert_eq!(error.message(), "price must be a valid number");
    }

    #[rstest]
    fn empty_collector_finishes_ok() {
        let errors = FieldErrors::new();
        assert!(errors.is_empty());
        assert!(errors.finish().is_ok());
    }
}
