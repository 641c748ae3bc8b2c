//! Payload validation for project and currency-conversion requests.
//!
//! Validators inspect raw JSON and either hand back the typed request or the
//! first problem found. They never touch storage.

use serde_json::{Map, Value};

use super::projects_model::{CurrencyRequest, NewProject};
use crate::constants::{CURRENCY_CODE_LENGTH, MIN_PROJECT_YEAR};
use crate::errors::ValidationError;

/// Fields a project payload must carry, in reporting order.
const REQUIRED_PROJECT_FIELDS: [&str; 11] = [
    "projectId",
    "projectName",
    "year",
    "currency",
    "initialBudgetLocal",
    "budgetUsd",
    "initialScheduleEstimateMonths",
    "adjustedScheduleEstimateMonths",
    "contingencyRate",
    "escalationRate",
    "finalBudgetUsd",
];

type ValidationResult<T> = std::result::Result<T, ValidationError>;

fn as_object(payload: &Value) -> ValidationResult<&Map<String, Value>> {
    payload.as_object().ok_or_else(|| {
        ValidationError::InvalidInput("request body must be a JSON object".to_string())
    })
}

/// Integral JSON number, accepting `2021.0` the same as `2021`.
fn as_integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

fn is_currency_code(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|code| code.chars().count() == CURRENCY_CODE_LENGTH)
}

/// Absent, null, `false`, `0` and `""` all count as not provided.
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn number_field(data: &Map<String, Value>, field: &str) -> ValidationResult<f64> {
    data.get(field)
        .and_then(Value::as_f64)
        .ok_or_else(|| ValidationError::InvalidField(field.to_string()))
}

fn integer_field(data: &Map<String, Value>, field: &str) -> ValidationResult<i64> {
    data.get(field)
        .and_then(as_integer)
        .ok_or_else(|| ValidationError::InvalidField(field.to_string()))
}

fn i32_field(data: &Map<String, Value>, field: &str) -> ValidationResult<i32> {
    i32::try_from(integer_field(data, field)?)
        .map_err(|_| ValidationError::InvalidField(field.to_string()))
}

fn string_field(data: &Map<String, Value>, field: &str) -> ValidationResult<String> {
    data.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ValidationError::InvalidField(field.to_string()))
}

/// Checks a project payload and returns the typed project.
///
/// Every field of [`REQUIRED_PROJECT_FIELDS`] must be present and non-null,
/// `year` must be an integer no earlier than 2000 and `currency` a
/// three-character string. Remaining fields must carry the right JSON type.
pub fn validate_project_data(payload: &Value) -> ValidationResult<NewProject> {
    let data = as_object(payload)?;

    for field in REQUIRED_PROJECT_FIELDS {
        if data.get(field).map_or(true, Value::is_null) {
            return Err(ValidationError::MissingField(field.to_string()));
        }
    }

    let year = data
        .get("year")
        .and_then(as_integer)
        .filter(|year| *year >= MIN_PROJECT_YEAR)
        .and_then(|year| i32::try_from(year).ok())
        .ok_or(ValidationError::InvalidYear)?;

    if !data.get("currency").is_some_and(is_currency_code) {
        return Err(ValidationError::InvalidCurrency);
    }

    Ok(NewProject {
        project_id: integer_field(data, "projectId")?,
        project_name: string_field(data, "projectName")?,
        year,
        currency: string_field(data, "currency")?,
        initial_budget_local: number_field(data, "initialBudgetLocal")?,
        budget_usd: number_field(data, "budgetUsd")?,
        initial_schedule_estimate_months: i32_field(data, "initialScheduleEstimateMonths")?,
        adjusted_schedule_estimate_months: i32_field(data, "adjustedScheduleEstimateMonths")?,
        contingency_rate: number_field(data, "contingencyRate")?,
        escalation_rate: number_field(data, "escalationRate")?,
        final_budget_usd: number_field(data, "finalBudgetUsd")?,
    })
}

/// Checks a replacement payload for the project identified by `project_id`.
///
/// The path id wins over any `projectId` in the body.
pub fn validate_project_update(project_id: i64, payload: &Value) -> ValidationResult<NewProject> {
    let mut data = as_object(payload)?.clone();
    data.insert("projectId".to_string(), Value::from(project_id));
    validate_project_data(&Value::Object(data))
}

/// Checks a currency-conversion request.
///
/// `year`, `projectName` and `currency` must all be provided, `year` must be
/// an integer and `currency` a three-character string.
pub fn validate_currency_request(payload: &Value) -> ValidationResult<CurrencyRequest> {
    let data = as_object(payload)?;

    if ["year", "projectName", "currency"]
        .iter()
        .any(|field| is_blank(data.get(*field)))
    {
        return Err(ValidationError::MissingFields(
            "year, projectName, currency".to_string(),
        ));
    }

    let year = data
        .get("year")
        .and_then(as_integer)
        .ok_or(ValidationError::YearNotInteger)?;
    let year = i32::try_from(year).map_err(|_| ValidationError::YearNotInteger)?;

    if !data.get("currency").is_some_and(is_currency_code) {
        return Err(ValidationError::CurrencyCodeLength);
    }

    Ok(CurrencyRequest {
        year,
        project_name: string_field(data, "projectName")?,
        currency: string_field(data, "currency")?,
    })
}

/// Checks a `{projectName, year}` request whose target currency is fixed.
pub fn validate_fixed_currency_request(
    payload: &Value,
    currency: &str,
) -> ValidationResult<CurrencyRequest> {
    let data = as_object(payload)?;

    if ["year", "projectName"]
        .iter()
        .any(|field| is_blank(data.get(*field)))
    {
        return Err(ValidationError::MissingFields("year, projectName".to_string()));
    }

    let mut data = data.clone();
    data.insert("currency".to_string(), Value::from(currency));
    validate_currency_request(&Value::Object(data))
}
