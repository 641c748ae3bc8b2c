//! Projects domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Domain model representing a persisted capital project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_id: i64,
    pub project_name: String,
    pub year: i32,
    pub currency: String,
    pub initial_budget_local: f64,
    pub budget_usd: f64,
    pub initial_schedule_estimate_months: i32,
    pub adjusted_schedule_estimate_months: i32,
    pub contingency_rate: f64,
    pub escalation_rate: f64,
    pub final_budget_usd: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating or replacing a project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub project_id: i64,
    pub project_name: String,
    pub year: i32,
    pub currency: String,
    pub initial_budget_local: f64,
    pub budget_usd: f64,
    pub initial_schedule_estimate_months: i32,
    pub adjusted_schedule_estimate_months: i32,
    pub contingency_rate: f64,
    pub escalation_rate: f64,
    pub final_budget_usd: f64,
}

/// Lookup of projects by name and year, viewed in `currency`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyRequest {
    pub year: i32,
    pub project_name: String,
    pub currency: String,
}

/// Final budget expressed in another currency.
///
/// Serializes as a single `finalBudget<ccy>` entry, `<ccy>` being the
/// lowercased currency code.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedBudget {
    pub currency: String,
    pub amount: Decimal,
}

impl ConvertedBudget {
    pub fn field_name(&self) -> String {
        format!("finalBudget{}", self.currency.to_lowercase())
    }
}

impl Serialize for ConvertedBudget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field_name(), &self.amount)?;
        map.end()
    }
}

/// A project with an optional derived final budget; never persisted
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConvertedProject {
    #[serde(flatten)]
    pub project: Project,
    #[serde(flatten)]
    pub final_budget: Option<ConvertedBudget>,
}

impl ConvertedProject {
    pub fn unchanged(project: Project) -> Self {
        Self {
            project,
            final_budget: None,
        }
    }

    pub fn with_budget(project: Project, currency: &str, amount: Decimal) -> Self {
        Self {
            project,
            final_budget: Some(ConvertedBudget {
                currency: currency.to_string(),
                amount,
            }),
        }
    }
}
