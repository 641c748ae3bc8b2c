//! Database models for projects.

use capex_core::constants::TIMESTAMP_FORMAT;
use capex_core::projects::{NewProject, Project};
use chrono::NaiveDateTime;

use crate::db::{Row, SqlValue};
use crate::errors::StorageError;

/// Column list shared by every project read, in table order.
pub const PROJECT_COLUMNS: &str = "projectId, projectName, year, currency, initialBudgetLocal, \
     budgetUsd, initialScheduleEstimateMonths, adjustedScheduleEstimateMonths, contingencyRate, \
     escalationRate, finalBudgetUsd, createdAt, updatedAt";

/// Database model for projects
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDB {
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

fn parse_timestamp(row: &Row, column: &str) -> Result<NaiveDateTime, StorageError> {
    let raw = row.get_text(column)?;
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map_err(|e| StorageError::decode(column, e.to_string()))
}

impl TryFrom<&Row> for ProjectDB {
    type Error = StorageError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            project_id: row.get_i64("projectId")?,
            project_name: row.get_text("projectName")?.to_string(),
            year: row.get_i32("year")?,
            currency: row.get_text("currency")?.to_string(),
            initial_budget_local: row.get_f64("initialBudgetLocal")?,
            budget_usd: row.get_f64("budgetUsd")?,
            initial_schedule_estimate_months: row.get_i32("initialScheduleEstimateMonths")?,
            adjusted_schedule_estimate_months: row.get_i32("adjustedScheduleEstimateMonths")?,
            contingency_rate: row.get_f64("contingencyRate")?,
            escalation_rate: row.get_f64("escalationRate")?,
            final_budget_usd: row.get_f64("finalBudgetUsd")?,
            created_at: parse_timestamp(row, "createdAt")?,
            updated_at: parse_timestamp(row, "updatedAt")?,
        })
    }
}

// Conversion to domain models
impl From<ProjectDB> for Project {
    fn from(db: ProjectDB) -> Self {
        Self {
            project_id: db.project_id,
            project_name: db.project_name,
            year: db.year,
            currency: db.currency,
            initial_budget_local: db.initial_budget_local,
            budget_usd: db.budget_usd,
            initial_schedule_estimate_months: db.initial_schedule_estimate_months,
            adjusted_schedule_estimate_months: db.adjusted_schedule_estimate_months,
            contingency_rate: db.contingency_rate,
            escalation_rate: db.escalation_rate,
            final_budget_usd: db.final_budget_usd,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// Positional parameters for the eleven client-supplied columns, `projectId` first.
pub(crate) fn project_params(project: NewProject) -> Vec<SqlValue> {
    vec![
        project.project_id.into(),
        project.project_name.into(),
        project.year.into(),
        project.currency.into(),
        project.initial_budget_local.into(),
        project.budget_usd.into(),
        project.initial_schedule_estimate_months.into(),
        project.adjusted_schedule_estimate_months.into(),
        project.contingency_rate.into(),
        project.escalation_rate.into(),
        project.final_budget_usd.into(),
    ]
}
