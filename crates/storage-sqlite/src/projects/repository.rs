//! Project repository implementation over the query executor.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use capex_core::constants::TIMESTAMP_FORMAT;
use capex_core::errors::{DatabaseError, Error, Result};
use capex_core::projects::{NewProject, Project, ProjectRepositoryTrait};

use super::model::{project_params, ProjectDB, PROJECT_COLUMNS};
use crate::db::{QueryExecutor, Row, SqlValue};

pub struct ProjectRepository {
    executor: Arc<dyn QueryExecutor>,
}

impl ProjectRepository {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self { executor }
    }

    async fn select(&self, filter: &str, params: Vec<SqlValue>) -> Result<Vec<Project>> {
        let sql = format!("SELECT {} FROM project WHERE {}", PROJECT_COLUMNS, filter);
        let rows = self.executor.execute(&sql, params).await?.into_rows();
        rows.iter().map(to_project).collect()
    }
}

fn to_project(row: &Row) -> Result<Project> {
    let db = ProjectDB::try_from(row)?;
    Ok(db.into())
}

fn now() -> String {
    Utc::now().naive_utc().format(TIMESTAMP_FORMAT).to_string()
}

#[async_trait]
impl ProjectRepositoryTrait for ProjectRepository {
    async fn find_projects_by_name_and_year(&self, name: &str, year: i32) -> Result<Vec<Project>> {
        self.select(
            "projectName = ?1 AND year = ?2",
            vec![name.into(), year.into()],
        )
        .await
    }

    async fn find_project_by_id(&self, project_id: i64) -> Result<Option<Project>> {
        let mut projects = self
            .select("projectId = ?1", vec![project_id.into()])
            .await?;
        Ok(projects.pop())
    }

    async fn insert_project(&self, new_project: NewProject) -> Result<()> {
        let project_id = new_project.project_id;
        let timestamp = now();
        let mut params = project_params(new_project);
        params.push(timestamp.clone().into());
        params.push(timestamp.into());

        let sql = format!(
            "INSERT INTO project ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            PROJECT_COLUMNS
        );
        let affected = self
            .executor
            .execute(&sql, params)
            .await
            .map_err(|e| match e {
                Error::Database(DatabaseError::UniqueViolation(_)) => {
                    Error::Database(DatabaseError::UniqueViolation(format!(
                        "Project with id {} already exists",
                        project_id
                    )))
                }
                other => other,
            })?
            .affected();

        if affected == 0 {
            return Err(Error::Database(DatabaseError::NoRowsAffected(format!(
                "insert of project {}",
                project_id
            ))));
        }
        Ok(())
    }

    async fn update_project(&self, project: NewProject) -> Result<usize> {
        let mut params = project_params(project);
        params.push(now().into());

        let output = self
            .executor
            .execute(
                "UPDATE project SET projectName = ?2, year = ?3, currency = ?4, \
                 initialBudgetLocal = ?5, budgetUsd = ?6, initialScheduleEstimateMonths = ?7, \
                 adjustedScheduleEstimateMonths = ?8, contingencyRate = ?9, escalationRate = ?10, \
                 finalBudgetUsd = ?11, updatedAt = ?12 WHERE projectId = ?1",
                params,
            )
            .await?;
        Ok(output.affected())
    }

    async fn delete_project(&self, project_id: i64) -> Result<usize> {
        let output = self
            .executor
            .execute(
                "DELETE FROM project WHERE projectId = ?1",
                vec![project_id.into()],
            )
            .await?;
        Ok(output.affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{open, run_migrations, QueryOutput, StorageEngine};

    async fn repository() -> ProjectRepository {
        let executor = open(&StorageEngine::Memory).unwrap();
        run_migrations(executor.as_ref()).await.unwrap();
        ProjectRepository::new(executor)
    }

    fn new_project(id: i64, name: &str, year: i32) -> NewProject {
        NewProject {
            project_id: id,
            project_name: name.to_string(),
            year,
            currency: "EUR".to_string(),
            initial_budget_local: 1000.0,
            budget_usd: 1100.0,
            initial_schedule_estimate_months: 12,
            adjusted_schedule_estimate_months: 14,
            contingency_rate: 2.5,
            escalation_rate: 3.0,
            final_budget_usd: 1234.56,
        }
    }

    fn assert_same_fields(stored: &Project, input: &NewProject) {
        assert_eq!(stored.project_id, input.project_id);
        assert_eq!(stored.project_name, input.project_name);
        assert_eq!(stored.year, input.year);
        assert_eq!(stored.currency, input.currency);
        assert_eq!(stored.initial_budget_local, input.initial_budget_local);
        assert_eq!(stored.budget_usd, input.budget_usd);
        assert_eq!(
            stored.initial_schedule_estimate_months,
            input.initial_schedule_estimate_months
        );
        assert_eq!(
            stored.adjusted_schedule_estimate_months,
            input.adjusted_schedule_estimate_months
        );
        assert_eq!(stored.contingency_rate, input.contingency_rate);
        assert_eq!(stored.escalation_rate, input.escalation_rate);
        assert_eq!(stored.final_budget_usd, input.final_budget_usd);
    }

    #[tokio::test]
    async fn test_insert_then_find_by_id() {
        let repo = repository().await;
        let input = new_project(10001, "Bridge", 2021);

        repo.insert_project(input.clone()).await.unwrap();
        let stored = repo.find_project_by_id(10001).await.unwrap().unwrap();
        assert_same_fields(&stored, &input);
        assert_eq!(stored.created_at, stored.updated_at);
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_none() {
        let repo = repository().await;
        assert!(repo.find_project_by_id(999_999_999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected_and_original_kept() {
        let repo = repository().await;
        let original = new_project(7, "Bridge", 2021);
        repo.insert_project(original.clone()).await.unwrap();

        let err = repo
            .insert_project(new_project(7, "Tunnel", 2022))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::UniqueViolation(ref m))
                if m == "Project with id 7 already exists"
        ));

        let stored = repo.find_project_by_id(7).await.unwrap().unwrap();
        assert_same_fields(&stored, &original);
    }

    #[tokio::test]
    async fn test_find_by_name_and_year_is_exact() {
        let repo = repository().await;
        repo.insert_project(new_project(1, "Bridge", 2021)).await.unwrap();
        repo.insert_project(new_project(2, "Bridge", 2021)).await.unwrap();
        repo.insert_project(new_project(3, "Bridge", 2022)).await.unwrap();
        repo.insert_project(new_project(4, "bridge", 2021)).await.unwrap();

        let found = repo
            .find_projects_by_name_and_year("Bridge", 2021)
            .await
            .unwrap();
        let mut ids: Vec<i64> = found.iter().map(|p| p.project_id).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2]);

        let none = repo
            .find_projects_by_name_and_year("Dam", 2021)
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_report_affected_rows() {
        let repo = repository().await;
        repo.insert_project(new_project(5, "Dam", 2023)).await.unwrap();

        let mut changed = new_project(5, "Dam Phase 2", 2024);
        changed.final_budget_usd = 99.5;
        assert_eq!(repo.update_project(changed.clone()).await.unwrap(), 1);
        let stored = repo.find_project_by_id(5).await.unwrap().unwrap();
        assert_same_fields(&stored, &changed);

        assert_eq!(repo.update_project(new_project(6, "Ghost", 2024)).await.unwrap(), 0);

        assert_eq!(repo.delete_project(5).await.unwrap(), 1);
        assert_eq!(repo.delete_project(5).await.unwrap(), 0);
        assert!(repo.find_project_by_id(5).await.unwrap().is_none());
    }

    struct SilentExecutor;

    #[async_trait]
    impl QueryExecutor for SilentExecutor {
        async fn execute(&self, _sql: &str, _params: Vec<SqlValue>) -> Result<QueryOutput> {
            Ok(QueryOutput::Affected(0))
        }
    }

    #[tokio::test]
    async fn test_insert_with_no_rows_affected_is_error() {
        let repo = ProjectRepository::new(Arc::new(SilentExecutor));
        let err = repo
            .insert_project(new_project(1, "Bridge", 2021))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::NoRowsAffected(_))
        ));
    }

    struct MalformedRowExecutor;

    #[async_trait]
    impl QueryExecutor for MalformedRowExecutor {
        async fn execute(&self, _sql: &str, _params: Vec<SqlValue>) -> Result<QueryOutput> {
            let columns: Arc<[String]> = vec!["projectId".to_string()].into();
            Ok(QueryOutput::Rows(vec![Row::new(
                columns,
                vec![SqlValue::Text("not-a-number".to_string())],
            )]))
        }
    }

    #[tokio::test]
    async fn test_malformed_row_is_decode_error() {
        let repo = ProjectRepository::new(Arc::new(MalformedRowExecutor));
        let err = repo.find_project_by_id(1).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::Decode(ref m)) if m.contains("projectId")
        ));
    }

    #[tokio::test]
    async fn test_file_engine_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capex.db");

        {
            let executor = open(&StorageEngine::File(path.clone())).unwrap();
            run_migrations(executor.as_ref()).await.unwrap();
            ProjectRepository::new(executor)
                .insert_project(new_project(42, "Harbour", 2025))
                .await
                .unwrap();
        }

        let executor = open(&StorageEngine::File(path)).unwrap();
        run_migrations(executor.as_ref()).await.unwrap();
        let stored = ProjectRepository::new(executor)
            .find_project_by_id(42)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.project_name, "Harbour");
    }
}
