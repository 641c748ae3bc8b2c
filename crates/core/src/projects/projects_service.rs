use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::projects_model::{ConvertedProject, CurrencyRequest, NewProject, Project};
use super::projects_traits::{ProjectRepositoryTrait, ProjectServiceTrait};
use crate::constants::BASE_CURRENCY;
use crate::errors::{Error, Result};
use crate::fx::{round_amount, FxError, FxServiceTrait};

const PROJECT_NOT_FOUND: &str = "Project not found";

pub struct ProjectService {
    repository: Arc<dyn ProjectRepositoryTrait>,
    fx_service: Arc<dyn FxServiceTrait>,
}

impl ProjectService {
    pub fn new(
        repository: Arc<dyn ProjectRepositoryTrait>,
        fx_service: Arc<dyn FxServiceTrait>,
    ) -> Self {
        Self {
            repository,
            fx_service,
        }
    }

    async fn convert_project(&self, project: Project, currency: &str) -> Result<ConvertedProject> {
        if currency == BASE_CURRENCY {
            return Ok(ConvertedProject::unchanged(project));
        }

        let amount = Decimal::try_from(project.final_budget_usd)
            .map_err(|_| FxError::AmountOutOfRange(project.final_budget_usd.to_string()))?;
        let converted = self
            .fx_service
            .convert_currency(amount, BASE_CURRENCY, currency)
            .await?;
        Ok(ConvertedProject::with_budget(
            project,
            currency,
            round_amount(converted),
        ))
    }
}

#[async_trait]
impl ProjectServiceTrait for ProjectService {
    async fn get_project(&self, project_id: i64) -> Result<Project> {
        self.repository
            .find_project_by_id(project_id)
            .await?
            .ok_or_else(|| Error::NotFound(PROJECT_NOT_FOUND.to_string()))
    }

    async fn create_project(&self, new_project: NewProject) -> Result<()> {
        log::debug!("Creating project {}", new_project.project_id);
        self.repository.insert_project(new_project).await
    }

    async fn update_project(&self, project: NewProject) -> Result<()> {
        let project_id = project.project_id;
        if self.repository.update_project(project).await? == 0 {
            log::debug!("Update matched no project with id {}", project_id);
            return Err(Error::NotFound(PROJECT_NOT_FOUND.to_string()));
        }
        Ok(())
    }

    async fn delete_project(&self, project_id: i64) -> Result<()> {
        if self.repository.delete_project(project_id).await? == 0 {
            return Err(Error::NotFound(PROJECT_NOT_FOUND.to_string()));
        }
        Ok(())
    }

    /// Converts each matching project one after another, in storage order.
    async fn convert_project_budgets(
        &self,
        request: &CurrencyRequest,
    ) -> Result<Vec<ConvertedProject>> {
        let projects = self
            .repository
            .find_projects_by_name_and_year(&request.project_name, request.year)
            .await?;

        if projects.is_empty() {
            return Err(Error::NotFound(PROJECT_NOT_FOUND.to_string()));
        }

        let mut converted = Vec::with_capacity(projects.len());
        for project in projects {
            converted.push(self.convert_project(project, &request.currency).await?);
        }
        Ok(converted)
    }
}
