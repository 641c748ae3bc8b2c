use crate::errors::Result;
use crate::projects::projects_model::{ConvertedProject, CurrencyRequest, NewProject, Project};
use async_trait::async_trait;

/// Trait for project repository operations
#[async_trait]
pub trait ProjectRepositoryTrait: Send + Sync {
    /// Exact match on name and year, in storage order.
    async fn find_projects_by_name_and_year(&self, name: &str, year: i32) -> Result<Vec<Project>>;
    async fn find_project_by_id(&self, project_id: i64) -> Result<Option<Project>>;
    async fn insert_project(&self, new_project: NewProject) -> Result<()>;
    /// Returns the number of rows replaced.
    async fn update_project(&self, project: NewProject) -> Result<usize>;
    /// Returns the number of rows removed.
    async fn delete_project(&self, project_id: i64) -> Result<usize>;
}

/// Trait for project service operations
#[async_trait]
pub trait ProjectServiceTrait: Send + Sync {
    async fn get_project(&self, project_id: i64) -> Result<Project>;
    async fn create_project(&self, new_project: NewProject) -> Result<()>;
    async fn update_project(&self, project: NewProject) -> Result<()>;
    async fn delete_project(&self, project_id: i64) -> Result<()>;
    async fn convert_project_budgets(
        &self,
        request: &CurrencyRequest,
    ) -> Result<Vec<ConvertedProject>>;
}
