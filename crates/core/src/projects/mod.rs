//! Projects module - domain models, validation, services, and traits.

mod projects_model;
mod projects_service;
mod projects_traits;
mod projects_validation;


pub use projects_model::{ConvertedBudget, ConvertedProject, CurrencyRequest, NewProject, Project};
pub use projects_service::ProjectService;
pub use projects_traits::{ProjectRepositoryTrait, ProjectServiceTrait};
pub use projects_validation::{
    validate_currency_request, validate_fixed_currency_request, validate_project_data,
    validate_project_update,
};
