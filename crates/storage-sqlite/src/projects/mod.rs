//! SQLite storage implementation for projects.

mod model;
mod repository;

pub use model::{ProjectDB, PROJECT_COLUMNS};
pub use repository::ProjectRepository;
