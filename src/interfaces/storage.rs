use async_trait::async_trait;

use crate::types::{Algorithm, Prediction, Project};
use crate::Result;

/// Persistence collaborator for projects, algorithms and predictions.
///
/// Project reads are join-based: a project row is merged with its algorithm
/// rows into one `Project` value keyed by project id. A project with no
/// algorithm rows is not retrievable through the join; callers register at
/// least one algorithm before reading.
#[async_trait]
pub trait PredictionStore: Send + Sync {
    /// Persist one prediction
    async fn insert_prediction(&self, prediction: &Prediction) -> Result<()>;

    /// Read a project joined with its algorithms
    async fn read_project(&self, project_id: &str) -> Result<Option<Project>>;

    /// Read all projects joined with their algorithms
    async fn read_all_projects(&self) -> Result<Vec<Project>>;

    /// Persist a project row (algorithms are stored separately)
    async fn insert_project(&self, project: &Project) -> Result<()>;

    /// Delete a project row and its algorithm rows
    async fn delete_project(&self, project_id: &str) -> Result<()>;

    /// Register an algorithm under its project
    async fn insert_algorithm(&self, algorithm: &Algorithm) -> Result<()>;

    /// Delete one algorithm from a project
    async fn delete_algorithm(&self, project_id: &str, algorithm_id: &str) -> Result<()>;
}
