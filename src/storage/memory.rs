use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use parking_lot::RwLock;

use crate::interfaces::PredictionStore;
use crate::storage::models::{join_rows, ProjectRow};
use crate::types::{Algorithm, Prediction, Project};
use crate::{Error, Result};

/// In-memory implementation of the persistence contract.
///
/// Project and algorithm rows are stored separately, exactly as a row store
/// would keep them; reads reconstruct `Project` values through the join in
/// [`join_rows`]. Registration order of algorithms is preserved.
#[derive(Clone, Default)]
pub struct MemoryStore {
    projects: Arc<RwLock<Vec<ProjectRow>>>,
    algorithms: Arc<RwLock<HashMap<String, Vec<Algorithm>>>>,
    predictions: Arc<RwLock<HashMap<String, Prediction>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted predictions; used by tests to assert write counts
    pub fn prediction_count(&self) -> usize {
        self.predictions.read().len()
    }

    /// Fetch one persisted prediction by id
    pub fn prediction(&self, id: &str) -> Option<Prediction> {
        self.predictions.read().get(id).cloned()
    }

    fn rows_for(&self, project_id: Option<&str>) -> Vec<(ProjectRow, Algorithm)> {
        let projects = self.projects.read();
        let algorithms = self.algorithms.read();
        projects
            .iter()
            .filter(|row| project_id.map_or(true, |id| row.id == id))
            .flat_map(|row| {
                algorithms
                    .get(&row.id)
                    .into_iter()
                    .flatten()
                    .map(|a| (row.clone(), a.clone()))
            })
            .collect()
    }
}

#[async_trait]
impl PredictionStore for MemoryStore {
    async fn insert_prediction(&self, prediction: &Prediction) -> Result<()> {
        debug!(
            "insert prediction: id={} project={} algorithm={}",
            prediction.id, prediction.project_id, prediction.algorithm_id
        );
        self.predictions
            .write()
            .insert(prediction.id.clone(), prediction.clone());
        Ok(())
    }

    async fn read_project(&self, project_id: &str) -> Result<Option<Project>> {
        let projects = join_rows(self.rows_for(Some(project_id)));
        Ok(projects.into_iter().next())
    }

    async fn read_all_projects(&self) -> Result<Vec<Project>> {
        Ok(join_rows(self.rows_for(None)))
    }

    async fn insert_project(&self, project: &Project) -> Result<()> {
        let mut projects = self.projects.write();
        if projects.iter().any(|row| row.id == project.id) {
            return Err(Error::storage(format!(
                "project '{}' already exists",
                project.id
            )));
        }
        projects.push(ProjectRow::from_project(project));
        if !project.algorithms.is_empty() {
            self.algorithms
                .write()
                .entry(project.id.clone())
                .or_default()
                .extend(project.algorithms.iter().cloned());
        }
        Ok(())
    }

    async fn delete_project(&self, project_id: &str) -> Result<()> {
        let mut projects = self.projects.write();
        let before = projects.len();
        projects.retain(|row| row.id != project_id);
        if projects.len() == before {
            return Err(Error::not_found(format!("project '{}'", project_id)));
        }
        self.algorithms.write().remove(project_id);
        Ok(())
    }

    async fn insert_algorithm(&self, algorithm: &Algorithm) -> Result<()> {
        let projects = self.projects.read();
        if !projects.iter().any(|row| row.id == algorithm.project_id) {
            return Err(Error::not_found(format!(
                "project '{}'",
                algorithm.project_id
            )));
        }
        drop(projects);

        let mut algorithms = self.algorithms.write();
        let entry = algorithms.entry(algorithm.project_id.clone()).or_default();
        if entry.iter().any(|a| a.id == algorithm.id) {
            return Err(Error::storage(format!(
                "algorithm '{}' already exists in project '{}'",
                algorithm.id, algorithm.project_id
            )));
        }
        entry.push(algorithm.clone());
        Ok(())
    }

    async fn delete_algorithm(&self, project_id: &str, algorithm_id: &str) -> Result<()> {
        let mut algorithms = self.algorithms.write();
        let entry = algorithms
            .get_mut(project_id)
            .ok_or_else(|| Error::not_found(format!("project '{}'", project_id)))?;
        let before = entry.len();
        entry.retain(|a| a.id != algorithm_id);
        if entry.len() == before {
            return Err(Error::not_found(format!(
                "algorithm '{}' in project '{}'",
                algorithm_id, project_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{AlgorithmPolicy, Backend};
    use crate::types::{FeatureClass, Features, Labels, ProblemType, ProjectConfig};

    fn config() -> ProjectConfig {
        ProjectConfig {
            problem_type: ProblemType::Classification,
            feature_class: FeatureClass::Double,
            feature_count: 2,
            labels: vec!["yes".to_string(), "no".to_string()],
        }
    }

    fn local(id: &str, project_id: &str) -> Algorithm {
        Algorithm::new(
            id,
            project_id,
            Backend::Local {
                computed: Labels::default(),
            },
        )
    }

    #[tokio::test]
    async fn test_read_joins_algorithm_rows() {
        let store = MemoryStore::new();
        let project = Project::new("p1", "demo", config(), AlgorithmPolicy::NoAlgorithm);
        store.insert_project(&project).await.unwrap();
        store.insert_algorithm(&local("a1", "p1")).await.unwrap();
        store.insert_algorithm(&local("a2", "p1")).await.unwrap();

        let read = store.read_project("p1").await.unwrap().unwrap();
        assert_eq!(read.id, "p1");
        assert_eq!(read.algorithm_ids(), vec!["a1", "a2"]);
    }

    #[tokio::test]
    async fn test_algorithm_less_project_is_unreadable() {
        let store = MemoryStore::new();
        let project = Project::new("p1", "demo", config(), AlgorithmPolicy::NoAlgorithm);
        store.insert_project(&project).await.unwrap();

        assert!(store.read_project("p1").await.unwrap().is_none());
        assert!(store.read_all_projects().await.unwrap().is_empty());

        // The row exists; registering an algorithm makes it visible.
        store.insert_algorithm(&local("a1", "p1")).await.unwrap();
        assert!(store.read_project("p1").await.unwrap().is_some());

        // Deleting the last algorithm hides it again.
        store.delete_algorithm("p1", "a1").await.unwrap();
        assert!(store.read_project("p1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_algorithm_requires_project() {
        let store = MemoryStore::new();
        let err = store.insert_algorithm(&local("a1", "missing")).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_duplicate_inserts_are_rejected() {
        let store = MemoryStore::new();
        let project = Project::new("p1", "demo", config(), AlgorithmPolicy::NoAlgorithm);
        store.insert_project(&project).await.unwrap();
        assert!(store.insert_project(&project).await.is_err());

        store.insert_algorithm(&local("a1", "p1")).await.unwrap();
        assert!(store.insert_algorithm(&local("a1", "p1")).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_project_removes_algorithm_rows() {
        let store = MemoryStore::new();
        let project = Project::new("p1", "demo", config(), AlgorithmPolicy::NoAlgorithm)
            .with_algorithm(local("a1", "p1"));
        store.insert_project(&project).await.unwrap();
        assert!(store.read_project("p1").await.unwrap().is_some());

        store.delete_project("p1").await.unwrap();
        assert!(store.read_project("p1").await.unwrap().is_none());
        assert!(matches!(
            store.delete_project("p1").await.unwrap_err(),
            Error::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_prediction_round_trip() {
        let store = MemoryStore::new();
        let prediction = Prediction::new(
            "p1",
            "a1",
            Features::new(FeatureClass::Custom, vec![]),
            Labels::from_pairs([("yes", 1.0)]),
        );
        store.insert_prediction(&prediction).await.unwrap();

        assert_eq!(store.prediction_count(), 1);
        let read = store.prediction(&prediction.id).unwrap();
        assert_eq!(read.project_id, "p1");
        assert_eq!(read.labels, prediction.labels);
    }
}
