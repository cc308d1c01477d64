//! Storage row model and the project/algorithm join.

use serde::{Deserialize, Serialize};

use crate::types::{Algorithm, Project, ProjectConfig};
use crate::algorithm::AlgorithmPolicy;
use chrono::{DateTime, Utc};

/// A project as stored: everything but its algorithms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRow {
    pub id: String,
    pub name: String,
    pub config: ProjectConfig,
    pub policy: AlgorithmPolicy,
    pub created_at: DateTime<Utc>,
}

impl ProjectRow {
    pub fn from_project(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            config: project.config.clone(),
            policy: project.policy.clone(),
            created_at: project.created_at,
        }
    }

    fn into_project(self) -> Project {
        Project {
            id: self.id,
            name: self.name,
            config: self.config,
            algorithms: Vec::new(),
            policy: self.policy,
            created_at: self.created_at,
        }
    }
}

/// Merge (project row, algorithm row) pairs into project values.
///
/// A left fold keyed by project id: the first row seen for a project
/// contributes the project value, every row appends its algorithm.
/// First-seen order is preserved. A project that produces no rows — one with
/// zero algorithms — does not appear in the output at all.
pub fn join_rows(rows: impl IntoIterator<Item = (ProjectRow, Algorithm)>) -> Vec<Project> {
    let mut projects: Vec<Project> = Vec::new();
    for (row, algorithm) in rows {
        match projects.iter_mut().find(|p| p.id == row.id) {
            Some(project) => project.algorithms.push(algorithm),
            None => {
                let mut project = row.into_project();
                project.algorithms.push(algorithm);
                projects.push(project);
            }
        }
    }
    projects
}
