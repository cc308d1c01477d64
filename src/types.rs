//! Core data model: projects, algorithms, features, labels and predictions.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::algorithm::policy::AlgorithmPolicy;
use crate::algorithm::Backend;

/// Kind of problem a project solves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProblemType {
    Classification,
    Regression,
}

/// Declared class of a project's feature payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureClass {
    Double,
    Float,
    Int,
    String,
    /// Escape hatch for untyped payloads; matches any element type
    Custom,
}

/// One feature element, scalar or vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureValue {
    Double(f64),
    Float(f32),
    Int(i64),
    Text(String),
    DoubleVector(Vec<f64>),
    FloatVector(Vec<f32>),
    IntVector(Vec<i64>),
    TextVector(Vec<String>),
}

impl FeatureValue {
    /// Runtime class of this value; vectors share their element class
    pub fn class(&self) -> FeatureClass {
        match self {
            FeatureValue::Double(_) | FeatureValue::DoubleVector(_) => FeatureClass::Double,
            FeatureValue::Float(_) | FeatureValue::FloatVector(_) => FeatureClass::Float,
            FeatureValue::Int(_) | FeatureValue::IntVector(_) => FeatureClass::Int,
            FeatureValue::Text(_) | FeatureValue::TextVector(_) => FeatureClass::String,
        }
    }
}

/// Ordered feature payload with its declared class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Features {
    /// Class declared by the sender
    pub class: FeatureClass,
    /// Ordered feature elements
    pub values: Vec<FeatureValue>,
}

impl Features {
    pub fn new(class: FeatureClass, values: Vec<FeatureValue>) -> Self {
        Self { class, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One scored label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub score: f64,
}

impl Label {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Set of (label, score) pairs produced by a backend
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Labels {
    pub labels: Vec<Label>,
}

impl Labels {
    pub fn new(labels: Vec<Label>) -> Self {
        Self { labels }
    }

    /// Build from (name, score) pairs
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            labels: pairs
                .into_iter()
                .map(|(name, score)| Label::new(name, score))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Set of label names, used for contract checks
    pub fn names(&self) -> HashSet<&str> {
        self.labels.iter().map(|l| l.name.as_str()).collect()
    }
}

/// Per-algorithm credentials and headers for remote calls
///
/// Carried on the algorithm; injecting it into the serving call is a
/// transport-layer concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityDescriptor {
    pub headers: HashMap<String, String>,
}

impl SecurityDescriptor {
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// One concrete predictor registered under a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Algorithm {
    /// Identifier, unique within the project
    pub id: String,
    /// Owning project; always equals the project's id
    pub project_id: String,
    /// Computation mechanism
    pub backend: Backend,
    /// Credentials for remote calls
    pub security: SecurityDescriptor,
    pub created_at: DateTime<Utc>,
}

impl Algorithm {
    pub fn new(id: impl Into<String>, project_id: impl Into<String>, backend: Backend) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            backend,
            security: SecurityDescriptor::default(),
            created_at: Utc::now(),
        }
    }

    pub fn with_security(mut self, security: SecurityDescriptor) -> Self {
        self.security = security;
        self
    }
}

/// Declared feature/label contract of a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub problem_type: ProblemType,
    /// Expected class of every feature element
    pub feature_class: FeatureClass,
    /// Expected number of feature elements
    pub feature_count: usize,
    /// Declared label set
    pub labels: Vec<String>,
}

/// A named prediction target with its contract, algorithms and policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier
    pub id: String,
    pub name: String,
    pub config: ProjectConfig,
    /// Registered algorithms, in registration order
    pub algorithms: Vec<Algorithm>,
    pub policy: AlgorithmPolicy,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        config: ProjectConfig,
        policy: AlgorithmPolicy,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            config,
            algorithms: Vec::new(),
            policy,
            created_at: Utc::now(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithms.push(algorithm);
        self
    }

    /// Look up a registered algorithm by id
    pub fn algorithm(&self, id: &str) -> Option<&Algorithm> {
        self.algorithms.iter().find(|a| a.id == id)
    }

    /// Ids of the registered algorithms, in registration order
    pub fn algorithm_ids(&self) -> Vec<String> {
        self.algorithms.iter().map(|a| a.id.clone()).collect()
    }
}

/// Feedback placeholder attached to a prediction; never populated by dispatch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub features: Features,
    pub labels: Labels,
}

/// One resolved input/output pair plus the identifiers that produced it
///
/// Immutable once created; collaborators receive copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Fresh identifier, generated per call
    pub id: String,
    pub project_id: String,
    pub algorithm_id: String,
    /// Features consumed
    pub features: Features,
    /// Labels produced
    pub labels: Labels,
    pub examples: Vec<Example>,
    pub created_at: DateTime<Utc>,
}

impl Prediction {
    pub fn new(
        project_id: impl Into<String>,
        algorithm_id: impl Into<String>,
        features: Features,
        labels: Labels,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            project_id: project_id.into(),
            algorithm_id: algorithm_id.into(),
            features,
            labels,
            examples: Vec::new(),
            created_at: Utc::now(),
        }
    }
}
