//! Prediction dispatch orchestration.
//!
//! One call runs the request through a fixed sequence: input validation,
//! algorithm resolution (explicit id or policy), backend execution, output
//! validation on the explicit path, persistence, and best-effort event
//! publication. Each request is independent; the dispatcher holds no mutable
//! state of its own and no lock across a suspension point.

use std::sync::Arc;

use log::{debug, warn};

use crate::algorithm::{self, policy, RandomSource, ThreadRngSource};
use crate::config::{Config, PublishConfig, ServingConfig};
use crate::error::{Error, Result, WithErrorContext};
use crate::event::PredictionEvent;
use crate::interfaces::{EventPublisher, PredictionStore};
use crate::types::{Algorithm, Features, Prediction, Project};
use crate::validation::{validate_features, validate_labels};

/// Orchestrates prediction requests across the validator, policy, backend
/// adapter and the storage/publication collaborators.
#[derive(Clone)]
pub struct PredictionDispatcher {
    store: Arc<dyn PredictionStore>,
    events: Arc<dyn EventPublisher>,
    serving: ServingConfig,
    publish: PublishConfig,
    rng: Arc<dyn RandomSource>,
}

impl PredictionDispatcher {
    pub fn new(
        store: Arc<dyn PredictionStore>,
        events: Arc<dyn EventPublisher>,
        config: &Config,
    ) -> Self {
        Self {
            store,
            events,
            serving: config.serving.clone(),
            publish: config.publish.clone(),
            rng: Arc::new(ThreadRngSource),
        }
    }

    /// Replace the random source used for weighted policy selection
    pub fn with_random_source(mut self, rng: Arc<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    /// Run one prediction request against a project.
    ///
    /// When `algorithm_id` is given the named algorithm is used and the
    /// produced labels are checked against the project's declared label set;
    /// otherwise the project's policy selects, and the labels are trusted as
    /// registered. The prediction is persisted before it is returned;
    /// publication is fire-and-forget.
    pub async fn predict(
        &self,
        project: &Project,
        features: Features,
        algorithm_id: Option<&str>,
    ) -> Result<Prediction> {
        if !validate_features(
            project.config.feature_class,
            project.config.feature_count,
            &features,
        ) {
            return Err(Error::features_validation(format!(
                "payload does not match declared contract of project '{}' (class {:?}, size {})",
                project.id, project.config.feature_class, project.config.feature_count
            )));
        }

        let algorithm = self.resolve_algorithm(project, algorithm_id)?;
        debug!(
            "dispatch: project={} algorithm={} explicit={}",
            project.id,
            algorithm.id,
            algorithm_id.is_some()
        );

        let prediction = algorithm::execute(&algorithm, &features, &self.serving).await?;

        // Only explicitly named algorithms have their output re-checked;
        // policy-selected algorithms are trusted as registered.
        if algorithm_id.is_some() && !validate_labels(&project.config.labels, &prediction.labels) {
            return Err(Error::labels_validation(format!(
                "algorithm '{}' produced labels outside the declared set of project '{}'",
                algorithm.id, project.id
            )));
        }

        self.store
            .insert_prediction(&prediction)
            .await
            .with_context(format!("persisting prediction '{}'", prediction.id))?;

        if self.publish.enabled {
            let events = Arc::clone(&self.events);
            let event = PredictionEvent::completed(&prediction, &self.publish.stream);
            tokio::spawn(async move {
                if let Err(e) = events.publish(event).await {
                    warn!("prediction event publish failed: {}", e);
                }
            });
        }

        Ok(prediction)
    }

    /// Look the project up through the storage collaborator, then dispatch.
    pub async fn predict_for_project(
        &self,
        project_id: &str,
        features: Features,
        algorithm_id: Option<&str>,
    ) -> Result<Prediction> {
        let project = self
            .store
            .read_project(project_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("project '{}'", project_id)))?;
        self.predict(&project, features, algorithm_id).await
    }

    /// Resolve the algorithm for this request, cloning it out of the project
    /// so a concurrent delete cannot touch the in-flight value.
    fn resolve_algorithm(
        &self,
        project: &Project,
        algorithm_id: Option<&str>,
    ) -> Result<Algorithm> {
        match algorithm_id {
            Some(id) => project.algorithm(id).cloned().ok_or_else(|| {
                Error::invalid_argument(format!(
                    "algorithm '{}' is not registered under project '{}'",
                    id, project.id
                ))
            }),
            None => {
                let available = project.algorithm_ids();
                let selected = policy::select(&project.policy, &available, self.rng.as_ref())
                    .ok_or_else(|| {
                        Error::no_algorithm(format!(
                            "policy of project '{}' selected nothing",
                            project.id
                        ))
                    })?;
                project.algorithm(&selected).cloned().ok_or_else(|| {
                    Error::no_algorithm(format!(
                        "policy of project '{}' selected unregistered algorithm '{}'",
                        project.id, selected
                    ))
                })
            }
        }
    }
}
