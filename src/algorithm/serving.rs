//! Remote serving call.
//!
//! One synchronous-style round trip per prediction: POST the transformed
//! features as JSON to `http://{host}:{port}/` and convert the JSON response
//! back through the label transformer. A fresh client is built per
//! invocation with the configured timeout; a timeout surfaces like any other
//! serving failure.

use std::time::Duration;

use log::debug;

use crate::config::ServingConfig;
use crate::error::{Error, Result};
use crate::types::{Features, Prediction};

use super::transform::{FeatureTransformer, LabelTransformer};

#[allow(clippy::too_many_arguments)]
pub(crate) async fn call(
    project_id: &str,
    algorithm_id: &str,
    host: &str,
    port: &str,
    feature_transformer: &FeatureTransformer,
    label_transformer: &LabelTransformer,
    features: &Features,
    serving: &ServingConfig,
) -> Result<Prediction> {
    // Transform before touching the network; a payload the backend cannot
    // accept must fail locally.
    let payload = feature_transformer.transform(features)?;

    // Host and port are freeform strings; malformed configuration is caught
    // here rather than at registration time.
    let url = format!("http://{}:{}/", host, port);
    let url = reqwest::Url::parse(&url)
        .map_err(|e| Error::invalid_argument(format!("invalid serving address '{}:{}': {}", host, port, e)))?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(serving.timeout_secs))
        .build()
        .map_err(|e| Error::serving(format!("failed to build HTTP client: {}", e)))?;

    debug!(
        "serving call: project={} algorithm={} url={}",
        project_id, algorithm_id, url
    );

    let response = client
        .post(url)
        .json(&payload)
        .send()
        .await
        .map_err(|e| Error::serving(format!("serving request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(Error::serving(format!(
            "serving endpoint returned status {}",
            response.status()
        )));
    }

    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| Error::serving(format!("failed to decode serving response: {}", e)))?;

    let labels = label_transformer.transform(&body)?;
    Ok(Prediction::new(project_id, algorithm_id, features.clone(), labels))
}
