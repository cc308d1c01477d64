//! Backends and the adapter that executes them.
//!
//! A backend is the computation mechanism behind one registered algorithm:
//! either a fixed precomputed answer or delegation to a remote serving
//! endpoint. The variant set is closed; adding a backend kind means
//! extending the enum and the match in [`execute`].

use serde::{Deserialize, Serialize};

use crate::config::ServingConfig;
use crate::error::Result;
use crate::types::{Algorithm, Features, Labels, Prediction};

pub mod policy;
pub mod serving;
pub mod transform;

pub use policy::{AlgorithmPolicy, RandomSource, ThreadRngSource};
pub use transform::{FeatureTransformer, LabelTransformer};

/// Computation mechanism of one algorithm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Backend {
    /// Fixed, precomputed answer; used for stubs, tests and simple policies
    Local { computed: Labels },
    /// Delegation to an external serving process over HTTP.
    /// Host and port are freeform strings, validated at call time.
    RemoteServing {
        host: String,
        port: String,
        feature_transformer: FeatureTransformer,
        label_transformer: LabelTransformer,
    },
}

/// Execute one algorithm's backend against a feature payload.
///
/// `Local` backends cannot fail and never touch the network. Remote backends
/// make exactly one round trip; any retry policy belongs to the transport
/// collaborator. The returned prediction carries a fresh identifier.
pub async fn execute(
    algorithm: &Algorithm,
    features: &Features,
    serving: &ServingConfig,
) -> Result<Prediction> {
    match &algorithm.backend {
        Backend::Local { computed } => Ok(Prediction::new(
            &algorithm.project_id,
            &algorithm.id,
            features.clone(),
            computed.clone(),
        )),
        Backend::RemoteServing {
            host,
            port,
            feature_transformer,
            label_transformer,
        } => {
            serving::call(
                &algorithm.project_id,
                &algorithm.id,
                host,
                port,
                feature_transformer,
                label_transformer,
                features,
                serving,
            )
            .await
        }
    }
}
