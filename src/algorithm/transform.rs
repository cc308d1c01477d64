//! Transformer pair for remote serving backends.
//!
//! Converts between the generic feature/label representation and a serving
//! endpoint's wire JSON. Used only by the `RemoteServing` backend; both
//! directions are pure conversions with no I/O. A feature-transform failure
//! is raised before any network call is made.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::types::{FeatureValue, Features, Label, Labels};

/// Conversion from the generic feature representation to a wire payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureTransformer {
    /// Flat JSON array of feature values, scalars and vectors as-is
    Json,
    /// TensorFlow-Serving style `{"instances": [[..]]}` with one numeric
    /// row; rejects text features
    Instances,
}

impl FeatureTransformer {
    pub fn transform(&self, features: &Features) -> Result<Value> {
        match self {
            FeatureTransformer::Json => {
                let values: Result<Vec<Value>> =
                    features.values.iter().map(feature_to_json).collect();
                Ok(Value::Array(values?))
            }
            FeatureTransformer::Instances => {
                let mut row = Vec::new();
                for value in &features.values {
                    match value {
                        FeatureValue::Double(v) => row.push(number(*v)?),
                        FeatureValue::Float(v) => row.push(number(f64::from(*v))?),
                        FeatureValue::Int(v) => row.push(json!(v)),
                        FeatureValue::DoubleVector(vs) => {
                            for v in vs {
                                row.push(number(*v)?);
                            }
                        }
                        FeatureValue::FloatVector(vs) => {
                            for v in vs {
                                row.push(number(f64::from(*v))?);
                            }
                        }
                        FeatureValue::IntVector(vs) => {
                            for v in vs {
                                row.push(json!(v));
                            }
                        }
                        FeatureValue::Text(_) | FeatureValue::TextVector(_) => {
                            return Err(Error::features_transformer(
                                "instances payload accepts numeric features only",
                            ));
                        }
                    }
                }
                Ok(json!({ "instances": [row] }))
            }
        }
    }
}

fn feature_to_json(value: &FeatureValue) -> Result<Value> {
    match value {
        FeatureValue::Double(v) => number(*v),
        FeatureValue::Float(v) => number(f64::from(*v)),
        FeatureValue::Int(v) => Ok(json!(v)),
        FeatureValue::Text(v) => Ok(json!(v)),
        FeatureValue::DoubleVector(vs) => {
            let row: Result<Vec<Value>> = vs.iter().map(|v| number(*v)).collect();
            Ok(Value::Array(row?))
        }
        FeatureValue::FloatVector(vs) => {
            let row: Result<Vec<Value>> = vs.iter().map(|v| number(f64::from(*v))).collect();
            Ok(Value::Array(row?))
        }
        FeatureValue::IntVector(vs) => Ok(json!(vs)),
        FeatureValue::TextVector(vs) => Ok(json!(vs)),
    }
}

fn number(v: f64) -> Result<Value> {
    serde_json::Number::from_f64(v)
        .map(Value::Number)
        .ok_or_else(|| {
            Error::features_transformer(format!("non-finite value {} cannot be encoded", v))
        })
}

/// Wire shape of one labelled score in the `Json` label format
#[derive(Debug, Deserialize)]
struct WireLabel {
    label: String,
    score: f64,
}

/// Conversion from a serving endpoint's wire response to labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LabelTransformer {
    /// Expects `{"labels": [{"label": "..", "score": ..}, ..]}`
    Json,
    /// Expects `{"predictions": [[s0, s1, ..]]}`; scores are mapped onto the
    /// declared label names positionally
    Scores(Vec<String>),
}

impl LabelTransformer {
    pub fn transform(&self, body: &Value) -> Result<Labels> {
        match self {
            LabelTransformer::Json => {
                let wire = body
                    .get("labels")
                    .ok_or_else(|| Error::labels_transformer("response has no 'labels' field"))?;
                let labels: Vec<WireLabel> = serde_json::from_value(wire.clone()).map_err(|e| {
                    Error::labels_transformer(format!("malformed label entries: {}", e))
                })?;
                Ok(Labels::new(
                    labels
                        .into_iter()
                        .map(|l| Label::new(l.label, l.score))
                        .collect(),
                ))
            }
            LabelTransformer::Scores(names) => {
                let row = body
                    .get("predictions")
                    .and_then(Value::as_array)
                    .and_then(|rows| rows.first())
                    .and_then(Value::as_array)
                    .ok_or_else(|| {
                        Error::labels_transformer("response has no prediction score row")
                    })?;
                if row.len() != names.len() {
                    return Err(Error::labels_transformer(format!(
                        "expected {} scores, endpoint returned {}",
                        names.len(),
                        row.len()
                    )));
                }
                let mut labels = Vec::with_capacity(names.len());
                for (name, score) in names.iter().zip(row) {
                    let score = score.as_f64().ok_or_else(|| {
                        Error::labels_transformer(format!("non-numeric score {}", score))
                    })?;
                    labels.push(Label::new(name.clone(), score));
                }
                Ok(Labels::new(labels))
            }
        }
    }
}
