//! Pure predicates guarding both sides of a dispatch.
//!
//! Both validators return a plain boolean; the caller decides which failure
//! kind to raise (pre-dispatch feature checks and post-dispatch label checks
//! map to different error variants).

use std::collections::HashSet;

use crate::types::{FeatureClass, Features, Labels};

/// Check a feature payload against a project's declared contract.
///
/// True iff the payload has exactly `expected_size` elements and every
/// element's runtime class matches `expected_class`. The two checks are
/// independent; both must hold. `Custom` passes the type check for any
/// element types.
pub fn validate_features(
    expected_class: FeatureClass,
    expected_size: usize,
    features: &Features,
) -> bool {
    let size_ok = features.len() == expected_size;
    let class_ok = match expected_class {
        FeatureClass::Custom => true,
        class => features.values.iter().all(|v| v.class() == class),
    };
    size_ok && class_ok
}

/// Check produced labels against a project's declared label set.
///
/// True iff the set of produced label names equals the declared set exactly;
/// neither subsets nor supersets pass.
pub fn validate_labels(expected_label_set: &[String], labels: &Labels) -> bool {
    let declared: HashSet<&str> = expected_label_set.iter().map(String::as_str).collect();
    declared == labels.names()
}
