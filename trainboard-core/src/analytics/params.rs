//! Hyperparameter prettification.

use std::cmp::Ordering;

use serde_json::{Map, Value};

/// Known parameters: raw name, display label. Order is the canonical
/// display order; unknown parameters follow alphabetically.
const KNOWN_PARAMS: &[(&str, &str)] = &[
    ("C", "Regularization (C)"),
    ("kernel", "Kernel"),
    ("gamma", "Gamma"),
    ("n_neighbors", "Neighbors (k)"),
    ("weights", "Neighbor weighting"),
    ("p", "Distance power (p)"),
    ("n_estimators", "Number of trees"),
    ("max_depth", "Max depth"),
    ("min_samples_split", "Min samples to split"),
    ("class_weight", "Class weight"),
    ("var_smoothing", "Variance smoothing"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct ParamRow {
    /// Name as sent by the service, e.g. `clf__max_depth`
    pub raw_name: String,
    /// Name with any pipeline-stage prefix removed
    pub name: String,
    pub label: String,
    pub value: String,
}

/// Drop a pipeline-stage prefix: `clf__max_depth` -> `max_depth`.
pub fn strip_stage_prefix(name: &str) -> &str {
    match name.rsplit_once("__") {
        Some((_, param)) if !param.is_empty() => param,
        _ => name,
    }
}

fn canonical_rank(name: &str) -> Option<usize> {
    KNOWN_PARAMS.iter().position(|(k, _)| *k == name)
}

pub fn param_label(name: &str) -> String {
    KNOWN_PARAMS
        .iter()
        .find(|(k, _)| *k == name)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Human-readable rendering of a parameter value.
pub fn pretty_value(value: &Value) -> String {
    match value {
        Value::Null => "none".to_string(),
        Value::Bool(true) => "yes".to_string(),
        Value::Bool(false) => "no".to_string(),
        Value::String(s) => match s.as_str() {
            "balanced" => "balanced weights".to_string(),
            "auto" => "automatic".to_string(),
            "scale" => "scaled to feature variance".to_string(),
            "None" | "null" => "none".to_string(),
            other => other.to_string(),
        },
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                if f != 0.0 && (f.abs() < 1e-3 || f.abs() >= 1e6) {
                    format!("{:e}", f)
                } else {
                    format!("{}", f)
                }
            }
        }
        other => other.to_string(),
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    match (canonical_rank(a), canonical_rank(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Turn a raw `best_params` mapping into sorted display rows.
pub fn prettify_params(params: &Map<String, Value>) -> Vec<ParamRow> {
    let mut rows: Vec<ParamRow> = params
        .iter()
        .map(|(raw, value)| {
            let name = strip_stage_prefix(raw);
            ParamRow {
                raw_name: raw.clone(),
                name: name.to_string(),
                label: param_label(name),
                value: pretty_value(value),
            }
        })
        .collect();
    rows.sort_by(|a, b| compare_names(&a.name, &b.name).then_with(|| a.raw_name.cmp(&b.raw_name)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_stage_prefix() {
        assert_eq!(strip_stage_prefix("clf__max_depth"), "max_depth");
        assert_eq!(strip_stage_prefix("pre__num__scaler"), "scaler");
        assert_eq!(strip_stage_prefix("C"), "C");
        assert_eq!(strip_stage_prefix("weird__"), "weird__");
    }

    #[test]
    fn test_sentinel_values() {
        assert_eq!(pretty_value(&json!("balanced")), "balanced weights");
        assert_eq!(pretty_value(&json!("auto")), "automatic");
        assert_eq!(pretty_value(&json!("scale")), "scaled to feature variance");
        assert_eq!(pretty_value(&json!(true)), "yes");
        assert_eq!(pretty_value(&json!(false)), "no");
        assert_eq!(pretty_value(&Value::Null), "none");
        assert_eq!(pretty_value(&json!("rbf")), "rbf");
    }

    #[test]
    fn test_numeric_values() {
        assert_eq!(pretty_value(&json!(200)), "200");
        assert_eq!(pretty_value(&json!(0.1)), "0.1");
        assert_eq!(pretty_value(&json!(1e-9)), "1e-9");
    }

    #[test]
    fn test_rows_sorted_canonically_then_alphabetically() {
        let params: Map<String, Value> = serde_json::from_value(json!({
            "clf__zeta": 1,
            "clf__class_weight": "balanced",
            "clf__alpha": 2,
            "clf__max_depth": null,
            "clf__C": 10
        }))
        .unwrap();
        let rows = prettify_params(&params);
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["C", "max_depth", "class_weight", "alpha", "zeta"]);
        assert_eq!(rows[0].label, "Regularization (C)");
        assert_eq!(rows[1].value, "none");
        assert_eq!(rows[2].value, "balanced weights");
        assert_eq!(rows[3].label, "alpha");
    }
}
