use ordmic::engine::RawAnalysisResult;
use ordmic::normalize::normalize;
use ordmic::table::Value;
use serde_json::json;

fn raw(v: serde_json::Value) -> RawAnalysisResult {
    serde_json::from_value(v).unwrap()
}

#[test]
fn absent_subtables_normalize_to_empty_tables() {
    let result = normalize(&raw(json!({})));
    assert!(result.mic.is_empty());
    assert!(result.ratio.is_empty());
    assert!(result.delta.is_empty());
    assert!(result.dod_ratio.is_empty());
    assert!(result.dod_delta.is_empty());
    assert!(result.coefficients.is_empty());
    assert!(result.thresholds.is_empty());
}

#[test]
fn mic_aliases_renamed() {
    let result = normalize(&raw(json!({
        "mic_estimates": [
            {"strain": "WT", "mic": "1.5", "lower_ci": 0.5, "upper_ci": 2.5}
        ]
    })));
    assert_eq!(
        result.mic.columns(),
        &["strain", "MIC", "CI_Lower", "CI_Upper"]
    );
    // numeric coercion applies to the canonical names
    assert_eq!(result.mic.get(0, "MIC"), Some(&Value::Num(1.5)));
}

#[test]
fn ratio_aliases_renamed() {
    let result = normalize(&raw(json!({
        "ratio_mic_results": [
            {"MIC_Ratio": 2.0, "lower_ci": 1.0, "upper_ci": 4.0}
        ]
    })));
    assert_eq!(result.ratio.columns(), &["Ratio_MIC", "CI_Lower", "CI_Upper"]);
}

#[test]
fn delta_aliases_renamed_including_lcl_ucl() {
    let result = normalize(&raw(json!({
        "delta_mic_results": [
            {"delta": -0.5, "lcl": -1.0, "ucl": 0.2}
        ]
    })));
    assert_eq!(result.delta.columns(), &["Delta_MIC", "CI_Lower", "CI_Upper"]);
    assert_eq!(result.delta.get(0, "Delta_MIC"), Some(&Value::Num(-0.5)));
}

#[test]
fn unknown_columns_pass_through() {
    let result = normalize(&raw(json!({
        "mic_estimates": [
            {"conc_strain": "WT", "MIC": 1.0, "SE_LP": 0.1}
        ]
    })));
    assert!(result.mic.has_column("conc_strain"));
    assert!(result.mic.has_column("SE_LP"));
}

#[test]
fn summary_split_on_pipe_terms() {
    let result = normalize(&raw(json!({
        "coefficients": [
            {"Term": "0|1", "Estimate": -2.0, "Std. Error": 0.5},
            {"Term": "log1p(conc)", "Estimate": 1.2, "Std. Error": 0.2},
            {"Term": "1|2", "Estimate": 0.5, "Std. Error": 0.4},
            {"Term": "strainmut", "Estimate": -0.7, "Std. Error": 0.3}
        ]
    })));
    assert_eq!(result.coefficients.n_rows(), 2);
    assert_eq!(result.thresholds.n_rows(), 2);
    assert_eq!(
        result.coefficients.get(0, "Term"),
        Some(&Value::Str("log1p(conc)".to_string()))
    );
    assert_eq!(
        result.thresholds.get(0, "Term"),
        Some(&Value::Str("0|1".to_string()))
    );
}

#[test]
fn summary_term_alias_from_rownames() {
    let result = normalize(&raw(json!({
        "coefficients": [
            {"_row": "2|3", "Estimate": 0.1}
        ]
    })));
    assert!(result.thresholds.has_column("Term"));
    assert_eq!(result.thresholds.n_rows(), 1);
}

#[test]
fn normalization_is_deterministic() {
    let payload = json!({
        "mic_estimates": [{"strain": "WT", "mic": 1.5}],
        "dod_ratio_results": [{"DDlog2MIC": 1.0, "CI_Lower": 0.5, "CI_Upper": 4.0}]
    });
    let a = normalize(&raw(payload.clone()));
    let b = normalize(&raw(payload));
    assert_eq!(a.mic, b.mic);
    assert_eq!(a.dod_ratio, b.dod_ratio);
}

#[test]
fn row_order_matches_emission_order() {
    let result = normalize(&raw(json!({
        "mic_estimates": [
            {"strain": "c", "MIC": 3.0},
            {"strain": "a", "MIC": 1.0},
            {"strain": "b", "MIC": 2.0}
        ]
    })));
    let order: Vec<String> = (0..3)
        .map(|i| match result.mic.get(i, "strain") {
            Some(Value::Str(s)) => s.clone(),
            other => panic!("unexpected {:?}", other),
        })
        .collect();
    assert_eq!(order, vec!["c", "a", "b"]);
}
