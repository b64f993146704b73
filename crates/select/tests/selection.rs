//! End-to-end tests for likelihood-ratio testing and order selection.

use approx::assert_relative_eq;
use pathorder_markov::{DofAssumption, fit, fit_null, log_likelihood_over};
use pathorder_paths::PathStore;
use pathorder_select::{
    ErrorKind, ModelSelector, MultiOrderModel, SelectError, SelectionConfig, likelihood_ratio_test,
    select_order, select_order_with,
};

fn toy(weight: f64) -> PathStore {
    PathStore::from_paths([(vec!["a", "c", "d"], weight), (vec!["b", "c", "e"], weight)]).unwrap()
}

fn long_path() -> PathStore {
    PathStore::from_paths([(
        vec![
            "a", "b", "c", "d", "e", "c", "b", "a", "c", "d", "e", "c", "e", "d", "c", "a",
        ],
        1.0,
    )])
    .unwrap()
}

/// A store whose paths follow a memoryless chain over {a, b}.
fn memoryless() -> PathStore {
    PathStore::from_paths([
        (vec!["a", "a", "b"], 5.0),
        (vec!["a", "b", "a"], 5.0),
        (vec!["b", "a", "a"], 5.0),
        (vec!["b", "b", "a"], 5.0),
        (vec!["a", "b", "b"], 5.0),
        (vec!["b", "a", "b"], 5.0),
        (vec!["a", "a", "a"], 5.0),
        (vec!["b", "b", "b"], 5.0),
    ])
    .unwrap()
}

// ---- 1. toy_p_value ----

#[test]
fn toy_p_value() {
    let result = likelihood_ratio_test(&toy(2.0), 1, 2).unwrap();
    assert_relative_eq!(result.statistic, 8.0 * 2f64.ln(), epsilon = 1e-9);
    assert_eq!(result.df_diff, 1);
    assert_relative_eq!(result.p_value, 0.0185, epsilon = 5e-4);
}

// ---- 2. scaling_weights_scales_statistic ----

#[test]
fn scaling_weights_scales_statistic() {
    let base = toy(2.0);
    let single = likelihood_ratio_test(&base, 1, 2).unwrap();
    let tripled = likelihood_ratio_test(&base.scale(3.0).unwrap(), 1, 2).unwrap();
    assert_relative_eq!(tripled.statistic, 3.0 * single.statistic, epsilon = 1e-9);
    assert_eq!(tripled.df_diff, single.df_diff);
    assert!(tripled.p_value < single.p_value);
}

// ---- 3. null_likelihood_matches_lower_model_on_same_windows ----

#[test]
fn null_likelihood_matches_lower_model_on_same_windows() {
    let store = long_path();
    let result = likelihood_ratio_test(&store, 1, 2).unwrap();
    let lower = fit(&store, 1);
    assert_relative_eq!(
        result.null_log_likelihood,
        log_likelihood_over(&lower, &store, 2).unwrap(),
        epsilon = 1e-9
    );
    let projected = fit_null(&lower, 2).unwrap();
    assert!(projected.is_projection());
}

// ---- 4. statistic_is_never_negative ----

#[test]
fn statistic_is_never_negative() {
    for store in [toy(1.0), long_path(), memoryless()] {
        let result = likelihood_ratio_test(&store, 1, 2).unwrap();
        assert!(result.statistic >= 0.0);
        assert!(result.alt_log_likelihood >= result.null_log_likelihood - 1e-9);
        assert!((0.0..=1.0).contains(&result.p_value));
    }
}

// ---- 5. memoryless_data_selects_first_order ----

#[test]
fn memoryless_data_selects_first_order() {
    // Every pair and triple is equally frequent, so the second order adds
    // parameters without improving the fit.
    let result = likelihood_ratio_test(&memoryless(), 1, 2).unwrap();
    assert_relative_eq!(result.statistic, 0.0, epsilon = 1e-9);
    assert_relative_eq!(result.p_value, 1.0, epsilon = 1e-9);
    assert_eq!(select_order(&memoryless(), 3, 0.05).unwrap(), 1);
}

// ---- 6. selection_records_tests ----

#[test]
fn selection_records_tests() {
    let config = SelectionConfig::new()
        .with_max_order(4)
        .with_significance_level(0.05);
    let selection = select_order_with(&toy(4.0), &config).unwrap();
    assert_eq!(selection.order, 2);
    assert_eq!(selection.tests.len(), 1);
    assert_eq!(selection.tests[0].null_order, 1);
    assert_eq!(selection.tests[0].alt_order, 2);
    assert_relative_eq!(selection.significance_level, 0.05);

    let json = serde_json::to_value(&selection).unwrap();
    assert_eq!(json["order"], 2);
    assert!(json["tests"].is_array());
}

// ---- 7. ngram_assumption_changes_dof ----

#[test]
fn ngram_assumption_changes_dof() {
    let store = long_path();
    let paths = ModelSelector::new(&store, 1, 2)
        .unwrap()
        .fit_null()
        .unwrap()
        .fit_alternative()
        .test()
        .unwrap();
    assert_eq!(paths.null_dof, 7);
    assert_eq!(paths.alt_dof, 19);

    let ngrams = ModelSelector::new(&store, 1, 2)
        .unwrap()
        .with_assumption(DofAssumption::Ngrams)
        .fit_null()
        .unwrap()
        .fit_alternative()
        .test()
        .unwrap();
    // V = 5: five order-1 contexts, eleven order-2 contexts.
    assert_eq!(ngrams.null_dof, 20);
    assert_eq!(ngrams.alt_dof, 44);
    assert_relative_eq!(ngrams.statistic, paths.statistic, epsilon = 1e-12);
}

// ---- 8. multi_order_model_summary ----

#[test]
fn multi_order_model_summary() {
    let store = long_path();
    let model = MultiOrderModel::fit(&store, 3).unwrap();
    let summary = model.summary(&store, DofAssumption::Paths).unwrap();
    let dofs: Vec<usize> = summary.iter().map(|s| s.degrees_of_freedom).collect();
    assert_eq!(dofs, vec![7, 19, 19]);
    let observations: Vec<f64> = summary.iter().map(|s| s.observations).collect();
    assert_eq!(observations, vec![15.0, 14.0, 13.0]);
    for window in summary.windows(2) {
        assert!(window[1].log_likelihood >= window[0].log_likelihood - 1e-9);
    }
}

// ---- 9. degenerate_error_kind ----

#[test]
fn degenerate_error_kind() {
    let model = MultiOrderModel::fit(&toy(1.0), 2).unwrap();
    let unseen = PathStore::from_paths([(vec!["d", "a"], 1.0)]).unwrap();
    let err = model.multi_order_log_likelihood(&unseen).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DegenerateLikelihood);
}

// ---- 10. invalid_arguments ----

#[test]
fn invalid_arguments() {
    let store = toy(1.0);
    let err = likelihood_ratio_test(&store, 2, 1).unwrap_err();
    assert!(matches!(err, SelectError::InvalidOrders { .. }));
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = select_order(&store, 2, 1.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

// ---- 11. layers_serialize_as_plain_mapping ----

#[test]
fn layers_serialize_as_plain_mapping() {
    let model = MultiOrderModel::fit(&toy(2.0), 2).unwrap();
    let json = serde_json::to_value(model.layers()).unwrap();
    assert_eq!(json["1"]["order"], 1);
    assert_eq!(json["1"]["rows"]["c"]["e"], 0.5);
    assert_eq!(json["2"]["rows"]["a,c"]["d"], 1.0);
    assert_eq!(json["2"]["rows"]["b,c"]["e"], 1.0);
}
