use super::*;
use crate::domain::{IndexRange, SampleIndex};
use serde_json::{json, Value};

#[test]
fn dataset_total_prefers_total_in_dataset() {
    let progress: ProgressResponse =
        serde_json::from_value(json!({ "total_in_dataset": 120, "total": 99 })).expect("progress");
    assert_eq!(progress.dataset_total(), json!(120));
    assert_eq!(progress.dataset_last_index(), 119);
}

#[test]
fn dataset_total_falls_through_zero_and_missing_values() {
    let zero_first: ProgressResponse =
        serde_json::from_value(json!({ "total_in_dataset": 0, "total": 42 })).expect("progress");
    let only_total: ProgressResponse =
        serde_json::from_value(json!({ "total": 8 })).expect("progress");
    let empty: ProgressResponse = serde_json::from_value(json!({})).expect("progress");

    assert_eq!(zero_first.dataset_total(), json!(42));
    assert_eq!(only_total.dataset_total(), json!(8));
    assert_eq!(empty.dataset_total(), json!(0));
    assert_eq!(empty.dataset_last_index(), 0);
}

#[test]
fn progress_accepts_non_integer_counters() {
    let float_total: ProgressResponse =
        serde_json::from_value(json!({ "total_in_dataset": 120.0 })).expect("progress");
    let text_total: ProgressResponse =
        serde_json::from_value(json!({ "total_in_dataset": "", "total": "15" })).expect("progress");
    let null_total: ProgressResponse =
        serde_json::from_value(json!({ "total_in_dataset": null, "total": 0.0 }))
            .expect("progress");

    assert_eq!(float_total.dataset_total(), json!(120.0));
    assert_eq!(float_total.dataset_last_index(), 119);
    assert_eq!(text_total.dataset_total(), json!("15"));
    assert_eq!(text_total.dataset_last_index(), 14);
    assert_eq!(null_total.dataset_total(), json!(0));
}

#[test]
fn dataset_last_index_never_underflows() {
    let progress = |total: Value| ProgressResponse {
        total_in_dataset: Some(total),
        ..ProgressResponse::default()
    };

    assert_eq!(progress(json!(i64::MIN)).dataset_last_index(), 0);
    assert_eq!(progress(json!(-5)).dataset_last_index(), 0);
    assert_eq!(progress(json!(u64::MAX)).dataset_last_index(), i64::MAX);
    assert_eq!(progress(json!(1e300)).dataset_last_index(), i64::MAX);
    assert_eq!(progress(json!("many")).dataset_last_index(), 0);
}

#[test]
fn progress_keeps_unknown_fields() {
    let progress: ProgressResponse = serde_json::from_value(json!({
        "labeled_in_range": 3,
        "range_total": 10,
        "labeled": 17
    }))
    .expect("progress");

    assert_eq!(progress.labeled_in_range, Some(json!(3)));
    assert_eq!(progress.range_total, Some(json!(10)));
    assert_eq!(progress.extra.get("labeled"), Some(&json!(17)));
    assert!(!progress.extra.contains_key("range_total"));
}

#[test]
fn items_response_defaults_to_empty_list() {
    let response: ItemsResponse = serde_json::from_value(json!({})).expect("items");
    assert!(response.items.is_empty());
}

#[test]
fn items_response_treats_null_as_empty_list() {
    let response: ItemsResponse = serde_json::from_str(r#"{"items": null}"#).expect("items");
    assert!(response.items.is_empty());
}

#[test]
fn label_payload_serializes_flat_wire_shape() {
    let payload = LabelPayload {
        sample_index: SampleIndex(9),
        critical_success_label: "high".into(),
        popular_success_label: String::new(),
        commercial_success_label: "low".into(),
        annotator: "ann".into(),
    };

    assert_eq!(
        serde_json::to_value(&payload).expect("json"),
        json!({
            "sample_index": 9,
            "critical_success_label": "high",
            "popular_success_label": "",
            "commercial_success_label": "low",
            "annotator": "ann"
        })
    );
    assert!(!payload.labels_blank());
}

#[test]
fn items_query_copies_range_bounds() {
    let query = ItemsQuery::new(IndexRange::new(2, 6).expect("range"), true, false);
    assert_eq!((query.start, query.end), (2, 6));
    assert!(query.skip_labeled);
    assert!(!query.show_labeled);
}
