use std::collections::HashMap;

use kinesia_audit::{Aggregator, ReviewReduction};
use kinesia_core::models::{Observation, ObservationKind, Trace};

fn ts(s: &str) -> jiff::Timestamp {
    s.parse().unwrap()
}

fn trace(id: &str, visit_id: Option<&str>) -> Trace {
    Trace {
        id: id.to_string(),
        visit_id: visit_id.map(str::to_string),
        patient_id: Some("p1".to_string()),
        professional_id: Some("u1".to_string()),
        visit_date: None,
        started_at: ts("2025-03-10T10:00:00Z"),
    }
}

fn obs(id: &str, kind: &str, at: &str, metadata: Option<serde_json::Value>) -> Observation {
    Observation {
        id: id.to_string(),
        kind: ObservationKind::from(kind.to_string()),
        timestamp: ts(at),
        metadata,
    }
}

fn by_trace(pairs: Vec<(&str, Vec<Observation>)>) -> HashMap<String, Vec<Observation>> {
    pairs
        .into_iter()
        .map(|(id, list)| (id.to_string(), list))
        .collect()
}

#[test]
fn trace_without_visit_id_is_skipped() {
    let traces = vec![trace("t1", None)];
    let observations = by_trace(vec![(
        "t1",
        vec![obs("o1", "audio.review", "2025-03-10T10:01:00Z", None)],
    )]);

    let visits = Aggregator::default().aggregate(&traces, &observations);
    assert!(visits.is_empty());
}

#[test]
fn trace_with_zero_observations_yields_all_false_flags() {
    let traces = vec![trace("t1", Some("v1"))];
    let visits = Aggregator::default().aggregate(&traces, &HashMap::new());

    let visit = &visits["v1"];
    assert!(!visit.has_audio_review);
    assert!(!visit.is_audio_approved);
    assert!(!visit.has_pdf_export);
    assert!(!visit.is_pdf_signed);
    assert!(!visit.has_mcp_context);
    assert!(visit.events.is_empty());
}

#[test]
fn explicit_visit_date_takes_precedence_over_start_time() {
    let mut t = trace("t1", Some("v1"));
    t.visit_date = Some(ts("2025-03-01T00:00:00Z"));
    let visits = Aggregator::default().aggregate(&[t], &HashMap::new());

    assert_eq!(visits["v1"].date, ts("2025-03-01T00:00:00Z"));
}

#[test]
fn flags_follow_observation_kinds() {
    let traces = vec![trace("t1", Some("v1"))];
    let observations = by_trace(vec![(
        "t1",
        vec![
            obs("o1", "form.update", "2025-03-10T10:01:00Z", None),
            obs(
                "o2",
                "audio.review",
                "2025-03-10T10:02:00Z",
                Some(serde_json::json!({"approved": true})),
            ),
            obs(
                "o3",
                "pdf.export",
                "2025-03-10T10:03:00Z",
                Some(serde_json::json!({"signed": false})),
            ),
            obs("o4", "mcp.context.build", "2025-03-10T10:04:00Z", None),
        ],
    )]);

    let visits = Aggregator::default().aggregate(&traces, &observations);
    let visit = &visits["v1"];
    assert!(visit.has_audio_review && visit.is_audio_approved);
    assert!(visit.has_pdf_export && !visit.is_pdf_signed);
    assert!(visit.has_mcp_context);
    assert_eq!(visit.events.len(), 4);
}

#[test]
fn unrecognized_kinds_join_the_trail_but_touch_no_flags() {
    let traces = vec![trace("t1", Some("v1"))];
    let observations = by_trace(vec![(
        "t1",
        vec![obs("o1", "llm.generation", "2025-03-10T10:01:00Z", None)],
    )]);

    let visits = Aggregator::default().aggregate(&traces, &observations);
    let visit = &visits["v1"];
    assert!(!visit.has_audio_review && !visit.has_pdf_export && !visit.has_mcp_context);
    assert_eq!(visit.events.len(), 1);
    assert_eq!(visit.events[0].kind.as_str(), "llm.generation");
}

#[test]
fn reopened_sessions_merge_into_one_summary_with_or_accumulated_flags() {
    let traces = vec![trace("t1", Some("v1")), trace("t2", Some("v1"))];
    let observations = by_trace(vec![
        (
            "t1",
            vec![obs(
                "o1",
                "audio.review",
                "2025-03-10T10:01:00Z",
                Some(serde_json::json!({"approved": true})),
            )],
        ),
        (
            "t2",
            vec![obs("o2", "form.update", "2025-03-11T09:00:00Z", None)],
        ),
    ]);

    let visits = Aggregator::default().aggregate(&traces, &observations);
    assert_eq!(visits.len(), 1);
    let visit = &visits["v1"];
    // Unrelated later events never reset a flag once set.
    assert!(visit.has_audio_review && visit.is_audio_approved);
    assert_eq!(visit.events.len(), 2);
}

#[test]
fn missing_metadata_field_coerces_to_false() {
    let traces = vec![trace("t1", Some("v1"))];
    let observations = by_trace(vec![(
        "t1",
        vec![obs("o1", "audio.review", "2025-03-10T10:01:00Z", None)],
    )]);

    let visits = Aggregator::default().aggregate(&traces, &observations);
    let visit = &visits["v1"];
    assert!(visit.has_audio_review);
    assert!(!visit.is_audio_approved);
}

#[test]
fn latest_wins_reduction_applies_newest_decision_regardless_of_arrival_order() {
    let traces = vec![trace("t1", Some("v1"))];
    // Newest decision (approved: false) arrives first.
    let observations = by_trace(vec![(
        "t1",
        vec![
            obs(
                "o1",
                "audio.review",
                "2025-03-12T10:00:00Z",
                Some(serde_json::json!({"approved": false})),
            ),
            obs(
                "o2",
                "audio.review",
                "2025-03-10T10:00:00Z",
                Some(serde_json::json!({"approved": true})),
            ),
        ],
    )]);

    let visits = Aggregator::new(ReviewReduction::LatestWins).aggregate(&traces, &observations);
    assert!(!visits["v1"].is_audio_approved);
}

#[test]
fn any_approval_reduction_is_a_monotonic_or() {
    let traces = vec![trace("t1", Some("v1"))];
    let observations = by_trace(vec![(
        "t1",
        vec![
            obs(
                "o1",
                "audio.review",
                "2025-03-10T10:00:00Z",
                Some(serde_json::json!({"approved": true})),
            ),
            obs(
                "o2",
                "audio.review",
                "2025-03-12T10:00:00Z",
                Some(serde_json::json!({"approved": false})),
            ),
        ],
    )]);

    let visits = Aggregator::new(ReviewReduction::AnyApproval).aggregate(&traces, &observations);
    assert!(visits["v1"].is_audio_approved);
}

#[test]
fn first_attribution_seen_wins() {
    let mut t1 = trace("t1", Some("v1"));
    t1.patient_id = None;
    t1.professional_id = Some("u1".to_string());
    let mut t2 = trace("t2", Some("v1"));
    t2.patient_id = Some("p2".to_string());
    t2.professional_id = Some("u2".to_string());

    let visits = Aggregator::default().aggregate(&[t1, t2], &HashMap::new());
    let visit = &visits["v1"];
    // p2 fills the gap, but u1 is not overwritten.
    assert_eq!(visit.patient_id.as_deref(), Some("p2"));
    assert_eq!(visit.professional_id.as_deref(), Some("u1"));
}

#[test]
fn aggregation_is_idempotent_over_unchanged_input() {
    let traces = vec![trace("t1", Some("v1")), trace("t2", Some("v2"))];
    let observations = by_trace(vec![
        (
            "t1",
            vec![obs("o1", "pdf.export", "2025-03-10T10:01:00Z", None)],
        ),
        (
            "t2",
            vec![obs("o2", "mcp.context.build", "2025-03-10T11:00:00Z", None)],
        ),
    ]);

    let aggregator = Aggregator::default();
    let first = aggregator.aggregate(&traces, &observations);
    let second = aggregator.aggregate(&traces, &observations);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
