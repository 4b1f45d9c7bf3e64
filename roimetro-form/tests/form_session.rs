use roimetro_form::{FormOperation, FormRequest, FormSession};

// ---------------------------------------------------------------------------
// End-to-end session transcripts
// ---------------------------------------------------------------------------

/// Fill the reference campaign through raw JSON requests, the way an
/// embedding UI would drive the session.
fn reference_session() -> FormSession {
    let mut session = FormSession::new();
    let edits = [
        r#"{"operation": {"op": "SetAdSpend", "params": {"amount": 500.0}}, "request_id": "edit-001"}"#,
        r#"{"operation": {"op": "SetProductPrice", "params": {"amount": 2000.0}}, "request_id": "edit-002"}"#,
        r#"{"operation": {"op": "SetSalesCount", "params": {"count": 3}}, "request_id": "edit-003"}"#,
    ];
    for raw in edits {
        session.handle(raw).unwrap();
    }
    session
}

#[test]
fn json_transcript_reaches_the_reference_figures() {
    let session = reference_session();
    let snap = session.snapshot();

    assert_eq!(snap.revision, 3);
    assert!((snap.metrics.total_revenue - 6000.0).abs() < 0.01);
    assert!((snap.metrics.gross_profit - 5500.0).abs() < 0.01);
    assert!((snap.metrics.roi - 11.0).abs() < 0.01);
    assert!((snap.metrics.cpa - 166.67).abs() < 0.01);
}

#[test]
fn entering_roas_mode_via_json_moves_only_profit_and_roas() {
    let mut session = reference_session();
    let before = session.snapshot();

    session
        .handle(r#"{"operation": {"op": "SetUnitCogs", "params": {"amount": 100.0}}, "request_id": "edit-004"}"#)
        .unwrap();
    let response = session
        .handle(r#"{"operation": {"op": "SetRoasMode", "params": {"enabled": true}}, "request_id": "edit-005"}"#)
        .unwrap();

    let after = response.snapshot;
    assert_eq!(before.metrics.total_revenue, after.metrics.total_revenue);
    assert_eq!(before.metrics.roi, after.metrics.roi);
    assert_eq!(before.metrics.cpa, after.metrics.cpa);
    assert!((after.metrics.gross_profit - 5200.0).abs() < 0.01);
    assert!((after.metrics.roas - 7.5).abs() < 0.01);
}

#[test]
fn rejected_edit_is_logged_but_changes_nothing() {
    let mut session = reference_session();
    let before = session.snapshot();

    let err = session.handle(
        r#"{"operation": {"op": "SetAdSpend", "params": {"amount": -500.0}}, "request_id": "edit-004"}"#,
    );
    assert!(err.is_err());

    // Rejected at parse: never executed, never logged as an edit,
    // state untouched.
    let after = session.snapshot();
    assert_eq!(after.revision, before.revision);
    assert_eq!(after.inputs, before.inputs);
    assert_eq!(session.edit_log.len(), 3);
}

#[test]
fn executed_failure_lands_in_the_transcript() {
    let mut session = reference_session();

    // Bypass parse_request and push an out-of-domain edit straight in.
    let err = session.execute(FormRequest {
        operation: FormOperation::SetUnitCogs {
            amount: f64::INFINITY,
        },
        request_id: "edit-004".into(),
    });
    assert!(err.is_err());

    let last = session.edit_log.last().unwrap();
    assert!(!last.success);
    assert_eq!(last.revision_after, 3);
    assert!(last.error.as_ref().unwrap().contains("unit_cogs"));
}

#[test]
fn transcript_order_matches_the_requests() {
    let session = reference_session();
    let ids: Vec<&str> = session
        .edit_log
        .iter()
        .map(|e| e.request_id.as_str())
        .collect();
    assert_eq!(ids, vec!["edit-001", "edit-002", "edit-003"]);
    assert!(session.edit_log.iter().all(|e| e.success));
    assert_eq!(session.edit_log[2].revision_after, 3);
}
