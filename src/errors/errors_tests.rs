use super::*;
use serde_json::json;

#[test]
fn test_missing_permission_link_reads_link_document() {
    let body = json!({"type": "MISSING_PERMISSION", "permission": "LINK", "documentName": "X"});
    let err = ReportedError::classify(&body, "current").unwrap();
    match &err {
        ReportedError::MissingPermission {
            permission,
            is_current_document,
            document_name,
        } => {
            assert_eq!(permission, "Link document");
            assert!(!is_current_document);
            assert_eq!(document_name.as_deref(), Some("X"));
        }
        other => panic!("unexpected variant: {other:?}"),
    }
    assert_eq!(
        err.description(None),
        "You need to have Link document access to X."
    );
}

#[test]
fn test_missing_permission_capitalizes_raw_permission() {
    let body = json!({"type": "MISSING_PERMISSION", "permission": "WRITE"});
    let err = ReportedError::classify(&body, "doc").unwrap();
    assert_eq!(err.description(None), "You need to have Write access to this document.");
}

#[test]
fn test_missing_permission_current_document_by_id() {
    let body = json!({
        "type": "MISSING_PERMISSION",
        "permission": "READ",
        "documentId": "doc",
        "documentName": "Mine",
    });
    let err = ReportedError::classify(&body, "doc").unwrap();
    assert!(err.description(None).ends_with("to this document."));

    let other = ReportedError::classify(&body, "elsewhere").unwrap();
    assert_eq!(other.description(None), "You need to have Read access to Mine.");
}

#[test]
fn test_missing_permission_unknown_document_uses_fallback() {
    let body = json!({"type": "MISSING_PERMISSION", "permission": "READ", "documentId": "x"});
    let err = ReportedError::classify(&body, "doc").unwrap();
    assert_eq!(err.description(None), UNKNOWN_ACCESS_MESSAGE);
    assert_eq!(
        err.description(Some("You don't have access to a linked document.")),
        "You don't have access to a linked document."
    );
}

#[test]
fn test_display_matches_description() {
    let body = json!({"type": "MISSING_PERMISSION", "permission": "LINK", "documentName": "X"});
    let err = ReportedError::classify(&body, "doc").unwrap();
    assert_eq!(err.to_string(), err.description(None));
}

#[test]
fn test_linked_cycle_classified() {
    let body = json!({"type": "LINKED_CYCLE"});
    assert_eq!(
        ReportedError::classify(&body, "doc"),
        Some(ReportedError::LinkedCycle)
    );
}

#[test]
fn test_client_exception_is_generic() {
    let body = json!({"type": "CLIENT_EXCEPTION", "message": "Cannot link a document to itself."});
    let err = ReportedError::classify(&body, "doc").unwrap();
    assert_eq!(err.to_string(), "Cannot link a document to itself.");
}

#[test]
fn test_unknown_types_are_unclassified() {
    for body in [
        json!({"type": "BACKEND_EXCEPTION", "message": "boom"}),
        json!({"type": "SOMETHING_NEW"}),
        json!({"message": "no type"}),
        json!("just a string"),
        json!(null),
    ] {
        assert_eq!(ReportedError::classify(&body, "doc"), None, "body: {body}");
    }
}

#[test]
fn test_api_error_is_handled() {
    assert!(ApiError::from(ValidationError::SelfLink).is_handled());
    assert!(ApiError::from(ReportedError::LinkedCycle).is_handled());
    assert!(!ApiError::Cancelled.is_handled());
    assert!(!ApiError::from(TransportError::Connection("refused".into())).is_handled());
}

#[test]
fn test_structured_error_json_format() {
    let se = StructuredError::new("links add", "SELF_LINK", "no".to_string());
    let parsed: serde_json::Value = serde_json::from_str(&se.to_json()).unwrap();
    assert_eq!(parsed["operation"], "links add");
    assert_eq!(parsed["messages"][0]["code"], "SELF_LINK");
    assert!(parsed["messages"][0].get("tip").is_none());
    assert!(parsed.get("logs").is_some());
}

#[test]
fn test_to_error_json_includes_tip() {
    let json = to_error_json("push-version", &ApiError::from(ReportedError::LinkedCycle));
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["messages"][0]["code"], "LINKED_CYCLE");
    assert!(parsed["messages"][0]["tip"].as_str().unwrap().contains("links list"));
}

#[test]
fn test_error_codes_non_empty() {
    let errors: Vec<ApiError> = vec![
        ValidationError::EmptyUrl.into(),
        ValidationError::InvalidVersionName { max: 256 }.into(),
        ReportedError::LinkedCycle.into(),
        TransportError::Connection("x".into()).into(),
        ApiError::Status {
            status: http::StatusCode::BAD_GATEWAY,
            body: String::new(),
        },
        ApiError::Cancelled,
    ];
    for err in &errors {
        let (code, _) = err.error_code_and_tip();
        assert!(!code.is_empty(), "Code should not be empty for {err}");
    }
}
