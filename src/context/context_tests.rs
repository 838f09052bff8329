use super::*;
use crate::path::InstanceType;

#[test]
fn test_from_query_pairs_with_element() {
    let context = SessionContext::from_query_pairs([
        ("documentId", "d1"),
        ("instanceId", "w1"),
        ("instanceType", "w"),
        ("elementId", "e1"),
        ("elementType", "ASSEMBLY"),
        ("server", "https://cad.onshape.com"),
    ])
    .unwrap();
    assert_eq!(context.document_id(), "d1");
    assert_eq!(context.instance_api_path(), "/d/d1/w/w1");
    assert_eq!(context.element_api_path().unwrap(), "/d/d1/w/w1/e/e1");
    assert_eq!(context.element_type(), Some(ElementType::Assembly));
}

#[test]
fn test_from_query_string_defaults_to_workspace() {
    let context = SessionContext::from_query_string("?documentId=d1&instanceId=w1").unwrap();
    assert_eq!(context.instance().instance_type, InstanceType::Workspace);
    assert_eq!(context.element(), Err(ValidationError::MissingElement));
}

#[test]
fn test_from_query_pairs_requires_instance() {
    assert_eq!(
        SessionContext::from_query_pairs([("documentId", "d1")]),
        Err(PathError::MissingInstanceId)
    );
    assert_eq!(
        SessionContext::from_query_pairs([("instanceId", "w1")]),
        Err(PathError::MissingDocumentId)
    );
}

#[test]
fn test_unknown_element_type_is_ignored() {
    let context = SessionContext::from_query_pairs([
        ("documentId", "d1"),
        ("instanceId", "w1"),
        ("elementType", "DRAWING"),
    ])
    .unwrap();
    assert_eq!(context.element_type(), None);
}

#[test]
fn test_is_current_instance_compares_ids() {
    let context = SessionContext::new(InstancePath::workspace("d1", "w1"));
    assert!(context.is_current_instance(&InstancePath::workspace("d1", "w1")));
    assert!(!context.is_current_instance(&InstancePath::workspace("d1", "w2")));
    assert!(context.is_current_instance(&InstancePath::new("d1", "w1", InstanceType::Version)));
    assert!(!context.is_current_instance(&InstancePath::workspace("d2", "w1")));
}

#[test]
fn test_from_web_location() {
    let location = WebLocation {
        element: ElementPath::new("d1", "v1", InstanceType::Version, "e1"),
        configuration: None,
    };
    let context = SessionContext::from(location);
    assert_eq!(context.element_api_path().unwrap(), "/d/d1/v/v1/e/e1");
}
