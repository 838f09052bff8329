#![allow(clippy::indexing_slicing)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::time::Duration;

use common::{client, linked_record, query_value, web_url, ScriptedTransport, CAD_HOST};
use doclink::errors::{ApiError, ValidationError};
use doclink::link::{LinkDirection, LinkError, LinkManager, LinkedDocument};
use doclink::path::{InstancePath, InstanceType};
use http::Method;
use serde_json::json;
use tokio_util::sync::CancellationToken;

fn manager(transport: &std::sync::Arc<ScriptedTransport>) -> LinkManager {
    LinkManager::new(client(transport.clone())).with_cad_host(CAD_HOST)
}

#[tokio::test]
async fn test_fetch_links_populates_cache() {
    let transport = ScriptedTransport::new();
    transport.push_ok(json!([linked_record("d1", "w1", "Bracket")]));
    let manager = manager(&transport);
    let cancel = CancellationToken::new();

    assert!(manager.links(LinkDirection::Children, false).await.is_none());
    let fetched = manager
        .fetch_links(LinkDirection::Children, false, &cancel)
        .await
        .unwrap();

    let cached = manager.links(LinkDirection::Children, false).await.unwrap();
    assert_eq!(cached, fetched);
    assert!(manager.links(LinkDirection::Children, true).await.is_none());
    assert!(manager.links(LinkDirection::Parents, false).await.is_none());
}

#[tokio::test]
async fn test_add_remove_undo_round_trip() {
    let transport = ScriptedTransport::new();
    let manager = manager(&transport);
    let cancel = CancellationToken::new();
    let target = InstancePath::workspace("d1", "w1");

    transport.push_ok(json!([linked_record("d0", "w0", "Existing")]));
    manager
        .fetch_links(LinkDirection::Children, false, &cancel)
        .await
        .unwrap();

    transport.push_ok(linked_record("d1", "w1", "Bracket"));
    let added = manager
        .add_link(LinkDirection::Children, &target, &cancel)
        .await
        .expect("Should add link");
    let cached = manager.links(LinkDirection::Children, false).await.unwrap();
    assert_eq!(cached.len(), 2);
    assert!(cached.iter().any(|d| d.matches(&target)));

    transport.push_ok(linked_record("d1", "w1", "Bracket"));
    let removal = manager
        .remove_link(LinkDirection::Children, &target, &cancel)
        .await
        .expect("Should remove link");
    assert_eq!(removal.removed, added);
    let request = transport.last_request();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(query_value(&request, "documentId"), Some("d1"));
    assert_eq!(query_value(&request, "instanceId"), Some("w1"));
    let cached = manager.links(LinkDirection::Children, false).await.unwrap();
    assert!(!cached.iter().any(|d| d.matches(&target)));
    assert_eq!(cached.len(), 1);

    transport.push_ok(linked_record("d1", "w1", "Bracket"));
    let restored = manager
        .undo(removal.undo, &cancel)
        .await
        .unwrap()
        .expect("Undo inside the window restores the link");
    assert_eq!(restored, added);
    let cached = manager.links(LinkDirection::Children, false).await.unwrap();
    assert_eq!(cached.iter().filter(|d| d.matches(&target)).count(), 1);
    assert_eq!(transport.last_request().method, Method::POST);
}

#[tokio::test]
async fn test_remove_keeps_same_document_other_workspace() {
    let transport = ScriptedTransport::new();
    let manager = manager(&transport);
    let cancel = CancellationToken::new();

    transport.push_ok(json!([
        linked_record("d1", "w1", "Main"),
        linked_record("d1", "w2", "Branch"),
    ]));
    manager
        .fetch_links(LinkDirection::Parents, false, &cancel)
        .await
        .unwrap();

    transport.push_ok(linked_record("d1", "w1", "Main"));
    manager
        .remove_link(LinkDirection::Parents, &InstancePath::workspace("d1", "w1"), &cancel)
        .await
        .unwrap();

    let cached = manager.links(LinkDirection::Parents, false).await.unwrap();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].path(), &InstancePath::workspace("d1", "w2"));
}

#[tokio::test]
async fn test_undo_after_window_sends_nothing() {
    let transport = ScriptedTransport::new();
    let manager = manager(&transport).with_undo_window(Duration::ZERO);
    let cancel = CancellationToken::new();

    transport.push_ok(linked_record("d1", "w1", "Bracket"));
    let removal = manager
        .remove_link(LinkDirection::Children, &InstancePath::workspace("d1", "w1"), &cancel)
        .await
        .unwrap();
    assert!(removal.undo.is_expired());

    let restored = manager.undo(removal.undo, &cancel).await.unwrap();
    assert!(restored.is_none());
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_self_link_is_rejected_without_requests() {
    let transport = ScriptedTransport::new();
    let manager = manager(&transport);

    let err = manager
        .add_link(
            LinkDirection::Parents,
            &InstancePath::workspace("current-doc", "current-ws"),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, LinkError::Validation(ValidationError::SelfLink)));
    assert_eq!(err.to_string(), "A document can't be linked to itself!");
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_version_targets_are_rejected() {
    let transport = ScriptedTransport::new();
    let manager = manager(&transport);

    let err = manager
        .add_link_from_url(
            LinkDirection::Children,
            &web_url("d1", "v", "v1"),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, LinkError::Validation(ValidationError::NotWorkspace)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_add_link_from_url_validation() {
    let transport = ScriptedTransport::new();
    let manager = manager(&transport);
    let cancel = CancellationToken::new();

    let err = manager
        .add_link_from_url(LinkDirection::Children, "   ", &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, LinkError::Validation(ValidationError::EmptyUrl)));

    let err = manager
        .add_link_from_url(LinkDirection::Children, "https://example.com/documents/d1/w/w1", &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, LinkError::Validation(ValidationError::UnparseableUrl)));

    let err = manager
        .add_link_from_url(LinkDirection::Children, "https://cad.onshape.com/documents/d1", &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, LinkError::Validation(ValidationError::UnparseableUrl)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_add_link_from_element_url() {
    let transport = ScriptedTransport::new();
    transport.push_ok(linked_record("d1", "w1", "Bracket"));
    let manager = manager(&transport);

    let added = manager
        .add_link_from_url(
            LinkDirection::Children,
            "https://cad.onshape.com/documents/d1/w/w1/e/e1",
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(added.display_name(), "Bracket");
    assert_eq!(
        transport.last_request().path,
        "/linked-documents/children/d/current-doc/w/current-ws"
    );
}

#[tokio::test]
async fn test_cycle_is_reported_distinctly() {
    let transport = ScriptedTransport::new();
    transport.push_json(400, json!({"type": "LINKED_CYCLE"}));
    let manager = manager(&transport);

    let err = manager
        .fetch_links(LinkDirection::Parents, true, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, LinkError::Cycle));
    assert_eq!(transport.request_count(), 1);
    assert!(manager.links(LinkDirection::Parents, true).await.is_none());
}

#[tokio::test]
async fn test_refresh_replaces_direction() {
    let transport = ScriptedTransport::new();
    let manager = manager(&transport);
    let cancel = CancellationToken::new();

    transport.push_ok(json!([linked_record("d1", "w1", "Old")]));
    manager
        .fetch_links(LinkDirection::Children, true, &cancel)
        .await
        .unwrap();
    transport.push_ok(json!([linked_record("p1", "w1", "Parent")]));
    manager
        .fetch_links(LinkDirection::Parents, false, &cancel)
        .await
        .unwrap();

    transport.push_ok(json!([linked_record("d2", "w2", "New")]));
    let refreshed = manager
        .refresh(LinkDirection::Children, &cancel)
        .await
        .unwrap();

    assert_eq!(refreshed.len(), 1);
    assert_eq!(refreshed[0].display_name(), "New");
    assert!(manager.links(LinkDirection::Children, true).await.is_none());
    assert!(manager.links(LinkDirection::Parents, false).await.is_some());
    assert_eq!(query_value(&transport.last_request(), "recursive"), Some("false"));

    manager.invalidate_all().await;
    assert!(manager.links(LinkDirection::Parents, false).await.is_none());
}

#[tokio::test]
async fn test_failed_remove_leaves_cache_untouched() {
    let transport = ScriptedTransport::new();
    let manager = manager(&transport);
    let cancel = CancellationToken::new();

    transport.push_ok(json!([linked_record("d1", "w1", "Main")]));
    manager
        .fetch_links(LinkDirection::Children, false, &cancel)
        .await
        .unwrap();
    transport.push_json(
        403,
        json!({"type": "MISSING_PERMISSION", "permission": "LINK", "documentName": "Main"}),
    );

    let err = manager
        .remove_link(LinkDirection::Children, &InstancePath::workspace("d1", "w1"), &cancel)
        .await
        .unwrap_err();

    match err {
        LinkError::Api(ApiError::Reported(reported)) => {
            assert_eq!(
                reported.description(None),
                "You need to have Link document access to Main."
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        manager.links(LinkDirection::Children, false).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn test_push_version_targets_resolved_parents() {
    let transport = ScriptedTransport::new();
    let manager = manager(&transport);
    let cancel = CancellationToken::new();

    transport.push_ok(json!([
        linked_record("p1", "w1", "Robot"),
        {"documentId": "gone", "instanceId": "w9", "isOpenable": false}
    ]));
    transport.push_ok(json!({"updatedElements": 2}));

    let pushed = manager.push_version("V5", "", false, &cancel).await.unwrap();

    assert_eq!(pushed.targets, vec![InstancePath::workspace("p1", "w1")]);
    assert_eq!(pushed.updated.updated_elements, 2);
    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].path.starts_with("/linked-documents/parents/"));
    assert_eq!(requests[1].path, "/push-version/d/current-doc/w/current-ws");
}

#[tokio::test]
async fn test_push_version_without_parents_is_rejected() {
    let transport = ScriptedTransport::new();
    transport.push_ok(json!([]));
    let manager = manager(&transport);

    let err = manager
        .push_version("V5", "", false, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, LinkError::Validation(ValidationError::NoPushTargets)));
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_unresolved_links_round_trip_through_cache() {
    let transport = ScriptedTransport::new();
    transport.push_ok(json!([{"documentId": "d1", "instanceId": "w1", "instanceType": "w"}]));
    let manager = manager(&transport);

    let documents = manager
        .fetch_links(LinkDirection::Children, false, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        documents,
        vec![LinkedDocument::Unresolved(InstancePath::new(
            "d1",
            "w1",
            InstanceType::Workspace
        ))]
    );
}

#[tokio::test]
async fn test_add_before_fetch_does_not_hide_other_parents() {
    let transport = ScriptedTransport::new();
    let manager = manager(&transport);
    let cancel = CancellationToken::new();

    transport.push_ok(linked_record("dA", "wA", "Added"));
    manager
        .add_link(LinkDirection::Parents, &InstancePath::workspace("dA", "wA"), &cancel)
        .await
        .unwrap();
    assert!(manager.links(LinkDirection::Parents, false).await.is_none());

    transport.push_ok(json!([
        linked_record("dA", "wA", "Added"),
        linked_record("dB", "wB", "Second"),
        linked_record("dC", "wC", "Third"),
    ]));
    transport.push_ok(json!({"updatedElements": 3}));
    let pushed = manager.push_version("V1", "", false, &cancel).await.unwrap();

    assert_eq!(
        pushed.targets,
        vec![
            InstancePath::workspace("dA", "wA"),
            InstancePath::workspace("dB", "wB"),
            InstancePath::workspace("dC", "wC"),
        ]
    );
    let requests = transport.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].method, Method::GET);
    assert!(requests[1].path.starts_with("/linked-documents/parents/"));
    let body = requests[2].body.clone().expect("Push sends a body");
    assert_eq!(body["instancesToUpdate"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_recursive_push_includes_grandparents() {
    let transport = ScriptedTransport::new();
    let manager = manager(&transport);
    let cancel = CancellationToken::new();

    transport.push_ok(json!([
        linked_record("p1", "w1", "Parent"),
        linked_record("g1", "w1", "Grandparent"),
    ]));
    transport.push_ok(json!({"updatedElements": 2}));
    let pushed = manager.push_version("V2", "", true, &cancel).await.unwrap();

    assert_eq!(pushed.targets.len(), 2);
    let requests = transport.requests();
    assert_eq!(query_value(&requests[0], "recursive"), Some("true"));
    assert!(manager.links(LinkDirection::Parents, true).await.is_some());
}

#[tokio::test]
async fn test_recursive_push_stops_on_cycle() {
    let transport = ScriptedTransport::new();
    transport.push_json(400, json!({"type": "LINKED_CYCLE"}));
    let manager = manager(&transport);

    let err = manager
        .push_version("V3", "", true, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, LinkError::Cycle));
    assert_eq!(transport.request_count(), 1);
    assert!(!transport.last_request().path.starts_with("/push-version"));
}
