use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use crate::bridge::{
    BridgeError, BridgeRequest, BridgeResponse, SurfaceBridge, dispatch_surface_message,
    forward_surface_event,
};

const TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn response_resolves_the_matching_request() {
    let (out_tx, out_rx) = kanal::bounded_async(8);
    let bridge = Arc::new(SurfaceBridge::new(out_tx, TIMEOUT));

    let responder = {
        let bridge = bridge.clone();
        tokio::spawn(async move {
            let request = out_rx.recv().await.unwrap();
            assert_eq!(request.command, "getCurrentPosition");
            bridge
                .handle_response(BridgeResponse {
                    id: request.id.unwrap(),
                    result: Ok(json!({"cfi": "epubcfi(/6/4)"})),
                })
                .await;
        })
    };

    let value = bridge
        .request("getCurrentPosition", json!({}))
        .await
        .unwrap();
    assert_eq!(value["cfi"], "epubcfi(/6/4)");
    responder.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn timed_out_request_errors_instead_of_hanging() {
    let (out_tx, out_rx) = kanal::bounded_async(8);
    let bridge = SurfaceBridge::new(out_tx, TIMEOUT);

    let result = bridge.request("getSelection", json!({})).await;
    assert!(matches!(result, Err(BridgeError::Timeout)));

    // The request did go out; nobody answered.
    let request = out_rx.recv().await.unwrap();
    assert_eq!(request.command, "getSelection");
}

#[tokio::test(start_paused = true)]
async fn late_response_is_ignored() {
    let (out_tx, out_rx) = kanal::bounded_async(8);
    let bridge = SurfaceBridge::new(out_tx, TIMEOUT);

    let result = bridge.request("getSelection", json!({})).await;
    assert!(matches!(result, Err(BridgeError::Timeout)));

    // Answering after the window finds no pending slot and must not panic
    // or resolve anything.
    let request = out_rx.recv().await.unwrap();
    bridge
        .handle_response(BridgeResponse {
            id: request.id.unwrap(),
            result: Ok(json!("too late")),
        })
        .await;
}

#[tokio::test]
async fn remote_errors_are_surfaced() {
    let (out_tx, out_rx) = kanal::bounded_async(8);
    let bridge = Arc::new(SurfaceBridge::new(out_tx, TIMEOUT));

    let responder = {
        let bridge = bridge.clone();
        tokio::spawn(async move {
            let request = out_rx.recv().await.unwrap();
            bridge
                .handle_response(BridgeResponse {
                    id: request.id.unwrap(),
                    result: Err("no selection".to_string()),
                })
                .await;
        })
    };

    let result = bridge.request("getSelection", json!({})).await;
    match result {
        Err(BridgeError::Remote(message)) => assert_eq!(message, "no selection"),
        other => panic!("unexpected result: {other:?}"),
    }
    responder.await.unwrap();
}

#[tokio::test]
async fn notifications_carry_no_id() {
    let (out_tx, out_rx) = kanal::bounded_async(8);
    let bridge = SurfaceBridge::new(out_tx, TIMEOUT);

    bridge
        .notify("addDecoration", json!({"id": "h1"}))
        .await
        .unwrap();

    let request = out_rx.recv().await.unwrap();
    assert_eq!(request.command, "addDecoration");
    assert!(request.id.is_none());
}

#[test]
fn outgoing_messages_use_the_surface_wire_shape() {
    let notification = BridgeRequest {
        id: None,
        command: "clearDecorations".to_string(),
        payload: json!({}),
    };
    assert_eq!(
        serde_json::to_value(&notification).unwrap(),
        json!({"type": "clearDecorations", "payload": {}})
    );

    let id = uuid::Uuid::new_v4();
    let request = BridgeRequest {
        id: Some(id),
        command: "getSelection".to_string(),
        payload: json!({}),
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["requestId"], json!(id.to_string()));
}

#[tokio::test]
async fn inbound_messages_route_to_bridge_and_events() {
    let (out_tx, out_rx) = kanal::bounded_async(8);
    let bridge = Arc::new(SurfaceBridge::new(out_tx, TIMEOUT));
    let (event_tx, event_rx) = kanal::bounded_async(8);
    let (sel_tx, sel_rx) = kanal::bounded_async(8);

    // A message carrying a request id resolves the pending request.
    let requester = {
        let bridge = bridge.clone();
        tokio::spawn(async move { bridge.request("getCurrentPosition", json!({})).await })
    };
    let outgoing = out_rx.recv().await.unwrap();
    let reply = json!({
        "requestId": outgoing.id.unwrap().to_string(),
        "result": {"cfi": "epubcfi(/6/2)"},
    });
    dispatch_surface_message(&bridge, &event_tx, &sel_tx, reply)
        .await
        .unwrap();
    let position = requester.await.unwrap().unwrap();
    assert_eq!(position["cfi"], "epubcfi(/6/2)");

    // A typed notification flows into the selection stage.
    let notification = json!({"type": "selectionChanged", "payload": {"text": "hi"}});
    dispatch_surface_message(&bridge, &event_tx, &sel_tx, notification)
        .await
        .unwrap();
    assert_eq!(sel_rx.recv().await.unwrap(), "hi");

    // Malformed ids and shapeless messages are dropped.
    dispatch_surface_message(&bridge, &event_tx, &sel_tx, json!({"requestId": "nope"}))
        .await
        .unwrap();
    dispatch_surface_message(&bridge, &event_tx, &sel_tx, json!({"foo": 1}))
        .await
        .unwrap();
    assert!(event_rx.is_empty());
    assert!(sel_rx.is_empty());
}

#[tokio::test]
async fn surface_events_route_by_kind() {
    let (event_tx, event_rx) = kanal::bounded_async(8);
    let (sel_tx, sel_rx) = kanal::bounded_async(8);

    forward_surface_event(
        &event_tx,
        &sel_tx,
        "selectionChanged",
        json!({"text": "hello"}),
    )
    .await
    .unwrap();
    assert_eq!(sel_rx.recv().await.unwrap(), "hello");

    forward_surface_event(&event_tx, &sel_tx, "decorationActivated", json!({"word": "run"}))
        .await
        .unwrap();
    assert!(matches!(
        event_rx.recv().await.unwrap(),
        lumi_core::types::AppEvent::LookupWord(word) if word == "run"
    ));

    forward_surface_event(&event_tx, &sel_tx, "tapOnLink", json!({}))
        .await
        .unwrap();
    assert!(event_rx.is_empty());
    assert!(sel_rx.is_empty());
}
