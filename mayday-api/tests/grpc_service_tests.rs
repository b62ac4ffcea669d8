//! Integration tests for the gRPC alert service, exercised through a real
//! client against an in-process server.

use tokio_stream::wrappers::ReceiverStream;
use tonic::transport::Channel;
use tonic::Code;

use mayday_api::grpc::proto;
use mayday_api::grpc::proto::alert_service_client::AlertServiceClient;

#[path = "support/service.rs"]
mod test_service_support;

use test_service_support::spawn_alert_service;

fn request(kind: &str, narrative: &str) -> proto::CreateAlertRequest {
    proto::CreateAlertRequest {
        kind: kind.to_string(),
        latitude: 36.82,
        longitude: 10.17,
        narrative: narrative.to_string(),
        reporter_id: "12345678".to_string(),
    }
}

// ============================================================================
// UNARY CALLS
// ============================================================================

#[tokio::test]
async fn create_alert_assigns_id_and_pending_status() {
    let (_store, mut client) = spawn_alert_service().await;

    let record = client
        .create_alert(request("FIRE", "brush fire"))
        .await
        .expect("create alert")
        .into_inner();

    assert!(!record.alert_id.is_empty());
    assert_eq!(record.kind, "FIRE");
    assert_eq!(record.narrative, "brush fire");
    assert_eq!(record.reporter_id, "12345678");
    assert_eq!(record.status, "PENDING");
    assert!(record.received_at > 0);
}

#[tokio::test]
async fn create_alert_rejects_blank_kind() {
    let (_store, mut client) = spawn_alert_service().await;

    let err = client
        .create_alert(request("   ", "no kind"))
        .await
        .expect_err("blank kind must be rejected");

    assert_eq!(err.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn get_alert_returns_the_created_record() {
    let (_store, mut client) = spawn_alert_service().await;

    let created = client
        .create_alert(request("MEDICAL", "chest pain"))
        .await
        .expect("create alert")
        .into_inner();

    let fetched = client
        .get_alert(proto::GetAlertRequest {
            alert_id: created.alert_id.clone(),
        })
        .await
        .expect("get alert")
        .into_inner();

    assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_alert_unknown_id_is_not_found() {
    let (_store, mut client) = spawn_alert_service().await;

    let err = client
        .get_alert(proto::GetAlertRequest {
            alert_id: uuid::Uuid::now_v7().to_string(),
        })
        .await
        .expect_err("unknown id must miss");

    assert_eq!(err.code(), Code::NotFound);
}

#[tokio::test]
async fn get_alert_malformed_id_is_invalid_argument() {
    let (_store, mut client) = spawn_alert_service().await;

    let err = client
        .get_alert(proto::GetAlertRequest {
            alert_id: "not-a-uuid".to_string(),
        })
        .await
        .expect_err("malformed id must be rejected");

    assert_eq!(err.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn update_alert_status_persists_the_new_status() {
    let (_store, mut client) = spawn_alert_service().await;

    let created = client
        .create_alert(request("ACCIDENT", "pileup"))
        .await
        .expect("create alert")
        .into_inner();

    let updated = client
        .update_alert_status(proto::UpdateAlertStatusRequest {
            alert_id: created.alert_id.clone(),
            new_status: "RESOLVED".to_string(),
        })
        .await
        .expect("update status")
        .into_inner();
    assert_eq!(updated.status, "RESOLVED");

    let fetched = client
        .get_alert(proto::GetAlertRequest {
            alert_id: created.alert_id,
        })
        .await
        .expect("get alert")
        .into_inner();
    assert_eq!(fetched.status, "RESOLVED");
}

#[tokio::test]
async fn update_alert_status_accepts_any_casing() {
    let (_store, mut client) = spawn_alert_service().await;

    let created = client
        .create_alert(request("FLOOD", "rising water"))
        .await
        .expect("create alert")
        .into_inner();

    for token in ["resolved", "Resolved", "in_progress", "IN PROGRESS"] {
        let updated = client
            .update_alert_status(proto::UpdateAlertStatusRequest {
                alert_id: created.alert_id.clone(),
                new_status: token.to_string(),
            })
            .await
            .unwrap_or_else(|e| panic!("token {:?} must parse: {}", token, e))
            .into_inner();
        assert!(updated.status == "RESOLVED" || updated.status == "IN_PROGRESS");
    }
}

#[tokio::test]
async fn update_alert_status_rejects_unknown_token_without_side_effects() {
    let (_store, mut client) = spawn_alert_service().await;

    let created = client
        .create_alert(request("FIRE", "grass fire"))
        .await
        .expect("create alert")
        .into_inner();

    let err = client
        .update_alert_status(proto::UpdateAlertStatusRequest {
            alert_id: created.alert_id.clone(),
            new_status: "ONFIRE".to_string(),
        })
        .await
        .expect_err("unknown token must be rejected");
    assert_eq!(err.code(), Code::InvalidArgument);

    let fetched = client
        .get_alert(proto::GetAlertRequest {
            alert_id: created.alert_id,
        })
        .await
        .expect("get alert")
        .into_inner();
    assert_eq!(fetched.status, "PENDING");
}

#[tokio::test]
async fn update_alert_status_unknown_id_is_not_found() {
    let (_store, mut client) = spawn_alert_service().await;

    let err = client
        .update_alert_status(proto::UpdateAlertStatusRequest {
            alert_id: uuid::Uuid::now_v7().to_string(),
            new_status: "RESOLVED".to_string(),
        })
        .await
        .expect_err("unknown id must miss");

    assert_eq!(err.code(), Code::NotFound);
}

// ============================================================================
// SERVER STREAMING
// ============================================================================

async fn drain_list(
    client: &mut AlertServiceClient<Channel>,
    kind_filter: &str,
) -> Vec<proto::AlertRecord> {
    let mut stream = client
        .list_alerts(proto::ListAlertsRequest {
            kind_filter: kind_filter.to_string(),
        })
        .await
        .expect("open list stream")
        .into_inner();

    let mut records = Vec::new();
    while let Some(record) = stream.message().await.expect("read list item") {
        records.push(record);
    }
    records
}

#[tokio::test]
async fn list_alerts_streams_in_intake_order() {
    let (_store, mut client) = spawn_alert_service().await;

    let mut created_ids = Vec::new();
    for kind in ["FIRE", "MEDICAL", "FIRE"] {
        let record = client
            .create_alert(request(kind, "detail"))
            .await
            .expect("create alert")
            .into_inner();
        created_ids.push(record.alert_id);
    }

    let listed: Vec<String> = drain_list(&mut client, "")
        .await
        .into_iter()
        .map(|r| r.alert_id)
        .collect();
    assert_eq!(listed, created_ids);
}

#[tokio::test]
async fn list_alerts_filters_by_exact_kind() {
    let (_store, mut client) = spawn_alert_service().await;

    for kind in ["FIRE", "MEDICAL", "FIRE"] {
        client
            .create_alert(request(kind, "detail"))
            .await
            .expect("create alert");
    }

    let fires = drain_list(&mut client, "FIRE").await;
    assert_eq!(fires.len(), 2);
    assert!(fires.iter().all(|r| r.kind == "FIRE"));

    assert!(drain_list(&mut client, "ACCIDENT").await.is_empty());
    assert!(drain_list(&mut client, "FI").await.is_empty());
}

// ============================================================================
// CLIENT STREAMING
// ============================================================================

#[tokio::test]
async fn batch_create_counts_every_accepted_alert() {
    let (store, mut client) = spawn_alert_service().await;

    let items = vec![
        request("FIRE", "one"),
        request("MEDICAL", "two"),
        request("FLOOD", "three"),
    ];
    let summary = client
        .batch_create_alerts(tokio_stream::iter(items))
        .await
        .expect("batch create")
        .into_inner();

    assert_eq!(summary.alert_count, 3);
    assert_eq!(summary.status_message, "Batch accepted: 3 alerts recorded.");
    assert_eq!(store.count().expect("count"), 3);
}

#[tokio::test]
async fn batch_create_skips_invalid_items() {
    let (store, mut client) = spawn_alert_service().await;

    let items = vec![
        request("FIRE", "one"),
        request("", "missing kind"),
        request("MEDICAL", "three"),
    ];
    let summary = client
        .batch_create_alerts(tokio_stream::iter(items))
        .await
        .expect("batch create")
        .into_inner();

    assert_eq!(summary.alert_count, 2);
    assert_eq!(store.count().expect("count"), 2);
}

// ============================================================================
// BIDIRECTIONAL STREAMING
// ============================================================================

#[tokio::test]
async fn live_chat_answers_every_message_in_order() {
    let (_store, mut client) = spawn_alert_service().await;

    let texts = ["hello", "my street is blocked", "thank you"];
    let (tx, rx) = tokio::sync::mpsc::channel(8);
    for text in texts {
        tx.send(proto::ChatMessage {
            sender_id: "12345678".to_string(),
            text: text.to_string(),
            sent_at: 0,
        })
        .await
        .expect("queue message");
    }
    drop(tx);

    let mut inbound = client
        .live_chat(ReceiverStream::new(rx))
        .await
        .expect("open chat")
        .into_inner();

    let mut replies = Vec::new();
    while let Some(reply) = inbound.message().await.expect("read reply") {
        replies.push(reply);
    }

    assert_eq!(replies.len(), texts.len());
    for (reply, text) in replies.iter().zip(texts) {
        assert_eq!(reply.sender_id, "00000000");
        assert_eq!(
            reply.text,
            format!(
                "Operator: received \"{}\". Stay calm, help is being arranged.",
                text
            )
        );
        assert!(reply.sent_at > 0);
    }
}

#[tokio::test]
async fn live_chat_escalates_fire_reports() {
    let (_store, mut client) = spawn_alert_service().await;

    let (tx, rx) = tokio::sync::mpsc::channel(1);
    tx.send(proto::ChatMessage {
        sender_id: "12345678".to_string(),
        text: "there is a Fire in my kitchen".to_string(),
        sent_at: 0,
    })
    .await
    .expect("queue message");
    drop(tx);

    let mut inbound = client
        .live_chat(ReceiverStream::new(rx))
        .await
        .expect("open chat")
        .into_inner();

    let reply = inbound
        .message()
        .await
        .expect("read reply")
        .expect("one reply");
    assert_eq!(reply.text, "Operator: FIRE ALERT! Fire crews are on their way!");
    assert!(inbound.message().await.expect("stream end").is_none());
}
