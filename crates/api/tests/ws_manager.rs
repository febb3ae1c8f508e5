//! Tenant-scoped delivery behaviour of the WebSocket connection manager.

use axum::extract::ws::Message;
use uuid::Uuid;

use ghx_api::ws::WsManager;

#[tokio::test]
async fn broadcast_reaches_only_the_target_organization() {
    let manager = WsManager::new();
    let org_a = Uuid::new_v4();
    let org_b = Uuid::new_v4();

    let mut rx_a = manager.add("conn-a".to_string(), Uuid::new_v4(), org_a).await;
    let mut rx_b = manager.add("conn-b".to_string(), Uuid::new_v4(), org_b).await;

    let delivered = manager
        .broadcast_to_org(org_a, Message::Text("hello".into()))
        .await;

    assert_eq!(delivered, 1);
    assert!(rx_a.try_recv().is_ok());
    assert!(rx_b.try_recv().is_err());
}

#[tokio::test]
async fn removed_connections_stop_counting() {
    let manager = WsManager::new();
    let org = Uuid::new_v4();

    manager.add("conn".to_string(), Uuid::new_v4(), org).await;
    assert_eq!(manager.connection_count().await, 1);

    manager.remove("conn").await;
    assert_eq!(manager.connection_count().await, 0);

    let delivered = manager.broadcast_to_org(org, Message::Text("gone".into())).await;
    assert_eq!(delivered, 0);
}

#[tokio::test]
async fn shutdown_sends_close_to_everyone() {
    let manager = WsManager::new();
    let mut rx = manager
        .add("conn".to_string(), Uuid::new_v4(), Uuid::new_v4())
        .await;

    manager.shutdown_all().await;

    assert!(matches!(rx.try_recv(), Ok(Message::Close(None))));
    assert_eq!(manager.connection_count().await, 0);
}
