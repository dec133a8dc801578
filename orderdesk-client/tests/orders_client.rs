use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use orderdesk_client::OrdersClient;
use orderdesk_core::{FetchError, FetchErrorKind, OrderReader, OrderWriter, SubmitError};

/// Serves `app` on an OS-assigned port and returns its base URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(base_url: &str) -> OrdersClient {
    OrdersClient::new(base_url, Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn test_fetch_orders_maps_the_envelope() {
    let app = Router::new().route(
        "/orders",
        get(|| async {
            Json(json!({
                "data": [
                    {
                        "id": 1,
                        "number_of_items": 501,
                        "created_at": "2024-04-09T10:00:00Z",
                        "shipping": [
                            { "pack_size": 500, "shipping_pack_quantity": 1 },
                            { "pack_size": 250, "shipping_pack_quantity": 1 }
                        ]
                    },
                    {
                        "id": 2,
                        "number_of_items": 3,
                        "created_at": "2024-04-10T08:30:00Z",
                        "shipping": null
                    }
                ],
                "message": "",
                "error": ""
            }))
        }),
    );
    let base_url = serve(app).await;

    let orders = client(&base_url).fetch_orders().await.unwrap();

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, 1);
    assert_eq!(orders[0].shipping.len(), 2);
    assert_eq!(orders[0].shipping[1].pack_size, 250);
    assert_eq!(orders[0].shipping[1].quantity, 1);
    assert!(orders[1].shipping.is_empty());
}

#[tokio::test]
async fn test_fetch_orders_surfaces_http_status() {
    let app = Router::new().route(
        "/orders",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "boom" }))) }),
    );
    let base_url = serve(app).await;

    let err = client(&base_url).fetch_orders().await.unwrap_err();

    assert!(matches!(err, FetchError::Status(500)));
}

#[tokio::test]
async fn test_fetch_orders_rejects_missing_data() {
    let app = Router::new().route(
        "/orders",
        get(|| async { Json(json!({ "message": "nothing here" })) }),
    );
    let base_url = serve(app).await;

    let err = client(&base_url).fetch_orders().await.unwrap_err();

    assert_eq!(err.kind(), FetchErrorKind::Parse);
}

#[tokio::test]
async fn test_fetch_orders_rejects_non_json_body() {
    let app = Router::new().route("/orders", get(|| async { "<html>maintenance</html>" }));
    let base_url = serve(app).await;

    let err = client(&base_url).fetch_orders().await.unwrap_err();

    assert_eq!(err.kind(), FetchErrorKind::Parse);
}

#[tokio::test]
async fn test_fetch_order_by_id() {
    let app = Router::new().route(
        "/orders/{id}",
        get(|| async {
            Json(json!({
                "data": {
                    "id": 42,
                    "number_of_items": 12,
                    "created_at": "2024-04-09T10:00:00Z",
                    "shipping": [{ "pack_size": 5, "shipping_pack_quantity": 2 }]
                }
            }))
        }),
    );
    // A trailing slash on the base URL must not produce `//orders/42`.
    let base_url = format!("{}/", serve(app).await);

    let order = client(&base_url).fetch_order(42).await.unwrap();

    assert_eq!(order.id, 42);
    assert_eq!(order.number_of_items, 12);
    assert_eq!(order.shipping.len(), 1);
}

#[tokio::test]
async fn test_fetch_order_not_found() {
    let app = Router::new().route(
        "/orders/{id}",
        get(|| async { (StatusCode::NOT_FOUND, Json(json!({ "error": "no such order" }))) }),
    );
    let base_url = serve(app).await;

    let err = client(&base_url).fetch_order(99).await.unwrap_err();

    assert!(matches!(err, FetchError::Status(404)));
}

#[tokio::test]
async fn test_submit_order_returns_created_id() {
    let app = Router::new().route(
        "/orders",
        post(|Json(body): Json<Value>| async move {
            if body == json!({ "number_of_items": 501 }) {
                (StatusCode::CREATED, Json(json!({ "data": { "id": 7 } })))
            } else {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "error": "unexpected body" })),
                )
            }
        }),
    );
    let base_url = serve(app).await;

    let created = client(&base_url).submit_order(501).await.unwrap();

    assert_eq!(created, Some(7));
}

#[tokio::test]
async fn test_submit_order_tolerates_empty_success_body() {
    let app = Router::new().route("/orders", post(|| async { StatusCode::NO_CONTENT }));
    let base_url = serve(app).await;

    let created = client(&base_url).submit_order(3).await.unwrap();

    assert_eq!(created, None);
}

#[tokio::test]
async fn test_submit_order_surfaces_http_status() {
    let app = Router::new().route(
        "/orders",
        post(|| async { (StatusCode::BAD_REQUEST, Json(json!({ "error": "rejected" }))) }),
    );
    let base_url = serve(app).await;

    let err = client(&base_url).submit_order(3).await.unwrap_err();

    assert!(matches!(err, SubmitError::Status(400)));
}

#[tokio::test]
async fn test_unreachable_service_is_a_transport_error() {
    // Bind then drop a listener so the port is known to be closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}", addr))
        .fetch_orders()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FetchErrorKind::Transport);
}

#[tokio::test]
async fn test_health_check_reports_healthy() {
    let app = Router::new().route("/health", get(|| async { Json(json!({ "status": "ok" })) }));
    let base_url = serve(app).await;

    assert!(client(&base_url).check_health().await.is_ok());
}

#[tokio::test]
async fn test_health_check_surfaces_degraded_status() {
    let app = Router::new().route(
        "/health",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "status": "down" }))) }),
    );
    let base_url = serve(app).await;

    let err = client(&base_url).check_health().await.unwrap_err();

    assert!(matches!(err, FetchError::Status(503)));
}
