//! End-to-end tests against a local catalog server and an on-disk mirror.

use std::sync::Arc;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use rocketshoes_cart::{
    CartConfig, CartError, CartStore, ErrorKind, HttpCatalog, ProductId, ProductService,
    RecordingNotifier, ServiceError, StockService,
};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::net::TcpListener;

// =============================================================================
// Local Catalog Server
// =============================================================================

async fn stock(Path(id): Path<u32>) -> Result<Json<Value>, StatusCode> {
    match id {
        1 => Ok(Json(json!({ "id": 1, "amount": 2 }))),
        2 => Ok(Json(json!({ "id": 2, "amount": 5 }))),
        3 => Ok(Json(json!({ "id": 3, "amount": 1 }))),
        500 => Err(StatusCode::INTERNAL_SERVER_ERROR),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn product(Path(id): Path<u32>) -> Result<Json<Value>, StatusCode> {
    match id {
        1 => Ok(Json(json!({
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis1.jpg"
        }))),
        2 => Ok(Json(json!({
            "id": 2,
            "title": "Tênis VR Caminhada Confortável Detalhes Couro Masculino",
            "price": 139.9,
            "image": "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis2.jpg"
        }))),
        3 => Ok(Json(json!({ "id": 3, "title": "Broken", "price": "free" }))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

/// Starts the catalog on an ephemeral port and returns its base URL.
async fn spawn_catalog() -> String {
    let app = Router::new()
        .route("/stock/{id}", get(stock))
        .route("/products/{id}", get(product));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    format!("http://{}", addr)
}

fn config_for(base_url: &str, dir: &tempfile::TempDir) -> CartConfig {
    let mut config = CartConfig::default();
    config.api.base_url = base_url.to_string();
    config.api.timeout_secs = 5;
    config.storage.path = Some(dir.path().join("data").join("storage.db"));
    config
}

// =============================================================================
// HttpCatalog
// =============================================================================

#[tokio::test]
async fn test_catalog_lookups() {
    let base_url = spawn_catalog().await;
    let catalog = HttpCatalog::new(&base_url, Duration::from_secs(5)).unwrap();

    let stock = catalog.get_stock(ProductId::new(2)).await.unwrap();
    assert_eq!(stock.amount, 5);

    let product = catalog.get_product(ProductId::new(1)).await.unwrap();
    assert_eq!(product.title, "Tênis de Caminhada Leve Confortável");
    assert_eq!(product.price.cents(), 17990);
}

#[tokio::test]
async fn test_catalog_status_mapping() {
    let base_url = spawn_catalog().await;
    let catalog = HttpCatalog::new(&base_url, Duration::from_secs(5)).unwrap();

    assert_eq!(
        catalog.get_stock(ProductId::new(99)).await,
        Err(ServiceError::NotFound {
            resource: "stock",
            product_id: ProductId::new(99),
        })
    );
    assert!(matches!(
        catalog.get_stock(ProductId::new(500)).await,
        Err(ServiceError::Unavailable(_))
    ));
    assert!(matches!(
        catalog.get_product(ProductId::new(3)).await,
        Err(ServiceError::InvalidResponse(_))
    ));
}

// =============================================================================
// CartStore over HTTP + SQLite
// =============================================================================

#[tokio::test]
async fn test_cart_survives_restart() {
    let base_url = spawn_catalog().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&base_url, &dir);

    let first = CartStore::from_config(&config, Arc::new(RecordingNotifier::new()))
        .await
        .unwrap();
    first.add_product(ProductId::new(1)).await.unwrap();
    first.add_product(ProductId::new(2)).await.unwrap();
    first.add_product(ProductId::new(1)).await.unwrap();
    let saved = first.cart();
    drop(first);

    let second = CartStore::from_config(&config, Arc::new(RecordingNotifier::new()))
        .await
        .unwrap();

    assert_eq!(second.cart(), saved);
    assert_eq!(second.cart().amount_of(ProductId::new(1)), Some(2));
    assert_eq!(second.totals().total.cents(), 2 * 17990 + 13990);
}

#[tokio::test]
async fn test_stock_limit_over_http() {
    let base_url = spawn_catalog().await;
    let dir = tempfile::tempdir().unwrap();
    let notifier = Arc::new(RecordingNotifier::new());
    let store = CartStore::from_config(&config_for(&base_url, &dir), notifier.clone())
        .await
        .unwrap();

    store.add_product(ProductId::new(1)).await.unwrap();
    store.add_product(ProductId::new(1)).await.unwrap();
    let err = store.add_product(ProductId::new(1)).await.unwrap_err();

    assert_eq!(
        err,
        CartError::StockExceeded {
            product_id: ProductId::new(1),
            requested: 3,
            available: 2,
        }
    );
    assert_eq!(store.cart().amount_of(ProductId::new(1)), Some(2));
    assert_eq!(notifier.messages(), vec!["Requested quantity out of stock"]);
}

#[tokio::test]
async fn test_unknown_product_over_http() {
    let base_url = spawn_catalog().await;
    let dir = tempfile::tempdir().unwrap();
    let notifier = Arc::new(RecordingNotifier::new());
    let store = CartStore::from_config(&config_for(&base_url, &dir), notifier.clone())
        .await
        .unwrap();

    let err = store.add_product(ProductId::new(42)).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::OperationFailed);
    assert!(err.to_string().contains("not found"));
    assert!(store.cart().is_empty());
    assert_eq!(notifier.messages(), vec!["Failed to add product"]);
}
