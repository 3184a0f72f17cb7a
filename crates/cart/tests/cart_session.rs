//! End-to-end cart session tests against file-backed storage.
//!
//! These exercise the full validate-compute-commit path with the real
//! `JsonFileStorage` adapter and scripted catalog/stock collaborators,
//! including a fresh bootstrap from the files a previous session wrote.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;

use rocketshoes_cart::api::ApiError;
use rocketshoes_cart::ports::{NotificationSink, ProductCatalog, StockOracle};
use rocketshoes_cart::storage::JsonFileStorage;
use rocketshoes_cart::store::{CartStore, MSG_OUT_OF_STOCK};
use rocketshoes_cart::types::{Product, StockLevel};
use rocketshoes_core::{Price, ProductId};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct ScriptedBackend {
    products: HashMap<ProductId, Product>,
    stock: HashMap<ProductId, u32>,
}

impl ScriptedBackend {
    fn new(entries: &[(i32, &str, u32)]) -> Self {
        let mut products = HashMap::new();
        let mut stock = HashMap::new();
        for &(id, title, amount) in entries {
            let product_id = ProductId::new(id);
            products.insert(
                product_id,
                Product {
                    id: product_id,
                    title: title.to_owned(),
                    price: Price::new(Decimal::new(1999, 1)),
                    image_url: format!("https://cdn.example.com/{id}.jpg"),
                },
            );
            stock.insert(product_id, amount);
        }
        Self { products, stock }
    }
}

#[async_trait]
impl ProductCatalog for ScriptedBackend {
    async fn product(&self, product_id: ProductId) -> Result<Product, ApiError> {
        self.products
            .get(&product_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("products/{product_id}")))
    }
}

#[async_trait]
impl StockOracle for ScriptedBackend {
    async fn stock(&self, product_id: ProductId) -> Result<StockLevel, ApiError> {
        self.stock
            .get(&product_id)
            .map(|&amount| StockLevel {
                id: product_id,
                amount,
            })
            .ok_or_else(|| ApiError::NotFound(format!("stock/{product_id}")))
    }
}

#[derive(Default, Clone)]
struct RecordingSink {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingSink {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_owned());
    }
}

fn session(dir: &std::path::Path, sink: &RecordingSink) -> CartStore {
    let backend = Arc::new(ScriptedBackend::new(&[
        (1, "Tenis de Caminhada Leve", 5),
        (2, "Tenis VR Caminhada", 2),
        (3, "Tenis Adapt Storm", 0),
    ]));
    CartStore::new(
        Box::new(JsonFileStorage::new(dir)),
        backend.clone(),
        backend,
        Arc::new(sink.clone()),
    )
}

#[tokio::test]
async fn test_full_session_survives_restart() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let sink = RecordingSink::default();

    {
        let mut store = session(dir.path(), &sink);
        store.add_product(ProductId::new(1)).await;
        store.add_product(ProductId::new(2)).await;
        store.add_product(ProductId::new(1)).await;
        store.update_product_amount(ProductId::new(2), 2).await;
    }
    assert!(sink.messages().is_empty());

    // a fresh store bootstraps from what the previous session persisted
    let mut store = session(dir.path(), &sink);
    let amounts: Vec<(i32, u32)> = store
        .items()
        .iter()
        .map(|item| (item.product_id.as_i32(), item.amount))
        .collect();
    assert_eq!(amounts, vec![(1, 2), (2, 2)]);

    store.remove_product(ProductId::new(1));
    assert_eq!(store.items().len(), 1);

    // restart again, the removal stuck
    let store = session(dir.path(), &sink);
    assert_eq!(store.items().len(), 1);
    assert_eq!(
        store.items().first().map(|item| item.product_id),
        Some(ProductId::new(2))
    );
    assert!(sink.messages().is_empty());
}

#[tokio::test]
async fn test_out_of_stock_product_never_reaches_the_files() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let sink = RecordingSink::default();

    let mut store = session(dir.path(), &sink);
    store.add_product(ProductId::new(3)).await;

    assert!(store.items().is_empty());
    assert_eq!(sink.messages(), vec![MSG_OUT_OF_STOCK.to_owned()]);
    // no commit happened, so nothing was written at all
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
