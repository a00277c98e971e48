//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container for efficiency and need a
//! running Docker daemon, so they are ignored by default. Run with:
//!
//! ```bash
//! cargo test -p store --test postgres_integration -- --ignored --test-threads=1
//! ```

use std::sync::Arc;

use common::{Money, OrderId, UserId};
use sqlx::PgPool;
use store::{Cart, Order, OrderFilter, OrderItem, OrderPatch, OrderStore, PostgresStore, UserStore};
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            // Create a temporary pool just for the schema
            let temp_pool = PgPool::connect(&connection_string).await.unwrap();

            sqlx::raw_sql(include_str!("../../../migrations/001_create_orders.sql"))
                .execute(&temp_pool)
                .await
                .unwrap();

            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

async fn connect_store() -> PostgresStore {
    let info = get_container_info().await;
    let pool = PgPool::connect(&info.connection_string).await.unwrap();
    PostgresStore::new(pool)
}

fn order_for(user_id: UserId) -> Order {
    Order::new(
        user_id,
        vec![OrderItem::new("Pizza", Money::from_major(10), 2)],
        Money::from_major(25),
        serde_json::json!({"street": "1 Main St", "city": "Pune"}),
        Money::from_major(3),
        Money::from_major(5),
    )
}

#[tokio::test]
#[ignore = "requires a running Docker daemon"]
async fn insert_and_get_roundtrip() {
    let store = connect_store().await;
    let order = order_for(UserId::new());
    let id = order.id;

    store.insert(order.clone()).await.unwrap();

    let found = store.get(id).await.unwrap().expect("order should exist");
    assert_eq!(found.id, order.id);
    assert_eq!(found.user_id, order.user_id);
    assert_eq!(found.items, order.items);
    assert_eq!(found.amount, order.amount);
    assert_eq!(found.address, order.address);
    assert_eq!(found.payment, false);
    assert_eq!(found.status, order.status);
}

#[tokio::test]
#[ignore = "requires a running Docker daemon"]
async fn find_filters_by_user() {
    let store = connect_store().await;
    let alice = UserId::new();
    let bob = UserId::new();

    store.insert(order_for(alice)).await.unwrap();
    store.insert(order_for(alice)).await.unwrap();
    store.insert(order_for(bob)).await.unwrap();

    let mine = store.find(OrderFilter::for_user(alice)).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|o| o.user_id == alice));
}

#[tokio::test]
#[ignore = "requires a running Docker daemon"]
async fn update_patches_only_named_fields() {
    let store = connect_store().await;
    let order = order_for(UserId::new());
    let id = order.id;
    store.insert(order.clone()).await.unwrap();

    assert!(store.update(id, OrderPatch::payment(true)).await.unwrap());
    let after = store.get(id).await.unwrap().unwrap();
    assert!(after.payment);
    assert_eq!(after.status, order.status);
    assert_eq!(after.items, order.items);

    assert!(
        store
            .update(id, OrderPatch::status("Delivered"))
            .await
            .unwrap()
    );
    let after = store.get(id).await.unwrap().unwrap();
    assert_eq!(after.status, "Delivered");
    assert!(after.payment);
}

#[tokio::test]
#[ignore = "requires a running Docker daemon"]
async fn update_missing_returns_false() {
    let store = connect_store().await;
    let updated = store
        .update(OrderId::new(), OrderPatch::payment(true))
        .await
        .unwrap();
    assert!(!updated);
}

#[tokio::test]
#[ignore = "requires a running Docker daemon"]
async fn delete_is_tolerant_of_missing_rows() {
    let store = connect_store().await;
    let order = order_for(UserId::new());
    let id = order.id;
    store.insert(order).await.unwrap();

    assert!(store.delete(id).await.unwrap());
    assert!(store.get(id).await.unwrap().is_none());
    assert!(!store.delete(id).await.unwrap());
}

#[tokio::test]
#[ignore = "requires a running Docker daemon"]
async fn cart_upsert_and_read() {
    let store = connect_store().await;
    let user = UserId::new();

    let mut cart = Cart::new();
    cart.insert("pizza-margherita".to_string(), 2);
    store.set_cart(user, cart.clone()).await.unwrap();
    assert_eq!(store.get_cart(user).await.unwrap(), cart);

    store.set_cart(user, Cart::new()).await.unwrap();
    assert!(store.get_cart(user).await.unwrap().is_empty());
}
