use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{Money, OrderId, UserId};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    Cart, Order, Result,
    store::{OrderFilter, OrderPatch, OrderStore, UserStore},
};

/// PostgreSQL-backed store implementation.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to the given database URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPool::connect(url).await?;
        Ok(Self { pool })
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_order(row: PgRow) -> Result<Order> {
        let items_json: serde_json::Value = row.try_get("items")?;

        Ok(Order {
            id: OrderId::from_uuid(row.try_get::<Uuid, _>("id")?),
            user_id: UserId::from_uuid(row.try_get::<Uuid, _>("user_id")?),
            items: serde_json::from_value(items_json)?,
            amount: Money::from_minor(row.try_get("amount")?),
            address: row.try_get("address")?,
            discount: Money::from_minor(row.try_get("discount")?),
            delivery: Money::from_minor(row.try_get("delivery")?),
            payment: row.try_get("payment")?,
            status: row.try_get("status")?,
            date: row.try_get::<DateTime<Utc>, _>("date")?,
        })
    }
}

#[async_trait]
impl OrderStore for PostgresStore {
    async fn insert(&self, order: Order) -> Result<()> {
        let items = serde_json::to_value(&order.items)?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, user_id, items, amount, address, discount, delivery, payment, status, date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.user_id.as_uuid())
        .bind(items)
        .bind(order.amount.minor_units())
        .bind(&order.address)
        .bind(order.discount.minor_units())
        .bind(order.delivery.minor_units())
        .bind(order.payment)
        .bind(&order.status)
        .bind(order.date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>> {
        let row = sqlx::query("SELECT * FROM orders WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_order).transpose()
    }

    async fn find(&self, filter: OrderFilter) -> Result<Vec<Order>> {
        let rows = match filter.user_id {
            Some(user_id) => {
                sqlx::query("SELECT * FROM orders WHERE user_id = $1")
                    .bind(user_id.as_uuid())
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query("SELECT * FROM orders")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        rows.into_iter().map(Self::row_to_order).collect()
    }

    async fn update(&self, id: OrderId, patch: OrderPatch) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET payment = COALESCE($2, payment),
                status = COALESCE($3, status)
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(patch.payment)
        .bind(patch.status)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: OrderId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserStore for PostgresStore {
    async fn set_cart(&self, user_id: UserId, cart: Cart) -> Result<()> {
        let cart_json = serde_json::to_value(&cart)?;

        sqlx::query(
            r#"
            INSERT INTO users (id, cart_data)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET cart_data = EXCLUDED.cart_data
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(cart_json)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_cart(&self, user_id: UserId) -> Result<Cart> {
        let row = sqlx::query("SELECT cart_data FROM users WHERE id = $1")
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let cart_json: serde_json::Value = row.try_get("cart_data")?;
                Ok(serde_json::from_value(cart_json)?)
            }
            None => Ok(Cart::new()),
        }
    }
}
