use crate::DbError;
use chrono::{DateTime, Utc};
use core_types::{OrderRecord, ProductRecord, ReviewRecord};
use sqlx::postgres::PgPool;

/// The `StoreRepository` provides a high-level, application-specific
/// interface to the database. It encapsulates all SQL queries and data
/// access logic for the storefront.
#[derive(Debug, Clone)]
pub struct StoreRepository {
    pool: PgPool,
}

impl StoreRepository {
    /// Creates a new `StoreRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches the full active-product set. The analytics window does not
    /// bound this query; only orders and reviews are window-filtered.
    pub async fn get_active_products(&self) -> Result<Vec<ProductRecord>, DbError> {
        let products = sqlx::query_as::<_, ProductRecord>(
            r#"
            SELECT id, title, category, price, sold_count, rating, review_count,
                   profit_margin, tags, created_at
            FROM products
            WHERE is_active
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Fetches all orders created at or after the window cutoff.
    pub async fn get_orders_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<OrderRecord>, DbError> {
        let orders = sqlx::query_as::<_, OrderRecord>(
            r#"
            SELECT id, customer_id, total, status, created_at
            FROM orders
            WHERE created_at >= $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Fetches all reviews created at or after the window cutoff.
    pub async fn get_reviews_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<ReviewRecord>, DbError> {
        let reviews = sqlx::query_as::<_, ReviewRecord>(
            r#"
            SELECT id, product_id, rating, created_at
            FROM reviews
            WHERE created_at >= $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    /// Saves a single product to the database.
    /// Uses `ON CONFLICT DO NOTHING` to be idempotent, so the seeder can be
    /// run repeatedly without causing errors if the data already exists.
    pub async fn save_product(&self, product: &ProductRecord) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, title, category, price, sold_count, rating,
                                  review_count, profit_margin, tags, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, TRUE, $10)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(product.id)
        .bind(&product.title)
        .bind(&product.category)
        .bind(product.price)
        .bind(product.sold_count)
        .bind(product.rating)
        .bind(product.review_count)
        .bind(product.profit_margin)
        .bind(&product.tags)
        .bind(product.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Saves a single order to the database, idempotently.
    pub async fn save_order(&self, order: &OrderRecord) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO orders (id, customer_id, total, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(order.id)
        .bind(order.customer_id)
        .bind(order.total)
        .bind(&order.status)
        .bind(order.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Saves a single review to the database, idempotently.
    pub async fn save_review(&self, review: &ReviewRecord) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, product_id, rating, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(review.id)
        .bind(review.product_id)
        .bind(review.rating)
        .bind(review.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
