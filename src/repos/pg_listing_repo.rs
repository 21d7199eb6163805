/*
 * Responsibility
 * - listings CRUD on PostgreSQL (sqlx)
 * - seller projection via LEFT JOIN on users (a missing user yields NULL name/email)
 */
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, postgres::PgPoolOptions};
use uuid::Uuid;

use crate::domain::listing::UnknownVariant;
use crate::domain::{
    Listing, ListingView, NewListing, Price, SellerProjection, SellerStats,
};
use crate::repos::error::{RepoError, RepoResult};
use crate::repos::listing_repo::{ListingRepo, StoreHealth};

#[derive(Debug, Clone, sqlx::FromRow)]
struct ListingRow {
    #[sqlx(rename = "listingId")]
    listing_id: Uuid,

    title: String,
    description: String,
    category: String,
    condition: String,
    price: f64,
    images: Vec<String>,

    #[sqlx(rename = "sellerId")]
    seller_id: Uuid,

    status: String,

    #[sqlx(rename = "createdAt")]
    created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    updated_at: DateTime<Utc>,

    #[sqlx(rename = "sellerName")]
    seller_name: Option<String>,

    #[sqlx(rename = "sellerEmail")]
    seller_email: Option<String>,
}

impl TryFrom<ListingRow> for ListingView {
    type Error = RepoError;

    fn try_from(row: ListingRow) -> Result<Self, Self::Error> {
        let price = Price::new(row.price).map_err(|_| UnknownVariant {
            kind: "price",
            value: row.price.to_string(),
        })?;

        Ok(ListingView {
            listing: Listing {
                id: row.listing_id,
                title: row.title,
                description: row.description,
                category: row.category.parse()?,
                condition: row.condition.parse()?,
                price,
                images: row.images,
                seller_id: row.seller_id,
                status: row.status.parse()?,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            seller: SellerProjection {
                id: row.seller_id,
                name: row.seller_name,
                email: row.seller_email,
            },
        })
    }
}

// `source` must expose the listings columns under the alias `l`.
fn view_sql(source: &str, tail: &str) -> String {
    format!(
        r#"
        {source}
        SELECT
            l."listingId", l.title, l.description, l.category, l."condition",
            l.price, l.images, l."sellerId", l.status, l."createdAt", l."updatedAt",
            u.name AS "sellerName", u.email AS "sellerEmail"
        FROM {from} l
        LEFT JOIN users u ON u."userId" = l."sellerId"
        {tail}
        "#,
        from = if source.is_empty() { "listings" } else { "changed" },
    )
}

fn into_views(rows: Vec<ListingRow>) -> RepoResult<Vec<ListingView>> {
    rows.into_iter().map(ListingView::try_from).collect()
}

#[derive(Clone, Debug)]
pub struct PgListingRepo {
    pool: PgPool,
}

impl PgListingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and bring the schema up to date.
    pub async fn connect(database_url: &str) -> RepoResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(sqlx::Error::from)?;

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl ListingRepo for PgListingRepo {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn health(&self) -> StoreHealth {
        if self.pool.is_closed() {
            return StoreHealth::Disconnected;
        }
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => StoreHealth::Connected,
            Err(e) => {
                tracing::warn!(error = %e, "database ping failed");
                StoreHealth::Disconnected
            }
        }
    }

    async fn list(&self) -> RepoResult<Vec<ListingView>> {
        let sql = view_sql("", r#"ORDER BY l."createdAt" DESC"#);
        let rows = sqlx::query_as::<_, ListingRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        into_views(rows)
    }

    async fn list_by_seller(&self, seller_id: Uuid) -> RepoResult<Vec<ListingView>> {
        let sql = view_sql(
            "",
            r#"WHERE l."sellerId" = $1 ORDER BY l."createdAt" DESC"#,
        );
        let rows = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(seller_id)
            .fetch_all(&self.pool)
            .await?;

        into_views(rows)
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<ListingView>> {
        let sql = view_sql("", r#"WHERE l."listingId" = $1"#);
        let row = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ListingView::try_from).transpose()
    }

    async fn create(&self, new: NewListing) -> RepoResult<ListingView> {
        let sql = view_sql(
            r#"
            WITH changed AS (
                INSERT INTO listings
                    ("listingId", title, description, category, "condition",
                     price, images, "sellerId", status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING *
            )
            "#,
            "",
        );
        let row = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&new.title)
            .bind(&new.description)
            .bind(new.category.as_str())
            .bind(new.condition.as_str())
            .bind(new.price.value())
            .bind(&new.images)
            .bind(new.seller_id)
            .bind(new.status.as_str())
            .fetch_one(&self.pool)
            .await?;

        row.try_into()
    }

    async fn update(&self, listing: &Listing) -> RepoResult<Option<ListingView>> {
        let sql = view_sql(
            r#"
            WITH changed AS (
                UPDATE listings
                SET
                    title = $2,
                    description = $3,
                    category = $4,
                    "condition" = $5,
                    price = $6,
                    images = $7,
                    status = $8,
                    "updatedAt" = now()
                WHERE "listingId" = $1
                RETURNING *
            )
            "#,
            "",
        );
        let row = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(listing.id)
            .bind(&listing.title)
            .bind(&listing.description)
            .bind(listing.category.as_str())
            .bind(listing.condition.as_str())
            .bind(listing.price.value())
            .bind(&listing.images)
            .bind(listing.status.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(ListingView::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM listings
            WHERE "listingId" = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn seller_stats(&self, seller_id: Uuid) -> RepoResult<SellerStats> {
        let (total_listings, active_listings, sold_listings, total_value) =
            sqlx::query_as::<_, (i64, i64, i64, f64)>(
                r#"
                SELECT
                    COUNT(*),
                    COUNT(*) FILTER (WHERE status = 'available'),
                    COUNT(*) FILTER (WHERE status = 'sold'),
                    COALESCE(SUM(price), 0)::DOUBLE PRECISION
                FROM listings
                WHERE "sellerId" = $1
                "#,
            )
            .bind(seller_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(SellerStats {
            total_listings,
            active_listings,
            sold_listings,
            total_value,
        })
    }
}
