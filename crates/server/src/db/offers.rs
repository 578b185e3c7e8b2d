//! Read-only queries over the offers/products/suppliers join.
//!
//! The ORDER BY column is resolved from the closed [`SortKey`] mapping,
//! never from user input; the search term and product-id set are always
//! bound as parameters.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use partdesk_core::{Offer, ProductId, SortKey};

use super::RepositoryError;
use crate::search::OfferStore;

/// Shared projection for all offer queries: offers joined with product
/// metadata, suppliers attached with a LEFT JOIN so orphaned offers still
/// surface.
const OFFER_SELECT: &str = "\
    SELECT o.product_id, p.sku, p.name AS product_name, \
           s.name AS supplier_name, s.city, \
           o.stock, o.lead_time_days, o.price_no_vat, o.vat_rate \
    FROM offers o \
    JOIN products p ON o.product_id = p.id \
    LEFT JOIN suppliers s ON o.supplier_id = s.id";

/// Internal row type for offer queries.
#[derive(Debug, sqlx::FromRow)]
struct OfferRow {
    product_id: i64,
    sku: String,
    product_name: String,
    supplier_name: Option<String>,
    city: Option<String>,
    stock: i32,
    lead_time_days: i32,
    price_no_vat: Decimal,
    vat_rate: Decimal,
}

impl From<OfferRow> for Offer {
    fn from(row: OfferRow) -> Self {
        Self {
            product_id: ProductId::new(row.product_id),
            sku: row.sku,
            product_name: row.product_name,
            supplier_name: row.supplier_name,
            city: row.city,
            stock: row.stock,
            lead_time_days: row.lead_time_days,
            price_no_vat: row.price_no_vat,
            vat_rate: row.vat_rate,
        }
    }
}

/// Repository for catalog offer queries.
#[derive(Clone)]
pub struct OfferRepository {
    pool: PgPool,
}

impl OfferRepository {
    /// Create a new offer repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OfferStore for OfferRepository {
    /// Case-insensitive substring match over SKU and product name.
    async fn search_by_term(
        &self,
        term: &str,
        sort: SortKey,
    ) -> Result<Vec<Offer>, RepositoryError> {
        let sql = format!(
            "{OFFER_SELECT} WHERE p.sku ILIKE $1 OR p.name ILIKE $1 ORDER BY {} ASC",
            sort.order_column()
        );
        let like = format!("%{term}%");

        let rows: Vec<OfferRow> = sqlx::query_as(&sql).bind(&like).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Offer::from).collect())
    }

    /// Offers restricted to an exact product-id set (semantic candidates).
    async fn search_by_product_ids(
        &self,
        ids: &[ProductId],
        sort: SortKey,
    ) -> Result<Vec<Offer>, RepositoryError> {
        let sql = format!(
            "{OFFER_SELECT} WHERE p.id = ANY($1) ORDER BY {} ASC",
            sort.order_column()
        );
        let ids: Vec<i64> = ids.iter().map(|id| id.as_i64()).collect();

        let rows: Vec<OfferRow> = sqlx::query_as(&sql).bind(&ids).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Offer::from).collect())
    }
}
