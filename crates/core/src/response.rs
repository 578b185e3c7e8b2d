//! Search response assembly.
//!
//! Combines the dispatcher's raw offer rows and, when exactly one product
//! matched, the allocation engine's output into the single JSON payload
//! served to clients. Multi-product result sets are for browsing only: the
//! system never auto-picks "the" product to allocate against, so product,
//! allocation, and totals stay empty in that case.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::allocation::{AllocationLine, allocate};
use crate::types::{Offer, ProductId};

/// The product identity reported when the result set is unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductIdentity {
    pub sku: String,
    pub name: String,
}

/// Aggregate totals over the emitted allocation lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Totals {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_no_vat: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_with_vat: Decimal,
    pub allocated_qty: u32,
    pub missing_qty: u32,
}

/// Display projection of an offer row for the browsing table.
///
/// Always returned for every matching offer, regardless of whether an
/// allocation was computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferView {
    pub product_id: ProductId,
    pub sku: String,
    pub product_name: String,
    pub supplier_name: Option<String>,
    pub city: Option<String>,
    pub stock: i32,
    pub lead_time_days: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_no_vat: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_with_vat: Decimal,
}

impl From<&Offer> for OfferView {
    fn from(offer: &Offer) -> Self {
        Self {
            product_id: offer.product_id,
            sku: offer.sku.clone(),
            product_name: offer.product_name.clone(),
            supplier_name: offer.supplier_name.clone(),
            city: offer.city.clone(),
            stock: offer.stock,
            lead_time_days: offer.lead_time_days,
            price_no_vat: offer.price_no_vat,
            price_with_vat: offer.price_with_vat(),
        }
    }
}

/// The complete search API payload.
///
/// Every field is always present in the serialized form; clients
/// distinguish outcomes by which of `error`, `product`, and `offers` are
/// populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResponse {
    pub product: Option<ProductIdentity>,
    pub requested_qty: u32,
    pub allocation: Vec<AllocationLine>,
    pub totals: Option<Totals>,
    pub offers: Vec<OfferView>,
    pub remaining: u32,
    pub distinct_products: usize,
    pub error: Option<String>,
}

impl SearchResponse {
    /// The all-defaults-plus-error shape used for user-facing failures.
    #[must_use]
    pub fn error_response(requested_qty: u32, message: impl Into<String>) -> Self {
        Self {
            product: None,
            requested_qty,
            allocation: Vec::new(),
            totals: None,
            offers: Vec::new(),
            remaining: requested_qty,
            distinct_products: 0,
            error: Some(message.into()),
        }
    }
}

/// Shape dispatcher output into the response payload.
///
/// Computes the distinct product count over all offers, runs the allocation
/// engine only when the result set maps to exactly one product, and always
/// projects the full offer list for the browsing table.
#[must_use]
pub fn assemble(offers: Vec<Offer>, requested_qty: u32) -> SearchResponse {
    let distinct: HashSet<ProductId> = offers.iter().map(|o| o.product_id).collect();
    let distinct_products = distinct.len();

    let (product, allocation, totals, remaining) = if distinct_products == 1 {
        let first = offers.first();
        let product = first.map(|o| ProductIdentity {
            sku: o.sku.clone(),
            name: o.product_name.clone(),
        });
        let result = allocate(&offers, requested_qty);
        let remaining = result.missing_qty;
        let totals = Totals {
            total_no_vat: result.total_no_vat,
            total_with_vat: result.total_with_vat,
            allocated_qty: result.allocated_qty,
            missing_qty: result.missing_qty,
        };
        (product, result.lines, Some(totals), remaining)
    } else {
        (None, Vec::new(), None, requested_qty)
    };

    let offer_views = offers.iter().map(OfferView::from).collect();

    SearchResponse {
        product,
        requested_qty,
        allocation,
        totals,
        offers: offer_views,
        remaining,
        distinct_products,
        error: None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn offer(product_id: i64, sku: &str, stock: i32, price: i64) -> Offer {
        Offer {
            product_id: ProductId::new(product_id),
            sku: sku.to_string(),
            product_name: format!("Product {product_id}"),
            supplier_name: Some("Supplier".to_string()),
            city: Some("Riga".to_string()),
            stock,
            lead_time_days: 2,
            price_no_vat: Decimal::from(price),
            vat_rate: Decimal::from(20),
        }
    }

    #[test]
    fn test_single_product_allocates() {
        let offers = vec![offer(7, "PD-7", 4, 10), offer(7, "PD-7", 10, 12)];
        let response = assemble(offers, 10);

        assert_eq!(response.distinct_products, 1);
        let product = response.product.unwrap();
        assert_eq!(product.sku, "PD-7");
        assert_eq!(response.allocation.len(), 2);
        let totals = response.totals.unwrap();
        assert_eq!(totals.allocated_qty, 10);
        assert_eq!(totals.missing_qty, 0);
        assert_eq!(totals.total_no_vat, Decimal::from(112));
        assert_eq!(response.remaining, 0);
        assert_eq!(response.offers.len(), 2);
        assert!(response.error.is_none());
    }

    #[test]
    fn test_multiple_products_browse_only() {
        let offers = vec![
            offer(101, "PD-101", 5, 10),
            offer(101, "PD-101", 5, 11),
            offer(102, "PD-102", 5, 12),
        ];
        let response = assemble(offers, 10);

        assert_eq!(response.distinct_products, 2);
        assert!(response.product.is_none());
        assert!(response.allocation.is_empty());
        assert!(response.totals.is_none());
        assert_eq!(response.remaining, 10);
        // The full flat offer list is still returned for browsing
        assert_eq!(response.offers.len(), 3);
    }

    #[test]
    fn test_partial_fulfillment_reports_remaining() {
        let offers = vec![offer(3, "PD-3", 0, 5), offer(3, "PD-3", 3, 8)];
        let response = assemble(offers, 5);

        let totals = response.totals.unwrap();
        assert_eq!(totals.allocated_qty, 3);
        assert_eq!(totals.missing_qty, 2);
        assert_eq!(response.remaining, 2);
    }

    #[test]
    fn test_offer_projection_derives_vat_price() {
        let offers = vec![offer(1, "PD-1", 2, 100)];
        let response = assemble(offers, 1);

        assert_eq!(response.offers[0].price_no_vat, Decimal::from(100));
        assert_eq!(response.offers[0].price_with_vat, Decimal::from(120));
    }

    #[test]
    fn test_error_response_shape() {
        let response = SearchResponse::error_response(3, "nothing found");

        assert!(response.product.is_none());
        assert_eq!(response.requested_qty, 3);
        assert!(response.allocation.is_empty());
        assert!(response.totals.is_none());
        assert!(response.offers.is_empty());
        assert_eq!(response.remaining, 3);
        assert_eq!(response.distinct_products, 0);
        assert_eq!(response.error.as_deref(), Some("nothing found"));
    }

    #[test]
    fn test_serialized_payload_has_all_keys() {
        let json = serde_json::to_value(assemble(vec![offer(1, "PD-1", 2, 10)], 1)).unwrap();
        let object = json.as_object().unwrap();
        for key in [
            "product",
            "requested_qty",
            "allocation",
            "totals",
            "offers",
            "remaining",
            "distinct_products",
            "error",
        ] {
            assert!(object.contains_key(key), "missing key {key}");
        }
        // Monetary fields serialize as JSON numbers, not strings
        assert!(json["offers"][0]["price_no_vat"].is_number());
        assert!(json["totals"]["total_with_vat"].is_number());
    }
}
