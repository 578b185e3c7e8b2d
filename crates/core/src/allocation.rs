//! Greedy multi-supplier quantity allocation.
//!
//! Given a list of offers for a single product, already sorted by the
//! caller's chosen sort key, [`allocate`] fills a requested quantity across
//! suppliers in order until the quantity is met or supply runs out.
//!
//! The engine is pure: it performs no I/O and never mutates its inputs.
//! Monetary math uses [`rust_decimal::Decimal`] throughout so line and grand
//! totals carry exact values; rounding happens only at presentation time.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::Offer;

/// One offer's contribution to fulfilling a requested quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationLine {
    pub supplier_name: Option<String>,
    pub city: Option<String>,
    pub lead_time_days: i32,
    /// Units taken from this offer. Always greater than zero.
    pub take: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_no_vat: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_with_vat: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub line_total_no_vat: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub line_total_with_vat: Decimal,
}

/// Outcome of allocating a requested quantity across a set of offers.
///
/// Invariant: `allocated_qty + missing_qty` equals the requested quantity.
/// `missing_qty > 0` signals partial fulfillment, which is a normal,
/// reportable outcome rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationResult {
    pub lines: Vec<AllocationLine>,
    pub total_no_vat: Decimal,
    pub total_with_vat: Decimal,
    pub allocated_qty: u32,
    pub missing_qty: u32,
}

/// Allocate `requested` units across `offers`, visiting them in order.
///
/// Offers with no stock are skipped without emitting a line. Iteration
/// stops as soon as the requested quantity is filled, so offers past that
/// point are never visited. The caller is responsible for ensuring all
/// offers belong to a single product; the engine does not check.
#[must_use]
pub fn allocate(offers: &[Offer], requested: u32) -> AllocationResult {
    let mut remaining = requested;
    let mut lines = Vec::new();
    let mut total_no_vat = Decimal::ZERO;
    let mut total_with_vat = Decimal::ZERO;

    for offer in offers {
        if remaining == 0 {
            break;
        }
        let Ok(stock) = u32::try_from(offer.stock) else {
            // Negative stock never contributes
            continue;
        };
        if stock == 0 {
            continue;
        }

        let take = remaining.min(stock);
        let price_with_vat = offer.price_with_vat();
        let line_no_vat = offer.price_no_vat * Decimal::from(take);
        let line_with_vat = price_with_vat * Decimal::from(take);

        lines.push(AllocationLine {
            supplier_name: offer.supplier_name.clone(),
            city: offer.city.clone(),
            lead_time_days: offer.lead_time_days,
            take,
            price_no_vat: offer.price_no_vat,
            price_with_vat,
            line_total_no_vat: line_no_vat,
            line_total_with_vat: line_with_vat,
        });

        total_no_vat += line_no_vat;
        total_with_vat += line_with_vat;
        remaining -= take;
    }

    AllocationResult {
        lines,
        total_no_vat,
        total_with_vat,
        allocated_qty: requested - remaining,
        missing_qty: remaining,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    fn offer(supplier: &str, stock: i32, price: i64) -> Offer {
        Offer {
            product_id: ProductId::new(1),
            sku: "PD-100".to_string(),
            product_name: "Hex bolt M8".to_string(),
            supplier_name: Some(supplier.to_string()),
            city: Some("Hamburg".to_string()),
            stock,
            lead_time_days: 5,
            price_no_vat: Decimal::from(price),
            vat_rate: Decimal::from(20),
        }
    }

    #[test]
    fn test_splits_across_suppliers_until_filled() {
        // qty=10 over [stock 4 @ 10, stock 10 @ 12]
        let offers = vec![offer("A", 4, 10), offer("B", 10, 12)];
        let result = allocate(&offers, 10);

        assert_eq!(result.lines.len(), 2);
        assert_eq!(result.lines[0].take, 4);
        assert_eq!(result.lines[0].line_total_no_vat, Decimal::from(40));
        assert_eq!(result.lines[1].take, 6);
        assert_eq!(result.lines[1].line_total_no_vat, Decimal::from(72));
        assert_eq!(result.allocated_qty, 10);
        assert_eq!(result.missing_qty, 0);
        assert_eq!(result.total_no_vat, Decimal::from(112));
    }

    #[test]
    fn test_skips_zero_stock_without_halting() {
        // qty=5 over [stock 0 @ 5, stock 3 @ 8]
        let offers = vec![offer("A", 0, 5), offer("B", 3, 8)];
        let result = allocate(&offers, 5);

        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.lines[0].supplier_name.as_deref(), Some("B"));
        assert_eq!(result.lines[0].take, 3);
        assert_eq!(result.allocated_qty, 3);
        assert_eq!(result.missing_qty, 2);
    }

    #[test]
    fn test_stops_once_filled() {
        let offers = vec![offer("A", 5, 10), offer("B", 5, 11), offer("C", 5, 12)];
        let result = allocate(&offers, 5);

        // Later offers are never visited once the quantity is met
        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.lines[0].supplier_name.as_deref(), Some("A"));
        assert_eq!(result.missing_qty, 0);
    }

    #[test]
    fn test_shortage_consumes_all_available_stock() {
        let offers = vec![offer("A", 2, 10), offer("B", 3, 12)];
        let result = allocate(&offers, 100);

        assert_eq!(result.allocated_qty, 5);
        assert_eq!(result.missing_qty, 95);
        // Every offer with stock is fully consumed
        assert_eq!(result.lines[0].take, 2);
        assert_eq!(result.lines[1].take, 3);
    }

    #[test]
    fn test_conservation_invariant() {
        let offers = vec![offer("A", 3, 10), offer("B", 0, 9), offer("C", 7, 12)];
        for requested in [1, 5, 10, 50] {
            let result = allocate(&offers, requested);
            assert_eq!(result.allocated_qty + result.missing_qty, requested);
        }
    }

    #[test]
    fn test_negative_stock_is_skipped() {
        let offers = vec![offer("A", -4, 10), offer("B", 2, 12)];
        let result = allocate(&offers, 3);

        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.allocated_qty, 2);
        assert_eq!(result.missing_qty, 1);
    }

    #[test]
    fn test_no_offers() {
        let result = allocate(&[], 4);
        assert!(result.lines.is_empty());
        assert_eq!(result.allocated_qty, 0);
        assert_eq!(result.missing_qty, 4);
        assert_eq!(result.total_no_vat, Decimal::ZERO);
    }

    #[test]
    fn test_vat_totals() {
        // 4 units at 10.00 + 20% VAT = 48.00 gross
        let offers = vec![offer("A", 4, 10)];
        let result = allocate(&offers, 4);

        assert_eq!(result.total_no_vat, Decimal::from(40));
        assert_eq!(result.total_with_vat, Decimal::from(48));
        assert_eq!(result.lines[0].price_with_vat, Decimal::from(12));
    }

    #[test]
    fn test_totals_invariant_across_sort_orders_with_ample_stock() {
        // Same offers visited in either sort order consume the same set
        // when supply covers the request, so totals must match.
        let mut by_price = vec![offer("A", 6, 10), offer("B", 6, 12)];
        by_price[0].lead_time_days = 9;
        by_price[1].lead_time_days = 2;
        let mut by_lead = by_price.clone();
        by_lead.reverse();

        let a = allocate(&by_price, 12);
        let b = allocate(&by_lead, 12);

        assert_eq!(a.allocated_qty, b.allocated_qty);
        assert_eq!(a.missing_qty, b.missing_qty);
        assert_eq!(a.total_no_vat, b.total_no_vat);
        assert_eq!(a.total_with_vat, b.total_with_vat);
    }
}
