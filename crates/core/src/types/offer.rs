//! Supplier offers for catalog products.

use rust_decimal::Decimal;

use super::ProductId;

/// One supplier's priced, stocked listing of one product.
///
/// Offers are read-only snapshots taken from the catalog store at query
/// time; they are never mutated during a request. Supplier metadata is
/// optional because offers join suppliers with a LEFT JOIN - an offer may
/// reference a supplier row that no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    pub product_id: ProductId,
    pub sku: String,
    pub product_name: String,
    pub supplier_name: Option<String>,
    pub city: Option<String>,
    /// Units currently in stock. Non-negative in practice; values at or
    /// below zero are skipped by the allocation engine.
    pub stock: i32,
    pub lead_time_days: i32,
    /// Unit price excluding VAT.
    pub price_no_vat: Decimal,
    /// VAT percentage, e.g. `20` meaning 20%.
    pub vat_rate: Decimal,
}

impl Offer {
    /// Unit price including VAT: `price_no_vat * (1 + vat_rate / 100)`.
    #[must_use]
    pub fn price_with_vat(&self) -> Decimal {
        self.price_no_vat * (Decimal::ONE + self.vat_rate / Decimal::ONE_HUNDRED)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn offer(price_no_vat: Decimal, vat_rate: Decimal) -> Offer {
        Offer {
            product_id: ProductId::new(1),
            sku: "SKU-1".to_string(),
            product_name: "Widget".to_string(),
            supplier_name: Some("Acme".to_string()),
            city: Some("Berlin".to_string()),
            stock: 10,
            lead_time_days: 3,
            price_no_vat,
            vat_rate,
        }
    }

    #[test]
    fn test_price_with_vat() {
        let o = offer(Decimal::from(100), Decimal::from(20));
        assert_eq!(o.price_with_vat(), Decimal::from(120));
    }

    #[test]
    fn test_price_with_vat_zero_rate() {
        let o = offer(Decimal::new(1999, 2), Decimal::ZERO);
        assert_eq!(o.price_with_vat(), Decimal::new(1999, 2));
    }

    #[test]
    fn test_price_with_vat_fractional() {
        // 10.00 at 7.5% = 10.75
        let o = offer(Decimal::from(10), Decimal::new(75, 1));
        assert_eq!(o.price_with_vat(), Decimal::new(1075, 2));
    }
}
