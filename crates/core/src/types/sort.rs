//! Sort key for offer listings.

/// Sort order applied to offer result sets.
///
/// The variants form a closed mapping to ORDER BY columns so an invalid
/// sort key degrades to the default at parse time instead of failing a
/// lookup at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Unit price excluding VAT, ascending (the default).
    #[default]
    Price,
    /// Supplier lead time in days, ascending.
    LeadTime,
}

impl SortKey {
    /// Parse a sort key from a query parameter. Unknown values fall back
    /// to [`SortKey::Price`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "lead_time" => Self::LeadTime,
            _ => Self::Price,
        }
    }

    /// The wire name of this sort key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::LeadTime => "lead_time",
        }
    }

    /// The offer column this key orders by.
    #[must_use]
    pub const fn order_column(self) -> &'static str {
        match self {
            Self::Price => "o.price_no_vat",
            Self::LeadTime => "o.lead_time_days",
        }
    }
}
