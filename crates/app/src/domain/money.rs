//! Money

/// A monetary value as reported by the upstream store.
///
/// The amount stays a decimal string end to end; it is never parsed into
/// floating point for cart totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    /// Decimal amount, e.g. `"19.99"`.
    pub amount: String,

    /// ISO currency code, e.g. `"EUR"`.
    pub currency_code: String,
}

impl Money {
    /// Convenience constructor.
    #[must_use]
    pub fn new(amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency_code: currency_code.into(),
        }
    }
}
