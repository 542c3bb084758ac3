//! Pure invoice arithmetic for a job card.
//!
//! Nothing in here touches storage; callers load the line items and the
//! current tax rate and hand them over.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::ledger::LineItemKind;
use crate::errors::ServiceError;

/// Rate applied when the settings store has no usable `tax_rate` entry.
pub const DEFAULT_TAX_RATE_PERCENT: Decimal = dec!(18);

/// Highest tax rate an admin may configure.
pub const MAX_TAX_RATE_PERCENT: Decimal = dec!(100);

/// Derived monetary totals of a job card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub services_amount: Decimal,
    pub parts_amount: Decimal,
    pub tax_amount: Decimal,
    pub grand_total: Decimal,
}

impl Totals {
    pub fn subtotal(&self) -> Decimal {
        self.services_amount + self.parts_amount
    }
}

/// The pieces of a line item the calculator needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedItem {
    pub kind: LineItemKind,
    pub unit_price: Decimal,
    pub quantity: Decimal,
}

impl PricedItem {
    pub fn line_total(&self) -> Result<Decimal, ServiceError> {
        self.unit_price
            .checked_mul(self.quantity)
            .ok_or_else(|| overflow("line total"))
    }
}

/// Computes services, parts, tax and grand total for a set of line items.
///
/// Fails with a validation error instead of overflowing.
pub fn compute<'a, I>(items: I, tax_rate_percent: Decimal) -> Result<Totals, ServiceError>
where
    I: IntoIterator<Item = &'a PricedItem>,
{
    let mut services_amount = Decimal::ZERO;
    let mut parts_amount = Decimal::ZERO;
    for item in items {
        let line_total = item.line_total()?;
        let bucket = match item.kind {
            LineItemKind::Service => &mut services_amount,
            LineItemKind::Part => &mut parts_amount,
        };
        *bucket = bucket
            .checked_add(line_total)
            .ok_or_else(|| overflow("amount"))?;
    }

    let subtotal = services_amount
        .checked_add(parts_amount)
        .ok_or_else(|| overflow("subtotal"))?;
    let tax_amount = subtotal
        .checked_mul(tax_rate_percent)
        .and_then(|scaled| scaled.checked_div(dec!(100)))
        .ok_or_else(|| overflow("tax amount"))?;
    let grand_total = subtotal
        .checked_add(tax_amount)
        .ok_or_else(|| overflow("grand total"))?;

    Ok(Totals {
        services_amount,
        parts_amount,
        tax_amount,
        grand_total,
    })
}

fn overflow(what: &str) -> ServiceError {
    ServiceError::ValidationError(format!("{} is out of range", what))
}

/// Rejects a tax rate outside `0..=MAX_TAX_RATE_PERCENT`.
pub fn check_tax_rate(rate_percent: Decimal) -> Result<(), ServiceError> {
    if rate_percent.is_sign_negative() {
        return Err(ServiceError::ValidationError(format!(
            "tax rate must not be negative (got {})",
            rate_percent
        )));
    }
    if rate_percent > MAX_TAX_RATE_PERCENT {
        return Err(ServiceError::ValidationError(format!(
            "tax rate must be at most {} (got {})",
            MAX_TAX_RATE_PERCENT, rate_percent
        )));
    }
    Ok(())
}

/// Interprets a raw `tax_rate` setting.
///
/// Missing, unparseable or out-of-range values fall back to
/// [`DEFAULT_TAX_RATE_PERCENT`].
pub fn parse_tax_rate(raw: Option<&str>) -> Decimal {
    raw.map(str::trim)
        .and_then(|value| value.parse::<Decimal>().ok())
        .filter(|rate| check_tax_rate(*rate).is_ok())
        .unwrap_or(DEFAULT_TAX_RATE_PERCENT)
}
