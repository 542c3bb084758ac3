//! Property-based tests for the invoice arithmetic.

use garage_api::services::{
    totals::{
        check_tax_rate, compute, parse_tax_rate, PricedItem, DEFAULT_TAX_RATE_PERCENT,
        MAX_TAX_RATE_PERCENT,
    },
    LineItemKind,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn money_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000, 0u32..3).prop_map(|(units, scale)| Decimal::new(units, scale))
}

fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000).prop_map(|basis| Decimal::new(basis, 2))
}

fn item_strategy() -> impl Strategy<Value = PricedItem> {
    (
        prop_oneof![Just(LineItemKind::Service), Just(LineItemKind::Part)],
        money_strategy(),
        quantity_strategy(),
    )
        .prop_map(|(kind, unit_price, quantity)| PricedItem {
            kind,
            unit_price,
            quantity,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn grand_total_is_subtotal_plus_tax(
        items in prop::collection::vec(item_strategy(), 0..20),
        rate in rate_strategy(),
    ) {
        let totals = compute(&items, rate).unwrap();
        let subtotal = totals.services_amount + totals.parts_amount;

        prop_assert_eq!(totals.tax_amount, subtotal * rate / dec!(100));
        prop_assert_eq!(totals.grand_total, subtotal + totals.tax_amount);
        prop_assert_eq!(totals.subtotal(), subtotal);
    }

    #[test]
    fn amounts_split_by_kind(items in prop::collection::vec(item_strategy(), 0..20)) {
        let totals = compute(&items, dec!(18)).unwrap();
        let services: Decimal = items
            .iter()
            .filter(|item| item.kind == LineItemKind::Service)
            .map(|item| item.line_total().unwrap())
            .sum();
        let parts: Decimal = items
            .iter()
            .filter(|item| item.kind == LineItemKind::Part)
            .map(|item| item.line_total().unwrap())
            .sum();

        prop_assert_eq!(totals.services_amount, services);
        prop_assert_eq!(totals.parts_amount, parts);
        prop_assert!(!totals.grand_total.is_sign_negative());
    }

    #[test]
    fn compute_is_deterministic_and_order_independent(
        items in prop::collection::vec(item_strategy(), 0..20),
        rate in rate_strategy(),
    ) {
        let first = compute(&items, rate).unwrap();
        prop_assert_eq!(first, compute(&items, rate).unwrap());

        let mut reversed = items.clone();
        reversed.reverse();
        prop_assert_eq!(first, compute(&reversed, rate).unwrap());
    }

    #[test]
    fn stored_rates_parse_back(rate in rate_strategy()) {
        let stored = rate.normalize().to_string();
        prop_assert_eq!(parse_tax_rate(Some(&stored)), rate);
    }

    #[test]
    fn rates_above_the_ceiling_are_rejected(excess in 1i64..1_000_000) {
        let rate = MAX_TAX_RATE_PERCENT + Decimal::new(excess, 2);
        prop_assert!(check_tax_rate(rate).is_err());
        prop_assert_eq!(parse_tax_rate(Some(&rate.to_string())), DEFAULT_TAX_RATE_PERCENT);
    }

    #[test]
    fn garbage_rates_fall_back_to_default(raw in "[a-zA-Z%]{1,12}") {
        prop_assert_eq!(parse_tax_rate(Some(&raw)), DEFAULT_TAX_RATE_PERCENT);
    }
}
