//! Property-based tests for postplan-core.
//!
//! These tests verify invariants hold for arbitrary inputs using proptest.
//!
//! Run with: cargo test -p postplan-core --test `property_tests`

use chrono::NaiveDate;
use postplan_core::classify::data_row_count;
use postplan_core::fiscal::period_of_month;
use postplan_core::rounding::{correction, ROUNDING_TOLERANCE};
use postplan_core::{
    build_plan, classify, fiscal_period, BankRow, Credentials, Phase, PlanSettings,
    PostingCodes, PreRegistroRow,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

// ============================================================================
// Arbitrary generators
// ============================================================================

fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn arb_rounding() -> impl Strategy<Value = Decimal> {
    (-100_000i64..100_000i64).prop_map(|n| Decimal::new(n, 3))
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100i32, 1u32..13u32, 1u32..29u32)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_invoice_id() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "[A-Z]{1,3}-[0-9]{1,6}",
        "[0-9]{6,10}",
    ]
}

fn arb_row() -> impl Strategy<Value = PreRegistroRow> {
    ("[0-9]{3,8}", arb_invoice_id(), "[0-9]{7}", 1u32..40u32, arb_amount()).prop_map(
        |(client, invoice, order, territory, amount)| {
            PreRegistroRow::new(client, amount)
                .with_invoice(invoice)
                .with_order(order)
                .with_territory(territory.to_string())
        },
    )
}

fn arb_sheet() -> impl Strategy<Value = Vec<PreRegistroRow>> {
    (
        prop::collection::vec(arb_row(), 1..20),
        0usize..3,
    )
        .prop_map(|(mut rows, footer)| {
            rows.extend(std::iter::repeat(PreRegistroRow::default()).take(footer));
            rows
        })
}

fn arb_invoice_row() -> impl Strategy<Value = PreRegistroRow> {
    ("[0-9]{3,8}", "[A-Z]{1,3}-[0-9]{1,6}", 1u32..40u32, arb_amount()).prop_map(
        |(client, invoice, territory, amount)| {
            PreRegistroRow::new(client, amount)
                .with_invoice(invoice)
                .with_territory(territory.to_string())
        },
    )
}

fn arb_order_row() -> impl Strategy<Value = PreRegistroRow> {
    ("[0-9]{3,8}", "[0-9]{7}", arb_amount()).prop_map(|(client, order, amount)| {
        PreRegistroRow::new(client, amount)
            .with_order(order)
            .with_territory("12")
    })
}

fn arb_bank() -> impl Strategy<Value = Vec<BankRow>> {
    (
        prop::collection::vec(("[0-9]{6}", arb_amount(), "OP[0-9]{1,4}"), 1..6),
        arb_date(),
        arb_rounding(),
    )
        .prop_map(|(rows, date, rounding)| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (account, amount, op))| {
                    let row = BankRow::new(account, amount, op);
                    if i == 0 {
                        row.with_value_date(date).with_rounding(rounding.to_string())
                    } else {
                        row
                    }
                })
                .collect()
        })
}

fn credentials() -> Credentials {
    Credentials::new("jdoe", "s3cret").unwrap()
}

// ============================================================================
// Fiscal calendar
// ============================================================================

proptest! {
    #[test]
    fn prop_fiscal_period_in_range(date in arb_date()) {
        let period = fiscal_period(date);
        prop_assert!((1..=12).contains(&period));
    }

    #[test]
    fn prop_fiscal_period_is_shifted_month(month in 1u32..13u32) {
        prop_assert_eq!(period_of_month(month), (month + 8) % 12 + 1);
    }
}

// ============================================================================
// Classification
// ============================================================================

proptest! {
    /// The two collections partition the data rows, each in input order.
    #[test]
    fn prop_classify_partitions(rows in arb_sheet()) {
        let batch = classify(&rows).unwrap();
        let data = &rows[..data_row_count(&rows)];

        let expected_invoices: Vec<_> =
            data.iter().filter(|r| r.is_invoice_settled()).cloned().collect();
        let expected_orders: Vec<_> =
            data.iter().filter(|r| !r.is_invoice_settled()).cloned().collect();

        prop_assert_eq!(batch.len(), data.len());
        prop_assert_eq!(&batch.invoices, &expected_invoices);
        prop_assert_eq!(&batch.orders, &expected_orders);
    }

    /// Only an all-blank trailing block is ever dropped.
    #[test]
    fn prop_only_blank_footer_dropped(rows in arb_sheet()) {
        let kept = data_row_count(&rows);
        prop_assert!(rows[kept..].iter().all(PreRegistroRow::is_blank));
        prop_assert!(rows.len() - kept == 0 || rows.len() - kept == 2);
    }
}

// ============================================================================
// Rounding
// ============================================================================

proptest! {
    #[test]
    fn prop_rounding_threshold_and_sign(amount in arb_rounding()) {
        let codes = PostingCodes::default();
        match correction(amount, &codes) {
            None => prop_assert!(amount.abs() <= ROUNDING_TOLERANCE),
            Some(line) => {
                prop_assert!(amount.abs() > ROUNDING_TOLERANCE);
                let key = if amount > Decimal::ZERO { "50" } else { "40" };
                prop_assert_eq!(line.posting_key.as_str(), key);

                let value = Decimal::from_str(&line.amount).unwrap();
                prop_assert!(value >= Decimal::ZERO);
                prop_assert!((value - amount.abs()).abs() <= Decimal::new(5, 3));
                let decimals = line.amount.split('.').nth(1).map(str::len);
                prop_assert_eq!(decimals, Some(2));
            }
        }
    }
}

// ============================================================================
// Compilation
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_compile_is_deterministic(
        bank in arb_bank(),
        invoices in prop::collection::vec(arb_invoice_row(), 1..6),
        orders in prop::collection::vec(arb_order_row(), 0..6),
        today in arb_date(),
    ) {
        let mut rows = invoices;
        rows.extend(orders);
        let settings = PlanSettings::default();
        let first = build_plan(&rows, &bank, &credentials(), today, &settings).unwrap();
        let second = build_plan(&rows, &bank, &credentials(), today, &settings).unwrap();
        prop_assert_eq!(&first.plan, &second.plan);
        prop_assert_eq!(format!("{:?}", first.plan), format!("{:?}", second.plan));
    }

    /// Phase sizes follow directly from the row counts.
    #[test]
    fn prop_phase_sizes(
        bank in arb_bank(),
        invoices in prop::collection::vec(arb_invoice_row(), 1..6),
        orders in prop::collection::vec(arb_order_row(), 0..6),
        today in arb_date(),
    ) {
        let invoice_count = invoices.len();
        let order_count = orders.len();
        let mut rows = orders;
        rows.extend(invoices);

        let doc = build_plan(&rows, &bank, &credentials(), today, &PlanSettings::default()).unwrap();
        let plan = &doc.plan;
        let extra_confirm = usize::from(order_count > 0);
        let rounding = if doc.header.rounding_amount.abs() > ROUNDING_TOLERANCE { 6 } else { 0 };

        prop_assert_eq!(plan.phase(Phase::Header).len(), 7);
        prop_assert_eq!(plan.phase(Phase::BankLines).len(), 6 * bank.len());
        prop_assert_eq!(plan.phase(Phase::OrderLines).len(), 12 * order_count);
        prop_assert_eq!(plan.phase(Phase::InvoiceLines).len(), 9 * invoice_count + extra_confirm);
        prop_assert_eq!(plan.phase(Phase::Save).len(), 2);
        prop_assert_eq!(plan.phase(Phase::Rounding).len(), rounding);
        prop_assert_eq!(plan.phase(Phase::Close).len(), 2);

        let confirms = plan
            .phase(Phase::InvoiceLines)
            .iter()
            .filter(|a| a.is_confirm())
            .count();
        prop_assert_eq!(confirms, extra_confirm);
    }
}
