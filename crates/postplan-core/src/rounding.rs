//! Rounding correction line.
//!
//! Positive differences are posted with the credit key, everything else with
//! the debit key. Differences within the tolerance produce no line.

use crate::action::PostingAction;
use crate::codes::PostingCodes;
use crate::screen;
use rust_decimal::{Decimal, RoundingStrategy};

/// Largest absolute difference that is left unbalanced.
pub const ROUNDING_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// A rounding line to post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    /// Posting key (credit or debit).
    pub posting_key: String,
    /// Adjustment account.
    pub account: String,
    /// Absolute amount, two fractional digits.
    pub amount: String,
}

/// Decide the correction line for `rounding_amount`, if any.
pub fn correction(rounding_amount: Decimal, codes: &PostingCodes) -> Option<Correction> {
    if rounding_amount.abs() <= ROUNDING_TOLERANCE {
        return None;
    }
    let posting_key = if rounding_amount > Decimal::ZERO {
        &codes.credit_key
    } else {
        &codes.debit_key
    };
    Some(Correction {
        posting_key: posting_key.clone(),
        account: codes.adjustment_account.clone(),
        amount: format_amount(rounding_amount.abs()),
    })
}

/// Actions posting the correction line for `rounding_amount`, if any.
pub fn resolve(rounding_amount: Decimal, codes: &PostingCodes) -> Option<Vec<PostingAction>> {
    let line = correction(rounding_amount, codes)?;
    let account_len = line.account.chars().count();
    Some(vec![
        PostingAction::line(screen::POSTING_KEY, line.posting_key),
        PostingAction::line(screen::LINE_ACCOUNT, line.account),
        PostingAction::focus_at(screen::LINE_ACCOUNT, account_len),
        PostingAction::SendConfirm,
        PostingAction::line_with_caret(screen::AMOUNT, line.amount),
        PostingAction::press(screen::BTN_PROCESS_OPEN_ITEMS),
    ])
}

/// Two-decimal rendering, half away from zero.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn codes() -> PostingCodes {
        PostingCodes::default()
    }

    #[test]
    fn test_within_tolerance() {
        assert!(resolve(dec!(0.0), &codes()).is_none());
        assert!(resolve(dec!(0.009), &codes()).is_none());
        assert!(resolve(dec!(0.01), &codes()).is_none());
        assert!(resolve(dec!(-0.01), &codes()).is_none());
    }

    #[test]
    fn test_positive_is_credit() {
        let line = correction(dec!(15.005), &codes()).unwrap();
        assert_eq!(line.posting_key, "50");
        assert_eq!(line.amount, "15.01");
        assert_eq!(line.account, "659310999");
    }

    #[test]
    fn test_negative_is_debit() {
        let line = correction(dec!(-7.50), &codes()).unwrap();
        assert_eq!(line.posting_key, "40");
        assert_eq!(line.amount, "7.50");
    }

    #[test]
    fn test_just_over_tolerance() {
        let line = correction(dec!(-0.011), &codes()).unwrap();
        assert_eq!(line.posting_key, "40");
        assert_eq!(line.amount, "0.01");
    }

    #[test]
    fn test_resolve_actions() {
        let actions = resolve(dec!(0.03), &codes()).unwrap();
        assert_eq!(
            actions,
            vec![
                PostingAction::line(screen::POSTING_KEY, "50"),
                PostingAction::line(screen::LINE_ACCOUNT, "659310999"),
                PostingAction::focus_at(screen::LINE_ACCOUNT, 9),
                PostingAction::SendConfirm,
                PostingAction::SetLineField {
                    field: screen::AMOUNT,
                    value: "0.03".to_string(),
                    caret: Some(4),
                },
                PostingAction::press(screen::BTN_PROCESS_OPEN_ITEMS),
            ]
        );
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(500)), "500.00");
        assert_eq!(format_amount(dec!(15.236)), "15.24");
        assert_eq!(format_amount(dec!(0.125)), "0.13");
        assert_eq!(format_amount(dec!(1234.5)), "1234.50");
    }
}
