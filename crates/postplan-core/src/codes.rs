//! Business constants of the collections document.
//!
//! The defaults are the values the posting team enters by hand. Every value
//! can be overridden from the run configuration.

use serde::{Deserialize, Serialize};

/// Posting keys, line codes and fixed accounts used by the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostingCodes {
    /// Transaction entered in the command field.
    pub transaction_code: String,
    /// Document type of the header.
    pub document_type: String,
    /// Posting key for bank lines.
    pub bank_posting_key: String,
    /// Posting key for order-settled customer lines.
    pub order_posting_key: String,
    /// Special G/L indicator set on order lines.
    pub order_special_gl: String,
    /// Sales order item on order lines.
    pub order_item: String,
    /// Schedule line on order lines.
    pub order_schedule_line: String,
    /// Account type used when selecting open items.
    pub clearing_account_type: String,
    /// Special G/L indicators included in the open-item selection.
    pub clearing_special_gl: String,
    /// Debit posting key of the rounding line.
    pub debit_key: String,
    /// Credit posting key of the rounding line.
    pub credit_key: String,
    /// Account receiving rounding differences.
    pub adjustment_account: String,
    /// Prefix of the header text; the territory is appended.
    pub text_prefix: String,
}

impl Default for PostingCodes {
    fn default() -> Self {
        Self {
            transaction_code: "FB05".to_string(),
            document_type: "DB".to_string(),
            bank_posting_key: "40".to_string(),
            order_posting_key: "19".to_string(),
            order_special_gl: "X".to_string(),
            order_item: "000010".to_string(),
            order_schedule_line: "0001".to_string(),
            clearing_account_type: "D".to_string(),
            clearing_special_gl: "AXE".to_string(),
            debit_key: "40".to_string(),
            credit_key: "50".to_string(),
            adjustment_account: "659310999".to_string(),
            text_prefix: "COBRANZAS DUAL-".to_string(),
        }
    }
}

/// Document-level settings that come from configuration rather than sheets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanSettings {
    /// Company code of the document.
    pub company_code: String,
    /// Document currency.
    pub currency: String,
    /// Business constants.
    pub codes: PostingCodes,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            company_code: "246".to_string(),
            currency: "BOB".to_string(),
            codes: PostingCodes::default(),
        }
    }
}
