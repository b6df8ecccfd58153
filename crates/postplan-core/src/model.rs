//! Typed sheet rows and document-level records.

use crate::error::{PlanError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// One collection from the daily pre-registration sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PreRegistroRow {
    /// Customer account (`Cliente`).
    pub client_id: String,
    /// Invoice being paid (`Factura`); empty when the collection settles an order.
    pub invoice_id: String,
    /// Sales order (`Número Pedido`).
    pub order_id: String,
    /// Territory code (`Territorio`), raw sheet text.
    pub territory: String,
    /// Collected amount (`Importe Abonado`); `None` when the cell is blank.
    pub amount: Option<Decimal>,
}

impl PreRegistroRow {
    /// Create a row for a client and amount; the other columns start blank.
    pub fn new(client_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            client_id: client_id.into(),
            amount: Some(amount),
            ..Self::default()
        }
    }

    /// Set the invoice id.
    #[must_use]
    pub fn with_invoice(mut self, invoice_id: impl Into<String>) -> Self {
        self.invoice_id = invoice_id.into();
        self
    }

    /// Set the sales order id.
    #[must_use]
    pub fn with_order(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = order_id.into();
        self
    }

    /// Set the territory code.
    #[must_use]
    pub fn with_territory(mut self, territory: impl Into<String>) -> Self {
        self.territory = territory.into();
        self
    }

    /// True if the collection settles an invoice.
    pub fn is_invoice_settled(&self) -> bool {
        !self.invoice_id.trim().is_empty()
    }

    /// True if every column is empty.
    pub fn is_blank(&self) -> bool {
        self.amount.is_none()
            && [
                &self.client_id,
                &self.invoice_id,
                &self.order_id,
                &self.territory,
            ]
            .iter()
            .all(|s| s.trim().is_empty())
    }
}

/// One movement from the bank sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankRow {
    /// Bank G/L account (`CUENTA`).
    pub account: String,
    /// Movement amount (`IMPORTE`).
    pub amount: Decimal,
    /// Bank operation reference (`NRO.OPERACION`).
    pub operation_ref: String,
    /// Value date (`FECHA`). Only the first row needs one.
    pub value_date: Option<NaiveDate>,
    /// Raw rounding cell (`REDONDEO`), empty when blank.
    pub rounding: String,
}

impl BankRow {
    /// Create a bank row without a value date or rounding.
    pub fn new(account: impl Into<String>, amount: Decimal, operation_ref: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            amount,
            operation_ref: operation_ref.into(),
            value_date: None,
            rounding: String::new(),
        }
    }

    /// Set the value date.
    #[must_use]
    pub const fn with_value_date(mut self, date: NaiveDate) -> Self {
        self.value_date = Some(date);
        self
    }

    /// Set the raw rounding cell.
    #[must_use]
    pub fn with_rounding(mut self, rounding: impl Into<String>) -> Self {
        self.rounding = rounding.into();
        self
    }
}

/// Document-level fields, computed once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentHeader {
    /// Document date (value date of the first bank movement).
    pub document_date: NaiveDate,
    /// Posting date: the date of the run.
    pub posting_date: NaiveDate,
    /// Fiscal period of `posting_date`, 1..=12.
    pub fiscal_period: u32,
    /// Company code.
    pub company_code: String,
    /// Document currency.
    pub currency: String,
    /// Territory code, integer form.
    pub territory: String,
    /// Signed rounding difference to balance away.
    pub rounding_amount: Decimal,
    /// Header text.
    pub document_text: String,
}

/// A secret value that never shows up in logs or rendered plans.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wrap a secret.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the clear value. Only actuators should call this.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// True if the secret is blank.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.serialize_str("***")
    }
}

/// Logon credentials for the accounting system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// User name.
    pub user: String,
    /// Password.
    pub secret: Secret,
}

impl Credentials {
    /// Build credentials, rejecting a blank user or secret.
    pub fn new(user: impl Into<String>, secret: impl Into<String>) -> Result<Self> {
        let credentials = Self {
            user: user.into(),
            secret: Secret::new(secret),
        };
        credentials.validate()?;
        Ok(credentials)
    }

    /// Check that neither part is blank.
    pub fn validate(&self) -> Result<()> {
        if self.user.trim().is_empty() {
            return Err(PlanError::Credential("user is empty".to_string()));
        }
        if self.secret.is_blank() {
            return Err(PlanError::Credential("password is empty".to_string()));
        }
        Ok(())
    }
}
