//! Core of postplan
//!
//! This crate turns the daily collections sheets into the ordered sequence of
//! entry-screen actions that posts the collections document:
//!
//! - [`classify`] - split pre-registration rows into invoice- and order-settled
//! - [`extract_header`] - document date, period, territory and rounding
//! - [`compile`] - the posting plan compiler
//! - [`resolve`] - the rounding correction line
//! - [`replay`] - drive an [`Actuator`] through a plan
//!
//! # Example
//!
//! ```
//! use postplan_core::{build_plan, BankRow, Credentials, Phase, PlanSettings, PreRegistroRow};
//! use rust_decimal_macros::dec;
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
//! let bank = vec![BankRow::new("100200", dec!(500.00), "OP1")
//!     .with_value_date(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
//!     .with_rounding("0.03")];
//! let rows = vec![PreRegistroRow::new("900", dec!(500.00))
//!     .with_invoice("INV-1")
//!     .with_territory("12")];
//! let credentials = Credentials::new("jdoe", "secret").unwrap();
//!
//! let doc = build_plan(&rows, &bank, &credentials, today, &PlanSettings::default()).unwrap();
//! assert_eq!(doc.header.document_text, "COBRANZAS DUAL-12");
//! assert_eq!(doc.plan.phase(Phase::Rounding).len(), 6);
//! assert_eq!(doc.plan.len(), 32);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod action;
pub mod classify;
pub mod codes;
pub mod compile;
pub mod error;
pub mod fiscal;
pub mod format;
pub mod header;
pub mod model;
pub mod replay;
pub mod rounding;
pub mod screen;

pub use action::{Phase, PhaseSpan, PostingAction, PostingPlan, SessionOpen};
pub use classify::{classify, Batch};
pub use codes::{PlanSettings, PostingCodes};
pub use compile::{build_plan, compile, CompiledDocument, PlanInput};
pub use error::{PlanError, ReplayError};
pub use fiscal::fiscal_period;
pub use format::{format_plan, FormatConfig};
pub use header::extract_header;
pub use model::{BankRow, Credentials, DocumentHeader, PreRegistroRow, Secret};
pub use replay::{replay, Actuator, ReplayReport, Transcript};
pub use rounding::resolve;

// Re-export commonly used external types
pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
