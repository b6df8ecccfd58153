//! Collections posting tools.
//!
//! This crate provides the command-line tools around the posting plan
//! compiler:
//!
//! - `postplan-compile`: Compile the day's sheets and print the plan
//! - `postplan-script`: Replay the plan into a GUI scripting file
//! - `postplan-split`: Write the invoice and order subsets for review
//!
//! # Example Usage
//!
//! ```bash
//! postplan-compile --config run.json
//! postplan-compile --config run.json --format json
//! postplan-script --config run.json -o cobranzas.vbs
//! postplan-split --base-dir /srv/cobranzas/2026-10-16
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
pub mod config;
pub mod logging;
pub mod pipeline;
pub mod script;
