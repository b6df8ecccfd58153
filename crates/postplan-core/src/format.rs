//! Plan listing.
//!
//! Renders a plan as text, one action per line, grouped under its phase.

use crate::action::{PostingAction, PostingPlan};
use crate::model::DocumentHeader;
use std::fmt::Write;

/// Listing configuration.
#[derive(Debug, Clone)]
pub struct FormatConfig {
    /// Indentation for actions under a phase heading.
    pub indent: String,
    /// Prefix each action with its index in the plan.
    pub numbered: bool,
    /// List phases that emitted no action.
    pub show_empty_phases: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            numbered: true,
            show_empty_phases: false,
        }
    }
}

impl FormatConfig {
    /// Create a new config with the specified indent width.
    #[must_use]
    pub fn with_indent(indent_width: usize) -> Self {
        Self {
            indent: " ".repeat(indent_width),
            ..Default::default()
        }
    }
}

/// Format a whole plan.
pub fn format_plan(plan: &PostingPlan, config: &FormatConfig) -> String {
    let mut out = String::new();
    writeln!(out, "SESSION {}", plan.session).ok();
    let width = plan.len().to_string().len();

    for span in &plan.phases {
        if span.range.is_empty() && !config.show_empty_phases {
            continue;
        }
        writeln!(out, "{} ({})", span.phase, span.range.len()).ok();
        for i in span.range.clone() {
            out.push_str(&config.indent);
            if config.numbered {
                write!(out, "{i:>width$}  ").ok();
            }
            out.push_str(&format_action(&plan.actions[i]));
            out.push('\n');
        }
    }
    out
}

/// Format one action.
pub fn format_action(action: &PostingAction) -> String {
    action.to_string()
}

/// Format the header as `key: value` lines.
pub fn format_header(header: &DocumentHeader) -> String {
    let mut out = String::new();
    writeln!(out, "document date: {}", header.document_date).ok();
    writeln!(out, "posting date:  {}", header.posting_date).ok();
    writeln!(out, "period:        {}", header.fiscal_period).ok();
    writeln!(out, "company:       {}", header.company_code).ok();
    writeln!(out, "currency:      {}", header.currency).ok();
    writeln!(out, "territory:     {}", header.territory).ok();
    writeln!(out, "rounding:      {}", header.rounding_amount).ok();
    writeln!(out, "text:          {}", header.document_text).ok();
    out
}
