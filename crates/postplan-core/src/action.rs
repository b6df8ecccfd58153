//! Posting actions and the compiled plan.
//!
//! An action carries no business meaning on its own; meaning comes from its
//! position in the plan.

use crate::model::Secret;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// One atomic interaction with the entry screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PostingAction {
    /// Assign a document header field.
    SetHeaderField {
        /// Element id.
        field: &'static str,
        /// Value to assign.
        value: String,
    },
    /// Assign a line-item field, optionally leaving the caret at `caret`.
    SetLineField {
        /// Element id.
        field: &'static str,
        /// Value to assign.
        value: String,
        /// Caret offset applied after the assignment.
        #[serde(skip_serializing_if = "Option::is_none")]
        caret: Option<usize>,
    },
    /// Select a radio option or menu entry.
    Select {
        /// Element id.
        element: &'static str,
    },
    /// Press a toolbar button.
    PressButton {
        /// Element id.
        button: &'static str,
    },
    /// Send the default "continue" keystroke.
    SendConfirm,
    /// Move focus to an element, optionally placing the caret.
    PlaceFocus {
        /// Element id.
        element: &'static str,
        /// Caret offset.
        #[serde(skip_serializing_if = "Option::is_none")]
        caret: Option<usize>,
    },
}

impl PostingAction {
    /// Header field assignment.
    pub fn header(field: &'static str, value: impl Into<String>) -> Self {
        Self::SetHeaderField {
            field,
            value: value.into(),
        }
    }

    /// Line field assignment.
    pub fn line(field: &'static str, value: impl Into<String>) -> Self {
        Self::SetLineField {
            field,
            value: value.into(),
            caret: None,
        }
    }

    /// Line field assignment with the caret left at the end of the value.
    pub fn line_with_caret(field: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        let caret = Some(value.chars().count());
        Self::SetLineField {
            field,
            value,
            caret,
        }
    }

    /// Focus an element and place the caret.
    pub const fn focus_at(element: &'static str, caret: usize) -> Self {
        Self::PlaceFocus {
            element,
            caret: Some(caret),
        }
    }

    /// Focus an element.
    pub const fn focus(element: &'static str) -> Self {
        Self::PlaceFocus {
            element,
            caret: None,
        }
    }

    /// Press a button.
    pub const fn press(button: &'static str) -> Self {
        Self::PressButton { button }
    }

    /// Select a radio option or menu entry.
    pub const fn select(element: &'static str) -> Self {
        Self::Select { element }
    }

    /// True for [`PostingAction::SendConfirm`].
    pub const fn is_confirm(&self) -> bool {
        matches!(self, Self::SendConfirm)
    }

    /// True if this presses `button`.
    pub fn presses(&self, button: &str) -> bool {
        matches!(self, Self::PressButton { button: b } if *b == button)
    }

    /// The value assigned to `field`, if this action assigns it.
    pub fn value_of(&self, field: &str) -> Option<&str> {
        match self {
            Self::SetHeaderField { field: f, value } | Self::SetLineField { field: f, value, .. }
                if *f == field =>
            {
                Some(value.as_str())
            }
            _ => None,
        }
    }
}

impl fmt::Display for PostingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetHeaderField { field, value } => write!(f, "header {field} = \"{value}\""),
            Self::SetLineField {
                field,
                value,
                caret,
            } => {
                write!(f, "set {field} = \"{value}\"")?;
                if let Some(c) = caret {
                    write!(f, " caret {c}")?;
                }
                Ok(())
            }
            Self::Select { element } => write!(f, "select {element}"),
            Self::PressButton { button } => write!(f, "press {button}"),
            Self::SendConfirm => f.write_str("confirm"),
            Self::PlaceFocus { element, caret } => {
                write!(f, "focus {element}")?;
                if let Some(c) = caret {
                    write!(f, " caret {c}")?;
                }
                Ok(())
            }
        }
    }
}

/// Phases of the document, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Document header fields.
    Header,
    /// One debit line per bank movement.
    BankLines,
    /// One credit line per order-settled collection.
    OrderLines,
    /// One open-item selection per invoice-settled collection.
    InvoiceLines,
    /// Leave the selection and process open items.
    Save,
    /// Optional rounding correction line.
    Rounding,
    /// Leave the transaction.
    Close,
}

impl Phase {
    /// All phases in emission order.
    pub const ALL: [Self; 7] = [
        Self::Header,
        Self::BankLines,
        Self::OrderLines,
        Self::InvoiceLines,
        Self::Save,
        Self::Rounding,
        Self::Close,
    ];

    /// Upper-case label used in listings.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Header => "HEADER",
            Self::BankLines => "BANK_LINES",
            Self::OrderLines => "ORDER_LINES",
            Self::InvoiceLines => "INVOICE_LINES",
            Self::Save => "SAVE",
            Self::Rounding => "ROUNDING",
            Self::Close => "CLOSE",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Logon and transaction entry that precede the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionOpen {
    /// Logon user.
    pub user: String,
    /// Logon password; redacted whenever rendered.
    pub secret: Secret,
    /// Transaction code entered after logon.
    pub transaction_code: String,
}

impl fmt::Display for SessionOpen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "logon {} / {} then transaction {}",
            self.user, self.secret, self.transaction_code
        )
    }
}

/// A span of actions that belongs to one phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseSpan {
    /// The phase.
    pub phase: Phase,
    /// Index range into [`PostingPlan::actions`].
    pub range: Range<usize>,
}

/// The compiled, ordered sequence of actions for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostingPlan {
    /// Logon and transaction entry.
    pub session: SessionOpen,
    /// Document actions, in replay order.
    pub actions: Vec<PostingAction>,
    /// Phase boundaries over `actions`; every phase appears, possibly empty.
    pub phases: Vec<PhaseSpan>,
}

impl PostingPlan {
    /// Number of document actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// True if there are no document actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The actions emitted by `phase`.
    pub fn phase(&self, phase: Phase) -> &[PostingAction] {
        self.phases
            .iter()
            .find(|span| span.phase == phase)
            .map_or(&[], |span| &self.actions[span.range.clone()])
    }

    /// Action count per phase, in emission order.
    pub fn phase_counts(&self) -> Vec<(Phase, usize)> {
        self.phases
            .iter()
            .map(|span| (span.phase, span.range.len()))
            .collect()
    }
}

/// Accumulates actions and records phase boundaries.
#[derive(Debug, Default)]
pub(crate) struct PlanBuilder {
    actions: Vec<PostingAction>,
    phases: Vec<PhaseSpan>,
}

impl PlanBuilder {
    pub(crate) fn begin(&mut self, phase: Phase) {
        let start = self.actions.len();
        self.phases.push(PhaseSpan {
            phase,
            range: start..start,
        });
    }

    pub(crate) fn push(&mut self, action: PostingAction) {
        self.actions.push(action);
        if let Some(span) = self.phases.last_mut() {
            span.range.end = self.actions.len();
        }
    }

    pub(crate) fn extend(&mut self, actions: impl IntoIterator<Item = PostingAction>) {
        for action in actions {
            self.push(action);
        }
    }

    pub(crate) fn finish(self, session: SessionOpen) -> PostingPlan {
        PostingPlan {
            session,
            actions: self.actions,
            phases: self.phases,
        }
    }
}
