//! Replaying a plan against an actuator.
//!
//! The actuator is the only component that talks to the accounting
//! system. It executes primitives one at a time and owns timeouts; replay
//! stops at the first rejected primitive and reports it unchanged.

use crate::action::{PostingAction, PostingPlan, SessionOpen};
use crate::error::ReplayError;
use crate::screen;
use std::fmt;

/// Executes primitives against the entry screen.
///
/// Implementations must block until each primitive has taken effect.
pub trait Actuator {
    /// Error reported by the external system.
    type Error: fmt::Display;

    /// Assign `value` to a field.
    fn set_field(&mut self, field_id: &str, value: &str) -> Result<(), Self::Error>;

    /// Press a button.
    fn press_button(&mut self, button_id: &str) -> Result<(), Self::Error>;

    /// Select a radio option or menu entry.
    fn select(&mut self, element_id: &str) -> Result<(), Self::Error>;

    /// Move focus to an element.
    fn set_focus(&mut self, element_id: &str) -> Result<(), Self::Error>;

    /// Place the caret inside an element.
    fn set_caret(&mut self, element_id: &str, offset: usize) -> Result<(), Self::Error>;

    /// Send the default "continue" keystroke.
    fn confirm(&mut self) -> Result<(), Self::Error>;
}

/// Outcome of a successful replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayReport {
    /// Steps executed, session opening included.
    pub steps: usize,
}

/// Number of steps that open the session before the document actions.
pub const SESSION_STEPS: usize = 5;

/// Replay `plan`, session opening first, then every document action in order.
pub fn replay<A: Actuator + ?Sized>(
    plan: &PostingPlan,
    actuator: &mut A,
) -> Result<ReplayReport, ReplayError> {
    open_session(&plan.session, actuator)?;

    for (i, action) in plan.actions.iter().enumerate() {
        let step = SESSION_STEPS + i;
        tracing::debug!(step, %action, "replay");
        apply(action, actuator).map_err(|e| ReplayError {
            step,
            action: action.to_string(),
            message: e.to_string(),
        })?;
    }

    let steps = SESSION_STEPS + plan.actions.len();
    tracing::info!(steps, "replay finished");
    Ok(ReplayReport { steps })
}

fn open_session<A: Actuator + ?Sized>(
    session: &SessionOpen,
    actuator: &mut A,
) -> Result<(), ReplayError> {
    let fail = |step: usize, label: &str, e: A::Error| ReplayError {
        step,
        action: label.to_string(),
        message: e.to_string(),
    };

    tracing::debug!(user = %session.user, "opening session");
    actuator
        .set_field(screen::LOGON_USER, &session.user)
        .map_err(|e| fail(0, "set logon user", e))?;
    actuator
        .set_field(screen::LOGON_PASSWORD, session.secret.expose())
        .map_err(|e| fail(1, "set logon password", e))?;
    actuator.confirm().map_err(|e| fail(2, "confirm logon", e))?;
    actuator
        .set_field(screen::COMMAND_FIELD, &session.transaction_code)
        .map_err(|e| fail(3, "set transaction code", e))?;
    actuator
        .confirm()
        .map_err(|e| fail(4, "confirm transaction code", e))?;
    Ok(())
}

/// Execute one action.
pub fn apply<A: Actuator + ?Sized>(action: &PostingAction, actuator: &mut A) -> Result<(), A::Error> {
    match action {
        PostingAction::SetHeaderField { field, value } => actuator.set_field(field, value),
        PostingAction::SetLineField {
            field,
            value,
            caret,
        } => {
            actuator.set_field(field, value)?;
            match caret {
                Some(offset) => actuator.set_caret(field, *offset),
                None => Ok(()),
            }
        }
        PostingAction::Select { element } => actuator.select(element),
        PostingAction::PressButton { button } => actuator.press_button(button),
        PostingAction::SendConfirm => actuator.confirm(),
        PostingAction::PlaceFocus { element, caret } => {
            actuator.set_focus(element)?;
            match caret {
                Some(offset) => actuator.set_caret(element, *offset),
                None => Ok(()),
            }
        }
    }
}

/// An actuator that records every primitive as a line of text.
///
/// The logon password is recorded as `***`.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    /// Recorded primitives.
    pub calls: Vec<String>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Actuator for Transcript {
    type Error = std::convert::Infallible;

    fn set_field(&mut self, field_id: &str, value: &str) -> Result<(), Self::Error> {
        let value = if field_id == screen::LOGON_PASSWORD {
            "***"
        } else {
            value
        };
        self.calls.push(format!("set_field {field_id} {value}"));
        Ok(())
    }

    fn press_button(&mut self, button_id: &str) -> Result<(), Self::Error> {
        self.calls.push(format!("press_button {button_id}"));
        Ok(())
    }

    fn select(&mut self, element_id: &str) -> Result<(), Self::Error> {
        self.calls.push(format!("select {element_id}"));
        Ok(())
    }

    fn set_focus(&mut self, element_id: &str) -> Result<(), Self::Error> {
        self.calls.push(format!("set_focus {element_id}"));
        Ok(())
    }

    fn set_caret(&mut self, element_id: &str, offset: usize) -> Result<(), Self::Error> {
        self.calls.push(format!("set_caret {element_id} {offset}"));
        Ok(())
    }

    fn confirm(&mut self) -> Result<(), Self::Error> {
        self.calls.push("confirm".to_string());
        Ok(())
    }
}
