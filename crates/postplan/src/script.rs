//! GUI scripting output.
//!
//! [`ScriptActuator`] executes a plan by writing it out as a SAP GUI
//! Scripting file (VBScript). Running the file on a workstation with an open
//! connection performs the posting; each primitive becomes one statement
//! against `session.findById`.

use postplan_core::screen;
use postplan_core::Actuator;
use std::io::{self, Write};

/// Writes each primitive as a scripting statement.
pub struct ScriptActuator<W: Write> {
    out: W,
    embed_secret: bool,
    statements: usize,
}

impl<W: Write> ScriptActuator<W> {
    /// Start a script bound to the given connection and session indexes.
    ///
    /// Unless `embed_secret` is set, the logon password is not written to
    /// the file; the script asks for it when it runs.
    pub fn new(mut out: W, connection: usize, session: usize, embed_secret: bool) -> io::Result<Self> {
        writeln!(out, "If Not IsObject(application) Then")?;
        writeln!(out, "   Set SapGuiAuto  = GetObject(\"SAPGUI\")")?;
        writeln!(out, "   Set application = SapGuiAuto.GetScriptingEngine")?;
        writeln!(out, "End If")?;
        writeln!(out, "If Not IsObject(connection) Then")?;
        writeln!(out, "   Set connection = application.Children({connection})")?;
        writeln!(out, "End If")?;
        writeln!(out, "If Not IsObject(session) Then")?;
        writeln!(out, "   Set session    = connection.Children({session})")?;
        writeln!(out, "End If")?;
        writeln!(out, "If IsObject(WScript) Then")?;
        writeln!(out, "   WScript.ConnectObject session,     \"on\"")?;
        writeln!(out, "   WScript.ConnectObject application, \"on\"")?;
        writeln!(out, "End If")?;
        Ok(Self {
            out,
            embed_secret,
            statements: 0,
        })
    }

    /// Number of statements written after the prelude.
    pub const fn statements(&self) -> usize {
        self.statements
    }

    /// Flush and return the writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }

    fn statement(&mut self, element_id: &str, member: &str) -> io::Result<()> {
        self.statements += 1;
        writeln!(self.out, "session.findById(\"{element_id}\").{member}")
    }
}

/// Quote a value as a VBScript string literal.
///
/// Literals cannot span lines, so control characters are concatenated in
/// with `vbCr`, `vbLf` or `Chr(n)`.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\"\""),
            '\r' => out.push_str("\" & vbCr & \""),
            '\n' => out.push_str("\" & vbLf & \""),
            c if c.is_control() => {
                out.push_str(&format!("\" & Chr({}) & \"", u32::from(c)));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

impl<W: Write> Actuator for ScriptActuator<W> {
    type Error = io::Error;

    fn set_field(&mut self, field_id: &str, value: &str) -> io::Result<()> {
        let literal = if field_id == screen::LOGON_PASSWORD && !self.embed_secret {
            "InputBox(\"Password\")".to_string()
        } else {
            quote(value)
        };
        self.statement(field_id, &format!("text = {literal}"))
    }

    fn press_button(&mut self, button_id: &str) -> io::Result<()> {
        self.statement(button_id, "press")
    }

    fn select(&mut self, element_id: &str) -> io::Result<()> {
        self.statement(element_id, "select")
    }

    fn set_focus(&mut self, element_id: &str) -> io::Result<()> {
        self.statement(element_id, "setFocus")
    }

    fn set_caret(&mut self, element_id: &str, offset: usize) -> io::Result<()> {
        self.statement(element_id, &format!("caretPosition = {offset}"))
    }

    fn confirm(&mut self) -> io::Result<()> {
        self.statement(screen::MAIN_WINDOW, "sendVKey 0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postplan_core::replay::apply;
    use postplan_core::PostingAction;

    fn render(embed_secret: bool, f: impl FnOnce(&mut ScriptActuator<Vec<u8>>)) -> String {
        let mut actuator = ScriptActuator::new(Vec::new(), 0, 0, embed_secret).unwrap();
        f(&mut actuator);
        let out = actuator.finish().unwrap();
        let text = String::from_utf8(out).unwrap();
        text.lines()
            .skip_while(|l| !l.starts_with("session.findById"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_prelude_binds_connection() {
        let actuator = ScriptActuator::new(Vec::new(), 2, 1, false).unwrap();
        let text = String::from_utf8(actuator.finish().unwrap()).unwrap();
        assert!(text.contains("Set connection = application.Children(2)"));
        assert!(text.contains("Set session    = connection.Children(1)"));
    }

    #[test]
    fn test_actions_become_statements() {
        let text = render(false, |a| {
            apply(&PostingAction::line_with_caret(screen::AMOUNT, "0.03"), a).unwrap();
            apply(&PostingAction::press(screen::BTN_PROCESS_OPEN_ITEMS), a).unwrap();
            apply(&PostingAction::SendConfirm, a).unwrap();
            assert_eq!(a.statements(), 4);
        });
        let expected = format!(
            "session.findById(\"{amount}\").text = \"0.03\"\n\
             session.findById(\"{amount}\").caretPosition = 4\n\
             session.findById(\"{button}\").press\n\
             session.findById(\"wnd[0]\").sendVKey 0",
            amount = screen::AMOUNT,
            button = screen::BTN_PROCESS_OPEN_ITEMS,
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_quotes_are_doubled() {
        let text = render(false, |a| {
            a.set_field(screen::LINE_TEXT, "OP \"7\"").unwrap();
        });
        assert!(text.ends_with(".text = \"OP \"\"7\"\"\""));
    }

    #[test]
    fn test_line_breaks_stay_inside_the_literal() {
        let text = render(false, |a| {
            a.set_field(screen::LINE_TEXT, "OP 7\"\r\nMsgBox \"x\tz").unwrap();
        });
        assert_eq!(text.lines().count(), 1);
        assert!(text.ends_with(
            ".text = \"OP 7\"\"\" & vbCr & \"\" & vbLf & \"MsgBox \"\"x\" & Chr(9) & \"z\""
        ));
    }

    #[test]
    fn test_password_prompted_unless_embedded() {
        let prompted = render(false, |a| {
            a.set_field(screen::LOGON_PASSWORD, "s3cret").unwrap();
        });
        assert!(prompted.contains("InputBox(\"Password\")"));
        assert!(!prompted.contains("s3cret"));

        let embedded = render(true, |a| {
            a.set_field(screen::LOGON_PASSWORD, "s3cret").unwrap();
        });
        assert!(embedded.contains(".text = \"s3cret\""));
    }
}
