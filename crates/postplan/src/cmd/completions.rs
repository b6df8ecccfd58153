//! Shell completion generation.

use clap::{CommandFactory, ValueEnum};
use clap_complete::Shell;
use std::io;

/// Shells completions can be generated for.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ShellType {
    /// Bourne Again `SHell`
    Bash,
    /// Z `SHell`
    Zsh,
    /// Friendly Interactive `SHell`
    Fish,
    /// `PowerShell`
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl From<ShellType> for Shell {
    fn from(shell: ShellType) -> Self {
        match shell {
            ShellType::Bash => Self::Bash,
            ShellType::Zsh => Self::Zsh,
            ShellType::Fish => Self::Fish,
            ShellType::PowerShell => Self::PowerShell,
            ShellType::Elvish => Self::Elvish,
        }
    }
}

/// Write completions for the command `C` to stdout.
pub fn generate_completions<C: CommandFactory>(shell: ShellType, bin_name: &str) {
    let mut cmd = C::command();
    clap_complete::generate(Shell::from(shell), &mut cmd, bin_name, &mut io::stdout());
}
