use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    core::wizard::{ConfirmationGate, Session},
};

use super::io as cli_io;
use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub session: Session,
    /// Everything `copy` has sent, newest last.
    pub clipboard: Vec<String>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn prompt(&self) -> String {
        let (step, steps) = self.session.progress();
        if step == 0 {
            format!("billsplit ({})> ", self.session.screen())
        } else {
            format!(
                "billsplit ({} {}/{})> ",
                self.session.screen(),
                step,
                steps
            )
        }
    }

    /// Splits the context into the session and a gate that answers prompts
    /// the way the current mode does.
    pub(crate) fn session_and_gate(&mut self) -> (&mut Session, ShellGate<'_>) {
        (
            &mut self.session,
            ShellGate {
                mode: self.mode,
                theme: &self.theme,
            },
        )
    }
}

/// Confirmation gate backed by dialoguer, or auto-accepting in script mode.
pub(crate) struct ShellGate<'a> {
    mode: CliMode,
    theme: &'a ColorfulTheme,
}

impl ConfirmationGate for ShellGate<'_> {
    fn confirm(&mut self, prompt: &str) -> bool {
        match self.mode {
            CliMode::Script => {
                cli_io::print_info(format!("{prompt} (auto-confirmed in script mode)"));
                true
            }
            CliMode::Interactive => match cli_io::confirm_action(self.theme, prompt, false) {
                Ok(answer) => answer,
                Err(err) => {
                    tracing::warn!(%err, "confirmation prompt failed");
                    false
                }
            },
        }
    }
}
