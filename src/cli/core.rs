//! Core CLI dispatch, errors, and shell context helpers.

use std::io;

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    config::{Config, ConfigError, ConfigManager},
    core::services::{ExportError, ImportError},
    core::wizard::{Session, TransitionError},
    domain::Identifiable,
    errors::LedgerError,
    ledger::Ledger,
};

use super::commands;
use super::io as cli_io;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_config_manager(mode, ConfigManager::from_env())
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = match config_manager.load() {
            Ok(config) => config,
            Err(err) => {
                cli_io::print_warning(format!(
                    "Ignoring configuration at {}: {}",
                    config_manager.path().display(),
                    err
                ));
                Config::default()
            }
        };
        output::set_color_enabled(config.ui_color_enabled);
        let session = Session::new(&config);

        Ok(ShellContext {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            session,
            clipboard: Vec::new(),
            last_command: None,
            running: true,
        })
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.get(command).map(|entry| entry.handler) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    /// Tokenises and runs one shell line, remembering it for error reports.
    pub(crate) fn execute_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let line = line.trim();
        let tokens = shell_words::split(line).map_err(|err| {
            CommandError::InvalidArguments(format!("Could not read `{line}`: {err}"))
        })?;
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };

        self.last_command = Some(line.to_string());
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        match self.dispatch(&raw.to_lowercase(), raw, &args)? {
            LoopControl::Exit => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            LoopControl::Continue => Ok(LoopControl::Continue),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit shell?", true)?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Ledger(LedgerError::Transition(TransitionError::NotAvailable {
                screen,
                action,
            })) => {
                cli_io::print_error(format!(
                    "`{action}` is not available on the {screen} screen."
                ));
                cli_io::print_hint("Use `status` to see where you are.");
                Ok(())
            }
            other => {
                cli_io::print_error(self.failure_message(&other));
                Ok(())
            }
        }
    }

    fn failure_message(&self, err: &CommandError) -> String {
        match &self.last_command {
            Some(line) => format!("`{line}` failed: {err}"),
            None => err.to_string(),
        }
    }

    pub(crate) fn ledger(&self) -> &Ledger {
        self.session.ledger()
    }

    pub(crate) fn ledger_mut(&mut self) -> Result<&mut Ledger, CommandError> {
        Ok(self.session.ledger_mut().map_err(LedgerError::from)?)
    }

    /// Resolves a 1-based person reference.
    pub(crate) fn person_ref(&self, raw: Option<&&str>) -> Result<Uuid, CommandError> {
        let people = self.ledger().people();
        let index = parse_position(raw, "person", people.len())?;
        Ok(people[index].id)
    }

    /// Resolves a 1-based item reference in listing order.
    pub(crate) fn item_ref(&self, raw: Option<&&str>) -> Result<Uuid, CommandError> {
        let items = self.ledger().line_items();
        let index = parse_position(raw, "item", items.len())?;
        Ok(items[index].id())
    }

    pub(crate) fn require_bills(&self) -> Result<(), CommandError> {
        if self.ledger().bills().is_empty() {
            return Err(CommandError::Message(
                "Bills are only used in item-based mode.".into(),
            ));
        }
        Ok(())
    }

    /// Resolves a 1-based bill reference.
    pub(crate) fn bill_ref(&self, raw: Option<&&str>) -> Result<Uuid, CommandError> {
        self.require_bills()?;
        let bills = self.ledger().bills();
        let index = parse_position(raw, "bill", bills.len())?;
        Ok(bills[index].id)
    }
}

/// Parses a 1-based row number into a 0-based index below `count`.
pub(crate) fn parse_position(
    raw: Option<&&str>,
    what: &str,
    count: usize,
) -> Result<usize, CommandError> {
    let Some(raw) = raw else {
        return Err(CommandError::InvalidArguments(format!(
            "missing {what} number"
        )));
    };
    match raw.parse::<usize>() {
        Ok(position) if (1..=count).contains(&position) => Ok(position - 1),
        _ => Err(CommandError::InvalidArguments(format!(
            "{what} #{raw} does not exist (choose 1-{count})"
        ))),
    }
}

pub(crate) fn parse_amount(raw: Option<&&str>) -> Result<f64, CommandError> {
    let Some(raw) = raw else {
        return Err(CommandError::InvalidArguments("missing amount".into()));
    };
    raw.trim()
        .trim_start_matches('₹')
        .parse::<f64>()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid amount `{raw}`")))
}

/// `on`/`off` style switch; `None` when the argument is absent.
pub(crate) fn parse_toggle(raw: Option<&&str>) -> Result<Option<bool>, CommandError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" | "1" => Ok(Some(true)),
        "off" | "no" | "false" | "0" => Ok(Some(false)),
        _ => Err(CommandError::InvalidArguments(format!(
            "expected `on` or `off`, got `{raw}`"
        ))),
    }
}

/// Joins the remaining words of a command into one value.
pub(crate) fn join_rest(args: &[&str]) -> String {
    args.join(" ")
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<TransitionError> for CommandError {
    fn from(err: TransitionError) -> Self {
        CommandError::Ledger(err.into())
    }
}

impl From<ImportError> for CommandError {
    fn from(err: ImportError) -> Self {
        CommandError::Ledger(err.into())
    }
}

impl From<ExportError> for CommandError {
    fn from(err: ExportError) -> Self {
        CommandError::Ledger(err.into())
    }
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        CommandError::Ledger(err.into())
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}

#[cfg(test)]
pub(crate) fn process_script(lines: &[&str]) -> Result<ShellContext, CliError> {
    let home = tempfile::tempdir()?;
    let mut app =
        ShellContext::with_config_manager(CliMode::Script, ConfigManager::with_base_dir(home.path()))?;
    for line in lines {
        match app.execute_line(line)? {
            LoopControl::Continue => {}
            LoopControl::Exit => break,
        }
    }
    Ok(app)
}
