use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::core::{CliError, CliMode, LoopControl, ShellContext};
use crate::cli::output::info as output_info;
use crate::cli::registry::CommandRegistry;
use crate::cli::views;

/// Set to run commands from stdin without the line editor.
pub const SCRIPT_ENV: &str = "BILLSPLIT_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    tracing::debug!(?mode, "shell started");

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<WizardHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(WizardHelper {
        registry: context.registry.clone(),
    }));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    output_info("Welcome to Billsplit. Type `help` for commands.");
    views::show_screen(&context.session);

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                editor.add_history_entry(line.trim()).ok();
                if run_line(context, &line)? == LoopControl::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for line in io::stdin().lock().lines() {
        if !context.running || run_line(context, &line?)? == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

fn run_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CliError> {
    match context.execute_line(line) {
        Ok(control) => Ok(control),
        Err(err) => {
            context.report_error(err)?;
            Ok(LoopControl::Continue)
        }
    }
}

/// Completes commands and their mode, screen, target and toggle arguments,
/// and hints a command's usage once its name is typed.
struct WizardHelper {
    registry: CommandRegistry,
}

impl WizardHelper {
    /// Finished words before the cursor and the word being typed.
    fn split_at_cursor(line: &str) -> (Vec<&str>, &str) {
        let start = line
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        (line[..start].split_whitespace().collect(), &line[start..])
    }
}

impl Helper for WizardHelper {}

impl Completer for WizardHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (words, partial) = Self::split_at_cursor(&line[..pos]);
        let candidates = self
            .registry
            .complete(&words, partial)
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((pos - partial.len(), candidates))
    }
}

impl Hinter for WizardHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let (words, partial) = Self::split_at_cursor(line);
        let [command] = words.as_slice() else {
            return None;
        };
        if !partial.is_empty() {
            return None;
        }
        let usage = self.registry.get(&command.to_ascii_lowercase())?.usage;
        usage
            .split_once(' ')
            .map(|(_, arguments)| arguments.to_string())
    }
}

impl Highlighter for WizardHelper {}

impl Validator for WizardHelper {}
