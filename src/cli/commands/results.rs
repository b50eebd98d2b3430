use chrono::Utc;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::views;
use crate::core::services::ExportError;
use crate::core::wizard::Screen;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "results",
            "Show who pays and who receives",
            "results",
            cmd_results,
        ),
        CommandEntry::new(
            "breakdown",
            "Show the items one person shared",
            "breakdown <person#>",
            cmd_breakdown,
        ),
        CommandEntry::new(
            "copy",
            "Copy a person's summary as plain text",
            "copy <person#>",
            cmd_copy,
        ),
    ]
}

fn require_results(context: &ShellContext) -> CommandResult {
    if context.session.screen() != Screen::Results {
        return Err(CommandError::Message(
            "Results are available after the last step. Use `next` to get there.".into(),
        ));
    }
    Ok(())
}

fn cmd_results(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    require_results(context)?;
    views::show_results(&context.session);
    Ok(())
}

fn cmd_breakdown(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let person_id = context.person_ref(args.first())?;
    let statement = context
        .ledger()
        .person_statement(person_id)
        .ok_or(ExportError::UnknownPerson(person_id))?;
    views::show_breakdown(&statement, context.session.currency());
    Ok(())
}

fn cmd_copy(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let person_id = context.person_ref(args.first())?;
    let text = context
        .session
        .copy_person_summary(person_id, &mut context.clipboard, Utc::now())?;
    views::show_export(&text);
    if context.session.copy_indicator_active(Utc::now()) {
        io::print_success("Copied!");
    }
    Ok(())
}
