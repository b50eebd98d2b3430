use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::{ArgKind, CommandEntry};
use crate::cli::views;
use crate::core::wizard::{editing_screens, Screen};
use crate::domain::SplitMode;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "mode",
            "Choose how the bill is split",
            "mode <per-head|item-based>",
            cmd_mode,
        )
        .with_args(&[ArgKind::Mode]),
        CommandEntry::new(
            "status",
            "Show the current screen",
            "status",
            cmd_status,
        ),
        CommandEntry::new(
            "next",
            "Continue to the next step",
            "next",
            cmd_next,
        ),
        CommandEntry::new("back", "Return to the previous step", "back", cmd_back),
        CommandEntry::new(
            "home",
            "Go back to mode selection, discarding entries",
            "home",
            cmd_home,
        ),
        CommandEntry::new("reset", "Start over from scratch", "reset", cmd_reset),
        CommandEntry::new(
            "edit",
            "Jump from results to an editing step",
            "edit <items|people|bill|assign>",
            cmd_edit,
        )
        .with_args(&[ArgKind::EditTarget]),
    ]
}

fn cmd_mode(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mode = args
        .first()
        .and_then(|token| SplitMode::parse(token))
        .ok_or_else(|| {
            CommandError::InvalidArguments("usage: mode <per-head|item-based>".into())
        })?;
    context.session.select_mode(mode)?;
    io::print_success(format!("Splitting {mode}."));
    views::show_screen(&context.session);
    Ok(())
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    views::show_screen(&context.session);
    Ok(())
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let (session, mut gate) = context.session_and_gate();
    session.advance(&mut gate)?;
    views::show_screen(&context.session);
    Ok(())
}

fn cmd_back(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.back();
    views::show_screen(&context.session);
    Ok(())
}

fn cmd_home(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let (session, mut gate) = context.session_and_gate();
    if session.go_home(&mut gate) {
        views::show_screen(&context.session);
    } else {
        io::print_info("Staying on the current screen.");
    }
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.reset();
    io::print_success("Started over.");
    views::show_screen(&context.session);
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(target) = args.first().and_then(|token| Screen::parse(token)) else {
        let options: Vec<String> = editing_screens(context.session.mode())
            .iter()
            .map(ToString::to_string)
            .collect();
        return Err(CommandError::InvalidArguments(format!(
            "usage: edit <{}>",
            options.join("|")
        )));
    };
    context.session.edit(target)?;
    views::show_screen(&context.session);
    Ok(())
}
