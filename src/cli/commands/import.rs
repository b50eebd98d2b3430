use std::fs;

use crate::cli::core::{join_rest, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::{ArgKind, CommandEntry};
use crate::cli::views;
use crate::core::services::ImportTarget;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "import",
            "Replace people or items from `name,value` rows",
            "import <people|items> <rows, separated by \\n>",
            cmd_import,
        )
        .with_args(&[ArgKind::ImportTarget]),
        CommandEntry::new(
            "import-file",
            "Replace people or items from a `name,value` file",
            "import-file <people|items> <path>",
            cmd_import_file,
        )
        .with_args(&[ArgKind::ImportTarget]),
    ]
}

fn target(args: &[&str], usage: &str) -> Result<ImportTarget, CommandError> {
    args.first()
        .and_then(|token| ImportTarget::parse(token))
        .ok_or_else(|| CommandError::InvalidArguments(format!("usage: {usage}")))
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let target = target(args, "import <people|items> <rows>")?;
    let text = join_rest(args.get(1..).unwrap_or_default()).replace("\\n", "\n");
    apply(context, target, &text)
}

fn cmd_import_file(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let target = target(args, "import-file <people|items> <path>")?;
    let Some(path) = args.get(1) else {
        return Err(CommandError::InvalidArguments(
            "usage: import-file <people|items> <path>".into(),
        ));
    };
    let text = fs::read_to_string(path)?;
    apply(context, target, &text)
}

fn apply(context: &mut ShellContext, target: ImportTarget, text: &str) -> CommandResult {
    let count = context.session.import(target, text)?;
    io::print_success(format!("Imported {count} {target} rows."));
    views::show_screen(&context.session);
    Ok(())
}
