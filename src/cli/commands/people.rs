use crate::cli::core::{join_rest, parse_amount, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::{ArgKind, CommandEntry};
use crate::cli::views;
use crate::domain::Displayable;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "person",
        "Add, edit, remove, or list people",
        "person <add|name <person#> <name>|paid <person#> <amount>|remove <person#>|list>",
        cmd_person,
    )
    .with_args(&[ArgKind::Keywords(&["add", "name", "paid", "remove", "list"])])]
}

fn cmd_person(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(action) = args.first().map(|value| value.to_lowercase()) else {
        return Err(usage());
    };
    match action.as_str() {
        "add" => {
            context.ledger_mut()?.add_person();
            io::print_success(format!(
                "Added person #{}.",
                context.ledger().people().len()
            ));
        }
        "name" => {
            let id = context.person_ref(args.get(1))?;
            let name = join_rest(args.get(2..).unwrap_or_default());
            context.ledger_mut()?.update_person_name(id, name);
        }
        "paid" => {
            let id = context.person_ref(args.get(1))?;
            let amount = parse_amount(args.get(2))?;
            context.ledger_mut()?.update_person_contribution(id, amount);
        }
        "remove" => {
            let id = context.person_ref(args.get(1))?;
            let label = context
                .ledger()
                .person(id)
                .map(Displayable::display_label)
                .unwrap_or_default();
            if !context.ledger_mut()?.remove_person(id) {
                io::print_warning("At least one person row is kept.");
                return Ok(());
            }
            io::print_success(format!("Removed {label}."));
        }
        "list" => {}
        _ => return Err(usage()),
    }
    views::show_screen(&context.session);
    Ok(())
}

fn usage() -> CommandError {
    CommandError::InvalidArguments("missing or unknown action. See `help person`.".into())
}
