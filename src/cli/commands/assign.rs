use crate::cli::core::{parse_toggle, CommandError, CommandResult, ShellContext};
use crate::cli::registry::{ArgKind, CommandEntry};
use crate::cli::views;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "assign",
            "Include or exclude a person from an item",
            "assign <item#> <person#> [on|off]",
            cmd_assign,
        )
        .with_args(&[ArgKind::Free, ArgKind::Free, ArgKind::Toggle]),
        CommandEntry::new(
            "assign-all",
            "Share an item with everyone, or with nobody",
            "assign-all <item#> [on|off]",
            cmd_assign_all,
        )
        .with_args(&[ArgKind::Free, ArgKind::Toggle]),
    ]
}

fn item_based_only(context: &ShellContext) -> CommandResult {
    if context.ledger().assigned_items().is_empty() {
        return Err(CommandError::Message(
            "Assignments are only used in item-based mode.".into(),
        ));
    }
    Ok(())
}

fn cmd_assign(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    item_based_only(context)?;
    let item_id = context.item_ref(args.first())?;
    let person_id = context.person_ref(args.get(1))?;
    let included = match parse_toggle(args.get(2))? {
        Some(value) => value,
        None => !context
            .ledger()
            .assigned_item(item_id)
            .is_some_and(|item| item.includes(person_id)),
    };
    context
        .ledger_mut()?
        .set_item_person(item_id, person_id, included);
    views::show_screen(&context.session);
    Ok(())
}

fn cmd_assign_all(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    item_based_only(context)?;
    let item_id = context.item_ref(args.first())?;
    let included = parse_toggle(args.get(1))?.unwrap_or(true);
    context.ledger_mut()?.set_all_people(item_id, included);
    views::show_screen(&context.session);
    Ok(())
}
