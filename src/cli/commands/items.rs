use crate::cli::core::{join_rest, parse_amount, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{ArgKind, CommandEntry};
use crate::cli::views;
use crate::domain::Displayable;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "item",
            "Add, edit, remove, or list items",
            "item <add [bill#]|name <item#> <name>|price <item#> <amount>|remove <item#>|list>",
            cmd_item,
        )
        .with_args(&[ArgKind::Keywords(&["add", "name", "price", "remove", "list"])]),
        CommandEntry::new(
            "bill",
            "Manage bills in item-based mode",
            "bill <add|rename <bill#> <name>|remove <bill#>|list>",
            cmd_bill,
        )
        .with_args(&[ArgKind::Keywords(&["add", "rename", "remove", "list"])]),
        CommandEntry::new(
            "bill-items",
            "List the valid items of one bill or of every bill",
            "bill-items [bill#]",
            cmd_bill_items,
        ),
    ]
}

fn cmd_item(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(action) = args.first().map(|value| value.to_lowercase()) else {
        return Err(usage("item"));
    };
    match action.as_str() {
        "add" => {
            let bill = match args.get(1) {
                Some(_) => Some(context.bill_ref(args.get(1))?),
                None => None,
            };
            context.ledger_mut()?.add_item(bill);
            io::print_success(format!("Added item #{}.", context.ledger().item_count()));
        }
        "name" => {
            let id = context.item_ref(args.get(1))?;
            let name = join_rest(args.get(2..).unwrap_or_default());
            context.ledger_mut()?.update_item_name(id, name);
        }
        "price" => {
            let id = context.item_ref(args.get(1))?;
            let price = parse_amount(args.get(2))?;
            context.ledger_mut()?.update_item_price(id, price);
        }
        "remove" => {
            let id = context.item_ref(args.get(1))?;
            if !context.ledger_mut()?.remove_item(id) {
                io::print_warning("At least one item row is kept.");
                return Ok(());
            }
            io::print_success("Item removed.");
        }
        "list" => {}
        _ => return Err(usage("item")),
    }
    views::show_screen(&context.session);
    Ok(())
}

fn cmd_bill(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(action) = args.first().map(|value| value.to_lowercase()) else {
        return Err(usage("bill"));
    };
    match action.as_str() {
        "add" => {
            let ledger = context.ledger_mut()?;
            if ledger.add_bill().is_none() {
                return Err(CommandError::Message(
                    "Bills are only used in item-based mode.".into(),
                ));
            }
            let bill = ledger.bills().last().map(|bill| bill.name.clone());
            io::print_success(format!("Added {}.", bill.unwrap_or_default()));
        }
        "rename" => {
            let id = context.bill_ref(args.get(1))?;
            let name = join_rest(args.get(2..).unwrap_or_default());
            context.ledger_mut()?.rename_bill(id, name);
        }
        "remove" => {
            let id = context.bill_ref(args.get(1))?;
            let label = context
                .ledger()
                .bill(id)
                .map(Displayable::display_label)
                .unwrap_or_default();
            if !context.ledger_mut()?.remove_bill(id) {
                io::print_warning("At least one bill is kept.");
                return Ok(());
            }
            io::print_success(format!("Removed {label} and its items."));
        }
        "list" => context.require_bills()?,
        _ => return Err(usage("bill")),
    }
    views::show_screen(&context.session);
    Ok(())
}

fn cmd_bill_items(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let bills = match args.first() {
        Some(_) => vec![context.bill_ref(args.first())?],
        None => {
            context.require_bills()?;
            context.ledger().bills().iter().map(|bill| bill.id).collect()
        }
    };
    let ledger = context.ledger();
    let currency = context.session.currency();
    for bill_id in bills {
        let Some(bill) = ledger.bill(bill_id) else {
            continue;
        };
        output_section(&bill.name);
        let items = ledger.items_for_bill(bill_id);
        if items.is_empty() {
            io::print_info("  No items yet.");
        }
        for item in items {
            let names = ledger.assigned_names(item.id);
            let sharing = if names.is_empty() {
                "nobody".to_string()
            } else {
                names.join(", ")
            };
            io::print_info(format!(
                "  {}  {}  -> {}",
                item.name,
                currency.money(item.price),
                sharing
            ));
        }
    }
    Ok(())
}

fn usage(command: &str) -> CommandError {
    CommandError::InvalidArguments(format!(
        "missing or unknown action. See `help {command}`."
    ))
}
