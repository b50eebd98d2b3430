//! Text renderings of each wizard screen.

use crate::cli::io;
use crate::cli::output::{self, section as output_section};
use crate::core::wizard::{Screen, Session};
use crate::currency::CurrencyFormat;
use crate::domain::{Direction, Identifiable, LineItem, NamedEntity, PersonStatement, SplitMode};

const UNNAMED: &str = "(unnamed)";

fn label(name: &str) -> &str {
    if name.trim().is_empty() {
        UNNAMED
    } else {
        name
    }
}

/// Filled and hollow dots for the current step, e.g. `●●○`.
pub fn progress_dots(session: &Session) -> String {
    let (step, steps) = session.progress();
    (1..=steps)
        .map(|index| if index <= step { '●' } else { '○' })
        .collect()
}

pub fn show_screen(session: &Session) {
    match session.screen() {
        Screen::ModeSelection => show_mode_selection(),
        Screen::Items => show_items(session),
        Screen::People => show_people(session),
        Screen::Bill => show_bills(session),
        Screen::AssignItems => show_assignments(session),
        Screen::Results => show_results(session),
    }
}

fn show_mode_selection() {
    output_section("How do you want to split?");
    io::print_info("  per-head    Split the total equally between everyone");
    io::print_info("  item-based  Split by who shared which items");
    io::print_hint("Choose with `mode per-head` or `mode item-based`.");
}

fn step_header(session: &Session, title: &str) {
    output_section(format!("{title} {}", progress_dots(session)));
}

pub fn show_items(session: &Session) {
    step_header(session, "Items");
    list_items(session);
    io::print_info(format!(
        "Total: {}",
        session.currency().money(session.ledger().total())
    ));
    io::print_hint("Edit with `item add|name|price|remove`, then `next`.");
}

fn list_items(session: &Session) {
    let ledger = session.ledger();
    let currency = session.currency();
    for (index, item) in ledger.line_items().iter().enumerate() {
        io::print_info(format!(
            "  {}. {}  {}",
            index + 1,
            label(item.name()),
            currency.money(item.price())
        ));
    }
}

pub fn show_people(session: &Session) {
    step_header(session, "People");
    let ledger = session.ledger();
    let currency = session.currency();
    for (index, person) in ledger.people().iter().enumerate() {
        io::print_info(format!(
            "  {}. {}  paid {}",
            index + 1,
            label(person.name()),
            currency.money(person.contribution)
        ));
    }
    if session.mode() == SplitMode::PerHead {
        if let Some(share) = ledger.per_head_share() {
            io::print_info(format!("Each person owes {}", currency.money(share)));
        }
        show_check(session);
    }
    io::print_hint("Edit with `person add|name|paid|remove`, then `next`.");
}

/// Prints the live contribution check in the style matching its outcome.
pub fn show_check(session: &Session) {
    let check = session.check();
    if check.is_valid {
        io::print_success(&check.message);
    } else {
        io::print_warning(&check.message);
    }
}

pub fn show_bills(session: &Session) {
    step_header(session, "Bills");
    let ledger = session.ledger();
    let currency = session.currency();
    let items = ledger.assigned_items();
    for (bill_index, bill) in ledger.bills().iter().enumerate() {
        io::print_info(format!("Bill #{}: {}", bill_index + 1, bill.name));
        for (index, item) in items.iter().enumerate() {
            if item.bill_id != bill.id {
                continue;
            }
            io::print_info(format!(
                "  {}. {}  {}",
                index + 1,
                label(&item.name),
                currency.money(item.price)
            ));
        }
    }
    io::print_info(format!("Total: {}", currency.money(ledger.total())));
    io::print_hint("Edit with `bill ...` and `item add [bill#]|name|price|remove`, then `next`.");
}

pub fn show_assignments(session: &Session) {
    step_header(session, "Who had what?");
    let ledger = session.ledger();
    let currency = session.currency();
    for (index, item) in ledger.assigned_items().iter().enumerate() {
        let names = ledger.assigned_names(item.id());
        let sharing = if names.is_empty() {
            "nobody".to_string()
        } else {
            names.join(", ")
        };
        let bill = ledger
            .bill(item.bill_id)
            .map(|bill| bill.name.as_str())
            .unwrap_or("Unknown Bill");
        io::print_info(format!(
            "  {}. {}  {} [{}] -> {}",
            index + 1,
            label(&item.name),
            currency.money(item.price),
            bill,
            sharing
        ));
    }
    io::print_info("People:");
    for (index, person) in ledger.people().iter().enumerate() {
        io::print_info(format!("  {}. {}", index + 1, label(person.name())));
    }
    show_check(session);
    io::print_hint("Toggle with `assign <item#> <person#> [on|off]` or `assign-all <item#>`.");
}

pub fn show_results(session: &Session) {
    step_header(session, "Results");
    let currency = session.currency();
    if session.mode() == SplitMode::PerHead {
        if let Some(share) = session.ledger().per_head_share() {
            io::print_info(format!("Each person owes {}", currency.money(share)));
        }
    }
    let results = session.results();
    if results.is_empty() {
        io::print_success("Everyone is settled up.");
    }
    for entry in results {
        let verb = match entry.direction {
            Direction::Receive => "receives",
            Direction::Pay => "pays",
        };
        io::print_info(format!(
            "  {} {} {}",
            entry.name,
            verb,
            currency.money(entry.amount)
        ));
    }
    if session.mode() == SplitMode::ItemBased {
        io::print_hint("See `breakdown <person#>` or `copy <person#>` for details.");
    }
    io::print_hint("Use `edit <screen>` to change something or `reset` to start over.");
}

pub fn show_breakdown(statement: &PersonStatement, currency: &CurrencyFormat) {
    output_section(format!("{}'s items", statement.name));
    if statement.shares.is_empty() {
        io::print_info("  No items assigned.");
    }
    for share in &statement.shares {
        let mut line = format!(
            "  {} ({})  {}",
            share.item_name,
            share.bill_name,
            currency.money(share.personal_cost)
        );
        if let Some(info) = share.split_info() {
            line.push_str(&format!("  {info}"));
        }
        io::print_info(line);
    }
    io::print_info(format!("Items total: {}", currency.money(statement.items_total)));
    io::print_info(format!("Paid: {}", currency.money(statement.amount_paid)));
    io::print_info(format!(
        "Amount to {}: {}",
        statement.direction(),
        currency.money(statement.difference().abs())
    ));
}

/// Prints an exported text block under its own heading.
pub fn show_export(text: &str) {
    output_section("Summary");
    output::plain(text);
}
