use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{self, section as output_section};
use crate::cli::registry::{ArgKind, CommandEntry};
use crate::config::Config;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )
    .with_args(&[ArgKind::Keywords(&["show", "set"]), ArgKind::ConfigKey])]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        show_config(context);
        return Ok(());
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    Config::KEYS.join("|")
                )));
            }
            let key = args[1];
            let value = args[2..].join(" ");
            let mut updated = context.config.clone();
            updated.set(key, &value)?;
            context.config_manager.save(&updated)?;
            output::set_color_enabled(updated.ui_color_enabled);
            context.session.apply_config(&updated);
            context.config = updated;
            io::print_success(format!("Updated `{key}`."));
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{other}`"
        ))),
    }
}

fn show_config(context: &ShellContext) {
    output_section("Configuration");
    for (key, value) in context.config.entries() {
        io::print_info(format!("  {key:<18} {value}"));
    }
    io::print_info(format!(
        "  Stored at: {}",
        context.config_manager.path().display()
    ));
}
