use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;
use crate::config::Config;
use crate::core::services::ImportTarget;
use crate::core::wizard::Screen;
use crate::domain::SplitMode;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// What the shell offers when completing one argument position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// Row numbers, names, amounts: nothing to offer.
    Free,
    Mode,
    EditTarget,
    ImportTarget,
    Toggle,
    ConfigKey,
    Command,
    Keywords(&'static [&'static str]),
}

#[derive(Clone, Copy)]
pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
    pub args: &'static [ArgKind],
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
            args: &[],
        }
    }

    pub const fn with_args(mut self, args: &'static [ArgKind]) -> Self {
        self.args = args;
        self
    }
}

/// Commands in registration order. Later registrations replace earlier ones
/// with the same name.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: CommandEntry) {
        match self.entries.iter().position(|known| known.name == entry.name) {
            Some(index) => self.entries[index] = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn list(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    /// Candidates for the word being typed after `words`. An empty `words`
    /// completes the command name itself.
    pub fn complete(&self, words: &[&str], partial: &str) -> Vec<String> {
        let options: Vec<String> = match words.split_first() {
            None => self.names().map(str::to_string).collect(),
            Some((command, args)) => {
                let kind = self
                    .get(&command.to_ascii_lowercase())
                    .and_then(|entry| entry.args.get(args.len()).copied())
                    .unwrap_or(ArgKind::Free);
                self.options_for(kind)
            }
        };
        let needle = partial.to_ascii_lowercase();
        options
            .into_iter()
            .filter(|option| option.starts_with(&needle))
            .collect()
    }

    fn options_for(&self, kind: ArgKind) -> Vec<String> {
        match kind {
            ArgKind::Free => Vec::new(),
            ArgKind::Mode => [SplitMode::PerHead, SplitMode::ItemBased]
                .iter()
                .map(ToString::to_string)
                .collect(),
            ArgKind::EditTarget => [Screen::Items, Screen::People, Screen::Bill, Screen::AssignItems]
                .iter()
                .map(ToString::to_string)
                .collect(),
            ArgKind::ImportTarget => [ImportTarget::People, ImportTarget::Items]
                .iter()
                .map(ToString::to_string)
                .collect(),
            ArgKind::Toggle => vec!["on".to_string(), "off".to_string()],
            ArgKind::ConfigKey => Config::KEYS.iter().map(|key| key.to_string()).collect(),
            ArgKind::Command => self.names().map(str::to_string).collect(),
            ArgKind::Keywords(words) => words.iter().map(|word| word.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        registry
    }

    #[test]
    fn completes_command_names_by_prefix() {
        let names = registry().complete(&[], "as");
        assert_eq!(names, vec!["assign", "assign-all"]);
    }

    #[test]
    fn mode_candidates_parse_back_to_modes() {
        let modes = registry().complete(&["mode"], "");
        assert_eq!(modes, vec!["per-head", "item-based"]);
        assert!(modes.iter().all(|token| SplitMode::parse(token).is_some()));
    }

    #[test]
    fn edit_and_import_candidates_parse_back() {
        let registry = registry();
        let screens = registry.complete(&["edit"], "");
        assert!(screens.iter().all(|token| Screen::parse(token).is_some_and(Screen::is_editing)));
        assert_eq!(registry.complete(&["edit"], "ass"), vec!["assign-items"]);

        let targets = registry.complete(&["import-file"], "");
        assert_eq!(targets, vec!["people", "items"]);
        assert!(targets.iter().all(|token| ImportTarget::parse(token).is_some()));
    }

    #[test]
    fn toggles_complete_at_their_position_only() {
        let registry = registry();
        assert!(registry.complete(&["assign"], "").is_empty());
        assert!(registry.complete(&["assign", "1"], "").is_empty());
        assert_eq!(registry.complete(&["assign", "1", "2"], "o"), vec!["on", "off"]);
        assert_eq!(registry.complete(&["assign-all", "1"], "of"), vec!["off"]);
    }

    #[test]
    fn subcommands_and_config_keys_complete() {
        let registry = registry();
        assert_eq!(registry.complete(&["person"], "p"), vec!["paid"]);
        assert_eq!(registry.complete(&["config", "set"], "cu"), vec!["currency_symbol"]);
        assert_eq!(registry.complete(&["help"], "bill"), vec!["bill", "bill-items"]);
        assert!(registry.complete(&["nonsense"], "").is_empty());
    }

    #[test]
    fn re_registering_replaces_in_place() {
        let mut registry = registry();
        let count = registry.list().len();
        let mut entry = *registry.get("status").unwrap();
        entry.description = "Where am I?";
        registry.register(entry);
        assert_eq!(registry.list().len(), count);
        assert_eq!(registry.get("status").unwrap().description, "Where am I?");
    }
}
