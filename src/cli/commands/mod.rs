pub mod assign;
pub mod config;
pub mod flow;
pub mod import;
pub mod items;
pub mod people;
pub mod results;
pub mod system;

use crate::cli::registry::CommandRegistry;

pub fn register_all(registry: &mut CommandRegistry) {
    for entry in system::definitions()
        .into_iter()
        .chain(flow::definitions())
        .chain(items::definitions())
        .chain(people::definitions())
        .chain(assign::definitions())
        .chain(import::definitions())
        .chain(results::definitions())
        .chain(config::definitions())
    {
        registry.register(entry);
    }
}
