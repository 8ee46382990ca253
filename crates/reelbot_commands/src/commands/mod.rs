use poise::serenity_prelude::Permissions;
use poise::Command;
use reelbot_util::abort_with;
use reelbot_util::extensions::*;
use reelbot_util::prelude::*;

pub mod errors;
pub use errors::*;

use crate::checks::PermissionLevel;

pub mod announce;
pub mod autoreact;
pub mod clear_commands;
pub mod dm;
pub mod help;
pub mod info;
pub mod status;

pub const PREFIX: &str = "!!";

pub fn all_commands() -> Vec<poise::Command<UserData, Error>> {
    let mut all_commands = vec![
        // Global
        status::status(),
        help::help(),
        info::info(),
        // Admin-only
        autoreact::autoreact(),
        dm::dm(),
        announce::announce(),
        clear_commands::clear_commands(),
    ];
    for command in all_commands.iter_mut() {
        preprocess_command(command);
    }
    all_commands
}

pub fn preprocess_command(command: &mut Command<UserData, anyhow::Error>) {
    if let Some(meta) = command.custom_data.downcast_ref::<CmdMeta>() {
        command.checks = match meta.perms {
            PermissionLevel::Admin => vec![|ctx| Box::pin(crate::checks::check_is_admin(ctx))],
            PermissionLevel::User => vec![],
        };
        command.default_member_permissions = match meta.perms {
            PermissionLevel::Admin => Permissions::ADMINISTRATOR,
            PermissionLevel::User => Permissions::empty(),
        };
        if command.category.is_none() {
            command.category = Some(
                match meta.perms {
                    PermissionLevel::Admin => "Admin",
                    PermissionLevel::User => "Global",
                }
                .to_string(),
            );
        }
    }

    for subcommand in command.subcommands.iter_mut() {
        preprocess_command(subcommand);
    }
}

pub struct CmdMeta {
    perms: PermissionLevel,
}

/// Split the first whitespace-separated word off `input`.
pub(crate) fn split_first_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    Some(match input.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim()),
        None => (input, ""),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_categorized() {
        let commands = all_commands();
        let category = |name: &str| {
            commands.iter().find(|c| c.name == name).and_then(|c| c.category.clone()).unwrap()
        };
        assert_eq!(category("status"), "Global");
        assert_eq!(category("autoreact"), "Admin");
        assert_eq!(category("clearcommands"), "Admin");

        let autoreact = commands.iter().find(|c| c.name == "autoreact").unwrap();
        assert!(autoreact.check.is_some());
        assert!(autoreact.subcommands.iter().all(|c| c.check.is_some()));
    }

    #[test]
    fn first_word_splitting() {
        assert_eq!(split_first_word("  enable  "), Some(("enable", "")));
        assert_eq!(split_first_word("setemojis 😄   👎"), Some(("setemojis", "😄   👎")));
        assert_eq!(split_first_word("   "), None);
    }
}
