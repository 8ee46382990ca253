use std::collections::BTreeMap;

use itertools::Itertools;
use reelbot_util::embeds;

use super::*;

/// Display this help message.
#[poise::command(prefix_command, custom_data = "CmdMeta { perms: PermissionLevel::User }")]
pub async fn help(ctx: Ctx<'_>) -> Res<()> {
    let commands = &ctx.framework().options().commands;
    let embed = embeds::base_embed()
        .color(0xf1c40fu32)
        .title("❓ Help & Commands")
        .description("Here are all the commands you can use:")
        .fields(help_fields(commands).into_iter().map(|(name, value)| (name, value, false)));
    ctx.reply_embed(embed).await?;
    Ok(())
}

/// One `(category, command list)` pair per command category.
fn help_fields(commands: &[Command<UserData, Error>]) -> Vec<(String, String)> {
    let mut categories: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for command in commands.iter().filter(|c| !c.hide_in_help) {
        let category = command.category.as_deref().unwrap_or("Other");
        let lines = categories.entry(category).or_default();
        lines.push(help_line(&command.name, command));
        for subcommand in command.subcommands.iter().filter(|c| !c.hide_in_help) {
            lines.push(help_line(&format!("{} {}", command.name, subcommand.name), subcommand));
        }
    }
    categories
        .into_iter()
        .map(|(category, lines)| (category_title(category), lines.into_iter().join("\n")))
        .collect()
}

fn help_line(invocation: &str, command: &Command<UserData, Error>) -> String {
    let description = command.description.as_deref().unwrap_or("No description");
    format!("`{PREFIX}{invocation}` - {description}")
}

fn category_title(category: &str) -> String {
    match category {
        "Admin" => "👑 Admin Commands".to_string(),
        "Global" => "🌍 Global Commands".to_string(),
        other => other.to_string(),
    }
}
