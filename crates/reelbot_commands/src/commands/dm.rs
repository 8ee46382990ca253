use std::num::NonZeroU64;

use poise::serenity_prelude::{CreateMessage, Mentionable, UserId};

use super::*;

const USAGE: &str = "⚠️ Usage: `!!dm <userID> <your message>`";

/// Send a direct message to a user.
#[poise::command(
    prefix_command,
    guild_only,
    custom_data = "CmdMeta { perms: PermissionLevel::Admin }"
)]
pub async fn dm(ctx: Ctx<'_>, #[rest] args: Option<String>) -> Res<()> {
    let Some((user_id, message)) = args.as_deref().and_then(parse_dm_args) else {
        ctx.say(USAGE).await?;
        return Ok(());
    };

    let result = async {
        let user = user_id.to_user(ctx.serenity_context()).await?;
        user.direct_message(ctx.serenity_context(), CreateMessage::new().content(message)).await
    }
    .await;

    match result {
        Ok(_) => {
            ctx.say(format!("✅ DM sent to {}.", user_id.mention())).await?;
            ctx.log_notice(format!("[COMMAND] {} sent a DM to {user_id}", ctx.author().tag()))
                .await;
        }
        Err(err) => {
            tracing::warn!(user_id = %user_id, error.message = %err, "Failed to send DM");
            ctx.say("❌ Failed to send DM. Make sure the user ID is correct and the user allows DMs.")
                .await?;
        }
    }
    Ok(())
}

/// `<user id or mention> <message>`
fn parse_dm_args(input: &str) -> Option<(UserId, &str)> {
    let (user, message) = split_first_word(input)?;
    if message.is_empty() {
        return None;
    }
    let id = user.strip_prefix("<@").and_then(|x| x.strip_suffix('>')).unwrap_or(user);
    let id = id.strip_prefix('!').unwrap_or(id);
    Some((UserId::from(id.parse::<NonZeroU64>().ok()?), message))
}
