use reelbot_media::{embed::media_embed, MediaLookup, MediaSummary};

use super::*;

const USAGE: &str =
    "Please provide a movie/TV show name or an IMDb ID. Usage: `!!info <query>`";

/// Look up a movie or TV show by title or IMDb id.
#[poise::command(prefix_command, custom_data = "CmdMeta { perms: PermissionLevel::User }")]
pub async fn info(ctx: Ctx<'_>, #[rest] query: Option<String>) -> Res<()> {
    let Some(query) = query.filter(|x| !x.trim().is_empty()) else {
        ctx.say(USAGE).await?;
        return Ok(());
    };
    let query = query.trim();
    ctx.log_notice(format!("[COMMAND] {} is searching for info on: \"{query}\"", ctx.author().tag()))
        .await;

    match lookup_media(ctx, query).await? {
        Some(summary) => {
            ctx.reply_embed(media_embed(&summary)).await?;
        }
        None => {
            ctx.say(format!("I couldn't find any results for \"{query}\". Please check your input."))
                .await?;
        }
    }
    Ok(())
}

/// Look `query` up with the configured timeout.
/// Lookup failures become a [`UserErr`], a miss is `Ok(None)`.
pub(crate) async fn lookup_media(ctx: Ctx<'_>, query: &str) -> Res<Option<MediaSummary>> {
    let timeout = ctx.get_config().lookup_timeout;
    match tokio::time::timeout(timeout, ctx.get_media().lookup(query)).await {
        Ok(Ok(summary)) => Ok(summary),
        Ok(Err(err)) => {
            tracing::warn!(query, error.message = %err, "Media lookup failed");
            abort_with!("Sorry, an unexpected error occurred while fetching data.")
        }
        Err(_) => {
            tracing::warn!(query, "Media lookup timed out");
            abort_with!("Sorry, the media database took too long to answer.")
        }
    }
}
