use anyhow::{Context, Result};
use poise::serenity_prelude::FullEvent;
use reelbot_enrichment::DiscordSink;
use reelbot_util::{log_error, prelude::Error, UserData};
use serenity::{client, model::prelude::*};

mod channel_create;
mod guild_create;
mod message_create;
mod message_update;
mod ready;
mod thread_create;

/// Single dispatch point for gateway events. Errors are logged and never stop the event loop.
pub async fn handle_event(
    ctx: &client::Context,
    event: &FullEvent,
    _framework: poise::FrameworkContext<'_, UserData, Error>,
    data: &UserData,
) -> Result<(), Error> {
    let result = match event {
        FullEvent::Ready { data_about_bot } => ready::ready(ctx, data, data_about_bot).await,
        FullEvent::GuildCreate { guild, .. } => guild_create::guild_create(ctx, data, guild).await,
        FullEvent::ChannelCreate { channel } => {
            channel_create::channel_create(data, channel);
            Ok(())
        }
        FullEvent::ThreadCreate { thread } => {
            thread_create::thread_create(ctx, data, thread).await;
            Ok(())
        }
        FullEvent::Message { new_message } => {
            message_create::message_create(ctx, data, new_message).await
        }
        FullEvent::MessageUpdate { new, event, .. } => {
            message_update::message_update(ctx, data, new.as_ref(), event).await
        }
        _ => Ok(()),
    };

    log_error!(format!("Error while handling {} event", event.snake_case_name()), result);
    Ok(())
}

fn sink(ctx: &client::Context) -> DiscordSink {
    DiscordSink::new(ctx.http.clone())
}
