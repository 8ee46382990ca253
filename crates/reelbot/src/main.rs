use std::sync::Arc;

use anyhow::Context;
use poise::serenity_prelude::GatewayIntents;
use reelbot_commands::commands;
use reelbot_db::{Db, JsonBinStore};
use reelbot_enrichment::{ForumWatcher, ForumWatcherConfig, TicketWatcher, TicketWatcherConfig};
use reelbot_media::{MediaLookup, TmdbClient};
use reelbot_util::{bot_log::BotLog, config::Config, log_error, prelude::Ctx, UserData};

mod error_handling;
pub mod events;
mod keepalive;
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init_tracing()?;

    let config = Arc::new(Config::from_environment().context("Failed to load config")?);
    let db = Db::new(JsonBinStore::new(&config.jsonbin_bin_id, &config.jsonbin_api_key))
        .await
        .context("Failed to load settings")?;
    let media: Arc<dyn MediaLookup> = Arc::new(TmdbClient::new(&config.tmdb_api_key));

    let user_data = UserData {
        tickets: ticket_watcher(&config, media.clone()),
        forums: forum_watcher(&config, media.clone()),
        config: config.clone(),
        db: Arc::new(db),
        media,
        bot_log: BotLog::default(),
    };

    let framework_options = poise::FrameworkOptions {
        commands: commands::all_commands(),
        on_error: |err| Box::pin(error_handling::on_error(err)),
        pre_command: |ctx| Box::pin(pre_command(ctx)),
        event_handler: |ctx, event, framework, data| {
            Box::pin(events::handle_event(ctx, event, framework, data))
        },
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: Some(commands::PREFIX.into()),
            execute_self_messages: false,
            case_insensitive_commands: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let framework = poise::Framework::builder()
        .options(framework_options)
        .setup(move |_ctx, _ready, _framework| Box::pin(async move { Ok(user_data) }))
        .build();

    let gateway_intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let port = config.port;
    tokio::spawn(async move { log_error!(keepalive::serve(port).await) });

    let mut client = serenity::Client::builder(&config.discord_token, gateway_intents)
        .framework(framework)
        .await
        .context("Error creating client")?;
    client.start().await?;
    Ok(())
}

fn ticket_watcher(config: &Config, media: Arc<dyn MediaLookup>) -> Option<Arc<TicketWatcher>> {
    let Some((ticket_bot, category)) = config.ticket_source() else {
        tracing::warn!("TICKET_BOT_ID or TICKET_CATEGORY_ID is not set, ticket enrichment is disabled");
        return None;
    };
    let watcher_config = TicketWatcherConfig {
        ticket_bot,
        category,
        expiry: config.watch_expiry,
        lookup_timeout: config.lookup_timeout,
    };
    Some(Arc::new(TicketWatcher::new(watcher_config, media)))
}

fn forum_watcher(config: &Config, media: Arc<dyn MediaLookup>) -> Option<Arc<ForumWatcher>> {
    if config.channels_forum.is_empty() {
        tracing::warn!("FORUM_CHANNEL_IDS is not set, forum post enrichment is disabled");
        return None;
    }
    let watcher_config = ForumWatcherConfig {
        forums: config.channels_forum.clone(),
        grace: config.forum_grace,
        lookup_timeout: config.lookup_timeout,
    };
    Some(Arc::new(ForumWatcher::new(watcher_config, media)))
}

async fn pre_command(ctx: Ctx<'_>) {
    let content = match ctx {
        poise::Context::Application(_) => ctx.invocation_string(),
        poise::Context::Prefix(prefix) => prefix.msg.content.to_string(),
    };
    tracing::info!(
        command_name = ctx.command().qualified_name.as_str(),
        msg.content = %content,
        msg.author = %ctx.author().tag(),
        msg.author_id = %ctx.author().id,
        msg.id = %ctx.id(),
        msg.channel_id = %ctx.channel_id(),
        "{} invoked by {}",
        ctx.command().name,
        ctx.author().tag()
    );
}
