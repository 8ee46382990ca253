use crate::{config::Config, embeds, prelude::Ctx};

use poise::{CreateReply, ReplyHandle};
use reelbot_db::Db;
use reelbot_media::MediaLookup;
use serenity::{async_trait, builder::CreateEmbed};
use std::{fmt::Display, sync::Arc};

type StdResult<T, E> = std::result::Result<T, E>;

#[extend::ext(name = PoiseContextExt)]
#[async_trait]
pub impl<'a> Ctx<'a> {
    fn get_config(&self) -> Arc<Config> {
        self.data().config.clone()
    }

    fn get_db(&self) -> Arc<Db> {
        self.data().db.clone()
    }

    fn get_media(&self) -> Arc<dyn MediaLookup> {
        self.data().media.clone()
    }

    /// Send an embed as a reply.
    async fn reply_embed(&self, embed: CreateEmbed) -> StdResult<ReplyHandle<'_>, serenity::Error> {
        self.reply_embed_full(false, embed).await
    }

    /// Send an embed, making it ephemeral optionally.
    /// Will make message a reply unconditionally.
    async fn reply_embed_full(
        &self,
        ephemeral: bool,
        embed: CreateEmbed,
    ) -> StdResult<ReplyHandle<'_>, serenity::Error> {
        let reply = CreateReply::default().ephemeral(ephemeral).embed(embed).reply(true);
        self.send(reply).await
    }

    async fn say_success(
        &self,
        text: impl Display + Send + Sync + 'static,
    ) -> StdResult<ReplyHandle<'_>, serenity::Error> {
        tracing::info!(
            msg.content = %text,
            msg.responding_to_user = %self.author().tag(),
            "Sending success message to user"
        );
        self.reply_embed_full(true, embeds::make_success_embed(&text.to_string())).await
    }

    async fn say_error(
        &self,
        text: impl Display + Send + Sync + 'static,
    ) -> StdResult<ReplyHandle<'_>, serenity::Error> {
        tracing::info!(
            msg.content = %text,
            msg.responding_to_user = %self.author().tag(),
            "Sending error message to user"
        );
        self.reply_embed_full(true, embeds::make_error_embed(&text.to_string())).await
    }

    /// Write a line to the log and to the #logs mirror, if there is one.
    async fn log_notice(&self, text: impl Display + Send + Sync + 'static) {
        self.data().bot_log.log_notice(self.http(), text).await
    }
}
