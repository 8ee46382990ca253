use std::time::Duration;

use poise::serenity_prelude::{
    collector::MessageCollector, CreateAllowedMentions, CreateEmbed, CreateEmbedFooter,
    CreateMessage, Mentionable, RoleId,
};
use reelbot_media::{format::NOT_AVAILABLE, MediaSummary};

use super::info::lookup_media;
use super::*;

const ANSWER_TIMEOUT: Duration = Duration::from_secs(300);
const ANNOUNCEMENT_COLOR: u32 = 0x5865f2;

const TITLE_PROMPT: &str = "📝 **First, what is the title of the movie or TV show?** (For best results, include the year, e.g., `Suits (2011)`)";

/// The upload details asked for after the title, in order.
const UPLOAD_QUESTIONS: [&str; 6] = [
    "📦 **What is the upload size?** (e.g., `8.01 GB`)",
    "📺 **What is the video quality?** (e.g., `720p`)",
    "📥 **What is the download type?** (e.g., `Torrent`, `Direct`)",
    "🔗 **What is the download link?** (e.g., a magnet link)",
    "🙋 **Who requested this?** (e.g., `@mention` or `N/A`)",
    "✨ **Any extras?** (e.g., `Super Fast Download ⚡` or `N/A`)",
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct UploadDetails {
    size: String,
    quality: String,
    download_type: String,
    link: String,
    requester: String,
    extras: String,
}

impl UploadDetails {
    fn from_answers(answers: [String; 6]) -> Self {
        let [size, quality, download_type, link, requester, extras] = answers;
        Self { size, quality, download_type, link, requester, extras }
    }
}

/// Interactively post a new release to the announcement channel.
#[poise::command(
    prefix_command,
    guild_only,
    custom_data = "CmdMeta { perms: PermissionLevel::Admin }"
)]
pub async fn announce(ctx: Ctx<'_>) -> Res<()> {
    let config = ctx.get_config();
    let Some(channel_announcements) = config.channel_announcements else {
        abort_with!("❌ Could not find the announcement channel. Please check the `ANNOUNCEMENT_CHANNEL_ID` environment variable.")
    };

    let Some(query) = ask(ctx, TITLE_PROMPT).await? else { return Ok(()) };
    ctx.say("⏳ Got it. Searching for media info...").await?;
    let Some(summary) = lookup_media(ctx, &query).await? else {
        ctx.say(format!(
            "❌ **Search Failed:** I couldn't find any results for \"{query}\". Please try the command again."
        ))
        .await?;
        return Ok(());
    };

    let mut answers: [String; 6] = Default::default();
    for (answer, question) in answers.iter_mut().zip(UPLOAD_QUESTIONS) {
        let Some(reply) = ask(ctx, question).await? else { return Ok(()) };
        *answer = reply;
    }
    let details = UploadDetails::from_answers(answers);

    let message = announcement_message(&summary, &details, config.role_new_release);
    channel_announcements.send_message(ctx.serenity_context(), message).await?;
    ctx.say("✅ Announcement posted successfully!").await?;
    ctx.log_notice(format!(
        "[COMMAND] {} posted a new announcement: {}",
        ctx.author().tag(),
        summary.display_title()
    ))
    .await;
    Ok(())
}

/// Ask the invoking user a question and wait for their next message in this channel.
/// Returns `None` (after telling the user) when they don't answer in time.
async fn ask(ctx: Ctx<'_>, question: &str) -> Res<Option<String>> {
    ctx.say(question).await?;
    let answer = MessageCollector::new(ctx.serenity_context().shard.clone())
        .author_id(ctx.author().id)
        .channel_id(ctx.channel_id())
        .timeout(ANSWER_TIMEOUT)
        .await;
    match answer {
        Some(msg) => Ok(Some(msg.content)),
        None => {
            ctx.say("You took too long to respond. Announcement canceled.").await?;
            Ok(None)
        }
    }
}

fn announcement_message(
    summary: &MediaSummary,
    details: &UploadDetails,
    role: Option<RoleId>,
) -> CreateMessage {
    let (content, mentions) = match role {
        Some(role) => (role.mention().to_string(), CreateAllowedMentions::new().roles(vec![role])),
        None => ("@New (Role not configured)".to_string(), CreateAllowedMentions::new()),
    };
    CreateMessage::new()
        .content(content)
        .allowed_mentions(mentions)
        .embed(announcement_embed(summary, details))
}

fn announcement_embed(summary: &MediaSummary, details: &UploadDetails) -> CreateEmbed {
    let mut e = CreateEmbed::default()
        .color(ANNOUNCEMENT_COLOR)
        .title(format!("🎬 {}", summary.display_title()))
        .url(summary.url())
        .description(summary.overview.clone().unwrap_or_else(|| "No synopsis available.".into()))
        .field("🎭 Genre", summary.genre_list().unwrap_or_else(|| NOT_AVAILABLE.into()), true)
        .field("📦 Upload Size", &details.size, true)
        .field("📥 Download Type", &details.download_type, true)
        .field("📺 Video Quality", &details.quality, true)
        .field("🙋 Requested By", &details.requester, true)
        .field("✨ Extras", &details.extras, false)
        .field("🔗 Cracked Link", format!("**[{}]({})**", summary.title, details.link), false)
        .footer(CreateEmbedFooter::new("Uploaded by FilmCrackers"))
        .timestamp(chrono::Utc::now());
    if let Some(poster) = summary.poster_url() {
        e = e.thumbnail(poster);
    }
    if let Some(backdrop) = summary.backdrop_url() {
        e = e.image(backdrop);
    }
    e
}
