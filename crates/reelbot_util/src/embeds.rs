use chrono::Utc;
use serenity::builder::{CreateEmbed, CreateEmbedFooter};

pub const COLOR_SUCCESS: u32 = 0xb8bb26;
pub const COLOR_ERROR: u32 = 0xfb4934;
pub const COLOR_INFO: u32 = 0x0099ff;

pub fn base_embed() -> CreateEmbed {
    CreateEmbed::default().timestamp(Utc::now()).footer(CreateEmbedFooter::new("\u{200b}"))
}

pub fn make_success_embed(text: &str) -> CreateEmbed {
    CreateEmbed::default().description(text).color(COLOR_SUCCESS)
}

pub fn make_error_embed(text: &str) -> CreateEmbed {
    CreateEmbed::default().description(text).color(COLOR_ERROR)
}
