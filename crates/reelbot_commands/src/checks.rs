use anyhow::Context;
use poise::serenity_prelude::Permissions;
use reelbot_util::prelude::{Ctx, Res};

/// Level of permission a given user has. Ordered such that Admin > User.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PermissionLevel {
    User,
    Admin,
}

impl PermissionLevel {
    pub fn from_permissions(perms: Permissions) -> Self {
        if perms.administrator() {
            PermissionLevel::Admin
        } else {
            PermissionLevel::User
        }
    }
}

#[tracing::instrument(skip_all, fields(user_id = %ctx.author().id))]
pub async fn get_permission_level(ctx: Ctx<'_>) -> Res<PermissionLevel> {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(PermissionLevel::User);
    };
    let member = guild_id
        .member(ctx.serenity_context(), ctx.author().id)
        .await
        .context("Failed to fetch invoking member")?;
    let perms = ctx.guild().context("Guild not in cache")?.member_permissions(&member);
    Ok(PermissionLevel::from_permissions(perms))
}

pub async fn check_is_admin(ctx: Ctx<'_>) -> Res<bool> {
    Ok(get_permission_level(ctx).await? >= PermissionLevel::Admin)
}
