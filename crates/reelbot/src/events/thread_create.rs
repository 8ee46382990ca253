use super::*;

/// Reply to new posts in the request forums.
pub async fn thread_create(ctx: &client::Context, data: &UserData, thread: &GuildChannel) {
    let Some(forums) = &data.forums else { return };
    // Existing threads are re-sent when the bot gets access to them.
    if thread.newly_created == Some(false) {
        return;
    }
    forums.on_thread_create(&sink(ctx), thread.id, thread.parent_id, &thread.name).await;
}
