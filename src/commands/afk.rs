use tracing::{debug, info};

use crate::{presence::DEFAULT_REASON, style, Context, Error};

/// Set your AFK status with an optional message
#[poise::command(slash_command)]
pub async fn afk(
    ctx: Context<'_>,
    #[description = "Shown to anyone who mentions you"] message: Option<String>,
) -> Result<(), Error> {
    let reason = resolve_reason(message);
    let user_id = ctx.author().id;

    let (replaced, afk_users) = {
        let mut presence = ctx.data().presence.lock();
        let replaced = presence.is_afk(user_id);
        presence.set_afk(user_id, reason.clone());
        (replaced, presence.len())
    };
    info!(user_id = %user_id, replaced, afk_users, "set afk status");
    debug!(user_id = %user_id, reason = %reason, "afk reason");

    ctx.send(|m| {
        m.embed(|e| {
            e.description(format!("I set your AFK: {reason}"))
                .colour(style::YELLOW)
        })
    })
    .await?;

    Ok(())
}

fn resolve_reason(message: Option<String>) -> String {
    message
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_REASON.to_owned())
}
