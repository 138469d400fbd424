use poise::serenity_prelude::{self as serenity, Channel, ChannelId, ChannelType, Guild, Permissions};
use tracing::{debug, info, warn};

use crate::{
    notifier::Notifier,
    observer::{self, Observed},
    style, Data, Error,
};

pub async fn handle(
    ctx: &serenity::Context,
    event: &poise::Event<'_>,
    framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        poise::Event::Message { new_message } => {
            let notices = observer::observe(&data.presence, &Observed::from(new_message));
            if !notices.is_empty() {
                let total = notices.len();
                let delivered = Notifier::new(notices)
                    .notify(&ctx.http, new_message)
                    .await;
                debug!(delivered, total, "posted afk notices");
            }
        }
        poise::Event::GuildCreate { guild, is_new } if *is_new => {
            info!(guild_id = %guild.id, name = %guild.name, "joined guild");
            welcome(ctx, guild, framework.bot_id).await?;
        }
        _ => {}
    }

    Ok(())
}

async fn welcome(
    ctx: &serenity::Context,
    guild: &Guild,
    bot_id: serenity::UserId,
) -> Result<(), Error> {
    let candidates = guild.channels.values().filter_map(|channel| match channel {
        Channel::Guild(channel) if channel.kind == ChannelType::Text => {
            match channel.permissions_for_user(&ctx.cache, bot_id) {
                Ok(permissions) if permissions.contains(Permissions::SEND_MESSAGES) => {
                    Some((channel.position, channel.id))
                }
                Ok(_) => None,
                Err(why) => {
                    debug!(channel_id = %channel.id, "skipping channel: {why}");
                    None
                }
            }
        }
        _ => None,
    });

    let Some(channel) = first_channel(candidates) else {
        warn!(guild_id = %guild.id, "no channel to post welcome message in");
        return Ok(());
    };

    channel
        .send_message(&ctx.http, |m| {
            m.embed(|e| {
                e.title("Thanks for adding me!")
                    .description("Use `/help` to see my commands.")
                    .colour(style::GREEN)
            })
        })
        .await?;

    Ok(())
}

/// Picks the top-most channel in the sidebar from `(position, id)` pairs.
fn first_channel(candidates: impl IntoIterator<Item = (i64, ChannelId)>) -> Option<ChannelId> {
    candidates
        .into_iter()
        .min_by_key(|&(position, id)| (position, id))
        .map(|(_, id)| id)
}
