use std::time::Duration;

use crate::{style, Context, Error};

/// Uptime split into whole days, hours, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uptime {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl From<Duration> for Uptime {
    fn from(elapsed: Duration) -> Self {
        let total = elapsed.as_secs();
        Uptime {
            days: total / 86_400,
            hours: total % 86_400 / 3_600,
            minutes: total % 3_600 / 60,
            seconds: total % 60,
        }
    }
}

impl Uptime {
    pub fn short(&self) -> String {
        format!(
            "{}d {}h {}m {}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }

    pub fn long(&self) -> String {
        format!(
            "{} days, {} hours, {} minutes, {} seconds",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

fn millis(latency: Duration) -> String {
    format!("{}ms", latency.as_millis())
}

/// Show bot statistics
#[poise::command(slash_command)]
pub async fn stats(ctx: Context<'_>) -> Result<(), Error> {
    let cache = &ctx.serenity_context().cache;
    let me = cache.current_user();
    let guilds = cache.guild_count();
    let users = cache.user_count();
    let latency = ctx.ping().await;
    let uptime = Uptime::from(ctx.data().started.elapsed());

    ctx.send(|m| {
        m.embed(|e| {
            e.title("Bot Statistics")
                .colour(style::BLUE)
                .field("Bot Name", &me.name, true)
                .field("Bot ID", me.id, true)
                .field("Servers", guilds, true)
                .field("Users", users, true)
                .field("Ping", millis(latency), true)
                .field("Uptime", uptime.short(), true);
            if let Some(avatar) = me.avatar_url() {
                e.thumbnail(avatar);
            }
            e
        })
    })
    .await?;

    Ok(())
}

/// Check bot's latency
#[poise::command(slash_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let latency = ctx.ping().await;

    ctx.send(|m| {
        m.embed(|e| {
            e.title("🏓 Pong!")
                .colour(style::GREEN)
                .field("Latency", millis(latency), false)
        })
    })
    .await?;

    Ok(())
}

/// Check bot's uptime
#[poise::command(slash_command)]
pub async fn uptime(ctx: Context<'_>) -> Result<(), Error> {
    let uptime = Uptime::from(ctx.data().started.elapsed());

    ctx.send(|m| {
        m.embed(|e| {
            e.title("Bot's Uptime")
                .colour(style::GREEN)
                .field("Uptime", uptime.long(), true)
        })
    })
    .await?;

    Ok(())
}
