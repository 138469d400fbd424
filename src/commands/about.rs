use poise::serenity_prelude::{Permissions, UserId};

use crate::{style, Context, Error};

const INVITE_SCOPES: &str = "bot+applications.commands";

pub fn invite_url(client_id: UserId, permissions: Permissions) -> String {
    format!(
        "https://discord.com/oauth2/authorize?client_id={}&scope={}&permissions={}",
        client_id.0,
        INVITE_SCOPES,
        permissions.bits()
    )
}

/// Show all available commands
#[poise::command(slash_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let commands: Vec<(String, String)> = ctx
        .framework()
        .options()
        .commands
        .iter()
        .filter(|command| !command.hide_in_help)
        .map(|command| {
            (
                format!("/{}", command.name),
                command.description.clone().unwrap_or_default(),
            )
        })
        .collect();

    ctx.send(|m| {
        m.embed(|e| {
            e.title("Bot Commands")
                .description("Here are all available commands:")
                .colour(style::BLUE)
                .fields(commands.into_iter().map(|(name, desc)| (name, desc, false)))
        })
    })
    .await?;

    Ok(())
}

/// Get bot's invite link
#[poise::command(slash_command)]
pub async fn invite(ctx: Context<'_>) -> Result<(), Error> {
    let url = invite_url(ctx.framework().bot_id, ctx.data().invite_permissions);

    ctx.send(|m| {
        m.embed(|e| {
            e.title("Invite Bot")
                .description(format!("[Click here to invite the bot]({url})"))
                .colour(style::GREEN)
        })
    })
    .await?;

    Ok(())
}
