use poise::serenity_prelude::User;

use crate::{style, Context, Error};

/// View a user's avatar
#[poise::command(slash_command)]
pub async fn avatar(
    ctx: Context<'_>,
    #[description = "Whose avatar to show, defaults to you"] user: Option<User>,
) -> Result<(), Error> {
    let user = user.as_ref().unwrap_or_else(|| ctx.author());
    let url = user
        .avatar_url()
        .unwrap_or_else(|| user.default_avatar_url());

    ctx.send(|m| {
        m.embed(|e| {
            e.title(format!("{}'s Avatar", user.name))
                .image(&url)
                .colour(style::BLUE)
        })
    })
    .await?;

    Ok(())
}
