mod commands;
mod config;
mod events;
mod notifier;
mod observer;
mod presence;
mod style;

use std::{process::ExitCode, time::Instant};

use config::Config;
use poise::{
    serenity_prelude::{GatewayIntents, Permissions},
    Framework, FrameworkError, FrameworkOptions,
};
use presence::PresenceStore;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

/// State shared by every command and event handler, built once the bot is ready.
pub struct Data {
    presence: PresenceStore,
    started: Instant,
    invite_permissions: Permissions,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "afk_bot=info".into()),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(why) => {
            error!("Client error: {why}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Error> {
    let config = Config::from_env()?;
    let invite_permissions = config.invite_permissions;

    let framework = Framework::builder()
        .token(config.token)
        .intents(
            GatewayIntents::GUILDS
                | GatewayIntents::GUILD_MEMBERS
                | GatewayIntents::GUILD_MESSAGES
                | GatewayIntents::MESSAGE_CONTENT,
        )
        .options(FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(events::handle(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                let registered = &framework.options().commands;
                poise::builtins::register_globally(ctx, registered).await?;
                info!(
                    user = %ready.user.name,
                    commands = registered.len(),
                    invite = %commands::invite_url(ready.user.id, invite_permissions),
                    "logged in"
                );

                Ok(Data {
                    presence: PresenceStore::new(),
                    started: Instant::now(),
                    invite_permissions,
                })
            })
        })
        .build()
        .await?;

    {
        let framework = framework.clone();
        tokio::spawn(async move {
            tokio::signal::ctrl_c()
                .await
                .expect("Could not register ctrl+c handler");
            info!("shutting down");
            framework.shard_manager().lock().await.shutdown_all().await;
        });
    }

    framework.start_autosharded().await?;
    Ok(())
}

async fn on_error(error: FrameworkError<'_, Data, Error>) {
    match error {
        FrameworkError::Command { error, ctx } => {
            error!(command = %ctx.command().name, "command failed: {error}");
        }
        FrameworkError::EventHandler { error, .. } => {
            error!("event handler failed: {error}");
        }
        error => {
            if let Err(why) = poise::builtins::on_error(error).await {
                error!("error while handling error: {why}");
            }
        }
    }
}
