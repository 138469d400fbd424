use std::{fmt::Display, future::Future};

use poise::serenity_prelude::{Colour, CreateMessage, Http, Message, UserId};
use tracing::warn;

use crate::{observer::Notice, style};

/// Where a notice is posted relative to the message that triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Reply,
    Channel,
}

#[derive(Debug)]
pub struct Notifier {
    notices: Vec<Notice>,
}

impl Notifier {
    pub fn new(notices: Vec<Notice>) -> Notifier {
        Notifier { notices }
    }

    /// Posts every notice and returns how many went through.
    ///
    /// The presence change behind these notices is already committed, so a
    /// failed send is logged and the rest are still attempted.
    pub async fn notify(&self, http: &Http, message: &Message) -> usize {
        deliver(&self.notices, move |notice| async move {
            let channel = message.channel_id;
            let sent = match target(notice) {
                Target::Reply => {
                    channel
                        .send_message(http, |f| notice_msg(f, notice).reference_message(message))
                        .await
                }
                Target::Channel => channel.send_message(http, |f| notice_msg(f, notice)).await,
            };
            sent.map(|_| ())
        })
        .await
    }
}

async fn deliver<'a, F, Fut, E>(notices: &'a [Notice], mut send: F) -> usize
where
    F: FnMut(&'a Notice) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Display,
{
    let mut delivered = 0;
    for notice in notices {
        match send(notice).await {
            Ok(()) => delivered += 1,
            Err(why) => {
                warn!(user_id = %notice_user(notice), "failed to send afk notice: {why}");
            }
        }
    }
    delivered
}

pub fn target(notice: &Notice) -> Target {
    match notice {
        Notice::Mentioned { .. } => Target::Reply,
        Notice::WelcomeBack { .. } => Target::Channel,
    }
}

pub fn colour(notice: &Notice) -> Colour {
    match notice {
        Notice::Mentioned { .. } => style::YELLOW,
        Notice::WelcomeBack { .. } => style::GREEN,
    }
}

pub fn describe(notice: &Notice) -> String {
    match notice {
        Notice::Mentioned { user, reason } => format!("{} is AFK: {}", user.name, reason),
        Notice::WelcomeBack { user } => {
            format!("Welcome back {}, I removed your AFK status!", user.name)
        }
    }
}

fn notice_user(notice: &Notice) -> UserId {
    match notice {
        Notice::Mentioned { user, .. } | Notice::WelcomeBack { user } => user.id,
    }
}

fn notice_msg<'a, 'b>(f: &'a mut CreateMessage<'b>, notice: &Notice) -> &'a mut CreateMessage<'b> {
    f.embed(|e| e.description(describe(notice)).colour(colour(notice)))
}
