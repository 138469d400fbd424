use poise::serenity_prelude::{Message, User, UserId};
use tracing::{debug, info};

use crate::presence::PresenceStore;

/// A user as seen in a message, either as its author or as a mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: UserId,
    pub name: String,
}

/// The parts of an inbound message the AFK tracker cares about.
#[derive(Debug, Clone)]
pub struct Observed {
    pub author: Participant,
    pub author_is_bot: bool,
    /// In the order the platform delivered them, duplicates included.
    pub mentions: Vec<Participant>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Someone mentioned a user who is away.
    Mentioned { user: Participant, reason: String },
    /// The author was away and just came back.
    WelcomeBack { user: Participant },
}

impl From<&User> for Participant {
    fn from(user: &User) -> Self {
        Participant {
            id: user.id,
            name: user.name.clone(),
        }
    }
}

impl From<&Message> for Observed {
    fn from(message: &Message) -> Self {
        Observed {
            author: Participant::from(&message.author),
            author_is_bot: message.author.bot,
            mentions: message.mentions.iter().map(Participant::from).collect(),
        }
    }
}

/// Runs a message past the presence store and returns the notices to post.
///
/// Mentions are checked before the author is cleared, and both happen under one
/// lock so no other event can slip in between the check and the clear.
pub fn observe(store: &PresenceStore, message: &Observed) -> Vec<Notice> {
    if message.author_is_bot {
        return Vec::new();
    }

    let mut presence = store.lock();
    let mut notices = Vec::new();

    for mention in &message.mentions {
        if let Some(reason) = presence.reason(mention.id) {
            debug!(user_id = %mention.id, "mentioned user is afk");
            notices.push(Notice::Mentioned {
                user: mention.clone(),
                reason: reason.to_owned(),
            });
        }
    }

    if presence.clear_afk(message.author.id) {
        info!(user_id = %message.author.id, "cleared afk status");
        notices.push(Notice::WelcomeBack {
            user: message.author.clone(),
        });
    }

    notices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64, name: &str) -> Participant {
        Participant {
            id: UserId(id),
            name: name.to_owned(),
        }
    }

    fn message(author: &Participant, mentions: &[&Participant]) -> Observed {
        Observed {
            author: author.clone(),
            author_is_bot: false,
            mentions: mentions.iter().map(|&p| p.clone()).collect(),
        }
    }

    #[test]
    fn afk_author_mentioning_afk_user() {
        let store = PresenceStore::new();
        let u1 = user(1, "one");
        let u2 = user(2, "two");
        store.lock().set_afk(u1.id, "gym");
        store.lock().set_afk(u2.id, "exam");

        let notices = observe(&store, &message(&u1, &[&u2]));

        assert_eq!(
            notices,
            vec![
                Notice::Mentioned {
                    user: u2.clone(),
                    reason: "exam".to_owned()
                },
                Notice::WelcomeBack { user: u1.clone() },
            ]
        );
        assert!(store.lock().is_afk(u2.id));
        assert!(!store.lock().is_afk(u1.id));
    }

    #[test]
    fn self_mention_notifies_then_clears() {
        let store = PresenceStore::new();
        let u = user(7, "seven");
        store.lock().set_afk(u.id, "away");

        let notices = observe(&store, &message(&u, &[&u]));

        assert_eq!(
            notices,
            vec![
                Notice::Mentioned {
                    user: u.clone(),
                    reason: "away".to_owned()
                },
                Notice::WelcomeBack { user: u.clone() },
            ]
        );
        assert!(!store.lock().is_afk(u.id));
    }

    #[test]
    fn bot_messages_are_ignored() {
        let store = PresenceStore::new();
        let bot = user(99, "bot");
        let target = user(2, "two");
        store.lock().set_afk(bot.id, "reason");
        store.lock().set_afk(target.id, "exam");

        let mut msg = message(&bot, &[&target, &bot]);
        msg.author_is_bot = true;

        assert!(observe(&store, &msg).is_empty());
        assert!(store.lock().is_afk(bot.id));
        assert!(store.lock().is_afk(target.id));
    }

    #[test]
    fn duplicate_mentions_notify_per_occurrence() {
        let store = PresenceStore::new();
        let author = user(1, "one");
        let target = user(2, "two");
        store.lock().set_afk(target.id, "exam");

        let notices = observe(&store, &message(&author, &[&target, &target]));

        assert_eq!(notices.len(), 2);
        assert!(notices
            .iter()
            .all(|n| matches!(n, Notice::Mentioned { user, .. } if user.id == target.id)));
    }

    #[test]
    fn mentions_keep_delivery_order() {
        let store = PresenceStore::new();
        let author = user(1, "one");
        let a = user(2, "a");
        let b = user(3, "b");
        let c = user(4, "c");
        store.lock().set_afk(a.id, "ra");
        store.lock().set_afk(c.id, "rc");

        let notices = observe(&store, &message(&author, &[&c, &b, &a]));

        let names: Vec<_> = notices
            .iter()
            .map(|n| match n {
                Notice::Mentioned { user, .. } => user.name.as_str(),
                Notice::WelcomeBack { user } => user.name.as_str(),
            })
            .collect();
        assert_eq!(names, ["c", "a"]);
    }

    #[test]
    fn lunch_scenario() {
        let store = PresenceStore::new();
        let a = user(1, "alice");
        let b = user(2, "bob");

        store.lock().set_afk(a.id, "lunch");
        assert!(store.lock().is_afk(a.id));
        assert_eq!(store.lock().reason(a.id), Some("lunch"));

        let notices = observe(&store, &message(&b, &[&a]));
        assert_eq!(
            notices,
            vec![Notice::Mentioned {
                user: a.clone(),
                reason: "lunch".to_owned()
            }]
        );
        assert!(store.lock().is_afk(a.id));

        let notices = observe(&store, &message(&a, &[]));
        assert_eq!(notices, vec![Notice::WelcomeBack { user: a.clone() }]);
        assert!(!store.lock().is_afk(a.id));

        assert!(observe(&store, &message(&a, &[])).is_empty());
    }

    #[test]
    fn concurrent_messages_welcome_back_once() {
        use std::sync::{Arc, Barrier};

        const THREADS: usize = 8;

        for _ in 0..200 {
            let store = Arc::new(PresenceStore::new());
            let author = user(1, "one");
            store.lock().set_afk(author.id, "away");
            let barrier = Arc::new(Barrier::new(THREADS));

            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    let store = store.clone();
                    let barrier = barrier.clone();
                    let msg = message(&author, &[]);
                    std::thread::spawn(move || {
                        barrier.wait();
                        observe(&store, &msg)
                    })
                })
                .collect();

            let welcomes: usize = handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .map(|notices| {
                    notices
                        .iter()
                        .filter(|n| matches!(n, Notice::WelcomeBack { .. }))
                        .count()
                })
                .sum();

            assert_eq!(welcomes, 1);
            assert!(!store.lock().is_afk(author.id));
        }
    }
}
