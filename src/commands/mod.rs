mod about;
mod afk;
mod avatar;
mod stats;

pub use about::{help, invite, invite_url};
pub use afk::afk;
pub use avatar::avatar;
pub use stats::{ping, stats, uptime};

use crate::{Data, Error};

/// Every slash command the bot registers, in the order `/help` lists them.
pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![help(), stats(), ping(), uptime(), invite(), avatar(), afk()]
}
