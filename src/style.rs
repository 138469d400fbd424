use poise::serenity_prelude::Colour;

pub const BLUE: Colour = Colour(0x3498db);
pub const GREEN: Colour = Colour(0x2ecc71);
pub const YELLOW: Colour = Colour(0xfee75c);
