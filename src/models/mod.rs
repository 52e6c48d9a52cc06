//! Core scoring domain: identifiers, players, games, sets, and matches.

mod events;
mod game;
mod ids;
mod player;
mod point;
mod set;
mod tennis_match;

pub use events::*;
pub use game::*;
pub use ids::*;
pub use player::*;
pub use point::*;
pub use set::*;
pub use tennis_match::*;
