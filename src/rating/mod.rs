pub mod glicko;
pub mod types;

pub use glicko::update_rating;
pub use types::{GlickoRating, Outcome, PlayerId};
