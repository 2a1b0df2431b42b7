pub mod game;
pub mod recommendation;
pub mod user;

pub use game::{Characteristic, Data, Game, GameId, Range};
pub use recommendation::Recommendation;
pub use user::{Rating, User, UserId, MAX_RATING, UNRATED};
