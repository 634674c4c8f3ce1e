pub mod connection;
pub mod matches;
pub mod models;
pub mod players;
pub mod setup;
pub mod transaction;

pub use connection::{create_pool, get_connection, DbConn, DbPool};
pub use models::*;
pub use transaction::with_immediate_tx;
