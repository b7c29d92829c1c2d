pub mod alert_handler;
pub mod asteroid_handler;
pub mod health;
pub mod watchlist_handler;

pub use alert_handler::*;
pub use asteroid_handler::*;
pub use health::*;
pub use watchlist_handler::*;
