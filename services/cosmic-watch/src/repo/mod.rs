pub mod alert_repo;
pub mod watchlist_repo;

pub use alert_repo::AlertRepo;
pub use watchlist_repo::WatchlistRepo;
