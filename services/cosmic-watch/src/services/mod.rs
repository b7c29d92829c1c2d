pub mod asteroid_service;
pub mod state;

pub use asteroid_service::AsteroidService;
pub use state::AppState;
