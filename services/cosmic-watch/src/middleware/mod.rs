pub mod rate_limit;
pub mod request_log;

pub use rate_limit::rate_limit_middleware;
pub use request_log::request_logging_middleware;
