pub mod api_error;
pub mod neo_error;

pub use api_error::{ApiError, ErrorDetail, ErrorResponse};
pub use neo_error::NeoError;
