pub mod session_dto;

pub use chirpy_shared::ErrorResponse;
pub use session_dto::*;
