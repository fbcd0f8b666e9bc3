pub mod catalogue;
pub mod client;
pub mod conversions;
pub mod envelope;

pub use catalogue::{ErrorCode, decode_error};
pub use client::{ApiClient, ApiClientConfig, ApiClientFactory, DEFAULT_TIMEOUT};
pub use conversions::{camel_to_snake, snake_to_camel, transform_keys};
pub use envelope::{
    ApiResult, Failure, bad_request, handle_error, handle_response, with_error, with_success,
};
