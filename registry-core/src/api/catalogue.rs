//! Fixed catalogue of user-facing API error messages.

use std::fmt;

/// Normalized error code names understood by the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    BadRequest,
    NotFound,
    InternalServerError,
    Unknown,
}

impl ErrorCode {
    /// Map a numeric HTTP status onto a catalogue code.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorCode::BadRequest,
            404 => ErrorCode::NotFound,
            500 => ErrorCode::InternalServerError,
            _ => ErrorCode::Unknown,
        }
    }

    /// Look up a code by its catalogue name; unknown names resolve to [`ErrorCode::Unknown`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "BAD_REQUEST" => ErrorCode::BadRequest,
            "NOT_FOUND" => ErrorCode::NotFound,
            "INTERNAL_SERVER_ERROR" => ErrorCode::InternalServerError,
            _ => ErrorCode::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
            ErrorCode::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Human readable message shown to the user. Never empty.
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "Your request was not formatted properly.",
            ErrorCode::NotFound => "The resource you're looking for was not found on the server.",
            ErrorCode::InternalServerError => {
                "Something went wrong internally. Please contact the platform administrator."
            }
            ErrorCode::Unknown => "Something wrong happened. Please, try again later.",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve the catalogue message for a numeric HTTP status.
pub fn decode_error(status: u16) -> &'static str {
    ErrorCode::from_status(status).message()
}
