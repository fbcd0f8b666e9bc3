pub mod artifact;
pub mod time;
pub mod validation;
pub mod version;

pub use artifact::compute_artifact_url;
pub use time::time_since;
pub use validation::{field_errors, FieldError};
pub use version::{compare_versions, sort_versions_desc};
