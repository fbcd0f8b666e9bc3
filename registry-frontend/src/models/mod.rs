pub mod artifact;
pub mod authority;
pub mod forms;
pub mod session;

pub use artifact::{Artifact, ArtifactKind, ArtifactSlug, NewArtifact};
pub use authority::{ApiKey, Authority, Key, NewApiKey, NewAuthority, NewKey};
pub use forms::{ApiKeyForm, AuthorityForm, KeyForm};
pub use session::{Session, SessionDetails};
