use serde::{Deserialize, Serialize};

/// A namespace owning signing keys, API keys and published artifacts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Authority {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub policy_url: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub keys: Vec<Key>,
    #[serde(default)]
    pub api_keys: Vec<ApiKey>,
}

/// A GPG signing key registered under an authority.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Key {
    #[serde(default)]
    pub id: String,
    pub key_id: String,
    #[serde(default)]
    pub ascii_armor: String,
    #[serde(default)]
    pub trust_signature: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAuthority {
    pub name: String,
    pub policy_url: String,
    pub is_public: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewKey {
    pub key_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ascii_armor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_signature: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewApiKey {
    pub name: String,
}
