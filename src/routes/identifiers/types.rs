use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct UsedIdentifier {
    #[serde(default)]
    pub identifier: Option<String>,
    pub ttl: u64,
}

#[derive(Serialize)]
pub struct MarkedIdentifier {
    pub identifier: String,
    pub ttl: u64,
}

#[derive(Serialize)]
pub struct IdentifierStatus {
    pub identifier: String,
    pub used: bool,
}
