use std::collections::HashMap;

use tokio::{sync::Mutex, time::Instant};

/// Identifier -> instant after which it no longer counts as used.
#[derive(Debug, Default)]
pub struct UsedIdentifiers(pub Mutex<HashMap<String, Instant>>);
