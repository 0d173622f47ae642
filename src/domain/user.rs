use serde::{Deserialize, Serialize};

/// A customer account, looked up after capture to address the confirmation.
///
/// Account management itself lives outside this core; only the fields the
/// checkout flow reads are modeled.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl User {
    pub fn new(id: &str, email: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
        }
    }
}
