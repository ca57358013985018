use serde::{Deserialize, Serialize};

/// A stored user record, as returned to callers.
///
/// The password supplied at creation is not part of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Validated parameters for creating a user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Name changes applied by an update. Email and password are not updatable.
#[derive(Debug, Clone)]
pub struct UserPatch {
    pub first_name: String,
    pub last_name: String,
}

fn default_page() -> i32 {
    1
}

fn default_limit() -> i32 {
    50
}

/// Listing parameters. They are accepted and logged but not applied: a list
/// always returns every stored user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserListQuery {
    #[serde(default = "default_page")]
    pub page: i32,
    #[serde(default = "default_limit")]
    pub limit: i32,
    pub sort: Option<String>,
}

impl Default for UserListQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            sort: None,
        }
    }
}
