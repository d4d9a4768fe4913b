//! Synthetic test-user payloads and the batch operations built from records

use serde::{Deserialize, Serialize};

use crate::api::constants::collections;
use crate::api::{Operation, ResourceRecord};

/// Password given to every generated account; users must change it at first sign-in
pub const PLACEHOLDER_PASSWORD: &str = "P@ssw0rd1234!";

/// Principal-name prefix shared by all generated accounts
pub const TEST_USER_PREFIX: &str = "testuser";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordProfile {
    pub force_change_password_next_sign_in: bool,
    pub password: String,
}

/// Body of a `POST /users` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub account_enabled: bool,
    pub display_name: String,
    pub mail_nickname: String,
    pub user_principal_name: String,
    pub password_profile: PasswordProfile,
}

impl NewUser {
    /// The `index`-th test user in `domain`
    pub fn numbered(index: usize, domain: &str) -> Self {
        let nickname = format!("{}{:05}", TEST_USER_PREFIX, index);

        Self {
            account_enabled: true,
            display_name: format!("Test User {}", index),
            user_principal_name: format!("{}@{}", nickname, domain),
            mail_nickname: nickname,
            password_profile: PasswordProfile {
                force_change_password_next_sign_in: true,
                password: PLACEHOLDER_PASSWORD.to_string(),
            },
        }
    }
}

/// Generate `count` deterministic test users for `domain`
pub fn generate_users(domain: &str, count: usize) -> Vec<NewUser> {
    (0..count).map(|i| NewUser::numbered(i, domain)).collect()
}

/// One `POST /users` operation per user
pub fn create_operations(users: &[NewUser]) -> anyhow::Result<Vec<Operation>> {
    users
        .iter()
        .map(|user| {
            let body = serde_json::to_value(user)?;
            Ok(Operation::create(collections::USERS, body))
        })
        .collect()
}

/// One `DELETE /{collection}/{id}` operation per record
pub fn delete_operations(collection: &str, records: &[ResourceRecord]) -> Vec<Operation> {
    records
        .iter()
        .map(|record| Operation::delete(collection, &record.id))
        .collect()
}
