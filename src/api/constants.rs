//! API Constants for the identity platform and Microsoft Graph

/// Identity platform authority for the public cloud
pub const LOGIN_BASE_URL: &str = "https://login.microsoftonline.com";

/// Graph version root every relative operation URL is resolved against
pub const GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Scope requested by the client-credentials grant
pub const GRAPH_DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Batch endpoint for multi-operation requests
pub const BATCH_ENDPOINT: &str = "$batch";

/// Hard ceiling on requests per $batch envelope
pub const MAX_BATCH_SIZE: usize = 20;

/// Page-size hint used when listing users
pub const USER_PAGE_SIZE: u32 = 999;

/// Graph collections the tool operates on
pub mod collections {
    pub const USERS: &str = "users";
    pub const SUBSCRIPTIONS: &str = "subscriptions";
}

/// Standard headers for Graph requests
pub mod headers {
    /// Content type for JSON requests
    pub const CONTENT_TYPE_JSON: &str = "application/json";

    /// Content type for the token request
    pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";
}

/// HTTP methods for batch operations
pub mod methods {
    pub const POST: &str = "POST";
    pub const DELETE: &str = "DELETE";
}

/// Build the v2.0 token endpoint URL for a tenant
pub fn token_endpoint(login_base: &str, tenant_id: &str) -> String {
    format!("{}/{}/oauth2/v2.0/token", login_base, tenant_id)
}

/// Build full collection endpoint URL
pub fn collection_endpoint(graph_base: &str, collection: &str) -> String {
    format!("{}/{}", graph_base, collection)
}

/// Build batch endpoint URL
pub fn batch_endpoint(graph_base: &str) -> String {
    format!("{}/{}", graph_base, BATCH_ENDPOINT)
}
