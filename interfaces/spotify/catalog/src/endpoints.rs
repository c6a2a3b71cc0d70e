pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com";

/// Base URLs of the accounts service and the Web API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEndpoints {
    pub accounts_url: String,
    pub api_url: String,
}

impl CatalogEndpoints {
    pub fn new(accounts_url: &str, api_url: &str) -> Self {
        Self {
            accounts_url: accounts_url.trim_end_matches('/').to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn token_url(&self) -> String {
        format!("{}/api/token", self.accounts_url)
    }

    /// `path` is appended to `{api_url}/v1/`.
    pub fn api(&self, path: &str) -> String {
        format!("{}/v1/{}", self.api_url, path.trim_start_matches('/'))
    }
}

impl Default for CatalogEndpoints {
    fn default() -> Self {
        Self::new(DEFAULT_ACCOUNTS_URL, DEFAULT_API_URL)
    }
}
