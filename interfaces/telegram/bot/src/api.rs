use std::fmt;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Bot credentials plus the API host.
#[derive(Clone, PartialEq, Eq)]
pub struct BotApi {
    base_url: String,
    token: String,
}

impl BotApi {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    pub fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }
}

impl fmt::Debug for BotApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotApi")
            .field("base_url", &self.base_url)
            .field("token", &"***")
            .finish()
    }
}
