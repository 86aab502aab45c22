#[derive(Clone)]
pub struct AppConfig {
    /// Base URL of the hosted collection store.
    pub store_url: String,
    pub app_name: String,
    pub auth: Option<AuthConfig>,
    pub upload: Option<UploadConfig>,
}

#[derive(Clone)]
pub struct AuthConfig {
    /// Base64-encoded HS256 key for the admin session cookie.
    pub key: String,
    pub token_ttl: time::Duration,
    pub cookie_name: String,
    pub cookie_secure: bool,
}

#[derive(Clone)]
pub struct UploadConfig {
    pub endpoint: String,
    pub preset: String,
}

#[cfg(test)]
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_url: "http://store.invalid".to_string(),
            app_name: "Innboard".to_string(),
            auth: None,
            upload: None,
        }
    }
}
