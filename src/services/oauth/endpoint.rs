/// Authorization and token URLs of the identity service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthEndpoint {
    pub auth_url: String,
    pub token_url: String,
}

impl OAuthEndpoint {
    /// Build from an endpoint given with or without scheme.
    ///
    /// `auth.example.com` and `https://auth.example.com/` both yield
    /// `https://auth.example.com/oauth/{authorize,token}`.
    pub fn from_endpoint(endpoint: &str) -> Self {
        let endpoint = endpoint.trim().trim_end_matches('/');
        let root = if endpoint.contains("://") {
            endpoint.to_string()
        } else {
            format!("https://{endpoint}")
        };

        Self {
            auth_url: format!("{root}/oauth/authorize"),
            token_url: format!("{root}/oauth/token"),
        }
    }
}
