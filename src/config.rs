#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub base_url: String,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var("CODEBRIDGE_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "http://127.0.0.1:5000".to_string());
        Self { base_url }
    }
}
