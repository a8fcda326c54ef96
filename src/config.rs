use std::env;
use secrecy::SecretString;

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub questions_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub llm_api_base: String,
    pub llm_api_key: SecretString,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub youtube_api_key: Option<SecretString>,
    pub youtube_api_base: String,
    pub wikipedia_api_base: String,
    pub cors_allowed_origins: Vec<String>,
    pub production: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "ai-tutor".to_string()),
            questions_collection: env::var("QUESTIONS_COLLECTION")
                .unwrap_or_else(|_| "questions".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            ),
            llm_api_base: env::var("LLM_API_BASE")
                .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string()),
            llm_api_key: SecretString::from(env::var("LLM_API_KEY").unwrap_or_default()),
            llm_model: env::var("LLM_MODEL")
                .unwrap_or_else(|_| "llama-3.3-70b-versatile".to_string()),
            llm_temperature: env::var("LLM_TEMPERATURE")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(0.3),
            youtube_api_key: env::var("YOUTUBE_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty())
                .map(SecretString::from),
            youtube_api_base: env::var("YOUTUBE_API_BASE")
                .unwrap_or_else(|_| "https://www.googleapis.com/youtube/v3".to_string()),
            wikipedia_api_base: env::var("WIKIPEDIA_API_BASE")
                .unwrap_or_else(|_| "https://en.wikipedia.org/w/api.php".to_string()),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or_else(|_| vec!["http://localhost:5173".to_string()]),
            production: env::var("APP_ENV")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
        }
    }

    /// Validate that production-critical configuration is set.
    /// Returns a description of the first problem found.
    pub fn validate_for_production(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            return Err(
                "JWT_SECRET is using default value! Set JWT_SECRET environment variable to a secure random string."
                    .to_string(),
            );
        }

        if jwt_secret.len() < 32 {
            return Err(format!(
                "JWT_SECRET is too short ({}). Must be at least 32 characters for security.",
                jwt_secret.len()
            ));
        }

        if self.llm_api_key.expose_secret().is_empty() {
            return Err("LLM_API_KEY is not set! Quiz generation and tutor chat need it.".to_string());
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "ai-tutor-test".to_string(),
            questions_collection: "questions".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8000,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            llm_api_base: "http://127.0.0.1:9/v1".to_string(),
            llm_api_key: SecretString::from("test-llm-key".to_string()),
            llm_model: "test-model".to_string(),
            llm_temperature: 0.0,
            youtube_api_key: None,
            youtube_api_base: "http://127.0.0.1:9/youtube/v3".to_string(),
            wikipedia_api_base: "http://127.0.0.1:9/w/api.php".to_string(),
            cors_allowed_origins: vec!["http://localhost:5173".to_string()],
            production: false,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/').to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}
