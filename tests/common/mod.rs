#![allow(dead_code)]

use std::{
    collections::{BTreeMap, HashMap},
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::SecretString;
use serde_json::json;
use tokio::sync::RwLock;

use ai_tutor_server::{
    app_state::AppState,
    auth::Claims,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{FailedTopic, Question, QuestionBatch, TopicResult, OPTION_LABELS},
    repositories::QuestionRepository,
    services::completion_service::{CompletionRequest, CompletionService},
};

pub const TEST_JWT_SECRET: &str = "integration_test_jwt_secret_value";

/// Offline configuration: every upstream points at a closed local port.
pub fn test_config() -> Config {
    Config {
        mongo_conn_string: "mongodb://127.0.0.1:9".to_string(),
        mongo_db_name: "ai-tutor-test".to_string(),
        questions_collection: "questions".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8000,
        jwt_secret: SecretString::from(TEST_JWT_SECRET.to_string()),
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

/// An access token as the account service would sign it, valid for an hour.
pub fn access_token(subject: &str, email: &str) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: subject.to_string(),
        email: email.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(1)).timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("token should be signed")
}

pub fn topic_result<'a>(batch: &'a QuestionBatch, topic: &str) -> Option<&'a TopicResult> {
    batch.topics.iter().find(|t| t.topic == topic)
}

pub fn failed_topic<'a>(batch: &'a QuestionBatch, topic: &str) -> Option<&'a FailedTopic> {
    batch.failed_topics.iter().find(|t| t.topic == topic)
}

pub fn test_options() -> BTreeMap<String, String> {
    OPTION_LABELS
        .iter()
        .map(|label| (label.to_string(), format!("Option {}", label)))
        .collect()
}

pub fn make_question(topic: &str, n: usize) -> Question {
    Question::new(
        topic,
        &format!("Stored question {} about {}?", n, topic),
        test_options(),
        OPTION_LABELS[n % OPTION_LABELS.len()],
    )
}

/// A model reply carrying `count` valid questions, wrapped in prose.
pub fn generated_reply(count: usize) -> String {
    let items: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            json!({
                "question": format!("Generated question {}?", i + 1),
                "options": {"A": "first", "B": "second", "C": "third", "D": "fourth"},
                "correct": OPTION_LABELS[i % OPTION_LABELS.len()]
            })
        })
        .collect();
    format!("Sure! Here you go:\n{}\nGood luck.", json!(items))
}

pub struct InMemoryQuestionRepository {
    questions: Arc<RwLock<Vec<Question>>>,
    reject_writes: AtomicBool,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self {
            questions: Arc::new(RwLock::new(Vec::new())),
            reject_writes: AtomicBool::new(false),
        }
    }

    pub async fn seed(&self, topic: &str, count: usize) {
        let mut questions = self.questions.write().await;
        questions.extend((0..count).map(|n| make_question(topic, n)));
    }

    pub async fn count_for(&self, topic: &str) -> usize {
        self.questions
            .read()
            .await
            .iter()
            .filter(|q| q.topic == topic)
            .count()
    }

    pub fn reject_writes(&self) {
        self.reject_writes.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn find_by_topic(&self, topic: &str, limit: i64) -> AppResult<Vec<Question>> {
        let questions = self.questions.read().await;
        Ok(questions
            .iter()
            .filter(|q| q.topic == topic)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn create(&self, question: Question) -> AppResult<Question> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError("store is read-only".to_string()));
        }

        let mut questions = self.questions.write().await;
        if questions.iter().any(|q| q.id == question.id) {
            return Err(AppError::DatabaseError(format!(
                "Question with id '{}' already exists",
                question.id
            )));
        }
        questions.push(question.clone());
        Ok(question)
    }
}

#[derive(Clone)]
pub enum Script {
    Reply(String),
    Fail(String),
}

/// Answers generation prompts from a per-topic script and counts the calls.
pub struct ScriptedCompletionService {
    scripts: HashMap<String, Script>,
    fallback: Option<Script>,
    calls: AtomicUsize,
    calls_by_topic: RwLock<HashMap<String, usize>>,
}

impl ScriptedCompletionService {
    pub fn new() -> Self {
        Self {
            scripts: HashMap::new(),
            fallback: None,
            calls: AtomicUsize::new(0),
            calls_by_topic: RwLock::new(HashMap::new()),
        }
    }

    pub fn on_topic(mut self, topic: &str, script: Script) -> Self {
        self.scripts.insert(topic.to_string(), script);
        self
    }

    pub fn otherwise(mut self, script: Script) -> Self {
        self.fallback = Some(script);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn calls_for(&self, topic: &str) -> usize {
        self.calls_by_topic
            .read()
            .await
            .get(topic)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletionService {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let matched = self
            .scripts
            .iter()
            .find(|(topic, _)| request.prompt.contains(&format!("topic \"{}\"", topic)));

        let script = match matched {
            Some((topic, script)) => {
                *self
                    .calls_by_topic
                    .write()
                    .await
                    .entry(topic.clone())
                    .or_insert(0) += 1;
                script.clone()
            }
            None => self
                .fallback
                .clone()
                .unwrap_or_else(|| Script::Fail("no scripted reply".to_string())),
        };

        match script {
            Script::Reply(text) => Ok(text),
            Script::Fail(message) => Err(AppError::ProviderError(message)),
        }
    }
}

pub fn app_state(
    repository: Arc<InMemoryQuestionRepository>,
    completion: Arc<ScriptedCompletionService>,
) -> AppState {
    AppState::from_parts(test_config(), repository, completion, None)
        .expect("state should build offline")
}
