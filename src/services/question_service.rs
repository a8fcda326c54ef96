use std::{collections::HashSet, sync::Arc};

use futures::future::join_all;

use crate::{
    constants::prompts::{quiz_generation_prompt, QUIZ_GENERATOR_SYSTEM_PROMPT},
    errors::{AppError, AppResult, QuestionGenerationError, MISSING_TOPICS_MESSAGE},
    models::domain::{FailedTopic, Question, QuestionBatch, QuestionSource, TopicResult},
    repositories::QuestionRepository,
    services::{
        completion_service::{CompletionRequest, CompletionService},
        response_parser::{generated_question_schema, parse_question_array, validate_questions},
    },
};

/// How many stored questions a cache probe reads back.
pub const CACHE_PROBE_LIMIT: i64 = 10;
/// Fewest questions a topic may be served with, cached or generated.
pub const MIN_QUESTIONS_PER_TOPIC: usize = 5;
/// Upper bound requested from the model.
pub const MAX_QUESTIONS_PER_TOPIC: usize = 10;

/// Serves quiz questions per topic, preferring stored questions and falling
/// back to the generative model.
pub struct QuestionService {
    repository: Arc<dyn QuestionRepository>,
    completion: Arc<dyn CompletionService>,
    element_schema: String,
}

impl QuestionService {
    pub fn new(
        repository: Arc<dyn QuestionRepository>,
        completion: Arc<dyn CompletionService>,
    ) -> Self {
        Self {
            repository,
            completion,
            element_schema: generated_question_schema(),
        }
    }

    /// Resolves every topic of the batch concurrently.
    ///
    /// Per-topic failures come back in `failed_topics`. The call itself fails
    /// only for malformed input or when no topic succeeded.
    pub async fn provide_questions(&self, topics: &[String]) -> AppResult<QuestionBatch> {
        let topics = normalize_topics(topics)?;

        log::info!("Providing questions for {} topic(s)", topics.len());

        let outcomes = join_all(topics.iter().map(|topic| self.provide_topic(topic))).await;

        let mut batch = QuestionBatch::default();
        for outcome in outcomes {
            match outcome {
                Ok(result) => batch.topics.push(result),
                Err(failed) => batch.failed_topics.push(failed),
            }
        }

        if batch.topics.is_empty() {
            log::error!("Question generation failed for all {} topic(s)", topics.len());
            return Err(AppError::AllTopicsFailed);
        }

        Ok(batch)
    }

    pub async fn cached_questions(&self, topic: &str, limit: i64) -> AppResult<Vec<Question>> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(AppError::ValidationError("Topic is required".to_string()));
        }
        self.repository.find_by_topic(topic, limit).await
    }

    async fn provide_topic(&self, topic: &str) -> Result<TopicResult, FailedTopic> {
        self.resolve_topic(topic).await.map_err(|e| {
            log::warn!("Error generating questions for \"{}\": {}", topic, e);
            FailedTopic {
                topic: topic.to_string(),
                error: e.to_string(),
            }
        })
    }

    async fn resolve_topic(&self, topic: &str) -> Result<TopicResult, QuestionGenerationError> {
        let cached = self
            .repository
            .find_by_topic(topic, CACHE_PROBE_LIMIT)
            .await?;

        if cached.len() >= MIN_QUESTIONS_PER_TOPIC {
            log::info!("Using {} cached questions for topic: {}", cached.len(), topic);
            return Ok(TopicResult {
                topic: topic.to_string(),
                questions: cached,
                source: QuestionSource::Cached,
            });
        }

        let questions = self.generate_questions(topic).await?;
        log::info!("Generated and stored {} questions for topic: {}", questions.len(), topic);

        Ok(TopicResult {
            topic: topic.to_string(),
            questions,
            source: QuestionSource::Generated,
        })
    }

    async fn generate_questions(
        &self,
        topic: &str,
    ) -> Result<Vec<Question>, QuestionGenerationError> {
        let prompt = quiz_generation_prompt(
            topic,
            MIN_QUESTIONS_PER_TOPIC,
            MAX_QUESTIONS_PER_TOPIC,
            &self.element_schema,
        );

        let raw = self
            .completion
            .complete(CompletionRequest::json(QUIZ_GENERATOR_SYSTEM_PROMPT, prompt))
            .await?;

        let items = parse_question_array(&raw)?;
        let drafts = validate_questions(items, MIN_QUESTIONS_PER_TOPIC)?;

        let saves = drafts.into_iter().map(|draft| {
            let question = Question::new(topic, &draft.question, draft.options, &draft.correct);
            self.repository.create(question)
        });

        join_all(saves)
            .await
            .into_iter()
            .collect::<AppResult<Vec<Question>>>()
            .map_err(|e| QuestionGenerationError::Persistence(e.to_string()))
    }
}

/// Trims topics and drops repeats, keeping first occurrences in order.
fn normalize_topics(topics: &[String]) -> AppResult<Vec<String>> {
    if topics.is_empty() || topics.iter().any(|t| t.trim().is_empty()) {
        return Err(AppError::ValidationError(MISSING_TOPICS_MESSAGE.to_string()));
    }

    let mut seen = HashSet::new();
    Ok(topics
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| seen.insert(t.clone()))
        .collect())
}
