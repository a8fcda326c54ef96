use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppResult, models::domain::Question};

/// Store of generated questions, queried by topic.
///
/// Implementations must tolerate concurrent reads and writes; the provider
/// fans out across topics without any locking of its own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn find_by_topic(&self, topic: &str, limit: i64) -> AppResult<Vec<Question>>;
    async fn create(&self, question: Question) -> AppResult<Question>;
}

pub struct MongoQuestionRepository {
    collection: Collection<Question>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for questions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let topic_index = IndexModel::builder()
            .keys(doc! { "topic": 1 })
            .options(IndexOptions::builder().name("topic".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(topic_index).await?;

        log::info!("Successfully created indexes for questions collection");
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn find_by_topic(&self, topic: &str, limit: i64) -> AppResult<Vec<Question>> {
        let find_options = FindOptions::builder().limit(Some(limit)).build();

        let cursor = self
            .collection
            .find(doc! { "topic": topic })
            .with_options(find_options)
            .await?;
        let items: Vec<Question> = cursor.try_collect().await?;

        Ok(items)
    }

    async fn create(&self, question: Question) -> AppResult<Question> {
        self.collection.insert_one(&question).await?;
        Ok(question)
    }
}
