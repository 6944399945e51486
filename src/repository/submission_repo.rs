use crate::config::mongo_conf::MongoConfig;
use crate::dto::submission_dto::SubmissionChanges;
use crate::model::submission::Submission;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::StreamExt;
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use tracing::{error, info};

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Every submission, most recent first.
    async fn list_recent(&self) -> RepositoryResult<Vec<Submission>>;
    async fn create(&self, submission: Submission) -> RepositoryResult<Submission>;
    /// Apply `changes` to the record with `id` and return the updated record.
    async fn update(&self, id: &str, changes: &SubmissionChanges) -> RepositoryResult<Submission>;
}

pub struct MongoSubmissionRepository {
    collection: mongodb::Collection<Submission>,
}

impl MongoSubmissionRepository {
    /// Create a new MongoSubmissionRepository using MongoConfig
    pub async fn new(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        use mongodb::{options::{ClientOptions, Credential, ResolverConfig}, Client};

        let mut client_options = ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare()).await?;
        client_options.app_name = Some("DemolitionBackend".to_string());
        client_options.max_pool_size = Some(config.pool_size);
        client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));

        if let (Some(ref username), Some(ref password)) = (&config.username, &config.password) {
            client_options.credential = Some(Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build());
        }

        let client = Client::with_options(client_options)?;
        let collection = client
            .database(&config.database)
            .collection::<Submission>(&config.submission_collection);
        Ok(MongoSubmissionRepository { collection })
    }
}

fn parse_id(id: &str) -> RepositoryResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| {
        error!("Submission id is not a valid ObjectId: {}", id);
        RepositoryError::not_found(format!("No submission found for ID: {}", id))
    })
}

#[async_trait]
impl SubmissionRepository for MongoSubmissionRepository {
    #[tracing::instrument(skip(self))]
    async fn list_recent(&self) -> RepositoryResult<Vec<Submission>> {
        info!("Listing submissions, most recent first");
        let options = FindOptions::builder().sort(doc! { "created_at": -1 }).build();
        let mut cursor = self.collection.find(None, options).await.map_err(|e| {
            error!("Failed to list submissions: {}", e);
            RepositoryError::from(e)
        })?;

        let mut submissions = Vec::new();
        while let Some(submission) = cursor.next().await {
            match submission {
                Ok(s) => submissions.push(s),
                Err(e) => {
                    error!("Failed to deserialize submission: {}", e);
                    return Err(RepositoryError::serialization(format!("Failed to deserialize submission: {}", e)));
                }
            }
        }
        info!("Fetched {} submissions", submissions.len());
        Ok(submissions)
    }

    #[tracing::instrument(skip(self, submission), fields(email = ?submission.email))]
    async fn create(&self, submission: Submission) -> RepositoryResult<Submission> {
        let missing = submission.missing_required_fields();
        if !missing.is_empty() {
            error!(missing = ?missing, "Refusing to store submission with missing required fields");
            return Err(RepositoryError::validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let mut new_submission = submission;
        if new_submission.id.is_none() {
            new_submission.id = Some(ObjectId::new());
        }

        match self.collection.insert_one(&new_submission, None).await {
            Ok(_) => {
                info!("Submission created successfully");
                Ok(new_submission)
            }
            Err(e) => {
                error!("Failed to create submission: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self, changes), fields(id = %id))]
    async fn update(&self, id: &str, changes: &SubmissionChanges) -> RepositoryResult<Submission> {
        let object_id = parse_id(id)?;
        let filter = doc! { "_id": object_id };

        let result = if changes.is_empty() {
            info!("Empty change set, returning stored submission");
            self.collection.find_one(filter, None).await
        } else {
            let set = bson::to_document(changes)?;
            info!(fields = ?set.keys().collect::<Vec<_>>(), "Updating submission");
            let options = FindOneAndUpdateOptions::builder()
                .return_document(ReturnDocument::After)
                .build();
            self.collection
                .find_one_and_update(filter, doc! { "$set": set }, options)
                .await
        };

        match result {
            Ok(Some(updated)) => {
                info!("Submission {} updated successfully", id);
                Ok(updated)
            }
            Ok(None) => {
                error!("No submission found to update for ID: {}", id);
                Err(RepositoryError::not_found(format!("No submission found for ID: {}", id)))
            }
            Err(e) => {
                error!("Failed to update submission: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_rejects_garbage() {
        assert!(matches!(parse_id("not-an-id"), Err(RepositoryError::NotFound(_))));
        assert!(parse_id("65a1f0c2e4b0a1b2c3d4e5f6").is_ok());
    }

    #[test]
    fn test_change_set_document_only_has_supplied_fields() {
        let changes = SubmissionChanges {
            status: Some("contacted".to_string()),
            notes: Some("left voicemail".to_string()),
            ..Default::default()
        };
        let set = bson::to_document(&changes).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get_str("status").unwrap(), "contacted");
    }
}
