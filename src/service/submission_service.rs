use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument};
use validator::Validate;

use crate::config::CrmConfig;
use crate::dto::submission_dto::{CreateSubmissionRequest, SubmissionChanges, UpdateSubmissionRequest};
use crate::model::legacy::{to_legacy, LegacySubmission};
use crate::model::submission::{compose_full_address, timestamp_now, Submission, STATUS_CONTACTED, STATUS_NEW};
use crate::repository::submission_repo::SubmissionRepository;
use crate::util::error::ServiceError;

#[async_trait]
pub trait SubmissionService: Send + Sync {
    async fn list_submissions(&self) -> Result<Vec<LegacySubmission>, ServiceError>;
    async fn create_submission(&self, request: CreateSubmissionRequest) -> Result<LegacySubmission, ServiceError>;
    async fn update_submission(&self, request: UpdateSubmissionRequest) -> Result<LegacySubmission, ServiceError>;
}

pub struct SubmissionServiceImpl {
    pub repo: Arc<dyn SubmissionRepository>,
    pub crm: CrmConfig,
}

impl SubmissionServiceImpl {
    pub fn new(repo: Arc<dyn SubmissionRepository>, crm: CrmConfig) -> Self {
        SubmissionServiceImpl { repo, crm }
    }
}

/// Storage record for a fresh form submission.
pub fn build_submission(request: CreateSubmissionRequest, created_at: String) -> Submission {
    let full_address = compose_full_address(
        request.street_address.as_deref(),
        request.city.as_deref(),
        request.state.as_deref(),
        request.zip_code.as_deref(),
    );

    Submission {
        id: None,
        created_at: Some(created_at),
        email: request.email,
        first_name: request.first_name,
        last_name: request.last_name,
        company_name: request.company_name,
        phone_number: request.phone_number,
        timeframe: request.timeframe,
        demolition_type: request.demolition_type,
        demolition_type_other: request.demolition_type_other,
        street_address: request.street_address,
        city: request.city,
        state: request.state,
        zip_code: request.zip_code,
        full_address: Some(full_address),
        square_footage: request.square_footage,
        project_description: request.project_description,
        files: request.files,
        ai_estimate: request.ai_estimate,
        status: Some(request.status.unwrap_or_else(|| STATUS_NEW.to_string())),
        notes: None,
        contacted_at: None,
        contacted_by: None,
        wants_cash_offer: Some(request.wants_cash_offer.unwrap_or(false)),
    }
}

/// Moving a lead to `contacted` without a timestamp stamps `now` and the
/// actor. Values supplied by the caller are kept.
pub fn apply_contacted_defaults(mut changes: SubmissionChanges, now: String, actor: &str) -> SubmissionChanges {
    // Blank timestamps count as absent
    changes.contacted_at = changes.contacted_at.filter(|v| !v.trim().is_empty());
    if changes.status.as_deref() == Some(STATUS_CONTACTED) && changes.contacted_at.is_none() {
        changes.contacted_at = Some(now);
        if changes.contacted_by.is_none() {
            changes.contacted_by = Some(actor.to_string());
        }
    }
    changes
}

#[async_trait]
impl SubmissionService for SubmissionServiceImpl {
    #[instrument(skip(self))]
    async fn list_submissions(&self) -> Result<Vec<LegacySubmission>, ServiceError> {
        info!("Listing submissions");
        let res = self.repo.list_recent().await;
        match &res {
            Ok(submissions) => info!("Fetched {} submissions", submissions.len()),
            Err(e) => error!("Failed to list submissions: {e}"),
        }
        let submissions = res.map_err(ServiceError::from)?;
        Ok(submissions.iter().map(to_legacy).collect())
    }

    #[instrument(skip(self, request), fields(email = ?request.email))]
    async fn create_submission(&self, request: CreateSubmissionRequest) -> Result<LegacySubmission, ServiceError> {
        info!("Creating submission");
        let submission = build_submission(request, timestamp_now());
        let res = self.repo.create(submission).await;
        match &res {
            Ok(created) => info!(id = ?created.id, "Submission created successfully"),
            Err(e) => error!("Failed to create submission: {e}"),
        }
        let created = res.map_err(ServiceError::from)?;
        Ok(to_legacy(&created))
    }

    #[instrument(skip(self, request), fields(id = ?request.id))]
    async fn update_submission(&self, request: UpdateSubmissionRequest) -> Result<LegacySubmission, ServiceError> {
        if let Err(e) = request.validate() {
            error!("Rejected submission update: {e}");
            return Err(ServiceError::InvalidInput("Submission ID is required".to_string()));
        }
        let id = request.id.unwrap_or_default();

        let changes = apply_contacted_defaults(request.changes, timestamp_now(), &self.crm.contacted_by);
        info!("Updating submission");
        let res = self.repo.update(&id, &changes).await;
        match &res {
            Ok(_) => info!("Submission updated successfully"),
            Err(e) => error!("Failed to update submission: {e}"),
        }
        let updated = res.map_err(ServiceError::from)?;
        Ok(to_legacy(&updated))
    }
}
