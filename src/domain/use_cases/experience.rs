use validator::Validate;

use crate::{
    entities::experience::{
        ExperienceCreatedResponse, ExperienceListResponse, ExperienceResponse,
        NewExperienceRequest, UpdateExperienceRequest,
    },
    errors::AppError,
    repositories::experience::ExperienceRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct ExperienceHandler<R>
where
    R: ExperienceRepository,
{
    pub experience_repo: R,
}

impl<R> ExperienceHandler<R>
where
    R: ExperienceRepository,
{
    pub fn new(experience_repo: R) -> Self {
        ExperienceHandler { experience_repo }
    }

    /// Creates a new work-history entry from the provided data
    pub async fn create_experience(
        &self,
        request: NewExperienceRequest,
    ) -> Result<ExperienceCreatedResponse, AppError> {
        request.validate()?;

        let new_experience = request.prepare_for_insert();
        new_experience.validate()?;

        let id = self.experience_repo.create_experience(&new_experience).await?;

        Ok(ExperienceCreatedResponse {
            id,
            message: format!(
                "Created experience '{} en {}'",
                new_experience.role, new_experience.company
            ),
        })
    }

    /// Retrieves a work-history entry by its ID
    pub async fn get_experience(&self, id: &str) -> Result<ExperienceResponse, AppError> {
        let valid_id = valid_uuid(id)?;

        let experience = self
            .experience_repo
            .get_experience_by_id(&valid_id)
            .await
            .map_err(not_found_as_experience)?;

        Ok(experience.into())
    }

    /// Lists all work-history entries, newest first
    pub async fn list_experiences(&self) -> Result<ExperienceListResponse, AppError> {
        let experiences = self.experience_repo.list_experiences().await?;
        let total = self.experience_repo.count_experiences().await?;

        Ok(ExperienceListResponse {
            experiences: experiences.into_iter().map(ExperienceResponse::from).collect(),
            total,
        })
    }

    /// Applies a partial update to an existing entry
    pub async fn update_experience(
        &self,
        id: &str,
        request: &UpdateExperienceRequest,
    ) -> Result<ExperienceResponse, AppError> {
        request.validate()?;

        let valid_id = valid_uuid(id)?;

        let updated = self
            .experience_repo
            .update_experience(&valid_id, request)
            .await
            .map_err(not_found_as_experience)?;

        Ok(updated.into())
    }

    /// Deletes a work-history entry by its ID
    pub async fn delete_experience(&self, id: &str, hard_delete: bool) -> Result<(), AppError> {
        let valid_id = valid_uuid(id)?;

        match hard_delete {
            true => self.experience_repo.hard_delete_experience(&valid_id).await,
            false => self.experience_repo.soft_delete_experience(&valid_id).await,
        }
        .map_err(not_found_as_experience)
    }
}

fn not_found_as_experience(e: AppError) -> AppError {
    match e {
        AppError::NotFound(_) => AppError::NotFound("Experience not found".to_string()),
        _ => e,
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::Utc;
    use mockall::mock;
    use uuid::Uuid;

    use super::*;
    use crate::entities::experience::{Experience, ExperienceInsert};
    use crate::entities::option_fields::OptionField;

    mock! {
        pub ExperienceRepo {}

        #[async_trait]
        impl ExperienceRepository for ExperienceRepo {
            async fn create_experience(&self, experience: &ExperienceInsert) -> Result<Uuid, AppError>;
            async fn get_experience_by_id(&self, id: &Uuid) -> Result<Experience, AppError>;
            async fn list_experiences(&self) -> Result<Vec<Experience>, AppError>;
            async fn count_experiences(&self) -> Result<i64, AppError>;
            async fn update_experience(
                &self,
                id: &Uuid,
                update: &UpdateExperienceRequest,
            ) -> Result<Experience, AppError>;
            async fn soft_delete_experience(&self, id: &Uuid) -> Result<(), AppError>;
            async fn hard_delete_experience(&self, id: &Uuid) -> Result<(), AppError>;
            async fn purge_soft_deleted_experiences(&self) -> Result<u64, AppError>;
        }
    }

    fn stored_experience(id: Uuid) -> Experience {
        let now = Utc::now();
        Experience {
            id,
            role: "Software Engineer".to_string(),
            company: "Acme".to_string(),
            start_date: "2018".to_string(),
            end_date: None,
            description: "Built the billing platform.".to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn new_request() -> NewExperienceRequest {
        NewExperienceRequest {
            role: "Software Engineer".to_string(),
            company: "Acme".to_string(),
            start_date: "2018".to_string(),
            end_date: None,
            description: "Built the billing platform.".to_string(),
        }
    }

    #[tokio::test]
    async fn create_experience_success() {
        let mut repo = MockExperienceRepo::new();
        let id = Uuid::new_v4();

        repo.expect_create_experience()
            .withf(|insert| insert.role == "Software Engineer" && insert.end_date.is_none())
            .returning(move |_| Ok(id));

        let handler = ExperienceHandler::new(repo);
        let response = handler.create_experience(new_request()).await.unwrap();

        assert_eq!(response.id, id);
        assert_eq!(response.message, "Created experience 'Software Engineer en Acme'");
    }

    #[tokio::test]
    async fn create_experience_rejects_oversized_role() {
        let mut repo = MockExperienceRepo::new();
        repo.expect_create_experience().never();

        let handler = ExperienceHandler::new(repo);
        let request = NewExperienceRequest {
            role: "x".repeat(101),
            ..new_request()
        };

        let result = handler.create_experience(request).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn get_experience_rejects_malformed_id() {
        let repo = MockExperienceRepo::new();
        let handler = ExperienceHandler::new(repo);

        let result = handler.get_experience("not-a-uuid").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn get_experience_maps_missing_record() {
        let mut repo = MockExperienceRepo::new();
        repo.expect_get_experience_by_id()
            .returning(|_| Err(AppError::NotFound("Record not found".into())));

        let handler = ExperienceHandler::new(repo);
        let result = handler.get_experience(&Uuid::new_v4().to_string()).await;

        match result {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Experience not found"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn list_experiences_reports_total_and_labels() {
        let mut repo = MockExperienceRepo::new();
        let id = Uuid::new_v4();

        repo.expect_list_experiences()
            .returning(move || Ok(vec![stored_experience(id)]));
        repo.expect_count_experiences().returning(|| Ok(1));

        let handler = ExperienceHandler::new(repo);
        let response = handler.list_experiences().await.unwrap();

        assert_eq!(response.total, 1);
        assert_eq!(response.experiences[0].label, "Software Engineer en Acme");
    }

    #[tokio::test]
    async fn update_experience_passes_patch_through() {
        let mut repo = MockExperienceRepo::new();
        let id = Uuid::new_v4();

        repo.expect_update_experience()
            .withf(move |got_id, update| {
                *got_id == id
                    && update.role.is_unchanged()
                    && update.description.flatten_str() == Some("Rewrote the scheduler.")
            })
            .returning(move |got_id, update| {
                let mut experience = stored_experience(*got_id);
                if let Some(description) = update.description.flatten_str() {
                    experience.description = description.to_string();
                }
                Ok(experience)
            });

        let handler = ExperienceHandler::new(repo);
        let update = UpdateExperienceRequest {
            description: OptionField::SetToValue("Rewrote the scheduler.".to_string()),
            ..Default::default()
        };

        let response = handler
            .update_experience(&id.to_string(), &update)
            .await
            .unwrap();

        assert_eq!(response.description, "Rewrote the scheduler.");
        assert_eq!(response.role, "Software Engineer");
    }

    #[tokio::test]
    async fn update_experience_rejects_invalid_patch() {
        let mut repo = MockExperienceRepo::new();
        repo.expect_update_experience().never();

        let handler = ExperienceHandler::new(repo);
        let update = UpdateExperienceRequest {
            company: OptionField::SetToValue(String::new()),
            ..Default::default()
        };

        let result = handler
            .update_experience(&Uuid::new_v4().to_string(), &update)
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn delete_experience_soft_deletes_by_default() {
        let mut repo = MockExperienceRepo::new();
        repo.expect_soft_delete_experience().returning(|_| Ok(()));
        repo.expect_hard_delete_experience().never();

        let handler = ExperienceHandler::new(repo);
        let result = handler
            .delete_experience(&Uuid::new_v4().to_string(), false)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn delete_experience_maps_missing_record() {
        let mut repo = MockExperienceRepo::new();
        repo.expect_hard_delete_experience()
            .returning(|_| Err(AppError::NotFound("Record not found".into())));

        let handler = ExperienceHandler::new(repo);
        let result = handler
            .delete_experience(&Uuid::new_v4().to_string(), true)
            .await;

        match result {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Experience not found"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }
}
