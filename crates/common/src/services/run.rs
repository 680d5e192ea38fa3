//! Run service
//!
//! Due dates must be strictly in the future, both at create and whenever an
//! update touches them. Updating the assignee verifies the user exists and
//! is not soft-deleted.

use chrono::{DateTime, Utc};
use serde_json::json;

use super::{decode, decode_all, is_deleted, to_patch};
use crate::errors::{AppError, Result};
use crate::id::DocumentId;
use crate::models::{CreateRun, Run, UpdateRun};
use crate::store::{Collection, SharedStore};

#[derive(Clone)]
pub struct RunService {
    store: SharedStore,
}

impl RunService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Run>> {
        decode_all(self.store.find_all(Collection::Runs).await?)
    }

    pub async fn get(&self, id: &DocumentId) -> Result<Run> {
        let doc = self
            .store
            .find_by_id(Collection::Runs, id)
            .await?
            .ok_or_else(|| AppError::not_found("Run"))?;
        decode(doc)
    }

    pub async fn create(&self, input: CreateRun) -> Result<Run> {
        let objective = input.objective.as_deref().filter(|o| !o.trim().is_empty());
        let (
            Some(procedure),
            Some(due_date),
            Some(objective),
            Some(organisation),
            Some(department),
            Some(lab),
        ) = (
            input.procedure.as_ref(),
            input.due_date,
            objective,
            input.organisation.as_ref(),
            input.department.as_ref(),
            input.lab.as_ref(),
        )
        else {
            return Err(AppError::validation(
                "All fields are required: procedure, duedate, objective, organisation, department, lab, assignTo",
            ));
        };

        require_future(due_date)?;

        let doc = json!({
            "procedure": procedure,
            "createdOn": input.created_on.unwrap_or_else(Utc::now),
            "duedate": due_date,
            "objective": objective,
            "organisation": organisation,
            "department": department,
            "lab": lab,
            "assignTo": input.assign_to,
        });

        decode(self.store.insert(Collection::Runs, doc).await?)
    }

    pub async fn update(&self, id: &DocumentId, input: UpdateRun) -> Result<Run> {
        if self
            .store
            .find_by_id(Collection::Runs, id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found("Run"));
        }

        if let Some(due_date) = input.due_date {
            require_future(due_date)?;
        }

        if let Some(assignee) = &input.assign_to {
            let user = self
                .store
                .find_by_id(Collection::Users, assignee)
                .await?
                .filter(|d| !is_deleted(d));
            if user.is_none() {
                return Err(AppError::not_found_message("Assigned user not found"));
            }
        }

        let doc = self
            .store
            .merge(Collection::Runs, id, to_patch(&input)?)
            .await?
            .ok_or_else(|| AppError::not_found("Run"))?;
        decode(doc)
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<()> {
        if !self.store.remove(Collection::Runs, id).await? {
            return Err(AppError::not_found("Run"));
        }
        Ok(())
    }
}

fn require_future(due_date: DateTime<Utc>) -> Result<()> {
    if due_date <= Utc::now() {
        return Err(AppError::validation("Due date must be a future date"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::models::CreateUser;
    use crate::services::testing::memory_store;
    use crate::services::UserService;
    use crate::store::SharedStore;

    fn setup() -> (RunService, SharedStore) {
        let store = memory_store();
        (RunService::new(store.clone()), store)
    }

    fn valid_input() -> CreateRun {
        CreateRun {
            procedure: Some(DocumentId::generate()),
            due_date: Some(Utc::now() + Duration::days(7)),
            objective: Some("Validate reagent batch".to_string()),
            organisation: Some(DocumentId::generate()),
            department: Some(DocumentId::generate()),
            lab: Some(DocumentId::generate()),
            ..Default::default()
        }
    }

    async fn create_user(store: &SharedStore) -> DocumentId {
        let users = UserService::new(store.clone());
        users
            .create(CreateUser {
                first_name: Some("Grace".to_string()),
                last_name: Some("Hopper".to_string()),
                email: Some("grace@example.org".to_string()),
                role: Some(DocumentId::generate()),
                institute: Some(DocumentId::generate()),
                organisation: Some(DocumentId::generate()),
                department: Some(vec![DocumentId::generate()]),
                lab: Some(vec![DocumentId::generate()]),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_requires_all_fields() {
        let (svc, _) = setup();
        let mut input = valid_input();
        input.objective = None;
        let err = svc.create(input).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "All fields are required: procedure, duedate, objective, organisation, department, lab, assignTo"
        );
    }

    #[tokio::test]
    async fn test_create_allows_missing_assignee() {
        let (svc, _) = setup();
        let run = svc.create(valid_input()).await.unwrap();
        assert!(run.assign_to.is_none());
    }

    #[tokio::test]
    async fn test_create_defaults_created_on() {
        let (svc, _) = setup();
        let before = Utc::now();
        let run = svc.create(valid_input()).await.unwrap();
        let created_on = run.created_on.unwrap();
        assert!(created_on >= before);
        assert!(created_on <= Utc::now());
    }

    #[tokio::test]
    async fn test_create_rejects_past_due_date() {
        let (svc, _) = setup();
        let mut input = valid_input();
        input.due_date = Some(Utc::now() - Duration::hours(1));
        let err = svc.create(input).await.unwrap_err();
        assert_eq!(err.to_string(), "Due date must be a future date");
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_rejects_past_due_date() {
        let (svc, _) = setup();
        let run = svc.create(valid_input()).await.unwrap();

        let err = svc
            .update(
                &run.id,
                UpdateRun {
                    due_date: Some(Utc::now() - Duration::days(1)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Due date must be a future date");
    }

    #[tokio::test]
    async fn test_update_assignee_must_exist() {
        let (svc, store) = setup();
        let run = svc.create(valid_input()).await.unwrap();

        let err = svc
            .update(
                &run.id,
                UpdateRun {
                    assign_to: Some(DocumentId::generate()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Assigned user not found");

        let user = create_user(&store).await;
        let updated = svc
            .update(
                &run.id,
                UpdateRun {
                    assign_to: Some(user.clone()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.assign_to, Some(user));
    }

    #[tokio::test]
    async fn test_update_leaves_restricted_fields_alone() {
        let (svc, _) = setup();
        let run = svc.create(valid_input()).await.unwrap();

        let updated = svc
            .update(
                &run.id,
                UpdateRun {
                    objective: Some("Revised objective".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.objective, "Revised objective");
        assert_eq!(updated.procedure, run.procedure);
        assert_eq!(updated.due_date, run.due_date);
    }

    #[tokio::test]
    async fn test_delete_is_hard() {
        let (svc, _) = setup();
        let run = svc.create(valid_input()).await.unwrap();

        svc.delete(&run.id).await.unwrap();
        let err = svc.get(&run.id).await.unwrap_err();
        assert_eq!(err.to_string(), "Run not found");
    }
}
