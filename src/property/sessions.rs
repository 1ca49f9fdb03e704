// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Open property forms, keyed by draft id.
//!
//! The session lock is never held while waiting on the chain: a submission
//! snapshots the draft under the lock, releases it for the contract call, then
//! re-acquires it to commit the result. A dismissal in between cancels the
//! wait and the result is reported as cancelled. If the submitting caller is
//! dropped instead, its guard cancels the token and the form recovers to
//! `Idle` on its next access.
//!
//! Forms left untouched for longer than the draft TTL are evicted by
//! [`DraftSessions::evict_expired`], which drops them and their previews.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use utoipa::ToSchema;
use uuid::Uuid;

use super::draft::{DraftFields, FieldChange};
use super::form::{run_submission, Edit, FormError, FormState, PropertyForm, SubmissionResult};
use super::preview::{PreviewStore, SelectedFile};
use crate::blockchain::{TokenInteractions, WalletSource};

/// Session errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("Draft not found")]
    NotFound,

    #[error(transparent)]
    Form(#[from] FormError),
}

/// Serializable view of an open form.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DraftView {
    pub id: Uuid,
    pub state: FormState,
    pub open: bool,
    pub fields: DraftFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_result: Option<SubmissionResult>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl DraftView {
    fn of(id: Uuid, form: &PropertyForm) -> Self {
        Self {
            id,
            state: form.state(),
            open: form.is_open(),
            fields: form.draft().fields(),
            last_result: form.last_result().cloned(),
            created_at: form.created_at(),
            last_activity: form.last_activity(),
        }
    }
}

/// Result of a submission through a session.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubmitOutcome {
    pub result: SubmissionResult,
    /// Absent when the draft was dismissed while submitting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<DraftView>,
}

/// Store of open forms sharing one preview registry.
#[derive(Default)]
pub struct DraftSessions {
    forms: RwLock<HashMap<Uuid, PropertyForm>>,
    previews: PreviewStore,
}

impl DraftSessions {
    pub fn new(previews: PreviewStore) -> Self {
        Self {
            forms: RwLock::new(HashMap::new()),
            previews,
        }
    }

    pub fn previews(&self) -> &PreviewStore {
        &self.previews
    }

    /// Mount a new form.
    pub async fn open(&self) -> DraftView {
        let id = Uuid::new_v4();
        let form = PropertyForm::new(self.previews.clone());
        let view = DraftView::of(id, &form);
        self.forms.write().await.insert(id, form);
        tracing::debug!(draft_id = %id, "Opened property draft");
        view
    }

    pub async fn view(&self, id: Uuid) -> Option<DraftView> {
        let mut forms = self.forms.write().await;
        let form = forms.get_mut(&id)?;
        form.recover_abandoned();
        Some(DraftView::of(id, form))
    }

    pub async fn reopen(&self, id: Uuid) -> Result<DraftView, SessionError> {
        self.with_form(id, |form| {
            form.reopen();
            Ok(())
        })
        .await
    }

    /// Field-change event. Reported as [`FormError::Busy`] when ignored.
    pub async fn apply_change(&self, id: Uuid, change: &FieldChange) -> Result<DraftView, SessionError> {
        self.with_form(id, |form| match form.apply_change(change).map_err(FormError::from)? {
            Edit::Applied => Ok(()),
            Edit::Ignored => Err(FormError::Busy.into()),
        })
        .await
    }

    pub async fn attach_images(&self, id: Uuid, files: Vec<SelectedFile>) -> Result<DraftView, SessionError> {
        self.with_form(id, |form| match form.attach_images(files) {
            Edit::Applied => Ok(()),
            Edit::Ignored => Err(FormError::Busy.into()),
        })
        .await
    }

    pub async fn remove_image(&self, id: Uuid, index: usize) -> Result<DraftView, SessionError> {
        self.with_form(id, |form| match form.remove_image(index).map_err(FormError::from)? {
            Edit::Applied => Ok(()),
            Edit::Ignored => Err(FormError::Busy.into()),
        })
        .await
    }

    /// Submit the draft as `createRealEstate` from `from`.
    pub async fn submit<S: WalletSource>(
        &self,
        id: Uuid,
        from: &str,
        tokens: &TokenInteractions<S>,
    ) -> Result<SubmitOutcome, SessionError> {
        let (submission, cancel) = {
            let mut forms = self.forms.write().await;
            let form = forms.get_mut(&id).ok_or(SessionError::NotFound)?;
            form.begin_submit()?
        };

        let abandoned = cancel.clone().drop_guard();
        let outcome = run_submission(tokens, from, &submission, &cancel).await;

        let mut forms = self.forms.write().await;
        abandoned.disarm();
        let Some(form) = forms.get_mut(&id) else {
            return Ok(SubmitOutcome {
                result: SubmissionResult::cancelled(),
                draft: None,
            });
        };
        let result = match outcome {
            Some(outcome) => form.finish_submit(outcome),
            None => form.abandon_submit(),
        };
        Ok(SubmitOutcome {
            result,
            draft: Some(DraftView::of(id, form)),
        })
    }

    /// Dismiss the form: cancel any pending submission and discard the draft.
    pub async fn dismiss(&self, id: Uuid) -> bool {
        let removed = self.forms.write().await.remove(&id);
        match removed {
            Some(mut form) => {
                form.dismiss();
                tracing::debug!(draft_id = %id, "Dismissed property draft");
                true
            }
            None => false,
        }
    }

    /// Drop every form idle for at least `ttl` as of `now`, revoking its
    /// previews. Returns how many were evicted.
    pub async fn evict_expired(&self, now: DateTime<Utc>, ttl: TimeDelta) -> usize {
        let mut forms = self.forms.write().await;
        let before = forms.len();
        forms.retain(|id, form| {
            form.recover_abandoned();
            let keep = !form.is_expired(now, ttl);
            if !keep {
                tracing::debug!(draft_id = %id, "Evicting expired property draft");
            }
            keep
        });
        before - forms.len()
    }

    pub async fn len(&self) -> usize {
        self.forms.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.forms.read().await.is_empty()
    }

    async fn with_form<F>(&self, id: Uuid, f: F) -> Result<DraftView, SessionError>
    where
        F: FnOnce(&mut PropertyForm) -> Result<(), SessionError>,
    {
        let mut forms = self.forms.write().await;
        let form = forms.get_mut(&id).ok_or(SessionError::NotFound)?;
        f(form)?;
        Ok(DraftView::of(id, form))
    }
}
