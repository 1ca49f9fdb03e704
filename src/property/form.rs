// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Property submission workflow.
//!
//! ```text
//! Idle ──begin_submit──▶ Submitting ──ok──▶ Succeeded ─┐
//!                            │                         ├─ next interaction ─▶ Idle
//!                            └──────err──▶ Failed ─────┘
//! ```
//!
//! While `Submitting` the draft is read-only: edits are ignored. A success
//! resets the draft and closes the form; a failure keeps the draft so the user
//! can retry. Dismissing the form cancels a pending submission.
//!
//! Whoever waits on a submission holds a drop guard over its cancellation
//! token. If that waiter is dropped before committing, the form observes the
//! cancelled token on its next interaction and falls back to `Idle`.

use alloy::primitives::U256;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use utoipa::ToSchema;

use super::draft::{DraftError, FieldChange, PropertyDraft};
use super::preview::{PreviewStore, SelectedFile};
use crate::blockchain::{ChainError, TokenInteractions, TxReceipt, WalletSource};

const SUCCESS_MESSAGE: &str = "Real estate property has been added successfully.";
const CANCELLED_MESSAGE: &str = "Submission cancelled.";

/// Workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FormState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// User-visible outcome of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionResult {
    Success { message: String, tx_hash: String },
    Failure { message: String },
    Cancelled { message: String },
}

impl SubmissionResult {
    pub fn cancelled() -> Self {
        SubmissionResult::Cancelled {
            message: CANCELLED_MESSAGE.to_string(),
        }
    }
}

/// Whether an edit was applied or ignored because a submission is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Applied,
    Ignored,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("A submission is already in progress")]
    Busy,

    #[error("The form is closed")]
    Closed,

    #[error(transparent)]
    Invalid(#[from] DraftError),
}

/// Values captured when a submission starts.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySubmission {
    pub title: String,
    pub location: String,
    /// Token price in the smallest unit, sent as `totalValue`
    pub total_value: U256,
    pub apy: f64,
    pub images: Vec<String>,
}

/// The "new property" form and its draft.
pub struct PropertyForm {
    draft: PropertyDraft,
    state: FormState,
    open: bool,
    pending: Option<CancellationToken>,
    last_result: Option<SubmissionResult>,
    previews: PreviewStore,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
}

impl PropertyForm {
    /// Mount an open form with an empty draft.
    pub fn new(previews: PreviewStore) -> Self {
        Self {
            draft: PropertyDraft::default(),
            state: FormState::Idle,
            open: true,
            pending: None,
            last_result: None,
            previews,
            created_at: Utc::now(),
            last_activity: Utc::now(),
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn draft(&self) -> &PropertyDraft {
        &self.draft
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn last_result(&self) -> Option<&SubmissionResult> {
        self.last_result.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    /// Whether the form has seen no interaction for `ttl` as of `now`. A
    /// submission still awaiting its outcome never expires.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        self.state != FormState::Submitting && now - self.last_activity >= ttl
    }

    /// Return to `Idle` if the caller waiting on a submission went away
    /// without committing its outcome. The draft is kept.
    pub fn recover_abandoned(&mut self) {
        let abandoned = self.state == FormState::Submitting
            && self.pending.as_ref().is_some_and(CancellationToken::is_cancelled);
        if abandoned {
            warn!("Submission dropped before its outcome was committed");
            self.abandon_submit();
        }
    }

    /// Re-open after a successful submission closed the form.
    pub fn reopen(&mut self) {
        self.settle();
        self.open = true;
    }

    /// Leave a notice state on the next interaction.
    fn settle(&mut self) {
        self.recover_abandoned();
        self.last_activity = Utc::now();
        if matches!(self.state, FormState::Succeeded | FormState::Failed) {
            self.state = FormState::Idle;
        }
    }

    fn editable(&mut self) -> bool {
        self.settle();
        self.state == FormState::Idle
    }

    pub fn apply_change(&mut self, change: &FieldChange) -> Result<Edit, DraftError> {
        if !self.editable() {
            return Ok(Edit::Ignored);
        }
        self.draft.apply(change)?;
        Ok(Edit::Applied)
    }

    /// File-selection event: register previews and append them in order.
    pub fn attach_images(&mut self, files: Vec<SelectedFile>) -> Edit {
        if !self.editable() {
            return Edit::Ignored;
        }
        let previews: Vec<_> = files.into_iter().map(|f| self.previews.create(f)).collect();
        self.draft.append_images(previews);
        Edit::Applied
    }

    pub fn remove_image(&mut self, index: usize) -> Result<Edit, DraftError> {
        if !self.editable() {
            return Ok(Edit::Ignored);
        }
        self.draft.remove_image(index)?;
        Ok(Edit::Applied)
    }

    /// `Idle → Submitting`. Validates the draft and captures its values.
    pub fn begin_submit(&mut self) -> Result<(PropertySubmission, CancellationToken), FormError> {
        self.settle();
        if self.state == FormState::Submitting {
            return Err(FormError::Busy);
        }
        if !self.open {
            return Err(FormError::Closed);
        }
        self.draft.validate()?;

        let submission = PropertySubmission {
            title: self.draft.title().to_string(),
            location: self.draft.location().to_string(),
            total_value: self.draft.total_value()?,
            apy: self.draft.apy(),
            images: self.draft.images().iter().map(|p| p.reference().to_string()).collect(),
        };
        let cancel = CancellationToken::new();
        self.pending = Some(cancel.clone());
        self.state = FormState::Submitting;
        Ok((submission, cancel))
    }

    /// `Submitting → Succeeded | Failed`. An outcome arriving after the
    /// submission was abandoned is not committed.
    pub fn finish_submit(&mut self, outcome: Result<TxReceipt, ChainError>) -> SubmissionResult {
        if self.state != FormState::Submitting {
            return SubmissionResult::cancelled();
        }
        self.pending = None;
        self.last_activity = Utc::now();

        let result = match outcome {
            Ok(receipt) => {
                info!(tx_hash = %receipt.tx_hash, "Property submitted");
                self.state = FormState::Succeeded;
                self.open = false;
                self.draft = PropertyDraft::default();
                SubmissionResult::Success {
                    message: SUCCESS_MESSAGE.to_string(),
                    tx_hash: receipt.tx_hash,
                }
            }
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "Submission failed");
                self.state = FormState::Failed;
                SubmissionResult::Failure {
                    message: e.user_message(),
                }
            }
        };
        self.last_result = Some(result.clone());
        result
    }

    /// Stop waiting for a pending submission; the draft stays as it was.
    pub fn abandon_submit(&mut self) -> SubmissionResult {
        if let Some(cancel) = self.pending.take() {
            cancel.cancel();
        }
        if self.state == FormState::Submitting {
            self.state = FormState::Idle;
        }
        self.last_activity = Utc::now();
        let result = SubmissionResult::cancelled();
        self.last_result = Some(result.clone());
        result
    }

    /// Close the form and discard the draft. Cancels a pending submission and
    /// revokes every preview.
    pub fn dismiss(&mut self) {
        if let Some(cancel) = self.pending.take() {
            cancel.cancel();
        }
        self.state = FormState::Idle;
        self.open = false;
        self.draft = PropertyDraft::default();
    }

    /// Run a full submission against the token contract.
    pub async fn submit<S: WalletSource>(
        &mut self,
        tokens: &TokenInteractions<S>,
        from: &str,
    ) -> Result<SubmissionResult, FormError> {
        let (submission, cancel) = self.begin_submit()?;
        let abandoned = cancel.clone().drop_guard();
        let outcome = run_submission(tokens, from, &submission, &cancel).await;
        abandoned.disarm();
        Ok(match outcome {
            Some(outcome) => self.finish_submit(outcome),
            None => self.abandon_submit(),
        })
    }
}

impl Drop for PropertyForm {
    fn drop(&mut self) {
        if let Some(cancel) = self.pending.take() {
            cancel.cancel();
        }
    }
}

/// Dispatch `createRealEstate` for a captured submission. Returns `None` if
/// `cancel` fires first.
pub async fn run_submission<S: WalletSource>(
    tokens: &TokenInteractions<S>,
    from: &str,
    submission: &PropertySubmission,
    cancel: &CancellationToken,
) -> Option<Result<TxReceipt, ChainError>> {
    info!(
        from,
        title = %submission.title,
        location = %submission.location,
        apy = submission.apy,
        images = submission.images.len(),
        "Submitting property"
    );
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        outcome = tokens.create_real_estate(
            from,
            &submission.title,
            &submission.location,
            submission.total_value,
        ) => Some(outcome),
    }
}
