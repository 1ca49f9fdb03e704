// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! New property submission workflow.
//!
//! - `draft` - the editable property record and its validation
//! - `preview` - scoped image previews
//! - `form` - the submission state machine
//! - `sessions` - open forms addressed by id
//! - `expiry` - background eviction of idle drafts

pub mod draft;
pub mod expiry;
pub mod form;
pub mod preview;
pub mod sessions;

pub use draft::{DraftError, DraftFields, FieldChange, PropertyDraft, MAX_APY};
pub use expiry::DraftSweeper;
pub use form::{run_submission, Edit, FormError, FormState, PropertyForm, PropertySubmission, SubmissionResult};
pub use preview::{ImagePreview, PreviewBlob, PreviewMeta, PreviewStore, SelectedFile};
pub use sessions::{DraftSessions, DraftView, SessionError, SubmitOutcome};
