// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Image previews for property drafts.
//!
//! A preview is created from a selected file and registered in the shared
//! [`PreviewStore`] so it can be served back to the browser. The returned
//! [`ImagePreview`] owns that registration: dropping it revokes the entry, so
//! whichever way a draft is discarded its previews go with it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// A file picked by the user for preview.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Stored preview content.
#[derive(Debug, Clone)]
pub struct PreviewBlob {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Arc<[u8]>,
    pub created_at: DateTime<Utc>,
}

/// Shared registry of live previews.
#[derive(Clone, Default)]
pub struct PreviewStore {
    blobs: Arc<Mutex<HashMap<Uuid, PreviewBlob>>>,
}

impl PreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `file` and return the owning preview.
    pub fn create(&self, file: SelectedFile) -> ImagePreview {
        let id = Uuid::new_v4();
        let blob = PreviewBlob {
            file_name: file.file_name,
            content_type: file.content_type,
            bytes: file.bytes.into(),
            created_at: Utc::now(),
        };
        let meta = PreviewMeta {
            id,
            reference: format!("blob:estate/{id}"),
            file_name: blob.file_name.clone(),
            content_type: blob.content_type.clone(),
        };
        self.lock().insert(id, blob);
        ImagePreview {
            meta,
            store: self.clone(),
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<PreviewBlob> {
        self.lock().get(id).cloned()
    }

    /// Number of previews not yet revoked.
    pub fn live_count(&self) -> usize {
        self.lock().len()
    }

    fn revoke(&self, id: &Uuid) {
        if self.lock().remove(id).is_some() {
            tracing::debug!(preview_id = %id, "Revoked image preview");
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, PreviewBlob>> {
        self.blobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Public description of a preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PreviewMeta {
    pub id: Uuid,
    /// Opaque local reference, analogous to an object URL
    pub reference: String,
    pub file_name: String,
    pub content_type: String,
}

/// A registered preview. Revoked on drop.
pub struct ImagePreview {
    meta: PreviewMeta,
    store: PreviewStore,
}

impl ImagePreview {
    pub fn meta(&self) -> &PreviewMeta {
        &self.meta
    }

    pub fn reference(&self) -> &str {
        &self.meta.reference
    }
}

impl std::fmt::Debug for ImagePreview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ImagePreview").field(&self.meta.reference).finish()
    }
}

impl Drop for ImagePreview {
    fn drop(&mut self) {
        self.store.revoke(&self.meta.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str) -> SelectedFile {
        SelectedFile {
            file_name: name.to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[test]
    fn create_registers_and_drop_revokes() {
        let store = PreviewStore::new();
        let preview = store.create(png("front.png"));
        let id = preview.meta().id;

        assert_eq!(store.live_count(), 1);
        assert_eq!(store.get(&id).unwrap().file_name, "front.png");
        assert!(preview.reference().starts_with("blob:estate/"));

        drop(preview);
        assert_eq!(store.live_count(), 0);
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn previews_are_independent() {
        let store = PreviewStore::new();
        let a = store.create(png("a.png"));
        let b = store.create(png("b.png"));
        assert_ne!(a.meta().id, b.meta().id);

        drop(a);
        assert_eq!(store.live_count(), 1);
        assert!(store.get(&b.meta().id).is_some());
    }
}
