// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Photo record storage.
//!
//! `PhotoStore` is the persistence seam used by the app. `FileStore` keeps
//! the library in a single JSON or YAML file. Tests also run against an
//! in-memory `MemoryStore`.

use super::serialization::{read_library, write_library};
use crate::models::photo::{PhotoLibrary, PhotoRecord};
use anyhow::Result;
use std::path::PathBuf;

/// Storage for saved photo records.
pub trait PhotoStore {
    /// All records, newest first.
    fn get_all(&self) -> Result<Vec<PhotoRecord>>;

    /// The record with `id`, if present.
    fn get_by_id(&self, id: &str) -> Result<Option<PhotoRecord>>;

    /// Insert or replace the record with the same id.
    fn save(&mut self, record: &PhotoRecord) -> Result<()>;

    /// Remove the record with `id`. Unknown ids are ignored.
    fn delete(&mut self, id: &str) -> Result<()>;
}

fn upsert(photos: &mut Vec<PhotoRecord>, record: &PhotoRecord) {
    match photos.iter_mut().find(|p| p.id == record.id) {
        Some(existing) => *existing = record.clone(),
        None => photos.push(record.clone()),
    }
}

fn newest_first(mut photos: Vec<PhotoRecord>) -> Vec<PhotoRecord> {
    photos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    photos
}

/// Library kept in one file on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<PhotoLibrary> {
        read_library(&self.path)
    }
}

impl PhotoStore for FileStore {
    fn get_all(&self) -> Result<Vec<PhotoRecord>> {
        Ok(newest_first(self.load()?.photos))
    }

    fn get_by_id(&self, id: &str) -> Result<Option<PhotoRecord>> {
        Ok(self.load()?.photos.into_iter().find(|p| p.id == id))
    }

    fn save(&mut self, record: &PhotoRecord) -> Result<()> {
        let mut library = self.load()?;
        upsert(&mut library.photos, record);
        write_library(&library, &self.path)?;
        log::info!("Saved photo {} to {}", record.id, self.path.display());
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let mut library = self.load()?;
        let before = library.photos.len();
        library.photos.retain(|p| p.id != id);

        if library.photos.len() != before {
            write_library(&library, &self.path)?;
            log::info!("Deleted photo {}, total: {}", id, library.photos.len());
        }
        Ok(())
    }
}

/// Library kept in memory.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    photos: Vec<PhotoRecord>,
}

#[cfg(test)]
impl PhotoStore for MemoryStore {
    fn get_all(&self) -> Result<Vec<PhotoRecord>> {
        Ok(newest_first(self.photos.clone()))
    }

    fn get_by_id(&self, id: &str) -> Result<Option<PhotoRecord>> {
        Ok(self.photos.iter().find(|p| p.id == id).cloned())
    }

    fn save(&mut self, record: &PhotoRecord) -> Result<()> {
        upsert(&mut self.photos, record);
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        self.photos.retain(|p| p.id != id);
        Ok(())
    }
}
