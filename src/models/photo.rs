// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Saved photo records.
//!
//! A record ties an original image reference to its two confirmed crops.
//! Records are created once both crops exist and are never edited, only
//! deleted.

use super::crop::CropRect;
use serde::{Deserialize, Serialize};

/// Current on-disk library format version.
pub const LIBRARY_VERSION: u32 = 1;

/// One saved photo with its square and 3:4 crops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub id: String,
    pub original_uri: String,
    pub square_crop: CropRect,
    pub rect_crop: CropRect,
    /// Creation time in Unix milliseconds.
    pub created_at: i64,
}

impl PhotoRecord {
    /// Create a record with a fresh id stamped with the current time.
    pub fn new(original_uri: String, square_crop: CropRect, rect_crop: CropRect) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            original_uri,
            square_crop,
            rect_crop,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Creation time as a local `YYYY-MM-DD HH:MM` string.
    pub fn created_label(&self) -> String {
        use chrono::TimeZone;
        match chrono::Local.timestamp_millis_opt(self.created_at) {
            chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
            _ => "unknown date".to_string(),
        }
    }
}

/// Complete photo library for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoLibrary {
    pub version: u32,
    pub photos: Vec<PhotoRecord>,
}

impl Default for PhotoLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self {
            version: LIBRARY_VERSION,
            photos: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::geometry::Point;

    fn crop() -> CropRect {
        CropRect::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0))
    }

    #[test]
    fn test_new_records_have_unique_ids() {
        let a = PhotoRecord::new("a.jpg".to_string(), crop(), crop());
        let b = PhotoRecord::new("a.jpg".to_string(), crop(), crop());
        assert_ne!(a.id, b.id);
        assert!(a.created_at > 0);
    }

    #[test]
    fn test_created_label_format() {
        let record = PhotoRecord::new("a.jpg".to_string(), crop(), crop());
        let label = record.created_label();
        // YYYY-MM-DD HH:MM
        assert_eq!(label.len(), 16);
        assert_eq!(&label[4..5], "-");
        assert_eq!(&label[10..11], " ");
    }
}
