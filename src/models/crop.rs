// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Crop data structures.
//!
//! This module defines the supported crop aspects, the drag targets of the
//! crop overlay and the persisted crop rectangle.

use super::geometry::Point;
use serde::{Deserialize, Serialize};

/// Fixed crop aspect. The ratio is width / height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aspect {
    #[default]
    Square,
    #[serde(rename = "3x4")]
    Ratio3x4,
}

impl Aspect {
    pub const ALL: [Aspect; 2] = [Aspect::Square, Aspect::Ratio3x4];

    /// Width divided by height.
    pub fn ratio(self) -> f32 {
        match self {
            Aspect::Square => 1.0,
            Aspect::Ratio3x4 => 3.0 / 4.0,
        }
    }

    /// Short label shown on buttons and placeholders.
    pub fn label(self) -> &'static str {
        match self {
            Aspect::Square => "1:1",
            Aspect::Ratio3x4 => "3:4",
        }
    }
}

/// What a drag gesture manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Body,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    None,
}

/// A crop rectangle in original-image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl CropRect {
    pub fn new(top_left: Point, bottom_right: Point) -> Self {
        Self { top_left, bottom_right }
    }

    /// Short `(x, y) → (x, y)` summary with whole-pixel coordinates.
    pub fn summary(&self) -> String {
        format!(
            "({}, {}) → ({}, {})",
            self.top_left.x as i64,
            self.top_left.y as i64,
            self.bottom_right.x as i64,
            self.bottom_right.y as i64,
        )
    }
}
