// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the dualcrop application.

pub mod canvas;
pub mod gallery;
pub mod previews;
pub mod toolbar;
