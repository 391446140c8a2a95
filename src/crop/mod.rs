// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Crop engine: the interactive overlay, pixel extraction and the session
//! that ties them to one image.

pub mod extract;
pub mod overlay;
pub mod session;
