// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model shared by the crop engine, the store and the UI.

pub mod crop;
pub mod geometry;
pub mod photo;
