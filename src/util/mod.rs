// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pure helpers with no UI or I/O dependencies.

pub mod geometry;
