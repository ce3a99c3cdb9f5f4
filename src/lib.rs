// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Platonia: interactive state core for the concept map and its auth session.
//!
//! Single-threaded by design. Stores and controllers hand out `Rc` snapshots and take `?Send`
//! futures; nothing here is shared across threads.

pub mod auth;
pub mod config;
pub mod diagram;
pub mod model;
pub mod render;
