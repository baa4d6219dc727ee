// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Diagram text formats.
//!
//! Flowcharts are the only kind with both an exporter and a parser; the other notation kinds are
//! written line by line through [`crate::model::Notation`].

pub mod mermaid;
