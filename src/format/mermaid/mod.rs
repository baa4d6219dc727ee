// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mermaid-style flowchart notation: line builders, export, and the reverse parser.

mod escape;
pub mod flowchart;
pub mod parse;

pub use flowchart::export_flowchart;
pub use parse::{parse, parse_to_string};
