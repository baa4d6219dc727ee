// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Proteus: chainable construction of flowchart notation, its reverse parser, and vocabulary
//! adapters over the construction operations.
//!
//! ```
//! use proteus::model::{EdgeOptions, Flowchart, NodeOptions, Shape};
//!
//! let mut chart = Flowchart::new("LR");
//! chart.define_or_select_node("A", Some("Start"), NodeOptions::shape(Shape::Round));
//! chart.connect_edge("B", Some("ok"), EdgeOptions::default()).unwrap();
//! assert_eq!(chart.to_text(), "flowchart LR\n    A(Start);\n    A-->|ok|B;");
//! ```

pub mod format;
pub mod model;
pub mod ops;
pub mod terminology;

pub use format::mermaid::{parse, parse_to_string};
pub use model::{construct, Diagram, DiagramError, DiagramKind, Flowchart};
pub use ops::{Call, OpError, Operation, Program};
pub use terminology::{Glossary, Session, Terminology, TerminologyBuilder, TerminologyConfig};
