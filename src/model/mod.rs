// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Diagram model: the flowchart builder, its records, and the shape codec.
//!
//! Other notation kinds are available as plain line documents through [`construct`].

pub mod diagram;
pub mod flow;
pub mod options;
pub mod shape;

pub use diagram::{construct, Diagram, DiagramError, DiagramKind, Notation};
pub use flow::{
    Annotation, ClassAssignment, FlowEdge, FlowNode, FlowSubgraph, Flowchart, FlowchartSnapshot,
    StyleRule, DEFAULT_DIRECTION,
};
pub use options::{EdgeOptions, Metadata, NodeOptions, StyleMap, DEFAULT_ARROW};
pub use shape::Shape;
