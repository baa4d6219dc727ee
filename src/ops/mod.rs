// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canonical flowchart operations and the call/program data they are driven by.
//!
//! A [`Call`] names an operation and carries positional JSON arguments: strings for ids and
//! labels, objects for option maps, and for subgraphs an array of nested calls as the body. The
//! parser produces calls, and the terminology layer routes them back onto a [`Flowchart`].
//!
//! [`Flowchart`]: crate::model::Flowchart

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::DiagramError;

mod apply;
mod program;

pub(crate) use apply::{apply_operation, decode_subgraph};
pub use program::Program;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    SetDirection,
    DefineOrSelectNode,
    ConnectEdge,
    EnterSubgraph,
    ApplyStyle,
    AssignClass,
    Annotate,
    Flow,
    To,
    AddLine,
}

impl Operation {
    pub const ALL: [Operation; 10] = [
        Operation::SetDirection,
        Operation::DefineOrSelectNode,
        Operation::ConnectEdge,
        Operation::EnterSubgraph,
        Operation::ApplyStyle,
        Operation::AssignClass,
        Operation::Annotate,
        Operation::Flow,
        Operation::To,
        Operation::AddLine,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::SetDirection => "setDirection",
            Self::DefineOrSelectNode => "defineOrSelectNode",
            Self::ConnectEdge => "connectEdge",
            Self::EnterSubgraph => "enterSubgraph",
            Self::ApplyStyle => "applyStyle",
            Self::AssignClass => "assignClass",
            Self::Annotate => "annotate",
            Self::Flow => "flow",
            Self::To => "to",
            Self::AddLine => "addLine",
        }
    }

    /// Short names that mirror the notation keywords.
    pub fn builtin_aliases(self) -> &'static [&'static str] {
        match self {
            Self::SetDirection => &["graph", "direction"],
            Self::DefineOrSelectNode => &["node"],
            Self::ConnectEdge => &["edge"],
            Self::EnterSubgraph => &["subgraph"],
            Self::ApplyStyle => &["style"],
            Self::AssignClass => &["class"],
            Self::Annotate => &["note"],
            Self::Flow | Self::To | Self::AddLine => &[],
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Resolve a canonical name or a builtin alias.
    pub fn resolve(name: &str) -> Option<Self> {
        if let Some(op) = Self::from_name(name) {
            return Some(op);
        }
        Self::ALL
            .into_iter()
            .find(|op| op.builtin_aliases().contains(&name))
    }

    /// Positional parameters, in order.
    pub fn parameters(self) -> &'static [&'static str] {
        match self {
            Self::SetDirection => &["direction"],
            Self::DefineOrSelectNode => &["id", "label", "options"],
            Self::ConnectEdge => &["targetId", "label", "options"],
            Self::EnterSubgraph => &["id", "label", "body"],
            Self::ApplyStyle => &["selector", "properties"],
            Self::AssignClass => &["className", "...nodeIds"],
            Self::Annotate => &["text", "target"],
            Self::Flow => &["id", "label", "options"],
            Self::To => &["id", "label", "nodeOptions", "edgeLabel", "edgeOptions"],
            Self::AddLine => &["line"],
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::SetDirection => "Sets the direction of the flowchart (TB, TD, BT, RL, LR)",
            Self::DefineOrSelectNode => "Creates or selects a node in the flowchart",
            Self::ConnectEdge => "Creates an edge between the current node and a target node",
            Self::EnterSubgraph => "Creates a subgraph containing nodes and edges",
            Self::ApplyStyle => "Applies CSS-style properties to a node or edge",
            Self::AssignClass => "Assigns a CSS class to one or more nodes",
            Self::Annotate => "Adds a comment line, optionally naming a target node",
            Self::Flow => "Starts a flow from a specific node (creates it if needed)",
            Self::To => "Adds a node connected to the previous node in the flow",
            Self::AddLine => "Appends a verbatim notation line",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Option keys understood by the canonical operations, with their meaning.
pub const OPTION_PROPERTIES: [(&str, &str); 4] = [
    ("shape", "The shape of a node (rect, round, stadium, diamond, circle, ...)"),
    ("type", "The arrow token of an edge (-->, -.->, ==>, ...)"),
    ("style", "Custom CSS style properties for visual appearance"),
    ("metadata", "Additional data stored with a node or edge (not rendered)"),
];

/// One named invocation with positional arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub op: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

impl Call {
    pub fn new(op: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            op: op.into(),
            args,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OpError {
    #[error("unknown operation: {name}")]
    UnknownOperation { name: String },
    #[error("invalid argument {index} for {op}: expected {expected}")]
    InvalidArgument {
        op: String,
        index: usize,
        expected: &'static str,
    },
    #[error("invalid {field}: {message}")]
    DomainValidation {
        field: String,
        message: String,
    },
    #[error(transparent)]
    Diagram(#[from] DiagramError),
}
