// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Call, Operation};

/// An ordered list of calls that rebuilds a diagram when replayed through a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program {
    calls: Vec<Call>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, call: Call) -> &mut Self {
        self.calls.push(call);
        self
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Call> {
        self.calls.iter()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

impl From<Vec<Call>> for Program {
    fn from(calls: Vec<Call>) -> Self {
        Self { calls }
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Call;
    type IntoIter = std::slice::Iter<'a, Call>;

    fn into_iter(self) -> Self::IntoIter {
        self.calls.iter()
    }
}

/// Renders the program as one chained expression, e.g.
///
/// ```text
/// flowchart()
///     .graph("TD")
///     .node("A", "Start", {"shape":"rect"})
///     .subgraph("G", "Group", |sub| sub
///         .node("B", "Inner", {"shape":"rect"})
///     );
/// ```
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("flowchart()")?;
        write_calls(f, &self.calls, 1)?;
        f.write_str(";")
    }
}

fn write_calls(f: &mut fmt::Formatter<'_>, calls: &[Call], depth: usize) -> fmt::Result {
    let pad = "    ".repeat(depth);
    for call in calls {
        write!(f, "\n{pad}.{}(", call.op)?;
        let body = subgraph_body(call);
        for (index, arg) in call.args.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            match (index, &body) {
                (2, Some(body)) => {
                    f.write_str("|sub| sub")?;
                    write_calls(f, body, depth + 1)?;
                    write!(f, "\n{pad}")?;
                }
                _ => write!(f, "{arg}")?,
            }
        }
        f.write_str(")")?;
    }
    Ok(())
}

/// Nested calls of a subgraph call. `None` when the body is absent or not a call list, in which
/// case it renders as plain JSON.
fn subgraph_body(call: &Call) -> Option<Vec<Call>> {
    if Operation::resolve(&call.op) != Some(Operation::EnterSubgraph) {
        return None;
    }
    let body = call.args.get(2)?;
    body.as_array()?;
    serde_json::from_value(body.clone()).ok()
}
