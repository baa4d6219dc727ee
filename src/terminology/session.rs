// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use serde_json::Value;

use super::{Target, Terminology};
use crate::model::Flowchart;
use crate::ops::{apply_operation, decode_subgraph, OpError, Operation, Program};

/// A flowchart driven through a terminology.
///
/// Every call returns the session again, so calls chain the same way whether they reach a
/// canonical operation, an alias, or a custom operation. A failed call leaves the session usable.
#[derive(Debug, Clone)]
pub struct Session {
    terminology: Arc<Terminology>,
    chart: Flowchart,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Arc::new(Terminology::canonical()))
    }
}

impl Session {
    pub fn new(terminology: Arc<Terminology>) -> Self {
        Self::with_flowchart(terminology, Flowchart::default())
    }

    pub fn with_flowchart(terminology: Arc<Terminology>, chart: Flowchart) -> Self {
        Self { terminology, chart }
    }

    pub fn terminology(&self) -> &Arc<Terminology> {
        &self.terminology
    }

    pub fn flowchart(&self) -> &Flowchart {
        &self.chart
    }

    pub fn flowchart_mut(&mut self) -> &mut Flowchart {
        &mut self.chart
    }

    pub fn into_flowchart(self) -> Flowchart {
        self.chart
    }

    pub fn to_text(&self) -> String {
        self.chart.to_text()
    }

    /// Invoke an exposed operation by name.
    pub fn call(&mut self, name: &str, args: &[Value]) -> Result<&mut Self, OpError> {
        let terminology = Arc::clone(&self.terminology);
        let Some(route) = terminology.route(name) else {
            return Err(OpError::UnknownOperation {
                name: name.to_owned(),
            });
        };
        let mut args = route.arrange(args);

        match route.target {
            Target::Canonical(op) => {
                if route.renames_properties() {
                    terminology.rename_properties(&mut args);
                }
                tracing::debug!(name, op = %op, "dispatch");
                self.dispatch(op, &args)?;
            }
            Target::Custom(index) => {
                let Some((custom_name, operation)) = terminology.custom(index) else {
                    return Err(OpError::UnknownOperation {
                        name: name.to_owned(),
                    });
                };
                tracing::debug!(name, custom = custom_name, "dispatch custom");
                operation(self, &args)?;
            }
        }
        Ok(self)
    }

    /// Replay a program, stopping at the first failing call.
    pub fn run(&mut self, program: &Program) -> Result<&mut Self, OpError> {
        for call in program {
            self.call(&call.op, &call.args)?;
        }
        Ok(self)
    }

    fn dispatch(&mut self, op: Operation, args: &[Value]) -> Result<(), OpError> {
        if op != Operation::EnterSubgraph {
            return apply_operation(&mut self.chart, op, args);
        }

        let (id, label, body) = decode_subgraph(args)?;
        self.chart.open_subgraph(id, &label);
        let result = body
            .iter()
            .try_for_each(|call| self.call(&call.op, &call.args).map(|_| ()));
        self.chart.close_subgraph();
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::Session;
    use crate::model::{DiagramError, Shape};
    use crate::ops::OpError;
    use crate::terminology::Terminology;

    #[test]
    fn canonical_session_chains_calls() {
        let mut session = Session::default();
        session
            .call("graph", &[json!("LR")])
            .and_then(|s| s.call("node", &[json!("A"), json!("Start")]))
            .and_then(|s| s.call("edge", &[json!("B"), json!("go")]))
            .expect("chain");

        assert_eq!(
            session.to_text(),
            "flowchart LR\n    A[Start];\n    A-->|go|B;"
        );
    }

    #[test]
    fn unknown_names_are_rejected() {
        let mut session = Session::default();
        let err = session.call("teleport", &[]).unwrap_err();
        assert_eq!(
            err,
            OpError::UnknownOperation {
                name: "teleport".to_owned()
            }
        );
    }

    #[test]
    fn failed_calls_leave_the_session_usable() {
        let mut session = Session::default();
        let err = session.call("edge", &[json!("B")]).unwrap_err();
        let missing = DiagramError::MissingCursor {
            target: "B".to_owned(),
        };
        assert_eq!(err, OpError::Diagram(missing));

        session
            .call("node", &[json!("A"), json!("a")])
            .expect("node");
        session.call("edge", &[json!("B")]).expect("edge");
        assert_eq!(session.flowchart().edges().len(), 1);
    }

    #[test]
    fn subgraph_bodies_dispatch_through_the_same_table() {
        let terminology = Terminology::builder()
            .method("vertex", "node")
            .property("kind", "shape")
            .build()
            .expect("build");
        let mut session = Session::new(Arc::new(terminology));
        session
            .call(
                "subgraph",
                &[
                    json!("G"),
                    json!("Group"),
                    json!([{ "op": "vertex", "args": ["A", "In", { "kind": "circle" }] }]),
                ],
            )
            .expect("subgraph");

        let group = &session.flowchart().subgraphs()[0];
        assert_eq!(group.nodes()["A"].shape(), Shape::Circle);
        assert_eq!(
            session.to_text(),
            "flowchart TD\n    subgraph G[Group]\n        A((In));\n    end"
        );
    }

    #[test]
    fn failing_subgraph_body_closes_the_scope() {
        let mut session = Session::default();
        let body = json!([{ "op": "edge", "args": ["X"] }]);
        let err = session
            .call("subgraph", &[json!("G"), json!(""), body])
            .unwrap_err();
        let missing = DiagramError::MissingCursor {
            target: "X".to_owned(),
        };
        assert_eq!(err, OpError::Diagram(missing));
        assert_eq!(session.flowchart().depth(), 0);
    }
}
