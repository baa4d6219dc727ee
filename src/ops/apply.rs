// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::{Map, Value};
use smol_str::SmolStr;

use super::{Call, OpError, Operation};
use crate::model::options::{scalar_to_string, style_map_from_value};
use crate::model::{EdgeOptions, Flowchart, NodeOptions};

/// Apply one canonical operation with already-routed arguments.
///
/// [`Operation::EnterSubgraph`] is not handled here because its body has to be dispatched by the
/// caller; see [`decode_subgraph`].
pub(crate) fn apply_operation(
    chart: &mut Flowchart,
    op: Operation,
    args: &[Value],
) -> Result<(), OpError> {
    let args = Args { op, args };
    match op {
        Operation::SetDirection => {
            chart.set_direction(args.text(0)?);
        }
        Operation::DefineOrSelectNode => {
            let label = args.opt_text(1)?;
            chart.define_or_select_node(args.id(0)?, label.as_deref(), args.node_options(2)?);
        }
        Operation::ConnectEdge => {
            let label = args.opt_text(1)?;
            chart.connect_edge(args.id(0)?, label.as_deref(), args.edge_options(2)?)?;
        }
        Operation::ApplyStyle => {
            let properties = args
                .map(1)?
                .map(|map| style_map_from_value(&Value::Object(map.clone())));
            chart.apply_style(&args.text(0)?, properties.unwrap_or_default());
        }
        Operation::AssignClass => {
            chart.assign_class(&args.text(0)?, args.id_list(1)?);
        }
        Operation::Annotate => {
            let target = args.opt_text(1)?;
            chart.annotate(&args.text(0)?, target.as_deref());
        }
        Operation::Flow => {
            let label = args.opt_text(1)?;
            chart.flow(args.id(0)?, label.as_deref(), args.node_options(2)?);
        }
        Operation::To => {
            let label = args.opt_text(1)?;
            let edge_label = args.opt_text(3)?;
            chart.to(
                args.id(0)?,
                label.as_deref(),
                args.node_options(2)?,
                edge_label.as_deref(),
                args.edge_options(4)?,
            );
        }
        Operation::AddLine => {
            chart.add_line(args.text(0)?);
        }
        Operation::EnterSubgraph => {
            return Err(OpError::InvalidArgument {
                op: op.name().to_owned(),
                index: 2,
                expected: "a body dispatched by the caller",
            });
        }
    }
    Ok(())
}

/// Split `enterSubgraph(id, label, body)` arguments. A missing body is an empty subgraph.
pub(crate) fn decode_subgraph(args: &[Value]) -> Result<(SmolStr, String, Vec<Call>), OpError> {
    let args = Args {
        op: Operation::EnterSubgraph,
        args,
    };
    let id = args.id(0)?;
    let label = args.opt_text(1)?.unwrap_or_default();
    let body = match args.args.get(2) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| serde_json::from_value::<Call>(item.clone()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| args.invalid(2, "an array of calls"))?,
        Some(_) => return Err(args.invalid(2, "an array of calls")),
    };
    Ok((id, label, body))
}

struct Args<'a> {
    op: Operation,
    args: &'a [Value],
}

impl Args<'_> {
    fn invalid(&self, index: usize, expected: &'static str) -> OpError {
        OpError::InvalidArgument {
            op: self.op.name().to_owned(),
            index,
            expected,
        }
    }

    fn text(&self, index: usize) -> Result<String, OpError> {
        self.opt_text(index)?.ok_or_else(|| self.invalid(index, "a string"))
    }

    fn id(&self, index: usize) -> Result<SmolStr, OpError> {
        self.text(index).map(SmolStr::from)
    }

    fn opt_text(&self, index: usize) -> Result<Option<String>, OpError> {
        match self.args.get(index) {
            None | Some(Value::Null) => Ok(None),
            Some(value @ (Value::String(_) | Value::Number(_) | Value::Bool(_))) => {
                Ok(Some(scalar_to_string(value)))
            }
            Some(_) => Err(self.invalid(index, "a string")),
        }
    }

    fn map(&self, index: usize) -> Result<Option<&Map<String, Value>>, OpError> {
        match self.args.get(index) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(_) => Err(self.invalid(index, "an option map")),
        }
    }

    fn node_options(&self, index: usize) -> Result<NodeOptions, OpError> {
        let options = self.map(index)?.map(NodeOptions::from_map);
        Ok(options.unwrap_or_default())
    }

    fn edge_options(&self, index: usize) -> Result<EdgeOptions, OpError> {
        let options = self.map(index)?.map(EdgeOptions::from_map);
        Ok(options.unwrap_or_default())
    }

    /// Remaining arguments as ids; nested arrays are flattened.
    fn id_list(&self, start: usize) -> Result<Vec<SmolStr>, OpError> {
        let mut ids = Vec::new();
        for (offset, value) in self.args.iter().enumerate().skip(start) {
            match value {
                Value::Array(items) => {
                    for item in items {
                        let id = item.as_str().ok_or_else(|| self.invalid(offset, "node ids"))?;
                        ids.push(SmolStr::from(id));
                    }
                }
                Value::String(id) => ids.push(SmolStr::from(id.as_str())),
                Value::Null => {}
                _ => return Err(self.invalid(offset, "node ids")),
            }
        }
        Ok(ids)
    }
}
