// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use proteus::model::{EdgeOptions, Flowchart, NodeOptions, Shape};
use proteus::{Call, Program};
use serde_json::json;

fn ascii_repeat_to_len(prefix: &str, fill: char, target_len: usize) -> String {
    if prefix.len() >= target_len {
        return prefix[..target_len].to_owned();
    }

    let mut out = String::with_capacity(target_len);
    out.push_str(prefix);
    while out.len() < target_len {
        out.push(fill);
    }
    out
}

pub fn checksum_flowchart(chart: &Flowchart) -> u64 {
    let mut acc = 0u64;
    for (id, node) in chart.nodes() {
        acc = acc.wrapping_mul(131).wrapping_add(id.len() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(node.label().len() as u64);
    }
    for edge in chart.edges() {
        acc = acc.wrapping_mul(131).wrapping_add(edge.to_node_id().len() as u64);
    }
    acc.wrapping_mul(131).wrapping_add(chart.subgraphs().len() as u64)
}

pub fn checksum_program(program: &Program) -> u64 {
    program.iter().fold(0u64, |acc, call| {
        acc.wrapping_mul(131)
            .wrapping_add(call.op.len() as u64)
            .wrapping_add(call.args.len() as u64)
    })
}

pub mod flow {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DagParams {
        pub layers: usize,
        pub nodes_per_layer: usize,
        pub fanout: usize,
        pub label_len: usize,
        /// Every n-th layer is wrapped in a subgraph (0 = none).
        pub subgraph_every: usize,
    }

    impl DagParams {
        pub const fn new(
            layers: usize,
            nodes_per_layer: usize,
            fanout: usize,
            label_len: usize,
            subgraph_every: usize,
        ) -> Self {
            Self { layers, nodes_per_layer, fanout, label_len, subgraph_every }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Case {
        Small,
        MediumDense,
        LargeLongLabels,
    }

    impl Case {
        pub const ALL: [Case; 3] = [Case::Small, Case::MediumDense, Case::LargeLongLabels];

        pub const fn id(self) -> &'static str {
            match self {
                Self::Small => "small",
                Self::MediumDense => "medium_dense",
                Self::LargeLongLabels => "large_long_labels",
            }
        }

        pub const fn params(self) -> DagParams {
            match self {
                Self::Small => DagParams::new(6, 10, 2, 12, 0),
                Self::MediumDense => DagParams::new(12, 20, 4, 12, 3),
                Self::LargeLongLabels => DagParams::new(24, 35, 4, 64, 4),
            }
        }
    }

    fn node_id(layer: usize, idx: usize) -> String {
        format!("l{layer:02}_n{idx:04}")
    }

    fn shape_for(idx: usize) -> Shape {
        Shape::PARSE_ORDER[idx % Shape::PARSE_ORDER.len()]
    }

    /// Deterministic layered DAG as a call program.
    ///
    /// - All edges go from lower to higher layers.
    /// - Node shapes cycle through the parseable shapes, so the text round-trips.
    pub fn program(params: DagParams) -> Program {
        assert!(params.layers >= 2, "layers must be >= 2");
        assert!(params.nodes_per_layer >= 1, "nodes_per_layer must be >= 1");

        let mut program = Program::new();
        program.push(Call::new("graph", vec![json!("LR")]));

        for layer in 0..params.layers {
            let nodes = (0..params.nodes_per_layer)
                .map(|idx| {
                    let id = node_id(layer, idx);
                    let label = format!("Node_{id}");
                    let label = ascii_repeat_to_len(&label, 'x', params.label_len);
                    let options = json!({ "shape": shape_for(idx).name() });
                    Call::new("node", vec![json!(id), json!(label), options])
                })
                .collect::<Vec<_>>();

            let wrap = params.subgraph_every > 0 && layer % params.subgraph_every == 0;
            if wrap {
                let body = nodes
                    .into_iter()
                    .map(|call| json!({ "op": call.op, "args": call.args }))
                    .collect::<Vec<_>>();
                let id = format!("layer{layer:02}");
                let label = format!("Layer {layer}");
                let args = vec![json!(id), json!(label), json!(body)];
                program.push(Call::new("subgraph", args));
            } else {
                for call in nodes {
                    program.push(call);
                }
            }
        }

        let fanout = params.fanout.min(params.nodes_per_layer);
        for layer in 0..params.layers - 1 {
            for idx in 0..params.nodes_per_layer {
                for k in 0..fanout {
                    let to_idx = (idx + k) % params.nodes_per_layer;
                    program.push(Call::new("node", vec![json!(node_id(layer, idx))]));
                    let label = if k == 0 { String::new() } else { format!("e{k}") };
                    let target = node_id(layer + 1, to_idx);
                    let args = vec![json!(target), json!(label), json!({ "type": "-->" })];
                    program.push(Call::new("edge", args));
                }
            }
        }

        program
    }

    /// The same DAG built directly on the model.
    pub fn chart(params: DagParams) -> Flowchart {
        let mut chart = Flowchart::new("LR");
        for layer in 0..params.layers {
            for idx in 0..params.nodes_per_layer {
                let id = node_id(layer, idx);
                let label = ascii_repeat_to_len(&format!("Node_{id}"), 'x', params.label_len);
                chart.define_or_select_node(id, Some(&label), NodeOptions::shape(shape_for(idx)));
            }
        }
        let fanout = params.fanout.min(params.nodes_per_layer);
        for layer in 0..params.layers - 1 {
            for idx in 0..params.nodes_per_layer {
                for k in 0..fanout {
                    let to_idx = (idx + k) % params.nodes_per_layer;
                    chart.select(node_id(layer, idx));
                    chart
                        .connect_edge(node_id(layer + 1, to_idx), None, EdgeOptions::default())
                        .expect("cursor is set");
                }
            }
        }
        chart
    }
}
