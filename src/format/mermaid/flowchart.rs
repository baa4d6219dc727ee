// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canonical flowchart line builders and the text projection of a [`Flowchart`].
//!
//! The model calls the line builders at mutation time, so the buffered text always matches the
//! operations applied so far. [`export_flowchart`] only stitches buffers together.

use super::escape::escape_label;
use crate::model::flow::{Entry, FlowSubgraph, Flowchart};
use crate::model::options::StyleMap;
use crate::model::shape::Shape;

pub const FLOWCHART_KEYWORD: &str = "flowchart";
pub const SUBGRAPH_END: &str = "end";
const INDENT: &str = "    ";

pub fn header_line(direction: &str) -> String {
    format!("{FLOWCHART_KEYWORD} {direction}")
}

/// `id<open>label<close>;` with the label escaped.
pub fn node_line(id: &str, label: &str, shape: Shape) -> String {
    let (open, close) = shape.delimiters();
    let label = escape_label(label);
    let mut out = String::with_capacity(id.len() + open.len() + label.len() + close.len() + 1);
    out.push_str(id);
    out.push_str(open);
    out.push_str(&label);
    out.push_str(close);
    out.push(';');
    out
}

/// `from<arrow>|label|to;`, the pipe section only for a non-empty label.
pub fn edge_line(from: &str, arrow: &str, label: &str, to: &str) -> String {
    let mut out = String::new();
    out.push_str(from);
    out.push_str(arrow);
    if !label.is_empty() {
        out.push('|');
        out.push_str(&escape_label(label));
        out.push('|');
    }
    out.push_str(to);
    out.push(';');
    out
}

pub fn subgraph_open_line(id: &str, label: &str) -> String {
    format!("subgraph {id}[{label}]")
}

/// `style selector k1:v1,k2:v2;` in insertion order.
pub fn style_line(selector: &str, properties: &StyleMap) -> String {
    let props = properties
        .iter()
        .map(|(key, value)| format!("{key}:{value}"))
        .collect::<Vec<_>>()
        .join(",");
    format!("style {selector} {props};")
}

pub fn class_line<S: AsRef<str>>(class_name: &str, node_ids: &[S]) -> String {
    let ids = node_ids.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");
    format!("class {ids} {class_name};")
}

pub fn note_line(text: &str, target: Option<&str>) -> String {
    match (text.is_empty(), target) {
        (true, Some(target)) => format!("%% for {target}"),
        (true, None) => "%%".to_owned(),
        (false, Some(target)) => format!("%% {text} for {target}"),
        (false, None) => format!("%% {text}"),
    }
}

/// Render the full notation text.
///
/// Open scopes are rendered with their header and the lines written so far, without `end`.
pub fn export_flowchart(chart: &Flowchart) -> String {
    let mut out = header_line(chart.direction());
    write_entries(&mut out, chart, chart.entries(), 1);

    for (depth, scope) in chart.open_scopes().iter().enumerate() {
        let depth = depth + 1;
        let header = subgraph_open_line(scope.id(), scope.label());
        push_line(&mut out, depth, &header);
        write_entries(&mut out, chart, scope.entries(), depth + 1);
    }

    out
}

fn write_entries(out: &mut String, chart: &Flowchart, entries: &[Entry], depth: usize) {
    for entry in entries {
        match entry {
            Entry::Line(line) => push_line(out, depth, line),
            Entry::Block(index) => {
                let Some(subgraph) = chart.subgraphs().get(*index) else {
                    continue;
                };
                write_block(out, chart, subgraph, depth);
            }
        }
    }
}

fn write_block(out: &mut String, chart: &Flowchart, subgraph: &FlowSubgraph, depth: usize) {
    let header = subgraph_open_line(subgraph.id(), subgraph.label());
    push_line(out, depth, &header);
    write_entries(out, chart, subgraph.entries(), depth + 1);
    push_line(out, depth, SUBGRAPH_END);
}

fn push_line(out: &mut String, depth: usize, line: &str) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(line);
}
