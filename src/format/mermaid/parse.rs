// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Flowchart notation back to a construction [`Program`].
//!
//! Lines are classified by an ordered matcher list (structural keywords, then node definitions,
//! then edges); anything unclaimed is kept verbatim as an `addLine` call. Within every scope the
//! synthesized program defines nodes before edges, so the reconstructed text is equivalent to the
//! input modulo that reordering.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{json, Map, Value};

use super::escape::unescape_label;
use crate::model::{DiagramError, DiagramKind, Shape};
use crate::ops::{Call, Operation, Program};

/// Parse flowchart notation into the calls that rebuild it.
pub fn parse(text: &str) -> Result<Program, DiagramError> {
    let lines = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>();
    let first = lines.first().copied().unwrap_or_default();
    match DiagramKind::detect(first) {
        Some(DiagramKind::Flowchart) => {}
        Some(kind) => return Err(DiagramError::ParserUnavailable { kind }),
        None => {
            let kind = first.split_whitespace().next().unwrap_or_default();
            return Err(DiagramError::UnsupportedDiagramType {
                kind: kind.to_owned(),
            });
        }
    }

    let root = build_scopes(&lines);
    let mut program = Program::new();
    for call in synthesize(root.items) {
        program.push(call);
    }
    tracing::debug!(lines = lines.len(), calls = program.len(), "parsed");
    Ok(program)
}

/// [`parse`], rendered as a chained call expression.
pub fn parse_to_string(text: &str) -> Result<String, DiagramError> {
    parse(text).map(|program| program.to_string())
}

#[derive(Debug, Clone, PartialEq)]
enum Statement {
    Header(Option<String>),
    Comment {
        text: String,
        target: Option<String>,
    },
    SubgraphOpen {
        id: String,
        label: String,
    },
    End,
    Style {
        selector: String,
        properties: Map<String, Value>,
    },
    Class {
        name: String,
        ids: Vec<String>,
    },
    Node {
        id: String,
        label: String,
        shape: Shape,
    },
    Edge {
        from: String,
        arrow: String,
        label: String,
        to: String,
    },
    PassThrough(String),
}

impl Statement {
    fn is_node(&self) -> bool {
        matches!(self, Self::Node { .. })
    }

    fn is_edge(&self) -> bool {
        matches!(self, Self::Edge { .. })
    }
}

type ClassifyFn = fn(&str) -> Option<Statement>;

struct Matcher {
    id: &'static str,
    classify: ClassifyFn,
}

/// The order is significant: the first matcher to claim a line wins.
const MATCHERS: &[Matcher] = &[
    Matcher {
        id: "header",
        classify: match_header,
    },
    Matcher {
        id: "comment",
        classify: match_comment,
    },
    Matcher {
        id: "subgraph",
        classify: match_subgraph,
    },
    Matcher {
        id: "end",
        classify: match_end,
    },
    Matcher {
        id: "style",
        classify: match_style,
    },
    Matcher {
        id: "class",
        classify: match_class,
    },
    Matcher {
        id: "node",
        classify: match_node,
    },
    Matcher {
        id: "edge",
        classify: match_edge,
    },
];

fn classify(line: &str) -> Statement {
    for matcher in MATCHERS {
        if let Some(statement) = (matcher.classify)(line) {
            tracing::trace!(matcher = matcher.id, line, "classified");
            return statement;
        }
    }
    tracing::debug!(line, "keeping unrecognized line verbatim");
    Statement::PassThrough(line.to_owned())
}

fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("flowchart line pattern must compile"))
}

fn starts_with_word(line: &str, word: &str) -> bool {
    line.strip_prefix(word)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace()))
}

/// Structural keyword matchers claim their keyword even when the detail does not match; such
/// lines are kept verbatim.
fn keyword_or_verbatim(line: &str, detail: Option<Statement>) -> Option<Statement> {
    detail.or_else(|| Some(Statement::PassThrough(line.to_owned())))
}

fn match_header(line: &str) -> Option<Statement> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = pattern(&RE, r"^(?i:graph|flowchart)(?:\s+(\w+))?\s*;?$");
    let caps = re.captures(line)?;
    let direction = caps.get(1).map(|m| m.as_str().to_owned());
    Some(Statement::Header(direction))
}

fn match_comment(line: &str) -> Option<Statement> {
    static RE: OnceLock<Regex> = OnceLock::new();
    if !line.starts_with("%%") {
        return None;
    }
    let re = pattern(&RE, r"^%%\s*(.*?)(?:\s+for\s+(\w+))?\s*$");
    let detail = re.captures(line).map(|caps| Statement::Comment {
        text: caps.get(1).map_or("", |m| m.as_str()).to_owned(),
        target: caps.get(2).map(|m| m.as_str().to_owned()),
    });
    keyword_or_verbatim(line, detail)
}

fn match_subgraph(line: &str) -> Option<Statement> {
    static RE: OnceLock<Regex> = OnceLock::new();
    if !starts_with_word(line, "subgraph") {
        return None;
    }
    let re = pattern(&RE, r"^subgraph\s+(\w+)\s*(?:\[(.*)\])?\s*$");
    let detail = re.captures(line).map(|caps| Statement::SubgraphOpen {
        id: caps[1].to_owned(),
        label: caps.get(2).map_or("", |m| m.as_str()).to_owned(),
    });
    keyword_or_verbatim(line, detail)
}

fn match_end(line: &str) -> Option<Statement> {
    (line == "end").then_some(Statement::End)
}

fn match_style(line: &str) -> Option<Statement> {
    static RE: OnceLock<Regex> = OnceLock::new();
    if !starts_with_word(line, "style") {
        return None;
    }
    let re = pattern(&RE, r"^style\s+(\S+)\s+(.+)$");
    let detail = re.captures(line).map(|caps| {
        let body = caps[2].trim_end().trim_end_matches(';');
        let mut properties = Map::new();
        for part in body.split(',') {
            let Some((key, value)) = part.split_once(':') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            if !key.is_empty() && !value.is_empty() {
                properties.insert(key.to_owned(), Value::String(value.to_owned()));
            }
        }
        Statement::Style {
            selector: caps[1].to_owned(),
            properties,
        }
    });
    keyword_or_verbatim(line, detail)
}

fn match_class(line: &str) -> Option<Statement> {
    static RE: OnceLock<Regex> = OnceLock::new();
    if !starts_with_word(line, "class") {
        return None;
    }
    let re = pattern(&RE, r"^class\s+(.+)\s+(\w+)\s*;?$");
    let detail = re.captures(line).map(|caps| Statement::Class {
        name: caps[2].to_owned(),
        ids: caps[1]
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(ToOwned::to_owned)
            .collect(),
    });
    keyword_or_verbatim(line, detail)
}

/// `id[..]`, `id(..)`, `id{..}` or `id((..))`, tried in that order.
fn match_node(line: &str) -> Option<Statement> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = pattern(
        &RE,
        r"^(\w+)\s*(?:\[([^\]]*)\]|\(([^)]+)\)|\{([^}]+)\}|\(\(([^)]+)\)\))\s*;?$",
    );
    let caps = re.captures(line)?;
    let (shape, label) = Shape::PARSE_ORDER
        .iter()
        .zip(2..)
        .find_map(|(shape, group)| caps.get(group).map(|m| (*shape, m.as_str())))?;
    Some(Statement::Node {
        id: caps[1].to_owned(),
        label: unescape_label(label),
        shape,
    })
}

/// `from<arrow>to` with an optional `|label|` after the arrow.
fn match_edge(line: &str) -> Option<Statement> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = pattern(
        &RE,
        r"^(\w+)\s*(-{2,}>|={2,}>|-\.+->|-{3,})\s*(?:\|([^|]*)\|)?\s*(\w+)\s*;?$",
    );
    let caps = re.captures(line)?;
    let label = caps.get(3).map(|m| unescape_label(m.as_str()));
    Some(Statement::Edge {
        from: caps[1].to_owned(),
        arrow: caps[2].to_owned(),
        label: label.unwrap_or_default(),
        to: caps[4].to_owned(),
    })
}

#[derive(Debug, Default)]
struct Scope {
    header: Option<(String, String)>,
    items: Vec<Item>,
}

#[derive(Debug)]
enum Item {
    Statement(Statement),
    Block(Scope),
}

fn build_scopes(lines: &[&str]) -> Scope {
    let mut stack = vec![Scope::default()];
    for line in lines {
        let statement = classify(line);
        match statement {
            Statement::SubgraphOpen { id, label } => {
                stack.push(Scope {
                    header: Some((id, label)),
                    items: Vec::new(),
                });
            }
            Statement::End if stack.len() > 1 => close_scope(&mut stack),
            Statement::End => {
                tracing::warn!("unmatched `end` kept verbatim");
                let verbatim = Statement::PassThrough((*line).to_owned());
                push_item(&mut stack, Item::Statement(verbatim));
            }
            Statement::PassThrough(raw) => {
                tracing::warn!(line = %raw, "unrecognized flowchart line kept verbatim");
                push_item(&mut stack, Item::Statement(Statement::PassThrough(raw)));
            }
            other => push_item(&mut stack, Item::Statement(other)),
        }
    }
    while stack.len() > 1 {
        tracing::warn!(depth = stack.len() - 1, "closing open subgraph");
        close_scope(&mut stack);
    }
    stack.pop().unwrap_or_default()
}

fn push_item(stack: &mut [Scope], item: Item) {
    if let Some(scope) = stack.last_mut() {
        scope.items.push(item);
    }
}

fn close_scope(stack: &mut Vec<Scope>) {
    if let Some(scope) = stack.pop() {
        push_item(stack, Item::Block(scope));
    }
}

/// Leading statements up to the first subgraph block, then node definitions, then edges, then
/// everything else in source order.
fn reorder(items: Vec<Item>) -> Vec<Item> {
    let mut leading = Vec::new();
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    let mut rest = Vec::new();
    let mut seen_block = false;

    for item in items {
        match item {
            Item::Statement(statement) if statement.is_node() => {
                nodes.push(Item::Statement(statement));
            }
            Item::Statement(statement) if statement.is_edge() => {
                edges.push(Item::Statement(statement));
            }
            Item::Block(scope) => {
                seen_block = true;
                rest.push(Item::Block(scope));
            }
            other if seen_block => rest.push(other),
            other => leading.push(other),
        }
    }

    leading.extend(nodes);
    leading.extend(edges);
    leading.extend(rest);
    leading
}

fn synthesize(items: Vec<Item>) -> Vec<Call> {
    let mut calls = Vec::new();
    for item in reorder(items) {
        match item {
            Item::Block(scope) => {
                let (id, label) = scope.header.unwrap_or_default();
                let body = synthesize(scope.items)
                    .into_iter()
                    .map(call_value)
                    .collect::<Vec<_>>();
                let args = vec![json!(id), json!(label), Value::Array(body)];
                calls.push(call(Operation::EnterSubgraph, args));
            }
            Item::Statement(statement) => statement_calls(statement, &mut calls),
        }
    }
    calls
}

fn statement_calls(statement: Statement, calls: &mut Vec<Call>) {
    match statement {
        Statement::Header(Some(direction)) => {
            calls.push(call(Operation::SetDirection, vec![json!(direction)]));
        }
        Statement::Header(None) => {}
        Statement::Comment { text, target } => {
            let mut args = vec![json!(text)];
            args.extend(target.map(Value::String));
            calls.push(call(Operation::Annotate, args));
        }
        Statement::Style { selector, properties } => {
            let args = vec![json!(selector), Value::Object(properties)];
            calls.push(call(Operation::ApplyStyle, args));
        }
        Statement::Class { name, ids } => {
            let mut args = vec![json!(name)];
            args.extend(ids.into_iter().map(Value::String));
            calls.push(call(Operation::AssignClass, args));
        }
        Statement::Node { id, label, shape } => {
            calls.push(call(
                Operation::DefineOrSelectNode,
                vec![json!(id), json!(label), json!({ "shape": shape.name() })],
            ));
        }
        Statement::Edge { from, arrow, label, to } => {
            calls.push(call(Operation::DefineOrSelectNode, vec![json!(from)]));
            calls.push(call(
                Operation::ConnectEdge,
                vec![json!(to), json!(label), json!({ "type": arrow })],
            ));
        }
        Statement::PassThrough(line) => calls.push(call(Operation::AddLine, vec![json!(line)])),
        // Scope boundaries are resolved before synthesis.
        Statement::SubgraphOpen { .. } | Statement::End => {}
    }
}

/// Calls are written with the short keyword-style names where one exists.
fn call(op: Operation, args: Vec<Value>) -> Call {
    let name = op.builtin_aliases().first().copied().unwrap_or(op.name());
    Call::new(name, args)
}

fn call_value(call: Call) -> Value {
    json!({ "op": call.op, "args": call.args })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{classify, parse, parse_to_string, Statement};
    use crate::model::{DiagramError, DiagramKind, Shape};
    use crate::ops::Call;

    fn ops(calls: &[Call]) -> Vec<&str> {
        calls.iter().map(|call| call.op.as_str()).collect()
    }

    #[rstest]
    #[case("A[Start]", Shape::Rect, "Start")]
    #[case("A(Start);", Shape::Round, "Start")]
    #[case("A{Ok?}", Shape::Diamond, "Ok?")]
    #[case("A((Hub))", Shape::Circle, "Hub")]
    #[case("A[]", Shape::Rect, "")]
    #[case("A([Pill])", Shape::Round, "[Pill]")]
    #[case("A[/Lean\\]", Shape::Rect, "/Lean\\")]
    fn node_forms_decode_in_precedence_order(
        #[case] line: &str,
        #[case] shape: Shape,
        #[case] label: &str,
    ) {
        assert_eq!(
            classify(line),
            Statement::Node {
                id: "A".to_owned(),
                label: label.to_owned(),
                shape
            }
        );
    }

    #[rstest]
    #[case("A-->B", "-->", "")]
    #[case("A --> B;", "-->", "")]
    #[case("A-->|go|B", "-->", "go")]
    #[case("A-.->B", "-.->", "")]
    #[case("A==>|yes|B;", "==>", "yes")]
    #[case("A---B", "---", "")]
    #[case("A--->B", "--->", "")]
    fn edge_forms_keep_arrow_and_label_apart(
        #[case] line: &str,
        #[case] arrow: &str,
        #[case] label: &str,
    ) {
        assert_eq!(
            classify(line),
            Statement::Edge {
                from: "A".to_owned(),
                arrow: arrow.to_owned(),
                label: label.to_owned(),
                to: "B".to_owned()
            }
        );
    }

    #[test]
    fn structural_keywords_win_over_node_and_edge_patterns() {
        assert_eq!(
            classify("subgraph G[Group]"),
            Statement::SubgraphOpen {
                id: "G".to_owned(),
                label: "Group".to_owned()
            }
        );
        assert_eq!(
            classify("class A,C important;"),
            Statement::Class {
                name: "important".to_owned(),
                ids: vec!["A".to_owned(), "C".to_owned()]
            }
        );
        assert_eq!(
            classify("%% Workflow note for A"),
            Statement::Comment {
                text: "Workflow note".to_owned(),
                target: Some("A".to_owned())
            }
        );
        assert_eq!(
            classify("%% plain"),
            Statement::Comment {
                text: "plain".to_owned(),
                target: None
            }
        );
        let bare = Statement::PassThrough("style".to_owned());
        assert_eq!(classify("style"), bare);
    }

    #[test]
    fn style_values_drop_the_statement_terminator() {
        let Statement::Style { selector, properties } = classify("style A fill:#f9f,stroke:#333;")
        else {
            panic!("expected a style statement");
        };
        assert_eq!(selector, "A");
        assert_eq!(properties["fill"], "#f9f");
        assert_eq!(properties["stroke"], "#333");
    }

    #[test]
    fn unknown_lines_are_kept_verbatim() {
        for line in ["click A callback", "A[x] --> B", "classDef hot fill:#f00"] {
            assert_eq!(classify(line), Statement::PassThrough(line.to_owned()));
        }
    }

    #[test]
    fn nodes_are_hoisted_before_edges_after_leading_statements() {
        let program = parse("graph LR\nA-->B\nA[Start]\nB(End)\n%% tail").expect("parse");
        let expected = ["graph", "note", "node", "node", "node", "edge"];
        assert_eq!(ops(program.calls()), expected);
        assert_eq!(program.calls()[0].args, vec![json!("LR")]);
        let calls = program.calls();
        assert_eq!(
            calls[2].args,
            vec![json!("A"), json!("Start"), json!({ "shape": "rect" })]
        );
        assert_eq!(calls[4].args, vec![json!("A")]);
        assert_eq!(
            calls[5].args,
            vec![json!("B"), json!(""), json!({ "type": "-->" })]
        );
    }

    #[test]
    fn statements_after_the_first_subgraph_follow_the_hoisted_nodes() {
        let program = parse(
            "flowchart TD\n%% intro\nsubgraph G[Group]\nX[In]\nend\nstyle X fill:#fff\nA[Out]",
        )
        .expect("parse");
        let expected = ["graph", "note", "node", "subgraph", "style"];
        assert_eq!(ops(program.calls()), expected);
        assert_eq!(program.calls()[2].args[0], json!("A"));
        assert_eq!(
            program.calls()[3].args[2],
            json!([{ "op": "node", "args": ["X", "In", { "shape": "rect" }] }])
        );
    }

    #[test]
    fn nested_subgraphs_become_nested_bodies() {
        let program = parse(
            "flowchart TD\nsubgraph Outer[O]\nsubgraph Inner[I]\nA[a]\nend\nB[b]\nend",
        )
        .expect("parse");
        assert_eq!(program.len(), 2);
        let body = &program.calls()[1].args[2];
        assert_eq!(body[0]["op"], "node");
        assert_eq!(body[0]["args"][0], "B");
        assert_eq!(body[1]["op"], "subgraph");
        assert_eq!(body[1]["args"][2][0]["args"][0], "A");
    }

    #[test]
    fn unmatched_end_is_verbatim_and_open_scopes_close_at_eof() {
        let program = parse("flowchart TD\nend\nsubgraph G[Open]\nA[a]").expect("parse");
        assert_eq!(ops(program.calls()), ["graph", "addLine", "subgraph"]);
        assert_eq!(program.calls()[1].args, vec![json!("end")]);
        assert_eq!(program.calls()[2].args[2][0]["args"][0], "A");
    }

    #[test]
    fn bare_header_keeps_the_default_direction() {
        let program = parse("flowchart\nA[a]").expect("parse");
        assert_eq!(ops(program.calls()), ["node"]);
    }

    #[test]
    fn escaped_labels_are_decoded() {
        let program = parse("flowchart TD\nA[say \\\"hi\\\"]\nA-->|line\\nbreak|B").expect("parse");
        assert_eq!(program.calls()[1].args[1], json!("say \"hi\""));
        assert_eq!(program.calls()[3].args[1], json!("line\nbreak"));
    }

    #[rstest]
    #[case("sequenceDiagram\nAlice->>Bob: hi", DiagramKind::Sequence)]
    #[case("stateDiagram-v2\n[*] --> A", DiagramKind::State)]
    #[case("pie\n\"a\": 1", DiagramKind::Pie)]
    fn other_known_kinds_have_no_parser(#[case] text: &str, #[case] kind: DiagramKind) {
        let err = parse(text).unwrap_err();
        assert_eq!(err, DiagramError::ParserUnavailable { kind });
    }

    #[test]
    fn unknown_headers_are_unsupported() {
        assert_eq!(
            parse("venn\nA").unwrap_err(),
            DiagramError::UnsupportedDiagramType {
                kind: "venn".to_owned()
            }
        );
        assert_eq!(
            parse("   \n").unwrap_err(),
            DiagramError::UnsupportedDiagramType {
                kind: String::new()
            }
        );
    }

    #[test]
    fn parse_to_string_renders_the_chain() {
        let rendered = parse_to_string("graph TD\nA[Start]").expect("parse");
        assert_eq!(
            rendered,
            "flowchart()\n    .graph(\"TD\")\n    .node(\"A\", \"Start\", {\"shape\":\"rect\"});"
        );
    }
}
