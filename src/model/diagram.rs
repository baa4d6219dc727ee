// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::Value;

use super::flow::{Flowchart, DEFAULT_DIRECTION};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagramError {
    #[error("unsupported diagram type: {kind}")]
    UnsupportedDiagramType { kind: String },
    #[error("a node must be selected before creating an edge to {target}")]
    MissingCursor { target: String },
    #[error("no parser is available for {kind} diagrams")]
    ParserUnavailable { kind: DiagramKind },
}

/// The notation kinds known to the construction surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramKind {
    Flowchart,
    Sequence,
    Class,
    EntityRelationship,
    State,
    Gantt,
    Pie,
    Journey,
    Mindmap,
    GitGraph,
}

impl DiagramKind {
    /// Resolve a construction name such as `flowchart`, `graph` or `erDiagram`.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name.to_ascii_lowercase().as_str() {
            "flowchart" | "flow" | "graph" => Self::Flowchart,
            "sequence" | "sequencediagram" => Self::Sequence,
            "class" | "classdiagram" => Self::Class,
            "er" | "erdiagram" | "entityrelationship" => Self::EntityRelationship,
            "state" | "statediagram" => Self::State,
            "gantt" | "ganttchart" => Self::Gantt,
            "pie" | "piechart" => Self::Pie,
            "journey" | "userjourney" => Self::Journey,
            "mindmap" => Self::Mindmap,
            "git" | "gitgraph" => Self::GitGraph,
            _ => return None,
        };
        Some(kind)
    }

    /// Detect the kind from the first line of notation text.
    pub fn detect(first_line: &str) -> Option<Self> {
        let line = first_line.trim();
        let keyword = line
            .split(|c: char| c.is_whitespace() || c == ';')
            .next()
            .unwrap_or("");
        let kind = match keyword {
            "graph" | "flowchart" => Self::Flowchart,
            _ if line.starts_with("sequenceDiagram") => Self::Sequence,
            _ if line.starts_with("classDiagram") => Self::Class,
            _ if line.starts_with("erDiagram") => Self::EntityRelationship,
            _ if line.starts_with("stateDiagram") => Self::State,
            _ if line.starts_with("gantt") => Self::Gantt,
            _ if line.starts_with("pie") => Self::Pie,
            _ if line.starts_with("journey") => Self::Journey,
            _ if line.starts_with("mindmap") => Self::Mindmap,
            _ if line.starts_with("gitGraph") => Self::GitGraph,
            _ => return None,
        };
        Some(kind)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Flowchart => "flowchart",
            Self::Sequence => "sequenceDiagram",
            Self::Class => "classDiagram",
            Self::EntityRelationship => "erDiagram",
            Self::State => "stateDiagram-v2",
            Self::Gantt => "gantt",
            Self::Pie => "pie",
            Self::Journey => "journey",
            Self::Mindmap => "mindmap",
            Self::GitGraph => "gitGraph",
        }
    }
}

impl std::fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A forward-only document for the notation kinds without a dedicated builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notation {
    kind: DiagramKind,
    header: String,
    lines: Vec<String>,
}

impl Notation {
    const INDENT: usize = 4;

    pub fn new(kind: DiagramKind, header: impl Into<String>) -> Self {
        Self {
            kind,
            header: header.into(),
            lines: Vec::new(),
        }
    }

    pub fn kind(&self) -> DiagramKind {
        self.kind
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn add_line(&mut self, line: &str, indent: usize) -> &mut Self {
        let mut out = " ".repeat(Self::INDENT * indent);
        out.push_str(line);
        self.lines.push(out);
        self
    }

    pub fn to_text(&self) -> String {
        let mut out = self.header.clone();
        for line in &self.lines {
            out.push('\n');
            out.push_str(line);
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Diagram {
    Flowchart(Flowchart),
    Notation(Notation),
}

impl Diagram {
    pub fn kind(&self) -> DiagramKind {
        match self {
            Self::Flowchart(_) => DiagramKind::Flowchart,
            Self::Notation(notation) => notation.kind(),
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            Self::Flowchart(chart) => chart.to_text(),
            Self::Notation(notation) => notation.to_text(),
        }
    }

    /// Append a verbatim line at the top indentation level.
    pub fn add_line(&mut self, line: &str) -> &mut Self {
        match self {
            Self::Flowchart(chart) => {
                chart.add_line(line);
            }
            Self::Notation(notation) => {
                notation.add_line(line, 1);
            }
        }
        self
    }

    pub fn as_flowchart(&self) -> Option<&Flowchart> {
        match self {
            Self::Flowchart(chart) => Some(chart),
            Self::Notation(_) => None,
        }
    }

    pub fn as_flowchart_mut(&mut self) -> Option<&mut Flowchart> {
        match self {
            Self::Flowchart(chart) => Some(chart),
            Self::Notation(_) => None,
        }
    }

    pub fn into_flowchart(self) -> Option<Flowchart> {
        match self {
            Self::Flowchart(chart) => Some(chart),
            Self::Notation(_) => None,
        }
    }
}

/// Create an empty diagram of the named kind.
///
/// Flowcharts take their direction from `args[0]` (default `TD`); state diagrams take `v1` or
/// `v2`. Other arguments are ignored.
pub fn construct(kind: &str, args: &[Value]) -> Result<Diagram, DiagramError> {
    let Some(resolved) = DiagramKind::from_name(kind) else {
        return Err(DiagramError::UnsupportedDiagramType {
            kind: kind.to_owned(),
        });
    };
    let first = args.first().and_then(Value::as_str);

    let diagram = match resolved {
        DiagramKind::Flowchart => {
            Diagram::Flowchart(Flowchart::new(first.unwrap_or(DEFAULT_DIRECTION)))
        }
        DiagramKind::State if first == Some("v1") => {
            Diagram::Notation(Notation::new(resolved, "stateDiagram"))
        }
        other => Diagram::Notation(Notation::new(other, other.keyword())),
    };
    tracing::debug!(kind = %resolved, "constructed diagram");
    Ok(diagram)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{construct, DiagramError, DiagramKind};
    use crate::model::NodeOptions;

    #[rstest]
    #[case("flowchart", DiagramKind::Flowchart)]
    #[case("Graph", DiagramKind::Flowchart)]
    #[case("sequenceDiagram", DiagramKind::Sequence)]
    #[case("er", DiagramKind::EntityRelationship)]
    #[case("userJourney", DiagramKind::Journey)]
    #[case("gitgraph", DiagramKind::GitGraph)]
    fn construct_resolves_kind_aliases(#[case] name: &str, #[case] expected: DiagramKind) {
        let diagram = construct(name, &[]).expect("construct");
        assert_eq!(diagram.kind(), expected);
    }

    #[test]
    fn construct_rejects_unknown_kinds() {
        let err = construct("venn", &[]).unwrap_err();
        assert_eq!(
            err,
            DiagramError::UnsupportedDiagramType {
                kind: "venn".to_owned()
            }
        );
    }

    #[test]
    fn flowchart_takes_direction_from_first_argument() {
        let diagram = construct("flowchart", &[json!("lr")]).expect("construct");
        assert_eq!(diagram.to_text(), "flowchart LR");
        let flow = construct("flow", &[]).expect("construct");
        assert_eq!(flow.to_text(), "flowchart TD");
    }

    #[test]
    fn notation_kinds_share_the_line_contract() {
        let mut diagram = construct("sequence", &[]).expect("construct");
        diagram.add_line("Alice->>Bob: hi");
        assert_eq!(diagram.to_text(), "sequenceDiagram\n    Alice->>Bob: hi");
        assert!(diagram.as_flowchart().is_none());

        let state = construct("state", &[json!("v1")]).expect("construct");
        assert_eq!(state.to_text(), "stateDiagram");
    }

    #[test]
    fn flowchart_diagrams_hand_out_their_builder() {
        let mut diagram = construct("graph", &[json!("LR")]).expect("construct");
        let chart = diagram.as_flowchart_mut().expect("flowchart");
        chart.define_or_select_node("A", Some("Start"), NodeOptions::default());
        assert_eq!(diagram.to_text(), "flowchart LR\n    A[Start];");

        let mut notation = construct("pie", &[]).expect("construct");
        assert!(notation.as_flowchart_mut().is_none());
    }

    #[rstest]
    #[case("flowchart TD", Some(DiagramKind::Flowchart))]
    #[case("graph LR;", Some(DiagramKind::Flowchart))]
    #[case("flowchart", Some(DiagramKind::Flowchart))]
    #[case("stateDiagram-v2", Some(DiagramKind::State))]
    #[case("graphviz", None)]
    #[case("venn", None)]
    fn detect_reads_the_header_keyword(#[case] line: &str, #[case] expected: Option<DiagramKind>) {
        assert_eq!(DiagramKind::detect(line), expected);
    }
}
