// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use indexmap::IndexMap;
use serde::Serialize;
use smol_str::SmolStr;

use super::options::{EdgeOptions, Metadata, NodeOptions, StyleMap};
use super::shape::Shape;
use super::DiagramError;
use crate::format::mermaid::flowchart as text;

pub const DEFAULT_DIRECTION: &str = "TD";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowNode {
    id: SmolStr,
    label: String,
    shape: Shape,
    style: StyleMap,
    metadata: Metadata,
}

impl FlowNode {
    pub fn new(id: impl Into<SmolStr>, label: impl Into<String>, options: NodeOptions) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            shape: options.shape.unwrap_or_default(),
            style: options.style,
            metadata: options.metadata,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn style(&self) -> &StyleMap {
        &self.style
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowEdge {
    from: SmolStr,
    to: SmolStr,
    label: String,
    arrow: String,
    style: StyleMap,
    metadata: Metadata,
}

impl FlowEdge {
    pub fn from_node_id(&self) -> &str {
        &self.from
    }

    pub fn to_node_id(&self) -> &str {
        &self.to
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn arrow(&self) -> &str {
        &self.arrow
    }

    pub fn style(&self) -> &StyleMap {
        &self.style
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

/// A buffered piece of notation: either a finished line or a closed subgraph block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Entry {
    Line(String),
    /// Index into [`Flowchart::subgraphs`].
    Block(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowSubgraph {
    id: SmolStr,
    label: String,
    nodes: IndexMap<SmolStr, FlowNode>,
    edges: Vec<FlowEdge>,
    #[serde(skip)]
    entries: Vec<Entry>,
}

impl FlowSubgraph {
    fn new(id: SmolStr, label: String) -> Self {
        Self {
            id,
            label,
            nodes: IndexMap::new(),
            edges: Vec::new(),
            entries: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn nodes(&self) -> &IndexMap<SmolStr, FlowNode> {
        &self.nodes
    }

    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    pub(crate) fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleRule {
    pub selector: String,
    pub properties: StyleMap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassAssignment {
    pub class_name: String,
    pub node_ids: Vec<SmolStr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub target: Option<SmolStr>,
}

/// Serializable view of everything recorded so far.
#[derive(Debug, Clone, Serialize)]
pub struct FlowchartSnapshot<'a> {
    pub direction: &'a str,
    pub nodes: &'a IndexMap<SmolStr, FlowNode>,
    pub edges: &'a [FlowEdge],
    pub subgraphs: &'a [FlowSubgraph],
    pub styles: &'a [StyleRule],
    pub classes: &'a [ClassAssignment],
    pub annotations: &'a [Annotation],
}

/// A flowchart under construction.
///
/// Every mutating method writes its canonical line at call time into the active scope, which is
/// either the top level or the innermost open subgraph. The cursor supplies the source of the
/// next edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Flowchart {
    direction: String,
    entries: Vec<Entry>,
    nodes: IndexMap<SmolStr, FlowNode>,
    edges: Vec<FlowEdge>,
    subgraphs: Vec<FlowSubgraph>,
    styles: Vec<StyleRule>,
    classes: Vec<ClassAssignment>,
    annotations: Vec<Annotation>,
    cursor: Option<SmolStr>,
    last_created: Option<SmolStr>,
    open: Vec<FlowSubgraph>,
}

impl Default for Flowchart {
    fn default() -> Self {
        Self::new(DEFAULT_DIRECTION)
    }
}

impl Flowchart {
    pub fn new(direction: impl AsRef<str>) -> Self {
        Self {
            direction: direction.as_ref().to_ascii_uppercase(),
            entries: Vec::new(),
            nodes: IndexMap::new(),
            edges: Vec::new(),
            subgraphs: Vec::new(),
            styles: Vec::new(),
            classes: Vec::new(),
            annotations: Vec::new(),
            cursor: None,
            last_created: None,
            open: Vec::new(),
        }
    }

    pub fn direction(&self) -> &str {
        &self.direction
    }

    /// Top-level nodes. Nodes defined inside a subgraph live on that subgraph.
    pub fn nodes(&self) -> &IndexMap<SmolStr, FlowNode> {
        &self.nodes
    }

    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    /// Closed subgraphs, in the order they were closed.
    pub fn subgraphs(&self) -> &[FlowSubgraph] {
        &self.subgraphs
    }

    pub fn styles(&self) -> &[StyleRule] {
        &self.styles
    }

    pub fn classes(&self) -> &[ClassAssignment] {
        &self.classes
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn last_created(&self) -> Option<&str> {
        self.last_created.as_deref()
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub(crate) fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub(crate) fn open_scopes(&self) -> &[FlowSubgraph] {
        &self.open
    }

    pub fn snapshot(&self) -> FlowchartSnapshot<'_> {
        FlowchartSnapshot {
            direction: &self.direction,
            nodes: &self.nodes,
            edges: &self.edges,
            subgraphs: &self.subgraphs,
            styles: &self.styles,
            classes: &self.classes,
            annotations: &self.annotations,
        }
    }

    /// The notation text for everything applied so far.
    pub fn to_text(&self) -> String {
        text::export_flowchart(self)
    }

    /// Store the orientation, uppercased. Any token is accepted.
    pub fn set_direction(&mut self, direction: impl AsRef<str>) -> &mut Self {
        self.direction = direction.as_ref().to_ascii_uppercase();
        self
    }

    /// Append a verbatim line to the active scope.
    pub fn add_line(&mut self, line: impl Into<String>) -> &mut Self {
        let line = line.into();
        tracing::trace!(line = %line, depth = self.open.len(), "emit");
        match self.open.last_mut() {
            Some(scope) => scope.entries.push(Entry::Line(line)),
            None => self.entries.push(Entry::Line(line)),
        }
        self
    }

    /// Define a node, or only move the cursor when `label` is `None` and `options` is empty.
    ///
    /// Redefining an id replaces the stored record and emits a second definition line.
    pub fn define_or_select_node(
        &mut self,
        id: impl Into<SmolStr>,
        label: Option<&str>,
        options: NodeOptions,
    ) -> &mut Self {
        let id = id.into();
        if label.is_none() && options.is_empty() {
            self.cursor = Some(id);
            return self;
        }

        let node = FlowNode::new(id.clone(), label.unwrap_or_default(), options);
        let line = text::node_line(&id, node.label(), node.shape());
        match self.open.last_mut() {
            Some(scope) => {
                scope.nodes.insert(id.clone(), node);
            }
            None => {
                self.nodes.insert(id.clone(), node);
            }
        }
        self.add_line(line);
        self.cursor = Some(id);
        self
    }

    pub fn node(&mut self, id: impl Into<SmolStr>, label: &str) -> &mut Self {
        self.define_or_select_node(id, Some(label), NodeOptions::default())
    }

    pub fn select(&mut self, id: impl Into<SmolStr>) -> &mut Self {
        self.cursor = Some(id.into());
        self
    }

    /// Connect the cursor node to `target` and move the cursor there.
    pub fn connect_edge(
        &mut self,
        target: impl Into<SmolStr>,
        label: Option<&str>,
        options: EdgeOptions,
    ) -> Result<&mut Self, DiagramError> {
        let target = target.into();
        let Some(from) = self.cursor.clone() else {
            return Err(DiagramError::MissingCursor {
                target: target.to_string(),
            });
        };
        self.push_edge(from, target, label.unwrap_or_default(), options);
        Ok(self)
    }

    pub fn edge(
        &mut self,
        target: impl Into<SmolStr>,
        label: &str,
    ) -> Result<&mut Self, DiagramError> {
        self.connect_edge(target, Some(label), EdgeOptions::default())
    }

    fn push_edge(&mut self, from: SmolStr, to: SmolStr, label: &str, options: EdgeOptions) {
        let arrow = options.arrow_or_default().to_owned();
        let line = text::edge_line(&from, &arrow, label, &to);
        let edge = FlowEdge {
            from,
            to: to.clone(),
            label: label.to_owned(),
            arrow,
            style: options.style,
            metadata: options.metadata,
        };
        match self.open.last_mut() {
            Some(scope) => scope.edges.push(edge),
            None => self.edges.push(edge),
        }
        self.add_line(line);
        self.cursor = Some(to);
    }

    /// Push a subgraph scope. Pair with [`Flowchart::close_subgraph`].
    pub fn open_subgraph(&mut self, id: impl Into<SmolStr>, label: &str) -> &mut Self {
        let id = id.into();
        tracing::debug!(id = %id, depth = self.open.len() + 1, "open subgraph");
        self.open.push(FlowSubgraph::new(id, label.to_owned()));
        self
    }

    /// Pop the innermost subgraph scope and place its block in the parent scope.
    pub fn close_subgraph(&mut self) -> &mut Self {
        let Some(scope) = self.open.pop() else {
            tracing::warn!("close_subgraph called with no open subgraph");
            return self;
        };
        tracing::debug!(id = %scope.id, depth = self.open.len(), "close subgraph");
        let index = self.subgraphs.len();
        self.subgraphs.push(scope);
        match self.open.last_mut() {
            Some(parent) => parent.entries.push(Entry::Block(index)),
            None => self.entries.push(Entry::Block(index)),
        }
        self
    }

    /// Run `body` inside a new subgraph scope. The scope is closed even when `body` fails.
    pub fn enter_subgraph<F, E>(
        &mut self,
        id: impl Into<SmolStr>,
        label: &str,
        body: F,
    ) -> Result<&mut Self, E>
    where
        F: FnOnce(&mut Self) -> Result<(), E>,
    {
        self.open_subgraph(id, label);
        let result = body(self);
        self.close_subgraph();
        result.map(|()| self)
    }

    pub fn apply_style<K, V>(
        &mut self,
        selector: &str,
        properties: impl IntoIterator<Item = (K, V)>,
    ) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let properties = properties
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect::<StyleMap>();
        let line = text::style_line(selector, &properties);
        self.styles.push(StyleRule {
            selector: selector.to_owned(),
            properties,
        });
        self.add_line(line)
    }

    pub fn assign_class<I, S>(&mut self, class_name: &str, node_ids: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let node_ids = node_ids.into_iter().map(Into::into).collect::<Vec<SmolStr>>();
        let line = text::class_line(class_name, &node_ids);
        self.classes.push(ClassAssignment {
            class_name: class_name.to_owned(),
            node_ids,
        });
        self.add_line(line)
    }

    pub fn annotate(&mut self, text: &str, target: Option<&str>) -> &mut Self {
        let line = text::note_line(text, target);
        self.annotations.push(Annotation {
            text: text.to_owned(),
            target: target.map(SmolStr::from),
        });
        self.add_line(line)
    }

    /// Start (or restart) a linear chain at `id`.
    pub fn flow(
        &mut self,
        id: impl Into<SmolStr>,
        label: Option<&str>,
        options: NodeOptions,
    ) -> &mut Self {
        let id = id.into();
        self.define_or_select_node(id.clone(), label, options);
        self.last_created = Some(id);
        self
    }

    /// Extend the chain: edge from the last created node to `id`, defining `id` when it is not
    /// yet known in the top level or the active scope. Without a chain this acts like
    /// [`Flowchart::flow`].
    pub fn to(
        &mut self,
        id: impl Into<SmolStr>,
        label: Option<&str>,
        node_options: NodeOptions,
        edge_label: Option<&str>,
        edge_options: EdgeOptions,
    ) -> &mut Self {
        let id = id.into();
        let Some(from) = self.last_created.clone() else {
            return self.flow(id, label, node_options);
        };

        self.push_edge(
            from,
            id.clone(),
            edge_label.unwrap_or_default(),
            edge_options,
        );

        let scope_nodes = self.open.last().map(|scope| &scope.nodes);
        let exists = self.nodes.contains_key(&id)
            || scope_nodes.is_some_and(|nodes| nodes.contains_key(&id));
        if !exists {
            self.define_or_select_node(id.clone(), label, node_options);
        }

        self.last_created = Some(id);
        self
    }
}
