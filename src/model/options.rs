// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use super::shape::Shape;

/// Ordered CSS-ish `key -> value` pairs.
pub type StyleMap = IndexMap<String, String>;

/// Opaque data attached to nodes and edges. Never emitted.
pub type Metadata = Map<String, Value>;

pub const DEFAULT_ARROW: &str = "-->";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeOptions {
    pub shape: Option<Shape>,
    pub style: StyleMap,
    pub metadata: Metadata,
    /// Keys that carry no meaning for a node; kept so emptiness matches the caller's map.
    pub extra: Map<String, Value>,
}

impl NodeOptions {
    pub fn shape(shape: Shape) -> Self {
        Self {
            shape: Some(shape),
            ..Self::default()
        }
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.shape.is_none()
            && self.style.is_empty()
            && self.metadata.is_empty()
            && self.extra.is_empty()
    }

    /// Decode an option map (`shape`, `style`, `metadata`); other keys land in `extra`.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let mut options = Self::default();
        for (key, value) in map {
            match key.as_str() {
                "shape" => options.shape = value.as_str().map(Shape::from_name),
                "style" => options.style = style_map_from_value(value),
                "metadata" => options.metadata = value.as_object().cloned().unwrap_or_default(),
                _ => {
                    tracing::debug!(key = %key, "ignoring unrecognized node option");
                    options.extra.insert(key.clone(), value.clone());
                }
            }
        }
        options
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EdgeOptions {
    /// Arrow token, written to option maps as `type`.
    pub arrow: Option<String>,
    pub style: StyleMap,
    pub metadata: Metadata,
    pub extra: Map<String, Value>,
}

impl EdgeOptions {
    pub fn arrow(arrow: impl Into<String>) -> Self {
        Self {
            arrow: Some(arrow.into()),
            ..Self::default()
        }
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn arrow_or_default(&self) -> &str {
        self.arrow.as_deref().unwrap_or(DEFAULT_ARROW)
    }

    pub fn from_map(map: &Map<String, Value>) -> Self {
        let mut options = Self::default();
        for (key, value) in map {
            match key.as_str() {
                "type" => options.arrow = value.as_str().map(ToOwned::to_owned),
                "style" => options.style = style_map_from_value(value),
                "metadata" => options.metadata = value.as_object().cloned().unwrap_or_default(),
                _ => {
                    tracing::debug!(key = %key, "ignoring unrecognized edge option");
                    options.extra.insert(key.clone(), value.clone());
                }
            }
        }
        options
    }
}

/// Flatten a JSON object into style pairs. Non-string scalars keep their JSON spelling.
pub fn style_map_from_value(value: &Value) -> StyleMap {
    let Some(map) = value.as_object() else {
        return StyleMap::new();
    };
    map.iter()
        .map(|(key, value)| (key.clone(), scalar_to_string(value)))
        .collect()
}

pub(crate) fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{EdgeOptions, NodeOptions, Shape};

    #[test]
    fn node_options_decode_known_keys_and_keep_the_rest() {
        let map = json!({
            "shape": "Diamond",
            "style": { "fill": "#fff", "stroke-width": 2 },
            "metadata": { "owner": "ops" },
            "color": "red"
        });
        let options = NodeOptions::from_map(map.as_object().expect("object"));

        assert_eq!(options.shape, Some(Shape::Diamond));
        let style = options
            .style
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(style, [("fill", "#fff"), ("stroke-width", "2")]);
        assert_eq!(options.metadata.get("owner"), Some(&json!("ops")));
        assert_eq!(options.extra.get("color"), Some(&json!("red")));
        assert!(!options.is_empty());
    }

    #[test]
    fn empty_map_decodes_to_empty_options() {
        let map = serde_json::Map::new();
        assert!(NodeOptions::from_map(&map).is_empty());
        assert_eq!(EdgeOptions::from_map(&map).arrow_or_default(), "-->");
    }

    #[test]
    fn builders_collect_style_in_insertion_order() {
        let node = NodeOptions::shape(Shape::Round)
            .with_style("stroke", "#333")
            .with_style("fill", "#f9f")
            .with_metadata("owner", "ops");
        assert_eq!(node.style.keys().collect::<Vec<_>>(), ["stroke", "fill"]);
        assert_eq!(node.metadata["owner"], "ops");

        let edge = EdgeOptions::arrow("==>").with_style("stroke-width", "2px");
        assert_eq!(edge.style["stroke-width"], "2px");
        assert_eq!(edge.arrow_or_default(), "==>");
    }

    #[test]
    fn edge_options_read_the_arrow_from_type() {
        let map = json!({ "type": "-.->" });
        let options = EdgeOptions::from_map(map.as_object().expect("object"));
        assert_eq!(options.arrow_or_default(), "-.->");
    }
}
