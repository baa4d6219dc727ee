// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Shape codec: semantic node shapes and their Mermaid delimiter pairs.

use std::fmt;

use serde::Serialize;

/// A flowchart node shape.
///
/// Every variant serializes, but only [`Shape::PARSE_ORDER`] is recognized when reading notation
/// back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    #[default]
    Rect,
    Round,
    Stadium,
    Subroutine,
    Cylindrical,
    Circle,
    DoubleCircle,
    Asymmetric,
    Diamond,
    Hexagon,
    Parallelogram,
    ParallelogramAlt,
    Trapezoid,
    TrapezoidAlt,
}

impl Shape {
    /// Decode precedence used by the parser: bracket, parenthesis, brace, double parenthesis.
    ///
    /// The order matters because the parallelogram/trapezoid encodings share characters with the
    /// recognized forms.
    pub const PARSE_ORDER: [Shape; 4] = [Shape::Rect, Shape::Round, Shape::Diamond, Shape::Circle];

    /// Resolve a shape keyword. Unknown keywords fall back to [`Shape::Rect`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "round" => Self::Round,
            "stadium" => Self::Stadium,
            "subroutine" => Self::Subroutine,
            "cylindrical" => Self::Cylindrical,
            "circle" => Self::Circle,
            "doublecirc" | "double-circle" => Self::DoubleCircle,
            "asymmetric" => Self::Asymmetric,
            "diamond" | "rhombus" => Self::Diamond,
            "hexagon" => Self::Hexagon,
            "parallelogram" => Self::Parallelogram,
            "parallelogram-alt" => Self::ParallelogramAlt,
            "trapezoid" => Self::Trapezoid,
            "trapezoid-alt" => Self::TrapezoidAlt,
            _ => Self::Rect,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Round => "round",
            Self::Stadium => "stadium",
            Self::Subroutine => "subroutine",
            Self::Cylindrical => "cylindrical",
            Self::Circle => "circle",
            Self::DoubleCircle => "double-circle",
            Self::Asymmetric => "asymmetric",
            Self::Diamond => "diamond",
            Self::Hexagon => "hexagon",
            Self::Parallelogram => "parallelogram",
            Self::ParallelogramAlt => "parallelogram-alt",
            Self::Trapezoid => "trapezoid",
            Self::TrapezoidAlt => "trapezoid-alt",
        }
    }

    /// The `(prefix, suffix)` written around a node label.
    pub fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            Self::Rect => ("[", "]"),
            Self::Round => ("(", ")"),
            Self::Stadium => ("([", "])"),
            Self::Subroutine => ("[[", "]]"),
            Self::Cylindrical => ("[(", ")]"),
            Self::Circle => ("((", "))"),
            Self::DoubleCircle => ("(((", ")))"),
            Self::Asymmetric => (">", "]"),
            Self::Diamond => ("{", "}"),
            Self::Hexagon => ("{{", "}}"),
            Self::Parallelogram => ("[/", "/]"),
            Self::ParallelogramAlt => ("[\\", "\\]"),
            Self::Trapezoid => ("[/", "\\]"),
            Self::TrapezoidAlt => ("[\\", "/]"),
        }
    }

    /// Whether the parser can recover this shape from its text form.
    pub fn is_parseable(self) -> bool {
        Self::PARSE_ORDER.contains(&self)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::Shape;

    #[test]
    fn unknown_names_fall_back_to_rect() {
        assert_eq!(Shape::from_name("blob"), Shape::Rect);
        assert_eq!(Shape::from_name(""), Shape::Rect);
    }

    #[test]
    fn aliases_and_case_are_accepted() {
        assert_eq!(Shape::from_name("Rhombus"), Shape::Diamond);
        assert_eq!(Shape::from_name("doublecirc"), Shape::DoubleCircle);
        assert_eq!(Shape::from_name("DOUBLE-CIRCLE"), Shape::DoubleCircle);
    }

    #[test]
    fn names_resolve_back_to_the_same_shape() {
        for shape in [
            Shape::Rect,
            Shape::Round,
            Shape::Stadium,
            Shape::Subroutine,
            Shape::Cylindrical,
            Shape::Circle,
            Shape::DoubleCircle,
            Shape::Asymmetric,
            Shape::Diamond,
            Shape::Hexagon,
            Shape::Parallelogram,
            Shape::ParallelogramAlt,
            Shape::Trapezoid,
            Shape::TrapezoidAlt,
        ] {
            assert_eq!(Shape::from_name(shape.name()), shape);
        }
    }

    #[test]
    fn trapezoid_variants_share_prefixes_with_parallelograms() {
        assert_eq!(
            Shape::Trapezoid.delimiters().0,
            Shape::Parallelogram.delimiters().0
        );
        assert_eq!(
            Shape::TrapezoidAlt.delimiters().0,
            Shape::ParallelogramAlt.delimiters().0
        );
        assert!(!Shape::Trapezoid.is_parseable());
        assert!(Shape::Circle.is_parseable());
    }
}
