//! Domain entities: core data structures

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

/// One parsed outline item: nesting level and display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRecord {
    pub level: usize,
    pub label: String,
}

impl OutlineRecord {
    pub fn new(level: usize, label: impl Into<String>) -> Self {
        Self {
            level,
            label: label.into(),
        }
    }
}

/// Canvas layout direction (Graphviz `rankdir`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    #[serde(rename = "LR", alias = "lr")]
    LeftRight,
    #[serde(rename = "TB", alias = "tb")]
    TopBottom,
    #[serde(rename = "RL", alias = "rl")]
    RightLeft,
    #[serde(rename = "BT", alias = "bt")]
    BottomTop,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::LeftRight => "LR",
            Orientation::TopBottom => "TB",
            Orientation::RightLeft => "RL",
            Orientation::BottomTop => "BT",
        }
    }
}

impl FromStr for Orientation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LR" => Ok(Orientation::LeftRight),
            "TB" => Ok(Orientation::TopBottom),
            "RL" => Ok(Orientation::RightLeft),
            "BT" => Ok(Orientation::BottomTop),
            _ => Err(DomainError::invalid(
                "orientation",
                s,
                "expected one of LR, TB, RL, BT",
            )),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line style for edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Bold,
}

impl EdgeStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeStyle::Solid => "solid",
            EdgeStyle::Dashed => "dashed",
            EdgeStyle::Dotted => "dotted",
            EdgeStyle::Bold => "bold",
        }
    }
}

impl FromStr for EdgeStyle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "solid" => Ok(EdgeStyle::Solid),
            "dashed" => Ok(EdgeStyle::Dashed),
            "dotted" => Ok(EdgeStyle::Dotted),
            "bold" => Ok(EdgeStyle::Bold),
            _ => Err(DomainError::invalid(
                "edge_style",
                s,
                "expected one of solid, dashed, dotted, bold",
            )),
        }
    }
}

impl fmt::Display for EdgeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node outline shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    #[default]
    Box,
    Ellipse,
    Circle,
    Diamond,
    Hexagon,
}

impl NodeShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeShape::Box => "box",
            NodeShape::Ellipse => "ellipse",
            NodeShape::Circle => "circle",
            NodeShape::Diamond => "diamond",
            NodeShape::Hexagon => "hexagon",
        }
    }
}

impl FromStr for NodeShape {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "box" => Ok(NodeShape::Box),
            "ellipse" => Ok(NodeShape::Ellipse),
            "circle" => Ok(NodeShape::Circle),
            "diamond" => Ok(NodeShape::Diamond),
            "hexagon" => Ok(NodeShape::Hexagon),
            _ => Err(DomainError::invalid(
                "node_shape",
                s,
                "expected one of box, ellipse, circle, diamond, hexagon",
            )),
        }
    }
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A color value understood by Graphviz.
///
/// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa` or a plain color name such as
/// `lightblue`. Anything else is rejected when parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    pub fn parse(value: &str) -> DomainResult<Self> {
        let value = value.trim();
        let valid = if let Some(hex) = value.strip_prefix('#') {
            matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        } else {
            !value.is_empty() && value.len() <= 32 && value.chars().all(|c| c.is_ascii_alphanumeric())
        };

        if valid {
            Ok(Self(value.to_ascii_lowercase()))
        } else {
            Err(DomainError::invalid(
                "color",
                value,
                "expected #rgb, #rrggbb, #rrggbbaa or a color name",
            ))
        }
    }

    /// Wrap a known-good literal without validation.
    pub(crate) fn from_static(value: &'static str) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Color {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Output produced for a conversion.
///
/// `png`, `svg` and `pdf` go through the external renderer; the text formats
/// are produced in-process and cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Svg,
    Pdf,
    Dot,
    Json,
    Outline,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 6] = [
        ExportFormat::Png,
        ExportFormat::Svg,
        ExportFormat::Pdf,
        ExportFormat::Dot,
        ExportFormat::Json,
        ExportFormat::Outline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Dot => "dot",
            ExportFormat::Json => "json",
            ExportFormat::Outline => "outline",
        }
    }

    /// File extension for the exported artifact.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Outline => "txt",
            other => other.as_str(),
        }
    }

    /// Whether the format needs the external renderer.
    pub fn is_rendered(&self) -> bool {
        matches!(self, ExportFormat::Png | ExportFormat::Svg | ExportFormat::Pdf)
    }
}

impl FromStr for ExportFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        ExportFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == wanted)
            .ok_or_else(|| {
                DomainError::invalid(
                    "format",
                    s,
                    "expected one of png, svg, pdf, dot, json, outline",
                )
            })
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_hex_and_named_colors_when_parsing_then_accepts_and_normalizes() {
        assert_eq!(Color::parse("#FFAA00").unwrap().as_str(), "#ffaa00");
        assert_eq!(Color::parse("#abc").unwrap().as_str(), "#abc");
        assert_eq!(Color::parse("LightBlue").unwrap().as_str(), "lightblue");
    }

    #[test]
    fn given_malformed_colors_when_parsing_then_rejects() {
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#ggg").is_err());
        assert!(Color::parse("red\"; bad").is_err());
        assert!(Color::parse("").is_err());
    }

    #[test]
    fn given_mixed_case_enum_values_when_parsing_then_matches() {
        assert_eq!("tb".parse::<Orientation>().unwrap(), Orientation::TopBottom);
        assert_eq!("Dashed".parse::<EdgeStyle>().unwrap(), EdgeStyle::Dashed);
        assert_eq!("HEXAGON".parse::<NodeShape>().unwrap(), NodeShape::Hexagon);
        assert_eq!("Outline".parse::<ExportFormat>().unwrap(), ExportFormat::Outline);
        assert!("sideways".parse::<Orientation>().is_err());
    }
}
