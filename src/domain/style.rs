//! Visual style: configuration value object and resolved attributes.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Color, EdgeStyle, NodeShape, Orientation};
use crate::domain::error::{DomainError, DomainResult};

pub const FONT_SIZE_RANGE: (u32, u32) = (1, 96);
pub const BORDER_WIDTH_RANGE: (u32, u32) = (0, 10);
pub const ARROW_SIZE_RANGE: (f64, f64) = (0.0, 5.0);

const WATERMARK_FONT_COLOR: &str = "#9e9e9e";

/// Every visual parameter of a rendered tree.
///
/// Nothing in here changes the structure of the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub orientation: Orientation,
    pub node_color: Color,
    pub node_border_color: Color,
    pub node_border_width: u32,
    pub node_shape: NodeShape,
    pub node_font: String,
    pub node_font_color: Color,
    pub font_size: u32,
    pub edge_color: Color,
    pub edge_style: EdgeStyle,
    pub edge_arrow_size: f64,
    pub edge_font_color: Color,
    pub edge_font_size: u32,
    pub bg_color: Color,
    /// Replaces the label of the level-0 node when non-empty
    pub custom_root: Option<String>,
    /// Canvas annotation, omitted when empty
    pub watermark_text: Option<String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::LeftRight,
            node_color: Color::from_static("#e3f2fd"),
            node_border_color: Color::from_static("#1e88e5"),
            node_border_width: 1,
            node_shape: NodeShape::Box,
            node_font: "Helvetica".to_string(),
            node_font_color: Color::from_static("#0d47a1"),
            font_size: 14,
            edge_color: Color::from_static("#546e7a"),
            edge_style: EdgeStyle::Solid,
            edge_arrow_size: 1.0,
            edge_font_color: Color::from_static("#37474f"),
            edge_font_size: 10,
            bg_color: Color::from_static("white"),
            custom_root: None,
            watermark_text: None,
        }
    }
}

impl StyleConfig {
    /// Reject numeric options outside their bounds.
    pub fn validate(&self) -> DomainResult<()> {
        check_u32("font_size", self.font_size, FONT_SIZE_RANGE)?;
        check_u32("edge_font_size", self.edge_font_size, FONT_SIZE_RANGE)?;
        check_u32("node_border_width", self.node_border_width, BORDER_WIDTH_RANGE)?;

        let (min, max) = ARROW_SIZE_RANGE;
        if !(min..=max).contains(&self.edge_arrow_size) {
            return Err(DomainError::out_of_range(
                "edge_arrow_size",
                self.edge_arrow_size,
                min,
                max,
            ));
        }

        if self.node_font.trim().is_empty() {
            return Err(DomainError::invalid("node_font", &self.node_font, "must not be empty"));
        }
        Ok(())
    }

    pub fn root_label(&self) -> Option<&str> {
        non_empty(self.custom_root.as_deref())
    }

    pub fn watermark(&self) -> Option<&str> {
        non_empty(self.watermark_text.as_deref())
    }
}

fn check_u32(option: &'static str, value: u32, (min, max): (u32, u32)) -> DomainResult<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(DomainError::out_of_range(option, value, min, max))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Attributes applied to every node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeAttributes {
    pub shape: NodeShape,
    pub fill_color: Color,
    pub border_color: Color,
    pub border_width: u32,
    pub font_name: String,
    pub font_color: Color,
    pub font_size: u32,
}

/// Attributes applied to every edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeAttributes {
    pub color: Color,
    pub style: EdgeStyle,
    pub arrow_size: f64,
    pub font_color: Color,
    pub font_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Watermark {
    pub text: String,
    pub font_color: Color,
    pub font_size: u32,
}

/// Graph-level attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasAttributes {
    pub orientation: Orientation,
    pub background: Color,
    pub watermark: Option<Watermark>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedStyle {
    pub node: NodeAttributes,
    pub edge: EdgeAttributes,
    pub canvas: CanvasAttributes,
}

/// Map a style configuration to concrete node, edge and canvas attributes.
pub fn resolve_style(style: &StyleConfig) -> ResolvedStyle {
    ResolvedStyle {
        node: NodeAttributes {
            shape: style.node_shape,
            fill_color: style.node_color.clone(),
            border_color: style.node_border_color.clone(),
            border_width: style.node_border_width,
            font_name: style.node_font.trim().to_string(),
            font_color: style.node_font_color.clone(),
            font_size: style.font_size,
        },
        edge: EdgeAttributes {
            color: style.edge_color.clone(),
            style: style.edge_style,
            arrow_size: style.edge_arrow_size,
            font_color: style.edge_font_color.clone(),
            font_size: style.edge_font_size,
        },
        canvas: CanvasAttributes {
            orientation: style.orientation,
            background: style.bg_color.clone(),
            watermark: style.watermark().map(|text| Watermark {
                text: text.to_string(),
                font_color: Color::from_static(WATERMARK_FONT_COLOR),
                font_size: style.edge_font_size,
            }),
        },
    }
}
