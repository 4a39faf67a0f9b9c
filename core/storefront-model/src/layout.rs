//! Placement of inline components inside their container.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an inline component sits, derived from its parent's type.
///
/// Each context exposes a different subset of layout controls: grid cells
/// span rows and columns, flex items can grow, standalone blocks only get
/// vertical padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutContext {
    /// Top-level page content, or a parent with no layout semantics.
    #[default]
    Standalone,
    /// Direct child of a grid container.
    GridCell,
    /// Direct child of a flex container.
    FlexItem,
}

impl LayoutContext {
    pub const ALL: [LayoutContext; 3] = [Self::Standalone, Self::GridCell, Self::FlexItem];

    /// Names of the `layout` sub-fields available in this context.
    pub fn layout_keys(self) -> &'static [&'static str] {
        match self {
            Self::Standalone => &["padding"],
            Self::GridCell => &["spanCol", "spanRow", "padding"],
            Self::FlexItem => &["grow", "padding"],
        }
    }
}

impl fmt::Display for LayoutContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Standalone => "standalone",
            Self::GridCell => "grid_cell",
            Self::FlexItem => "flex_item",
        })
    }
}

/// The `props.layout` object of an inline component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span_col: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span_row: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grow: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
}

pub const MAX_SPAN: f64 = 12.0;

impl LayoutProps {
    /// The frame every inline component starts from.
    pub fn frame_defaults() -> Self {
        Self {
            span_col: Some(1.0),
            span_row: Some(1.0),
            grow: Some(false),
            padding: Some("0px".to_string()),
        }
    }

    /// `grid-column` value, span clamped to 1..=12. `None` when unset or zero.
    pub fn grid_column(&self) -> Option<String> {
        span(self.span_col)
    }

    /// `grid-row` value, span clamped to 1..=12. `None` when unset or zero.
    pub fn grid_row(&self) -> Option<String> {
        span(self.span_row)
    }

    /// `flex` value for a growing flex item.
    pub fn flex(&self) -> Option<&'static str> {
        self.grow.unwrap_or(false).then_some("1 1 0")
    }
}

fn span(value: Option<f64>) -> Option<String> {
    let v = value.filter(|v| *v != 0.0 && v.is_finite())?;
    Some(format!("span {}", v.clamp(1.0, MAX_SPAN).trunc() as u32))
}
