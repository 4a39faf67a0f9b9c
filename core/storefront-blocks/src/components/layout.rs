use super::{category, section, CONTAINER_DISALLOW, PAGE_WIDTH};
use serde::{Deserialize, Serialize};
use storefront_compose::{spacing_options, ComponentDefinition, Element, Markup, RenderContext, RenderError};
use storefront_model::{FieldMap, FieldSpec, LayoutContext, LayoutProps, Slot};

// ── Grid ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridProps {
    pub num_columns: f64,
    pub gap: f64,
    pub items: Slot,
}

impl Default for GridProps {
    fn default() -> Self {
        Self {
            num_columns: 4.0,
            gap: 24.0,
            items: Vec::new(),
        }
    }
}

/// Block container laying its `items` slot out on a column grid.
pub struct Grid;

impl ComponentDefinition for Grid {
    type Props = GridProps;

    fn name(&self) -> &'static str {
        "Grid"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::LAYOUT)
    }

    fn fields(&self) -> FieldMap {
        FieldMap::new()
            .with(
                "numColumns",
                FieldSpec::number_range(1.0, 12.0).labeled("Number of columns"),
            )
            .with("gap", FieldSpec::number_min(0.0).labeled("Gap"))
            .with("items", FieldSpec::slot().disallowing(&CONTAINER_DISALLOW))
    }

    fn defaults(&self) -> GridProps {
        GridProps::default()
    }

    fn child_layout(&self) -> LayoutContext {
        LayoutContext::GridCell
    }

    fn render(&self, props: &GridProps, ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let columns = props.num_columns.clamp(1.0, 12.0).trunc() as u32;
        let items = Element::new("div")
            .style("display", "grid")
            .style("gap", format!("{}px", props.gap.max(0.0)))
            .style("grid-template-columns", format!("repeat({columns}, 1fr)"))
            .style("min-height", "64px")
            .child(ctx.slot("items"));
        Ok(section(PAGE_WIDTH, items).drag_handle(ctx).build())
    }
}

// ── Flex ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlexProps {
    pub direction: String,
    pub justify_content: String,
    pub gap: f64,
    pub wrap: String,
    pub items: Slot,
}

impl Default for FlexProps {
    fn default() -> Self {
        Self {
            direction: "row".into(),
            justify_content: "start".into(),
            gap: 24.0,
            wrap: "wrap".into(),
            items: Vec::new(),
        }
    }
}

/// Inline flex container. Its children get flex-item layout controls.
pub struct Flex;

impl ComponentDefinition for Flex {
    type Props = FlexProps;

    fn name(&self) -> &'static str {
        "Flex"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::LAYOUT)
    }

    fn fields(&self) -> FieldMap {
        FieldMap::new()
            .with(
                "direction",
                FieldSpec::radio(&[("Row", "row"), ("Column", "column")]).labeled("Direction"),
            )
            .with(
                "justifyContent",
                FieldSpec::radio(&[("Start", "start"), ("Center", "center"), ("End", "end")])
                    .labeled("Justify Content"),
            )
            .with("gap", FieldSpec::number_min(0.0).labeled("Gap"))
            .with(
                "wrap",
                FieldSpec::radio(&[("true", "wrap"), ("false", "nowrap")]).labeled("Wrap"),
            )
            .with("items", FieldSpec::slot().disallowing(&CONTAINER_DISALLOW))
    }

    fn defaults(&self) -> FlexProps {
        FlexProps::default()
    }

    fn layout(&self) -> Option<LayoutProps> {
        Some(LayoutProps {
            grow: Some(true),
            ..LayoutProps::default()
        })
    }

    fn child_layout(&self) -> LayoutContext {
        LayoutContext::FlexItem
    }

    fn render(&self, props: &FlexProps, ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let items = Element::new("div")
            .style("display", "flex")
            .style("justify-content", &props.justify_content)
            .style("flex-direction", &props.direction)
            .style("gap", format!("{}px", props.gap.max(0.0)))
            .style("flex-wrap", &props.wrap)
            .style("min-height", "64px")
            .child(ctx.slot("items"));
        Ok(section(PAGE_WIDTH, items).style("height", "100%").build())
    }
}

// ── Space ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceProps {
    pub size: String,
    /// `vertical`, `horizontal`, or empty for both.
    pub direction: String,
}

impl Default for SpaceProps {
    fn default() -> Self {
        Self {
            size: "24px".into(),
            direction: String::new(),
        }
    }
}

/// Fixed-size spacer. Inline, but without a layout frame.
pub struct Space;

impl ComponentDefinition for Space {
    type Props = SpaceProps;

    fn name(&self) -> &'static str {
        "Space"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::LAYOUT)
    }

    fn fields(&self) -> FieldMap {
        FieldMap::new().with("size", spacing_options()).with(
            "direction",
            FieldSpec::radio(&[("Vertical", "vertical"), ("Horizontal", "horizontal"), ("Both", "")]),
        )
    }

    fn defaults(&self) -> SpaceProps {
        SpaceProps::default()
    }

    fn inline(&self) -> bool {
        true
    }

    fn render(&self, props: &SpaceProps, ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let vertical = matches!(props.direction.as_str(), "vertical" | "");
        let horizontal = matches!(props.direction.as_str(), "horizontal" | "");
        let size = props.size.as_str();
        Ok(Element::new("div")
            .drag_handle(ctx)
            .style("width", if horizontal { size } else { "100%" })
            .style("height", if vertical { size } else { "auto" })
            .style_opt("min-width", horizontal.then_some(size))
            .style_opt("min-height", vertical.then_some(size))
            .build())
    }
}
