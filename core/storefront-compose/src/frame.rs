//! Layout frame for inline components.
//!
//! Inline components are wrapped once, when the registry is built: the
//! wrapper adds a `layout` object field whose sub-fields depend on the
//! [`LayoutContext`], seeds layout defaults, and renders the component
//! inside a positioned `div`.

use crate::definition::{AnyComponent, FieldContext, RenderContext};
use crate::error::RenderError;
use crate::markup::{Element, Markup};
use crate::resolution::DataResolver;
use serde_json::{json, Value};
use std::sync::Arc;
use storefront_model::{
    merge_into, FieldMap, FieldSpec, LayoutContext, LayoutProps, Props, SelectOption,
};
use tracing::debug;

/// Name of the injected layout field.
pub const LAYOUT_FIELD: &str = "layout";

/// Vertical spacing steps offered by padding and spacer selects.
pub const SPACING: [&str; 13] = [
    "0px", "8px", "16px", "24px", "32px", "40px", "48px", "56px", "64px", "80px", "96px",
    "120px", "160px",
];

/// Select options for [`SPACING`].
pub fn spacing_options() -> FieldSpec {
    let pairs: Vec<(&str, &str)> = SPACING.iter().map(|s| (*s, *s)).collect();
    FieldSpec::select(&pairs)
}

pub struct LayoutFrame;

impl LayoutFrame {
    /// Every layout sub-field.
    pub fn declared_fields() -> FieldMap {
        FieldMap::new()
            .with("spanCol", FieldSpec::number_range(1.0, 12.0).labeled("Grid Columns"))
            .with("spanRow", FieldSpec::number_range(1.0, 12.0).labeled("Grid Rows"))
            .with(
                "grow",
                FieldSpec::radio_values(vec![
                    SelectOption::with_value("true", Value::Bool(true)),
                    SelectOption::with_value("false", Value::Bool(false)),
                ])
                .labeled("Flex Grow"),
            )
            .with("padding", spacing_options().labeled("Vertical Padding"))
    }

    /// The `layout` field offered in `context`.
    pub fn field(context: LayoutContext) -> FieldSpec {
        FieldSpec::object(Self::declared_fields().only(context.layout_keys())).labeled("Layout")
    }

    /// Frame defaults overlaid with a component's own layout defaults.
    pub fn defaults(own: &LayoutProps) -> Props {
        let mut base = layout_props(&LayoutProps::frame_defaults());
        merge_into(&mut base, &layout_props(own));
        base
    }

    /// Wraps the output of `inner` in a div positioned per `layout`.
    /// Span and grow only apply in the context that gives them meaning.
    pub fn render(
        layout: &LayoutProps,
        ctx: &RenderContext<'_>,
        inner: impl FnOnce() -> Result<Markup, RenderError>,
    ) -> Result<Markup, RenderError> {
        let body = inner()?;
        let (column, row, flex) = match ctx.layout() {
            LayoutContext::GridCell => (layout.grid_column(), layout.grid_row(), None),
            LayoutContext::FlexItem => (None, None, layout.flex()),
            LayoutContext::Standalone => (None, None, None),
        };
        Ok(Element::new("div")
            .drag_handle(ctx)
            .style_opt("grid-column", column)
            .style_opt("grid-row", row)
            .style_opt("padding-top", layout.padding.clone())
            .style_opt("padding-bottom", layout.padding.clone())
            .style_opt("flex", flex)
            .child(body)
            .build())
    }
}

fn layout_props(layout: &LayoutProps) -> Props {
    match json!(layout) {
        Value::Object(map) => map,
        _ => Props::new(),
    }
}

/// A component wrapped in a layout frame.
pub(crate) struct Framed {
    inner: Box<dyn AnyComponent>,
    fields: FieldMap,
    defaults: Props,
}

impl Framed {
    pub(crate) fn wrap(inner: Box<dyn AnyComponent>, own_layout: &LayoutProps) -> Self {
        let mut fields = inner.fields().clone();
        fields.insert(
            LAYOUT_FIELD,
            FieldSpec::object(LayoutFrame::declared_fields()).labeled("Layout"),
        );
        let mut defaults = inner.defaults().clone();
        defaults.insert(
            LAYOUT_FIELD.to_string(),
            Value::Object(LayoutFrame::defaults(own_layout)),
        );
        Self {
            inner,
            fields,
            defaults,
        }
    }
}

impl AnyComponent for Framed {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn label(&self) -> &str {
        self.inner.label()
    }

    fn category(&self) -> Option<&str> {
        self.inner.category()
    }

    fn is_inline(&self) -> bool {
        true
    }

    fn fields(&self) -> &FieldMap {
        &self.fields
    }

    fn defaults(&self) -> &Props {
        &self.defaults
    }

    fn resolve_fields(&self, props: &Props, ctx: &FieldContext<'_>) -> FieldMap {
        let mut fields = self.inner.resolve_fields(props, ctx);
        fields.insert(LAYOUT_FIELD, LayoutFrame::field(ctx.layout));
        fields
    }

    fn child_layout(&self) -> LayoutContext {
        self.inner.child_layout()
    }

    fn resolver(&self) -> Option<Arc<dyn DataResolver>> {
        self.inner.resolver()
    }

    fn render(&self, props: &Props, ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let layout = match props.get(LAYOUT_FIELD) {
            Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
                debug!(component = self.name(), error = %e, "Unreadable layout, using frame defaults");
                LayoutProps::frame_defaults()
            }),
            None => LayoutProps::frame_defaults(),
        };
        LayoutFrame::render(&layout, ctx, || self.inner.render(props, ctx))
    }
}
