//! Component definitions.
//!
//! A component is written once against its own typed props
//! ([`ComponentDefinition`]). The registry stores it type-erased behind
//! [`AnyComponent`], converting between the stored JSON prop bag and the
//! typed props at the boundary.

use crate::error::{ComposeError, ComposeResult, RenderError};
use crate::markup::{Element, Markup};
use crate::resolution::DataResolver;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use storefront_model::{FieldMap, LayoutContext, LayoutProps, Props};
use storefront_types::NodeId;
use tracing::debug;

/// Where a node sits when its fields are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldContext<'a> {
    /// Type of the enclosing component, `None` at the top level.
    pub parent: Option<&'a str>,
    /// Layout context derived from the parent.
    pub layout: LayoutContext,
}

impl FieldContext<'_> {
    pub fn standalone() -> Self {
        FieldContext {
            parent: None,
            layout: LayoutContext::Standalone,
        }
    }
}

/// Renders the children held in a slot field of the node being rendered.
pub trait SlotRenderer {
    fn render_slot(&self, field: &str) -> Markup;
}

struct NoSlots;

impl SlotRenderer for NoSlots {
    fn render_slot(&self, _field: &str) -> Markup {
        Markup::new()
    }
}

/// What a render function can see besides its props.
pub struct RenderContext<'a> {
    editing: bool,
    node: Option<&'a NodeId>,
    layout: LayoutContext,
    slots: &'a dyn SlotRenderer,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        editing: bool,
        node: &'a NodeId,
        layout: LayoutContext,
        slots: &'a dyn SlotRenderer,
    ) -> Self {
        Self {
            editing,
            node: Some(node),
            layout,
            slots,
        }
    }

    /// A context with no node identity and empty slots.
    pub fn detached(editing: bool) -> RenderContext<'static> {
        RenderContext {
            editing,
            node: None,
            layout: LayoutContext::Standalone,
            slots: &NoSlots,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn layout(&self) -> LayoutContext {
        self.layout
    }

    /// The node the editor drags by, only while editing.
    pub fn drag_handle(&self) -> Option<&NodeId> {
        self.node.filter(|_| self.editing)
    }

    /// Renders the children of slot field `field`.
    pub fn slot(&self, field: &str) -> Markup {
        self.slots.render_slot(field)
    }
}

impl Element {
    /// Marks this element as the drag target of the node being rendered.
    #[must_use]
    pub fn drag_handle(self, ctx: &RenderContext<'_>) -> Self {
        self.attr_opt("data-puck-id", ctx.drag_handle().map(NodeId::to_string))
    }
}

/// A component type written against its own props.
///
/// Only `name`, `fields`, `defaults` and `render` are required; the rest
/// describe optional capabilities.
pub trait ComponentDefinition: Send + Sync + 'static {
    type Props: Serialize + DeserializeOwned + Send + Sync;

    /// Registry key, also the `type` stored on every instance.
    fn name(&self) -> &'static str;

    /// Palette label. Defaults to the name.
    fn label(&self) -> &'static str {
        self.name()
    }

    /// Palette category key.
    fn category(&self) -> Option<&'static str> {
        None
    }

    /// Declared field schema: every field the component can ever expose.
    fn fields(&self) -> FieldMap;

    /// Props of a freshly inserted instance.
    fn defaults(&self) -> Self::Props;

    /// Field set for a particular placement. Must stay within [`fields`](Self::fields).
    fn resolve_fields(&self, props: &Self::Props, ctx: &FieldContext<'_>) -> FieldMap {
        let _ = (props, ctx);
        self.fields()
    }

    /// Inline components flow with their siblings instead of taking a full row.
    fn inline(&self) -> bool {
        false
    }

    /// Layout defaults for components wrapped in a layout frame. Returning
    /// `Some` makes the component inline and gives it a `layout` field.
    fn layout(&self) -> Option<LayoutProps> {
        None
    }

    /// Layout context this component gives the children of its slots.
    fn child_layout(&self) -> LayoutContext {
        LayoutContext::Standalone
    }

    /// Async data step run before rendering.
    fn resolver(&self) -> Option<Arc<dyn DataResolver>> {
        None
    }

    fn render(&self, props: &Self::Props, ctx: &RenderContext<'_>) -> Result<Markup, RenderError>;
}

/// A registered component with its props erased to a JSON bag.
pub trait AnyComponent: Send + Sync {
    fn name(&self) -> &str;
    fn label(&self) -> &str;
    fn category(&self) -> Option<&str>;
    fn is_inline(&self) -> bool;
    fn fields(&self) -> &FieldMap;
    fn defaults(&self) -> &Props;
    fn resolve_fields(&self, props: &Props, ctx: &FieldContext<'_>) -> FieldMap;
    fn child_layout(&self) -> LayoutContext;
    fn resolver(&self) -> Option<Arc<dyn DataResolver>>;
    fn render(&self, props: &Props, ctx: &RenderContext<'_>) -> Result<Markup, RenderError>;
}

/// Parses typed props out of a stored prop bag. Unknown keys (`id`,
/// `layout`) are ignored by the target type.
pub fn from_props<P: DeserializeOwned>(props: &Props) -> Result<P, serde_json::Error> {
    serde_json::from_value(Value::Object(props.clone()))
}

/// Serializes typed props into a prop bag.
pub fn to_props<P: Serialize>(props: &P) -> Result<Props, serde_json::Error> {
    match serde_json::to_value(props)? {
        Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!(
            "props must serialize to an object, got {other}"
        ))),
    }
}

pub(crate) struct Typed<D: ComponentDefinition> {
    def: D,
    fields: FieldMap,
    defaults: Props,
}

impl<D: ComponentDefinition> Typed<D> {
    pub(crate) fn new(def: D) -> ComposeResult<Self> {
        let defaults = to_props(&def.defaults()).map_err(ComposeError::Serialization)?;
        Ok(Self {
            fields: def.fields(),
            defaults,
            def,
        })
    }
}

impl<D: ComponentDefinition> AnyComponent for Typed<D> {
    fn name(&self) -> &str {
        self.def.name()
    }

    fn label(&self) -> &str {
        self.def.label()
    }

    fn category(&self) -> Option<&str> {
        self.def.category()
    }

    fn is_inline(&self) -> bool {
        self.def.inline() || self.def.layout().is_some()
    }

    fn fields(&self) -> &FieldMap {
        &self.fields
    }

    fn defaults(&self) -> &Props {
        &self.defaults
    }

    fn resolve_fields(&self, props: &Props, ctx: &FieldContext<'_>) -> FieldMap {
        match from_props::<D::Props>(props) {
            Ok(typed) => self.def.resolve_fields(&typed, ctx),
            Err(e) => {
                debug!(component = self.def.name(), error = %e, "Props unreadable, using declared fields");
                self.fields.clone()
            }
        }
    }

    fn child_layout(&self) -> LayoutContext {
        self.def.child_layout()
    }

    fn resolver(&self) -> Option<Arc<dyn DataResolver>> {
        self.def.resolver()
    }

    fn render(&self, props: &Props, ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let typed: D::Props = from_props(props)?;
        self.def.render(&typed, ctx)
    }
}
