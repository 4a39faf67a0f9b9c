#![allow(dead_code)]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use storefront_compose::{
    ComponentDefinition, DataResolver, Element, Markup, Registry, RenderContext, RenderError,
    ResolveError, Resolved,
};
use storefront_model::{
    ComponentInstance, Document, FieldMap, FieldSpec, LayoutContext, LayoutProps, Props, Slot,
};
use storefront_types::NodeId;

// ── Components ───────────────────────────────────────────────────

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TextProps {
    pub text: String,
}

pub struct Heading;

impl ComponentDefinition for Heading {
    type Props = TextProps;

    fn name(&self) -> &'static str {
        "Heading"
    }

    fn category(&self) -> Option<&'static str> {
        Some("typography")
    }

    fn fields(&self) -> FieldMap {
        FieldMap::new().with("text", FieldSpec::textarea())
    }

    fn defaults(&self) -> TextProps {
        TextProps {
            text: "Heading".into(),
        }
    }

    fn layout(&self) -> Option<LayoutProps> {
        Some(LayoutProps {
            padding: Some("8px".into()),
            ..LayoutProps::default()
        })
    }

    fn render(&self, props: &TextProps, _ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        Ok(Element::new("h2").text(&props.text).build())
    }
}

pub struct Text;

impl ComponentDefinition for Text {
    type Props = TextProps;

    fn name(&self) -> &'static str {
        "Text"
    }

    fn category(&self) -> Option<&'static str> {
        Some("typography")
    }

    fn fields(&self) -> FieldMap {
        FieldMap::new().with("text", FieldSpec::textarea())
    }

    fn defaults(&self) -> TextProps {
        TextProps { text: "Text".into() }
    }

    fn layout(&self) -> Option<LayoutProps> {
        Some(LayoutProps::default())
    }

    fn render(&self, props: &TextProps, _ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        Ok(Element::new("p").text(&props.text).build())
    }
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerProps {
    pub num_columns: f64,
    pub items: Slot,
}

pub struct Grid;

impl ComponentDefinition for Grid {
    type Props = ContainerProps;

    fn name(&self) -> &'static str {
        "Grid"
    }

    fn category(&self) -> Option<&'static str> {
        Some("layout")
    }

    fn fields(&self) -> FieldMap {
        FieldMap::new()
            .with("numColumns", FieldSpec::number_range(1.0, 12.0))
            .with("items", FieldSpec::slot().disallowing(&["Hero"]))
    }

    fn defaults(&self) -> ContainerProps {
        ContainerProps {
            num_columns: 4.0,
            items: Vec::new(),
        }
    }

    fn child_layout(&self) -> LayoutContext {
        LayoutContext::GridCell
    }

    fn render(&self, _props: &ContainerProps, ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        Ok(Element::new("section")
            .class("grid")
            .child(ctx.slot("items"))
            .build())
    }
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FlexProps {
    pub items: Slot,
}

pub struct Flex;

impl ComponentDefinition for Flex {
    type Props = FlexProps;

    fn name(&self) -> &'static str {
        "Flex"
    }

    fn category(&self) -> Option<&'static str> {
        Some("layout")
    }

    fn fields(&self) -> FieldMap {
        FieldMap::new().with("items", FieldSpec::slot().disallowing(&["Hero"]))
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

    fn render(&self, _props: &FlexProps, ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        Ok(Element::new("div")
            .class("flex")
            .child(ctx.slot("items"))
            .build())
    }
}

pub struct Hero;

impl ComponentDefinition for Hero {
    type Props = TextProps;

    fn name(&self) -> &'static str {
        "Hero"
    }

    fn category(&self) -> Option<&'static str> {
        Some("sections")
    }

    fn fields(&self) -> FieldMap {
        FieldMap::new().with("text", FieldSpec::text())
    }

    fn defaults(&self) -> TextProps {
        TextProps { text: "Welcome".into() }
    }

    fn render(&self, props: &TextProps, _ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        Ok(Element::new("header").text(&props.text).build())
    }
}

/// Always fails to render.
pub struct Broken;

impl ComponentDefinition for Broken {
    type Props = TextProps;

    fn name(&self) -> &'static str {
        "Broken"
    }

    fn fields(&self) -> FieldMap {
        FieldMap::new().with("text", FieldSpec::text())
    }

    fn defaults(&self) -> TextProps {
        TextProps::default()
    }

    fn render(&self, _props: &TextProps, _ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        Err(RenderError::Failed("boom".into()))
    }
}

// ── Data-backed component ────────────────────────────────────────

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ListingProps {
    pub heading: String,
    pub max: f64,
    pub resolved: Value,
}

/// Resolver whose output records which call produced it.
#[derive(Default)]
pub struct ScriptedResolver {
    pub calls: AtomicU64,
    pub fail: AtomicBool,
}

impl ScriptedResolver {
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl DataResolver for ScriptedResolver {
    fn dependencies(&self) -> &[&'static str] {
        &["max"]
    }

    async fn resolve(&self, props: &Props) -> Result<Resolved, ResolveError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail.load(Ordering::SeqCst) {
            return Err(ResolveError::Upstream("connection refused".into()));
        }
        let max = props.get("max").and_then(Value::as_f64).unwrap_or(0.0);
        let mut out = Props::new();
        out.insert("resolved".into(), json!({"call": call, "max": max}));
        Ok(Resolved {
            props: out,
            read_only: ["resolved".to_string()].into_iter().collect(),
        })
    }
}

pub struct Listing {
    pub resolver: Arc<ScriptedResolver>,
}

impl ComponentDefinition for Listing {
    type Props = ListingProps;

    fn name(&self) -> &'static str {
        "Listing"
    }

    fn category(&self) -> Option<&'static str> {
        Some("sections")
    }

    fn fields(&self) -> FieldMap {
        FieldMap::new()
            .with("heading", FieldSpec::text())
            .with("max", FieldSpec::number_range(1.0, 50.0))
            .with("resolved", FieldSpec::custom())
    }

    fn defaults(&self) -> ListingProps {
        ListingProps {
            heading: "Listings".into(),
            max: 3.0,
            resolved: Value::Null,
        }
    }

    fn resolver(&self) -> Option<Arc<dyn DataResolver>> {
        Some(self.resolver.clone())
    }

    fn render(&self, props: &ListingProps, _ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let status = match props.resolved.get("call") {
            Some(call) => format!("resolved by call {call}"),
            None => "unresolved".to_string(),
        };
        Ok(Element::new("div")
            .attr("data-status", status)
            .text(&props.heading)
            .build())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────

pub struct Fixture {
    pub registry: Arc<Registry>,
    pub resolver: Arc<ScriptedResolver>,
}

pub fn fixture() -> Fixture {
    let resolver = Arc::new(ScriptedResolver::default());
    let mut builder = Registry::builder();
    builder
        .category("layout", "Layout")
        .category("typography", "Typography")
        .category("sections", "Sections");
    builder
        .root(FieldMap::new().with("title", FieldSpec::text()), Props::new())
        .unwrap();
    builder
        .register(Grid)
        .unwrap()
        .register(Flex)
        .unwrap()
        .register(Heading)
        .unwrap()
        .register(Text)
        .unwrap()
        .register(Hero)
        .unwrap()
        .register(Broken)
        .unwrap()
        .register(Listing {
            resolver: Arc::clone(&resolver),
        })
        .unwrap();
    Fixture {
        registry: Arc::new(builder.build()),
        resolver,
    }
}

pub fn node(component_type: &str, id: &str, props: Value) -> ComponentInstance {
    let values = props.as_object().cloned().unwrap_or_default();
    ComponentInstance::new(component_type, NodeId::from(id), values)
}

pub fn document(content: Vec<ComponentInstance>) -> Document {
    Document::new(Props::new(), content)
}

/// `/buy`: a heading then a text.
pub fn buy_document() -> Document {
    serde_json::from_value(json!({
        "root": {"props": {"title": "Buy"}},
        "content": [
            {"type": "Heading", "props": {"id": "h1", "text": "Buy"}},
            {"type": "Text", "props": {"id": "t1", "text": "hello"}}
        ]
    }))
    .unwrap()
}

/// A grid holding two texts, between a heading and a hero.
pub fn nested_document() -> Document {
    serde_json::from_value(json!({
        "root": {},
        "content": [
            {"type": "Heading", "props": {"id": "h1", "text": "Top"}},
            {"type": "Grid", "props": {"id": "g1", "numColumns": 2, "items": [
                {"type": "Text", "props": {"id": "t1", "text": "one", "layout": {"spanCol": 2}}},
                {"type": "Flex", "props": {"id": "f1", "items": [
                    {"type": "Text", "props": {"id": "t2", "text": "two", "layout": {"grow": true}}}
                ]}}
            ]}},
            {"type": "Hero", "props": {"id": "hero", "text": "Hi"}}
        ]
    }))
    .unwrap()
}
