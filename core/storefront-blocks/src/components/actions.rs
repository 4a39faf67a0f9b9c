use super::category;
use serde::{Deserialize, Serialize};
use storefront_compose::{ComponentDefinition, Element, Markup, RenderContext, RenderError};
use storefront_model::{FieldMap, FieldSpec, LayoutProps};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonProps {
    pub label: String,
    pub href: String,
    pub variant: String,
    pub size: String,
}

impl Default for ButtonProps {
    fn default() -> Self {
        Self {
            label: "Button".into(),
            href: "#".into(),
            variant: "primary".into(),
            size: "medium".into(),
        }
    }
}

/// Link styled as a button. Inert while editing so clicks select it.
pub struct Button;

impl ComponentDefinition for Button {
    type Props = ButtonProps;

    fn name(&self) -> &'static str {
        "Button"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::ACTIONS)
    }

    fn fields(&self) -> FieldMap {
        FieldMap::new()
            .with("label", FieldSpec::text().placeholder("Button text..."))
            .with("href", FieldSpec::text())
            .with(
                "variant",
                FieldSpec::radio(&[("primary", "primary"), ("secondary", "secondary")]),
            )
            .with(
                "size",
                FieldSpec::radio(&[("Small", "small"), ("Medium", "medium"), ("Large", "large")]),
            )
    }

    fn defaults(&self) -> ButtonProps {
        ButtonProps::default()
    }

    fn layout(&self) -> Option<LayoutProps> {
        Some(LayoutProps::default())
    }

    fn render(&self, props: &ButtonProps, ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let class = if props.variant == "primary" {
            "bg-nobel-blue text-white border-nobel-blue hover:bg-nobel-blue/90"
        } else {
            "bg-transparent text-gray-900 dark:text-white border-gray-900 dark:border-white hover:bg-gray-100 dark:hover:bg-gray-800"
        };
        let (padding, font_size) = match props.size.as_str() {
            "small" => ("8px 16px", "14px"),
            "large" => ("16px 32px", "18px"),
            _ => ("12px 24px", "16px"),
        };
        let editing = ctx.is_editing();
        let link = Element::new("a")
            .attr("href", if editing { "#" } else { props.href.as_str() })
            .class(class)
            .attr_opt("tabindex", editing.then_some("-1"))
            .style("display", "inline-block")
            .style("padding", padding)
            .style("font-size", font_size)
            .style("border", "2px solid")
            .style("border-radius", "4px")
            .style("text-decoration", "none")
            .style("font-weight", "600")
            .style("cursor", "pointer")
            .style("text-align", "center")
            .text(&props.label);
        Ok(Element::new("div").child(link).build())
    }
}
