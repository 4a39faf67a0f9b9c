use super::{category, non_empty};
use serde::{Deserialize, Serialize};
use storefront_compose::{ComponentDefinition, Element, Markup, RenderContext, RenderError};
use storefront_model::{FieldMap, FieldSpec, LayoutProps};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CardProps {
    pub title: String,
    pub description: String,
    pub icon: String,
    /// `card` draws a bordered panel, `flat` none.
    pub mode: String,
}

impl Default for CardProps {
    fn default() -> Self {
        Self {
            title: "Title".into(),
            description: "Description".into(),
            icon: "✨".into(),
            mode: "flat".into(),
        }
    }
}

pub struct Card;

impl ComponentDefinition for Card {
    type Props = CardProps;

    fn name(&self) -> &'static str {
        "Card"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::OTHER)
    }

    fn fields(&self) -> FieldMap {
        FieldMap::new()
            .with("title", FieldSpec::text())
            .with("description", FieldSpec::textarea())
            .with("icon", FieldSpec::text().labeled("Icon (emoji)"))
            .with("mode", FieldSpec::radio(&[("card", "card"), ("flat", "flat")]))
    }

    fn defaults(&self) -> CardProps {
        CardProps::default()
    }

    fn layout(&self) -> Option<LayoutProps> {
        Some(LayoutProps::default())
    }

    fn render(&self, props: &CardProps, _ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let boxed = props.mode == "card";
        let icon = non_empty(&props.icon).map(|icon| {
            Element::new("div")
                .style("font-size", "32px")
                .style("margin-bottom", "12px")
                .text(icon)
                .build()
        });
        let card = Element::new("div")
            .attr_opt(
                "class",
                boxed.then_some(
                    "bg-white dark:bg-gray-800 border border-gray-200 dark:border-gray-700 shadow-sm",
                ),
            )
            .style("padding", "24px")
            .style("border-radius", if boxed { "8px" } else { "0" })
            .style("height", "100%")
            .children(icon)
            .child(
                Element::new("div")
                    .class("text-gray-900 dark:text-white")
                    .style("font-size", "18px")
                    .style("font-weight", "600")
                    .style("margin-bottom", "8px")
                    .text(&props.title),
            )
            .child(
                Element::new("div")
                    .class("text-gray-500 dark:text-gray-400")
                    .style("font-size", "14px")
                    .style("line-height", "1.5")
                    .text(&props.description),
            );
        Ok(card.build())
    }
}
