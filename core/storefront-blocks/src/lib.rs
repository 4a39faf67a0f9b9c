//! Built-in storefront palette and its upstream data.
//!
//! - [`palette`] assembles the registry every page is composed from:
//!   layout primitives, typography, the brokerage sections and the store
//!   blocks
//! - [`Catalog`] pulls product lists from the commerce backend or the CMS
//!   mirror for the product grid's resolver
//! - [`Chrome`] is the navbar and footer, loaded from the CMS and overlaid
//!   with the [`SiteGlobals`] held in the globals page's root props

mod chrome;
pub mod components;
mod content;
mod error;
mod products;
mod root;
mod upstream;

pub use chrome::{Chrome, Footer, Logo, Navbar};
pub use components::{category, CONTAINER_DISALLOW};
pub use content::{ContentSource, NoContent, StrapiContent};
pub use error::{BlockError, BlockResult};
pub use products::{
    format_money, format_product_price, CalculatedPrice, Catalog, CatalogSource, MedusaProducts,
    Product, ProductSource, StaticProducts, StrapiProducts, Variant, VariantPrice, PRICE_TBD,
};
pub use root::{root_defaults, root_fields, Link, SiteGlobals};

use components::*;
use serde_json::{json, Value};
use storefront_compose::Registry;
use storefront_model::{ComponentInstance, Document, Props};
use storefront_types::NodeId;

/// Builds the storefront registry. Palette order follows category order,
/// then registration order within a category.
pub fn palette(catalog: Catalog) -> BlockResult<Registry> {
    let mut builder = Registry::builder();
    builder
        .category(category::LAYOUT, "Layout")
        .category(category::TYPOGRAPHY, "Typography")
        .category(category::ACTIONS, "Actions")
        .category(category::MEDIA, "Media")
        .category(category::OTHER, "Other")
        .category(category::SECTIONS, "Nobel Sections")
        .category(category::STORE, "Store / E-Commerce");
    builder.root(root_fields(), root_defaults())?;

    builder
        .register(Grid)?
        .register(Flex)?
        .register(Space)?
        .register(Heading)?
        .register(Text)?
        .register(RichText)?
        .register(Button)?
        .register(Image)?
        .register(Card)?;

    builder
        .register(Hero)?
        .register(HomeValueSection)?
        .register(StatsSection)?
        .register(AdvantageSection)?
        .register(RecommendedProperties)?
        .register(ExperienceSection)?
        .register(MarketsSection)?
        .register(InsightsSection)?
        .register(WhyJoinSection)?
        .register(ContactSection)?;

    builder
        .register(StoreBanner)?
        .register(ProductGrid::new(catalog))?
        .register(ProductCard)?
        .register(CategoryGrid)?;

    Ok(builder.build())
}

fn node(component_type: &str, id: &str, values: Value) -> ComponentInstance {
    let values = match values {
        Value::Object(map) => map,
        _ => Props::new(),
    };
    ComponentInstance::new(component_type, NodeId::from(id), values)
}

fn starter_card(id: &str, title: &str, description: &str, icon: &str) -> Value {
    json!({
        "type": "Card",
        "props": {
            "id": id,
            "title": title,
            "description": description,
            "icon": icon,
            "mode": "card",
            "layout": { "padding": "0px", "spanCol": 1, "spanRow": 1 },
        },
    })
}

/// The document an empty page is seeded with when first opened in the
/// editor.
pub fn starter_document() -> Document {
    let content = vec![
        node(
            "Heading",
            "heading-1",
            json!({
                "text": "Welcome to Nobel Realty Group",
                "size": "xxl",
                "align": "center",
                "layout": { "padding": "24px" },
            }),
        ),
        node(
            "Text",
            "text-1",
            json!({
                "text": "Build your page using the component panel on the left. Drag and drop Grid, Flex, Cards, and more.",
                "size": "m",
                "align": "center",
                "color": "muted",
                "layout": { "padding": "8px" },
            }),
        ),
        node(
            "Space",
            "space-1",
            json!({ "size": "32px", "direction": "vertical" }),
        ),
        node(
            "Grid",
            "grid-1",
            json!({
                "numColumns": 3,
                "gap": 24,
                "items": [
                    starter_card(
                        "card-1",
                        "Layout Components",
                        "Use Grid, Flex, and Space to create responsive layouts",
                        "📐",
                    ),
                    starter_card(
                        "card-2",
                        "Typography",
                        "Add Headings, Text blocks, and Rich Text with inline editing",
                        "✏️",
                    ),
                    starter_card(
                        "card-3",
                        "Nobel Sections",
                        "Use pre-built Nobel page sections like Hero, Stats, and more",
                        "🏠",
                    ),
                ],
            }),
        ),
    ];

    let mut root = Props::new();
    root.insert("title".into(), "Nobel Realty Group".into());
    Document::new(root, content)
}
