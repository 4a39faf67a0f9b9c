use super::{category, column_options, grid_columns, non_empty, yes_no};
use crate::products::{Catalog, CatalogSource, Product};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use storefront_compose::{
    ComponentDefinition, DataResolver, Element, Markup, RenderContext, RenderError, ResolveError,
    Resolved,
};
use storefront_model::{FieldMap, FieldSpec, Props};
use tracing::debug;

/// Most products a grid ever draws.
const MAX_VISIBLE: usize = 12;

/// Bag icon shown when a product has no image.
const BAG_ICON: &str = r#"<svg class="w-10 h-10" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="1" d="M16 11V7a4 4 0 00-8 0v4M5 9h14l1 12H4L5 9z"/></svg>"#;

fn store_heading(heading: &str) -> Option<Markup> {
    non_empty(heading).map(|text| {
        Element::new("h2")
            .class("text-2xl md:text-3xl font-nobel-title font-bold text-gray-900 dark:text-white uppercase mb-8 text-center")
            .text(text)
            .build()
    })
}

fn thumbnail(url: &str, alt: &str) -> Markup {
    match non_empty(url) {
        Some(src) => Element::void("img")
            .attr("src", src)
            .attr("alt", alt)
            .class("w-full h-full object-cover")
            .build(),
        None => Element::new("div")
            .class("flex items-center justify-center h-full text-gray-400")
            .child(Markup::raw(BAG_ICON))
            .build(),
    }
}

// ── StoreBanner ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreBannerProps {
    pub heading: String,
    pub subheading: String,
    /// Tailwind background class.
    pub bg_color: String,
    pub cta_text: String,
    pub cta_link: String,
}

impl Default for StoreBannerProps {
    fn default() -> Self {
        Self {
            heading: "Nobel Store".into(),
            subheading: "Professional essentials for Nobel Realty Group agents".into(),
            bg_color: "bg-nobel-blue".into(),
            cta_text: "Shop Now".into(),
            cta_link: "/store".into(),
        }
    }
}

pub struct StoreBanner;

impl ComponentDefinition for StoreBanner {
    type Props = StoreBannerProps;

    fn name(&self) -> &'static str {
        "StoreBanner"
    }

    fn label(&self) -> &'static str {
        "Store Banner"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::STORE)
    }

    fn fields(&self) -> FieldMap {
        FieldMap::new()
            .with("heading", FieldSpec::text())
            .with("subheading", FieldSpec::textarea())
            .with(
                "bgColor",
                FieldSpec::text().labeled("Background Color (Tailwind class)"),
            )
            .with("ctaText", FieldSpec::text().labeled("CTA Button Text"))
            .with("ctaLink", FieldSpec::text().labeled("CTA Link"))
    }

    fn defaults(&self) -> StoreBannerProps {
        StoreBannerProps::default()
    }

    fn render(&self, props: &StoreBannerProps, ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let subheading = non_empty(&props.subheading).map(|text| {
            Element::new("p")
                .class("text-lg md:text-xl opacity-90 font-nobel-content max-w-2xl mx-auto mb-6")
                .text(text)
                .build()
        });
        let cta = non_empty(&props.cta_text).map(|text| {
            Element::new("a")
                .attr("href", non_empty(&props.cta_link).unwrap_or("/store"))
                .class("inline-block px-8 py-3 bg-white text-nobel-blue hover:bg-gray-100 rounded font-nobel-content font-bold")
                .text(text)
                .build()
        });
        let background = non_empty(&props.bg_color).unwrap_or("bg-nobel-blue");
        Ok(Element::new("div")
            .drag_handle(ctx)
            .class(format!("{background} text-white py-12 md:py-16"))
            .child(
                Element::new("div")
                    .class("container mx-auto px-4 max-w-[1280px] text-center")
                    .child(
                        Element::new("h2")
                            .class("text-3xl md:text-4xl lg:text-5xl font-nobel-title font-bold uppercase mb-4")
                            .text(&props.heading),
                    )
                    .children(subheading)
                    .children(cta),
            )
            .build())
    }
}

// ── ProductGrid ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductGridProps {
    pub heading: String,
    pub columns: String,
    pub max_products: f64,
    pub show_price: String,
    pub source: String,
    /// Owned by [`ProductGridResolver`]; read-only once resolved.
    pub resolved_products: Vec<Product>,
}

impl Default for ProductGridProps {
    fn default() -> Self {
        Self {
            heading: "Our Products".into(),
            columns: "3".into(),
            max_products: 6.0,
            show_price: "yes".into(),
            source: CatalogSource::Medusa.as_str().into(),
            resolved_products: Vec::new(),
        }
    }
}

const DEFAULT_MAX_PRODUCTS: f64 = 6.0;

/// Requested product count: unset or zero means the default, clamped to
/// the field's 1..=50 range.
fn max_products(value: Option<f64>) -> usize {
    let n = value
        .filter(|n| n.is_finite() && *n != 0.0)
        .unwrap_or(DEFAULT_MAX_PRODUCTS);
    n.clamp(1.0, 50.0).trunc() as usize
}

/// Fetches the grid's products whenever its count or source changes.
pub struct ProductGridResolver {
    catalog: Catalog,
}

impl ProductGridResolver {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl DataResolver for ProductGridResolver {
    fn dependencies(&self) -> &[&'static str] {
        &["maxProducts", "source"]
    }

    async fn resolve(&self, props: &Props) -> Result<Resolved, ResolveError> {
        let limit = max_products(props.get("maxProducts").and_then(Value::as_f64));
        let source = props
            .get("source")
            .and_then(Value::as_str)
            .and_then(CatalogSource::parse)
            .unwrap_or_default();
        debug!(source = %source, limit, "Resolving product grid");

        let products = self
            .catalog
            .source(source)
            .products(limit)
            .await
            .map_err(|e| ResolveError::Upstream(format!("{source}: {e}")))?;

        let mut owned = Props::new();
        owned.insert("resolvedProducts".into(), serde_json::to_value(products)?);
        Ok(Resolved {
            props: owned,
            read_only: ["resolvedProducts".to_string()].into_iter().collect(),
        })
    }
}

/// Product listing filled by [`ProductGridResolver`]. Until products
/// arrive it draws skeleton cards.
pub struct ProductGrid {
    resolver: Arc<ProductGridResolver>,
}

impl ProductGrid {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            resolver: Arc::new(ProductGridResolver::new(catalog)),
        }
    }
}

impl ComponentDefinition for ProductGrid {
    type Props = ProductGridProps;

    fn name(&self) -> &'static str {
        "ProductGrid"
    }

    fn label(&self) -> &'static str {
        "Product Grid"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::STORE)
    }

    fn fields(&self) -> FieldMap {
        FieldMap::new()
            .with("heading", FieldSpec::text().labeled("Heading"))
            .with("columns", column_options().labeled("Columns"))
            .with(
                "maxProducts",
                FieldSpec::number_range(1.0, 50.0).labeled("Max Products"),
            )
            .with("showPrice", yes_no().labeled("Show Price"))
            .with(
                "source",
                FieldSpec::select(&[("Medusa (live)", "medusa"), ("Strapi (synced)", "strapi")])
                    .labeled("Data Source"),
            )
            .with("resolvedProducts", FieldSpec::custom().labeled(" "))
    }

    fn defaults(&self) -> ProductGridProps {
        ProductGridProps::default()
    }

    fn resolver(&self) -> Option<Arc<dyn DataResolver>> {
        Some(self.resolver.clone())
    }

    fn render(&self, props: &ProductGridProps, ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let count = max_products(Some(props.max_products)).min(MAX_VISIBLE);
        let show_price = props.show_price == "yes";
        let products = &props.resolved_products;

        let cards: Markup = if products.is_empty() {
            (0..count).map(|_| skeleton_card(show_price)).collect()
        } else {
            products
                .iter()
                .take(count)
                .map(|p| product_card(p, show_price))
                .collect()
        };
        let status = if products.is_empty() {
            format!("Source: {} | Loading...", props.source)
        } else {
            format!("Source: {} | {} products loaded", props.source, products.len())
        };

        Ok(Element::new("div")
            .drag_handle(ctx)
            .class("py-12 bg-white dark:bg-gray-900")
            .child(
                Element::new("div")
                    .class("container mx-auto px-4 max-w-[1280px]")
                    .children(store_heading(&props.heading))
                    .child(
                        Element::new("div")
                            .class(grid_columns(&props.columns, 3))
                            .child(cards),
                    )
                    .child(
                        Element::new("p")
                            .class("text-center text-xs text-gray-400 mt-4")
                            .text(&status),
                    ),
            )
            .build())
    }
}

fn product_card(product: &Product, show_price: bool) -> Markup {
    let price = (show_price && !product.price.is_empty()).then(|| {
        Element::new("p")
            .class("text-base font-bold text-nobel-blue dark:text-blue-400")
            .text(&product.price)
            .build()
    });
    Element::new("a")
        .attr("href", product.href())
        .attr_opt("data-product-id", non_empty(&product.id))
        .class("bg-white dark:bg-gray-800 border border-gray-200 dark:border-gray-700 rounded-lg overflow-hidden shadow-sm")
        .child(
            Element::new("div")
                .class("aspect-square bg-gray-100 dark:bg-gray-700 relative overflow-hidden")
                .child(thumbnail(&product.thumbnail, &product.title)),
        )
        .child(
            Element::new("div")
                .class("p-4")
                .child(
                    Element::new("h3")
                        .class("text-sm font-bold font-nobel-title text-gray-900 dark:text-white uppercase mb-1 truncate")
                        .text(&product.title),
                )
                .children(price),
        )
        .build()
}

fn skeleton_card(show_price: bool) -> Markup {
    let price = show_price.then(|| {
        Element::new("div")
            .class("h-4 bg-blue-100 dark:bg-blue-900/30 rounded w-1/4 animate-pulse")
            .build()
    });
    Element::new("div")
        .class("bg-white dark:bg-gray-800 border border-gray-200 dark:border-gray-700 rounded-lg overflow-hidden shadow-sm")
        .attr("data-skeleton", "true")
        .child(
            Element::new("div")
                .class("aspect-square bg-gray-100 dark:bg-gray-700 flex items-center justify-center text-gray-400")
                .child(Markup::raw(BAG_ICON)),
        )
        .child(
            Element::new("div")
                .class("p-4")
                .child(
                    Element::new("div")
                        .class("h-4 bg-gray-200 dark:bg-gray-600 rounded w-3/4 mb-2 animate-pulse"),
                )
                .children(price),
        )
        .build()
}

// ── ProductCard ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductCardProps {
    pub title: String,
    pub price: String,
    pub image_url: String,
    pub handle: String,
    pub show_button: String,
    pub button_text: String,
}

impl Default for ProductCardProps {
    fn default() -> Self {
        Self {
            title: "Product Name".into(),
            price: "$29.99".into(),
            image_url: String::new(),
            handle: String::new(),
            show_button: "yes".into(),
            button_text: "View Product".into(),
        }
    }
}

/// A single hand-placed product.
pub struct ProductCard;

impl ComponentDefinition for ProductCard {
    type Props = ProductCardProps;

    fn name(&self) -> &'static str {
        "ProductCard"
    }

    fn label(&self) -> &'static str {
        "Product Card"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::STORE)
    }

    fn fields(&self) -> FieldMap {
        FieldMap::new()
            .with("title", FieldSpec::text().labeled("Product Title"))
            .with("price", FieldSpec::text().labeled("Price"))
            .with("imageUrl", FieldSpec::text().labeled("Image URL"))
            .with("handle", FieldSpec::text().labeled("Product Slug (handle)"))
            .with("showButton", yes_no().labeled("Show Button"))
            .with("buttonText", FieldSpec::text().labeled("Button Text"))
    }

    fn defaults(&self) -> ProductCardProps {
        ProductCardProps::default()
    }

    fn render(&self, props: &ProductCardProps, ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let price = non_empty(&props.price).map(|price| {
            Element::new("p")
                .class("text-base font-bold text-nobel-blue dark:text-blue-400 mb-3")
                .text(price)
                .build()
        });
        let button = (props.show_button == "yes").then(|| {
            let href = match non_empty(&props.handle) {
                Some(handle) => format!("/store/{handle}"),
                None => "#".to_string(),
            };
            Element::new("a")
                .attr("href", href)
                .class("block text-center px-4 py-2 bg-nobel-blue hover:bg-nobel-blue/90 text-white rounded font-nobel-content text-sm font-bold")
                .text(non_empty(&props.button_text).unwrap_or("View Product"))
                .build()
        });
        Ok(Element::new("div")
            .drag_handle(ctx)
            .class("bg-white dark:bg-gray-800 border border-gray-200 dark:border-gray-700 rounded-lg overflow-hidden shadow-sm max-w-sm mx-auto")
            .child(
                Element::new("div")
                    .class("aspect-square bg-gray-100 dark:bg-gray-700 relative overflow-hidden")
                    .child(thumbnail(&props.image_url, &props.title)),
            )
            .child(
                Element::new("div")
                    .class("p-4")
                    .child(
                        Element::new("h3")
                            .class("text-sm font-bold font-nobel-title text-gray-900 dark:text-white uppercase mb-1")
                            .text(&props.title),
                    )
                    .children(price)
                    .children(button),
            )
            .build())
    }
}

// ── CategoryGrid ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreCategory {
    pub name: String,
    pub href: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryGridProps {
    pub heading: String,
    pub categories: Vec<StoreCategory>,
    pub columns: String,
}

impl Default for CategoryGridProps {
    fn default() -> Self {
        let category = |name: &str, slug: &str| StoreCategory {
            name: name.into(),
            href: format!("/store?category={slug}"),
            image_url: String::new(),
        };
        Self {
            heading: "Shop by Category".into(),
            categories: vec![
                category("Business Essentials", "business-essentials"),
                category("Branded Apparel", "branded-apparel"),
                category("Marketing Materials", "marketing-materials"),
                category("Office Supplies", "office-supplies"),
            ],
            columns: "4".into(),
        }
    }
}

pub struct CategoryGrid;

impl ComponentDefinition for CategoryGrid {
    type Props = CategoryGridProps;

    fn name(&self) -> &'static str {
        "CategoryGrid"
    }

    fn label(&self) -> &'static str {
        "Category Grid"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::STORE)
    }

    fn fields(&self) -> FieldMap {
        FieldMap::new()
            .with("heading", FieldSpec::text())
            .with(
                "categories",
                FieldSpec::array(
                    FieldMap::new()
                        .with("name", FieldSpec::text())
                        .with("href", FieldSpec::text())
                        .with("imageUrl", FieldSpec::text()),
                )
                .labeled("Categories"),
            )
            .with("columns", column_options().labeled("Columns"))
    }

    fn defaults(&self) -> CategoryGridProps {
        CategoryGridProps::default()
    }

    fn render(&self, props: &CategoryGridProps, ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let tiles: Markup = props
            .categories
            .iter()
            .map(|cat| {
                let backdrop = match non_empty(&cat.image_url) {
                    Some(src) => Element::void("img")
                        .attr("src", src)
                        .attr("alt", &cat.name)
                        .class("w-full h-full object-cover")
                        .build(),
                    None => Element::new("div")
                        .class("w-full h-full bg-gradient-to-br from-nobel-blue/80 to-nobel-blue/40")
                        .build(),
                };
                Element::new("a")
                    .attr("href", non_empty(&cat.href).unwrap_or("#"))
                    .class("group relative rounded-lg overflow-hidden aspect-[4/3] bg-gray-200 dark:bg-gray-700")
                    .child(backdrop)
                    .child(
                        Element::new("div")
                            .class("absolute inset-0 bg-black/30 flex items-end")
                            .child(
                                Element::new("span")
                                    .class("w-full text-center py-4 text-white font-nobel-title font-bold text-lg uppercase")
                                    .text(&cat.name),
                            ),
                    )
                    .build()
            })
            .collect();
        Ok(Element::new("div")
            .drag_handle(ctx)
            .class("py-12 bg-gray-50 dark:bg-gray-800")
            .child(
                Element::new("div")
                    .class("container mx-auto px-4 max-w-[1280px]")
                    .children(store_heading(&props.heading))
                    .child(
                        Element::new("div")
                            .class(grid_columns(&props.columns, 4))
                            .child(tiles),
                    ),
            )
            .build())
    }
}
