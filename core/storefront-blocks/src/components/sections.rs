//! Full-width brokerage sections. Block components: each takes its own row
//! and is never framed.

use super::{category, non_empty};
use serde::{Deserialize, Serialize};
use storefront_compose::{ComponentDefinition, Element, Markup, RenderContext, RenderError};
use storefront_model::{FieldMap, FieldSpec};

/// Heading and subheading, the props most sections share.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadlineProps {
    pub heading: String,
    pub subheading: String,
}

impl HeadlineProps {
    fn new(heading: &str, subheading: &str) -> Self {
        Self {
            heading: heading.into(),
            subheading: subheading.into(),
        }
    }
}

fn headline_fields() -> FieldMap {
    FieldMap::new()
        .with("heading", FieldSpec::text())
        .with("subheading", FieldSpec::textarea())
}

fn title(heading: &str) -> Element {
    Element::new("h2")
        .class("text-2xl md:text-3xl lg:text-4xl font-nobel-title font-bold text-gray-900 dark:text-white mb-3 md:mb-4 uppercase")
        .text(heading)
}

fn lede(subheading: &str) -> Option<Markup> {
    non_empty(subheading).map(|text| {
        Element::new("p")
            .class("text-base md:text-lg text-gray-600 dark:text-gray-300 mb-6 md:mb-8 font-nobel-content")
            .text(text)
            .build()
    })
}

/// Shared section shell: background band, centered container, heading,
/// optional subheading, then `body`.
fn band(
    ctx: &RenderContext<'_>,
    section: &'static str,
    background: &str,
    heading: &str,
    subheading: &str,
    body: Markup,
) -> Markup {
    Element::new("section")
        .drag_handle(ctx)
        .attr("data-section", section)
        .class(format!("{background} py-12 md:py-16 lg:py-20"))
        .child(
            Element::new("div")
                .class("container mx-auto px-4 max-w-[1280px] text-center")
                .child(title(heading))
                .children(lede(subheading))
                .child(body),
        )
        .build()
}

/// A call-to-action link plus optional image, used by the story sections.
fn feature(text: &str, cta_text: &str, cta_link: &str, image_url: &str, image_alt: &str) -> Markup {
    let image = non_empty(image_url).map(|url| {
        Element::void("img")
            .attr("src", url)
            .attr("alt", image_alt)
            .class("w-full h-auto rounded-lg")
            .build()
    });
    let cta = non_empty(cta_text).map(|label| {
        Element::new("a")
            .attr("href", non_empty(cta_link).unwrap_or("#"))
            .class("inline-block px-8 py-3 bg-nobel-blue hover:bg-nobel-blue/90 text-white rounded font-nobel-content font-bold")
            .text(label)
            .build()
    });
    let copy = non_empty(text).map(|text| {
        Element::new("p")
            .class("text-gray-700 dark:text-gray-300 font-nobel-content mb-6")
            .text(text)
            .build()
    });
    Element::new("div")
        .class("grid grid-cols-1 md:grid-cols-2 gap-8 items-center text-left")
        .child(Element::new("div").children(copy).children(cta))
        .children(image)
        .build()
}

// ── Hero ──────────────────────────────────────────────────────────

/// Landing banner with the property search box. Never allowed inside a
/// layout container.
pub struct Hero;

impl ComponentDefinition for Hero {
    type Props = HeadlineProps;

    fn name(&self) -> &'static str {
        "Hero"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::SECTIONS)
    }

    fn fields(&self) -> FieldMap {
        headline_fields()
    }

    fn defaults(&self) -> HeadlineProps {
        HeadlineProps::new(
            "LOOKING FOR A PLACE YOU LOVE?",
            "We'll Get You There. Search Over 5 Million Homes for Sale Today",
        )
    }

    fn render(&self, props: &HeadlineProps, ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let tabs: Markup = ["BUY", "RENT", "SELL"]
            .iter()
            .map(|tab| {
                Element::new("button")
                    .attr("type", "button")
                    .class("px-6 py-2 font-nobel-content font-bold")
                    .text(tab)
                    .build()
            })
            .collect();
        let search = Element::new("form")
            .class("max-w-3xl mx-auto")
            .child(Element::new("div").class("flex").child(tabs))
            .child(
                Element::void("input")
                    .attr("type", "text")
                    .attr("placeholder", "City, State, Zip Code or Neighborhood")
                    .class("flex-1 px-4 py-3"),
            )
            .child(
                Element::new("button")
                    .attr("type", "submit")
                    .class("px-8 py-3 bg-nobel-blue text-white font-bold")
                    .text("Search"),
            );
        Ok(Element::new("section")
            .drag_handle(ctx)
            .attr("data-section", "hero")
            .class("relative w-full min-h-screen flex items-center justify-center overflow-hidden")
            .child(
                Element::new("div")
                    .class("relative z-10 text-center px-4")
                    .child(
                        Element::new("h1")
                            .class("text-3xl md:text-5xl lg:text-6xl font-nobel-title font-bold text-white mb-4 uppercase")
                            .text(&props.heading),
                    )
                    .children(lede(&props.subheading))
                    .child(search),
            )
            .build())
    }
}

// ── HomeValueSection ──────────────────────────────────────────────

pub struct HomeValueSection;

impl ComponentDefinition for HomeValueSection {
    type Props = HeadlineProps;

    fn name(&self) -> &'static str {
        "HomeValueSection"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::SECTIONS)
    }

    fn fields(&self) -> FieldMap {
        headline_fields()
    }

    fn defaults(&self) -> HeadlineProps {
        HeadlineProps::new(
            "WHAT'S YOUR HOME WORTH?",
            "Get a FREE Instant Competitive Market Analysis",
        )
    }

    fn render(&self, props: &HeadlineProps, ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let form = Element::new("div")
            .class("max-w-3xl mx-auto flex flex-col md:flex-row gap-2")
            .child(
                Element::void("input")
                    .attr("type", "text")
                    .attr("placeholder", "Enter your address here...")
                    .class("flex-1 px-4 py-3 border border-gray-300 rounded"),
            )
            .child(
                Element::new("button")
                    .class("px-6 md:px-8 py-3 bg-nobel-blue text-white rounded font-bold")
                    .text("GET ESTIMATE"),
            )
            .build();
        Ok(band(
            ctx,
            "home-value",
            "bg-gray-100 dark:bg-gray-800",
            &props.heading,
            &props.subheading,
            form,
        ))
    }
}

// ── StatsSection ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsProps {
    pub heading: String,
    pub subheading: String,
    pub stats: Vec<Stat>,
}

/// Market snapshot: a row of headline figures.
pub struct StatsSection;

impl ComponentDefinition for StatsSection {
    type Props = StatsProps;

    fn name(&self) -> &'static str {
        "StatsSection"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::SECTIONS)
    }

    fn fields(&self) -> FieldMap {
        headline_fields().with(
            "stats",
            FieldSpec::array(
                FieldMap::new()
                    .with("value", FieldSpec::text())
                    .with("label", FieldSpec::text()),
            ),
        )
    }

    fn defaults(&self) -> StatsProps {
        let stat = |value: &str, label: &str| Stat {
            value: value.into(),
            label: label.into(),
        };
        StatsProps {
            heading: "YOUR AREA'S DAY MARKET IN A GLANCE".into(),
            subheading: "Looking for a new home? Let us summarize properties in your area".into(),
            stats: vec![
                stat("394", "NEW TODAY"),
                stat("23", "PRICE INCREASED"),
                stat("12", "OPEN HOUSE"),
                stat("36", "PRICE REDUCED"),
                stat("62", "BACK ON MARKET"),
                stat("89", "FORECLOSURES"),
            ],
        }
    }

    fn render(&self, props: &StatsProps, ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let stats: Markup = props
            .stats
            .iter()
            .map(|stat| {
                Element::new("div")
                    .class("text-center")
                    .child(
                        Element::new("div")
                            .class("text-3xl md:text-4xl font-bold text-nobel-blue")
                            .text(&stat.value),
                    )
                    .child(
                        Element::new("div")
                            .class("text-xs md:text-sm font-nobel-content text-gray-600 uppercase")
                            .text(&stat.label),
                    )
                    .build()
            })
            .collect();
        let grid = Element::new("div")
            .class("grid grid-cols-2 md:grid-cols-3 lg:grid-cols-6 gap-6")
            .child(stats)
            .build();
        Ok(band(
            ctx,
            "stats",
            "bg-white dark:bg-gray-900",
            &props.heading,
            &props.subheading,
            grid,
        ))
    }
}

// ── AdvantageSection ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Advantage {
    pub icon: String,
    pub heading: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvantageProps {
    pub heading: String,
    pub subheading: String,
    pub items: Vec<Advantage>,
}

pub struct AdvantageSection;

impl ComponentDefinition for AdvantageSection {
    type Props = AdvantageProps;

    fn name(&self) -> &'static str {
        "AdvantageSection"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::SECTIONS)
    }

    fn fields(&self) -> FieldMap {
        headline_fields().with(
            "items",
            FieldSpec::array(
                FieldMap::new()
                    .with("icon", FieldSpec::text())
                    .with("heading", FieldSpec::text())
                    .with("text", FieldSpec::textarea()),
            ),
        )
    }

    fn defaults(&self) -> AdvantageProps {
        let item = |icon: &str, heading: &str, text: &str| Advantage {
            icon: icon.into(),
            heading: heading.into(),
            text: text.into(),
        };
        AdvantageProps {
            heading: "THE NOBEL GROUP ADVANTAGE".into(),
            subheading: "Welcome to the Future of Real Estate Buying and Selling".into(),
            items: vec![
                item("💼", "Expert Advice", "Local expertise to connect you with the right home."),
                item("🏠", "Home Ownership Made Easy", "40+ years of experience."),
                item("📊", "Make the Best Deal", "Detailed analysis of market trends."),
                item("🎯", "Stand Out", "Highly personalized listing presentations."),
            ],
        }
    }

    fn render(&self, props: &AdvantageProps, ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let items: Markup = props
            .items
            .iter()
            .map(|item| {
                Element::new("div")
                    .class("p-6 text-left")
                    .child(Element::new("div").class("text-4xl mb-4").text(&item.icon))
                    .child(
                        Element::new("h3")
                            .class("text-lg font-bold font-nobel-title mb-2")
                            .text(&item.heading),
                    )
                    .child(
                        Element::new("p")
                            .class("text-gray-600 dark:text-gray-300 font-nobel-content")
                            .text(&item.text),
                    )
                    .build()
            })
            .collect();
        let grid = Element::new("div")
            .class("grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6")
            .child(items)
            .build();
        Ok(band(
            ctx,
            "advantage",
            "bg-gray-50 dark:bg-gray-800",
            &props.heading,
            &props.subheading,
            grid,
        ))
    }
}

// ── RecommendedProperties / InsightsSection ───────────────────────

/// Listing carousel. Listings come from the MLS feed outside the editor,
/// so an edited instance renders its empty-state.
pub struct RecommendedProperties;

impl ComponentDefinition for RecommendedProperties {
    type Props = HeadlineProps;

    fn name(&self) -> &'static str {
        "RecommendedProperties"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::SECTIONS)
    }

    fn fields(&self) -> FieldMap {
        headline_fields()
    }

    fn defaults(&self) -> HeadlineProps {
        HeadlineProps::new("RECOMMENDED FOR YOU", "Listings we think you'll love")
    }

    fn render(&self, props: &HeadlineProps, ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let empty = Element::new("div")
            .class("grid grid-cols-1 md:grid-cols-3 gap-6")
            .attr("data-properties", "0")
            .build();
        Ok(band(
            ctx,
            "recommended",
            "bg-white dark:bg-gray-900",
            &props.heading,
            &props.subheading,
            empty,
        ))
    }
}

pub struct InsightsSection;

impl ComponentDefinition for InsightsSection {
    type Props = HeadlineProps;

    fn name(&self) -> &'static str {
        "InsightsSection"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::SECTIONS)
    }

    fn fields(&self) -> FieldMap {
        headline_fields()
    }

    fn defaults(&self) -> HeadlineProps {
        HeadlineProps::new(
            "NOBEL KNOWS INSIGHTS",
            "Explore your real people around your neighborhood",
        )
    }

    fn render(&self, props: &HeadlineProps, ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let empty = Element::new("div")
            .class("grid grid-cols-1 md:grid-cols-3 gap-6")
            .attr("data-insights", "0")
            .build();
        Ok(band(
            ctx,
            "insights",
            "bg-gray-50 dark:bg-gray-800",
            &props.heading,
            &props.subheading,
            empty,
        ))
    }
}

// ── ExperienceSection / WhyJoinSection ────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoryProps {
    pub heading: String,
    /// Only offered by sections that declare a `subheading` field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subheading: Option<String>,
    pub text: String,
    pub cta_text: String,
    pub cta_link: String,
    pub image_url: String,
    pub image_alt: String,
}

fn story_fields() -> FieldMap {
    FieldMap::new()
        .with("text", FieldSpec::textarea())
        .with("ctaText", FieldSpec::text())
        .with("ctaLink", FieldSpec::text())
        .with("imageUrl", FieldSpec::text().labeled("Image URL"))
        .with("imageAlt", FieldSpec::text().labeled("Image Alt Text"))
}

fn render_story(ctx: &RenderContext<'_>, section: &'static str, props: &StoryProps) -> Markup {
    let body = feature(
        &props.text,
        &props.cta_text,
        &props.cta_link,
        &props.image_url,
        &props.image_alt,
    );
    band(
        ctx,
        section,
        "bg-white dark:bg-gray-900",
        &props.heading,
        props.subheading.as_deref().unwrap_or_default(),
        body,
    )
}

pub struct ExperienceSection;

impl ComponentDefinition for ExperienceSection {
    type Props = StoryProps;

    fn name(&self) -> &'static str {
        "ExperienceSection"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::SECTIONS)
    }

    fn fields(&self) -> FieldMap {
        let mut fields = FieldMap::new().with("heading", FieldSpec::text());
        for (name, spec) in story_fields() {
            fields.insert(name, spec);
        }
        fields
    }

    fn defaults(&self) -> StoryProps {
        StoryProps {
            heading: "ELEVATE YOUR EXPERIENCE".into(),
            subheading: None,
            text: "Our Concierge And A Nobel Realty Group Real Estate Agent Today".into(),
            cta_text: "CONNECT WITH A CONCIERGE".into(),
            cta_link: "/concierge".into(),
            image_url: "/img/homepage-find-agent.webp".into(),
            image_alt: "Experience".into(),
        }
    }

    fn render(&self, props: &StoryProps, ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        Ok(render_story(ctx, "experience", props))
    }
}

pub struct WhyJoinSection;

impl ComponentDefinition for WhyJoinSection {
    type Props = StoryProps;

    fn name(&self) -> &'static str {
        "WhyJoinSection"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::SECTIONS)
    }

    fn fields(&self) -> FieldMap {
        let mut fields = headline_fields();
        for (name, spec) in story_fields() {
            fields.insert(name, spec);
        }
        fields
    }

    fn defaults(&self) -> StoryProps {
        StoryProps {
            heading: "WHY JOIN NOBEL REALTY GROUP?".into(),
            subheading: Some("Award-Winning Buying and Selling".into()),
            text: "At NOBEL REALTY GROUP, we offer comprehensive support and coaching.".into(),
            cta_text: "JOIN THE NOBEL REALTY GROUP".into(),
            cta_link: "/join".into(),
            image_url: "/img/homepage-join-our-team.webp".into(),
            image_alt: "Join Us".into(),
        }
    }

    fn render(&self, props: &StoryProps, ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        Ok(render_story(ctx, "why-join", props))
    }
}

// ── MarketsSection ────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Market {
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketsProps {
    pub heading: String,
    pub subheading: String,
    pub markets: Vec<Market>,
}

pub struct MarketsSection;

impl ComponentDefinition for MarketsSection {
    type Props = MarketsProps;

    fn name(&self) -> &'static str {
        "MarketsSection"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::SECTIONS)
    }

    fn fields(&self) -> FieldMap {
        headline_fields().with(
            "markets",
            FieldSpec::array(
                FieldMap::new()
                    .with("name", FieldSpec::text())
                    .with("href", FieldSpec::text()),
            ),
        )
    }

    fn defaults(&self) -> MarketsProps {
        let market = |name: &str, href: &str| Market {
            name: name.into(),
            href: href.into(),
        };
        MarketsProps {
            heading: "EXPLORE POPULAR REAL ESTATE MARKETS".into(),
            subheading: "Learn about real estate by exploring the top local markets".into(),
            markets: vec![
                market("ATLANTIC BEACH, FL", "/markets/atlantic-beach"),
                market("FERNANDINA BEACH, FL", "/markets/fernandina-beach"),
                market("JACKSONVILLE BEACH, FL", "/markets/jacksonville-beach"),
                market("NEPTUNE BEACH, FL", "/markets/neptune-beach"),
            ],
        }
    }

    fn render(&self, props: &MarketsProps, ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let links: Markup = props
            .markets
            .iter()
            .map(|market| {
                Element::new("a")
                    .attr("href", non_empty(&market.href).unwrap_or("#"))
                    .class("block p-6 border border-gray-200 rounded-lg font-nobel-title font-bold uppercase hover:text-nobel-blue")
                    .text(&market.name)
                    .build()
            })
            .collect();
        let grid = Element::new("div")
            .class("grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4")
            .child(links)
            .build();
        Ok(band(
            ctx,
            "markets",
            "bg-white dark:bg-gray-900",
            &props.heading,
            &props.subheading,
            grid,
        ))
    }
}

// ── ContactSection ────────────────────────────────────────────────

pub struct ContactSection;

fn input(label: &str, name: &'static str, kind: &'static str, placeholder: &str) -> Markup {
    Element::new("div")
        .child(
            Element::new("label")
                .attr("for", name)
                .class("block text-gray-700 dark:text-gray-300 font-nobel-content mb-2")
                .text(label),
        )
        .child(
            Element::void("input")
                .attr("id", name)
                .attr("name", name)
                .attr("type", kind)
                .attr("placeholder", placeholder)
                .class("w-full px-4 py-3 border border-gray-300 dark:border-gray-600 rounded"),
        )
        .build()
}

impl ComponentDefinition for ContactSection {
    type Props = HeadlineProps;

    fn name(&self) -> &'static str {
        "ContactSection"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::SECTIONS)
    }

    fn fields(&self) -> FieldMap {
        headline_fields()
    }

    fn defaults(&self) -> HeadlineProps {
        HeadlineProps::new(
            "CONNECT WITH US",
            "Connect with a Nobel Realty Group Real Estate Agent Today",
        )
    }

    fn render(&self, props: &HeadlineProps, ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let form = Element::new("form")
            .class("bg-white dark:bg-gray-900 p-6 md:p-8 rounded-lg shadow-lg text-left")
            .child(
                Element::new("div")
                    .class("grid grid-cols-1 md:grid-cols-2 gap-4 md:gap-6 mb-4 md:mb-6")
                    .child(input("First Name", "firstName", "text", "John"))
                    .child(input("Last Name", "lastName", "text", "Doe")),
            )
            .child(
                Element::new("div")
                    .class("grid grid-cols-1 md:grid-cols-2 gap-4 md:gap-6 mb-4 md:mb-6")
                    .child(input("Email", "email", "email", "john@example.com"))
                    .child(input("Phone", "phone", "tel", "(555) 123-4567")),
            )
            .child(
                Element::new("textarea")
                    .attr("name", "message")
                    .attr("rows", "5")
                    .attr("placeholder", "How can we help you?")
                    .class("w-full px-4 py-3 border border-gray-300 dark:border-gray-600 rounded mb-4"),
            )
            .child(
                Element::new("button")
                    .attr("type", "submit")
                    .class("w-full md:w-auto px-8 py-3 bg-nobel-blue text-white rounded font-bold")
                    .text("Send Message"),
            )
            .build();
        Ok(band(
            ctx,
            "contact",
            "bg-gray-50 dark:bg-gray-800",
            &props.heading,
            &props.subheading,
            form,
        ))
    }
}
