//! The built-in component palette.
//!
//! Every component is a plain [`ComponentDefinition`] over its own typed
//! props; defaults live in the props' `Default` impl so that a stored node
//! missing a key reads the same value the palette would have inserted.
//!
//! [`ComponentDefinition`]: storefront_compose::ComponentDefinition

mod actions;
mod layout;
mod media;
mod other;
mod sections;
mod store;
mod typography;

pub use actions::Button;
pub use layout::{Flex, Grid, Space};
pub use media::Image;
pub use other::Card;
pub use sections::{
    AdvantageSection, ContactSection, ExperienceSection, Hero, HomeValueSection, InsightsSection,
    MarketsSection, RecommendedProperties, StatsSection, WhyJoinSection,
};
pub use store::{CategoryGrid, ProductCard, ProductGrid, ProductGridResolver, StoreBanner};
pub use typography::{Heading, RichText, Text};

use storefront_compose::{Element, Markup};
use storefront_model::FieldSpec;

/// Palette category keys.
pub mod category {
    pub const LAYOUT: &str = "layout";
    pub const TYPOGRAPHY: &str = "typography";
    pub const ACTIONS: &str = "actions";
    pub const MEDIA: &str = "media";
    pub const OTHER: &str = "other";
    pub const SECTIONS: &str = "nobelSections";
    pub const STORE: &str = "store";
}

/// Types that may never be dropped inside a layout container.
pub const CONTAINER_DISALLOW: [&str; 3] = ["Hero", "Navbar", "Footer"];

/// Centers `inner` in a padded column of at most `max_width`.
pub(crate) fn section(max_width: &str, inner: impl Into<Markup>) -> Element {
    Element::new("div").style("width", "100%").child(
        Element::new("div")
            .style("max-width", max_width)
            .style("margin", "0 auto")
            .style("padding", "0 16px")
            .child(inner),
    )
}

pub(crate) const PAGE_WIDTH: &str = "1280px";

pub(crate) fn align_options() -> FieldSpec {
    FieldSpec::radio(&[("Left", "left"), ("Center", "center"), ("Right", "right")])
}

pub(crate) fn yes_no() -> FieldSpec {
    FieldSpec::radio(&[("Yes", "yes"), ("No", "no")])
}

pub(crate) fn column_options() -> FieldSpec {
    FieldSpec::select(&[("2 Columns", "2"), ("3 Columns", "3"), ("4 Columns", "4")])
}

/// Tailwind grid classes for a `columns` select value; anything other
/// than "2", "3" or "4" uses `otherwise` columns.
pub(crate) fn grid_columns(columns: &str, otherwise: u8) -> &'static str {
    let count = match columns {
        "2" => 2,
        "3" => 3,
        "4" => 4,
        _ => otherwise,
    };
    match count {
        2 => "grid gap-6 grid-cols-1 sm:grid-cols-2",
        4 => "grid gap-6 grid-cols-1 sm:grid-cols-2 lg:grid-cols-4",
        _ => "grid gap-6 grid-cols-1 sm:grid-cols-2 lg:grid-cols-3",
    }
}

/// Treats empty strings as unset.
pub(crate) fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}
