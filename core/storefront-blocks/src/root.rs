//! Root field schema and the site-wide overrides it carries.
//!
//! Every page's root props hold a title. The root props of the globals page
//! additionally hold navbar and footer overrides; the page assembler reads
//! them once per request as [`SiteGlobals`] and hands them to the chrome.

use serde::{Deserialize, Serialize};
use storefront_model::{Document, FieldMap, FieldSpec, Props};
use tracing::warn;

/// A labelled link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub text: String,
    pub href: String,
}

impl Link {
    pub fn new(text: &str, href: &str) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
        }
    }
}

fn links_field(label: &str) -> FieldSpec {
    FieldSpec::array(
        FieldMap::new()
            .with("text", FieldSpec::text())
            .with("href", FieldSpec::text()),
    )
    .labeled(label)
}

/// Root field schema shared by every page.
pub fn root_fields() -> FieldMap {
    FieldMap::new()
        .with("title", FieldSpec::text().labeled("Page Title"))
        .with("navLogoText", FieldSpec::text().labeled("Navbar Logo Text"))
        .with("navLogoImage", FieldSpec::text().labeled("Navbar Logo Image URL"))
        .with("navLinks", links_field("Navbar Links"))
        .with("navCtaText", FieldSpec::text().labeled("Navbar CTA Text"))
        .with("navCtaHref", FieldSpec::text().labeled("Navbar CTA Link"))
        .with("footerDescription", FieldSpec::textarea().labeled("Footer Description"))
        .with("footerLogoText", FieldSpec::text().labeled("Footer Logo Text"))
        .with("footerLogoImage", FieldSpec::text().labeled("Footer Logo Image URL"))
        .with("footerColOneLinks", links_field("Footer Column 1 Links"))
        .with("footerColTwoLinks", links_field("Footer Column 2 Links"))
        .with("footerSocialHeading", FieldSpec::text().labeled("Footer Social Heading"))
        .with("footerSocialLinks", links_field("Footer Social Links"))
        .with("footerCopyright", FieldSpec::text().labeled("Footer Copyright"))
}

/// Root props of a new page. Overrides start unset so the chrome shows
/// its own content.
pub fn root_defaults() -> Props {
    let mut props = Props::new();
    props.insert("title".into(), "".into());
    props
}

/// Navbar and footer overrides. Unset or empty values leave the chrome's
/// own content in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteGlobals {
    pub title: Option<String>,
    pub nav_logo_text: Option<String>,
    pub nav_logo_image: Option<String>,
    pub nav_links: Option<Vec<Link>>,
    pub nav_cta_text: Option<String>,
    pub nav_cta_href: Option<String>,
    pub footer_description: Option<String>,
    pub footer_logo_text: Option<String>,
    pub footer_logo_image: Option<String>,
    pub footer_col_one_links: Option<Vec<Link>>,
    pub footer_col_two_links: Option<Vec<Link>>,
    pub footer_social_heading: Option<String>,
    pub footer_social_links: Option<Vec<Link>>,
    pub footer_copyright: Option<String>,
}

impl SiteGlobals {
    /// Reads overrides from root props. Malformed props yield no overrides.
    pub fn from_root(props: &Props) -> Self {
        match serde_json::from_value(serde_json::Value::Object(props.clone())) {
            Ok(globals) => globals,
            Err(e) => {
                warn!(error = %e, "Ignoring malformed site globals");
                Self::default()
            }
        }
    }

    /// Overrides carried by `document`'s root.
    pub fn from_document(document: &Document) -> Self {
        match &document.root.props {
            Some(props) => Self::from_root(props),
            None => Self::default(),
        }
    }
}

/// Applies a text override if it is set and non-empty.
pub(crate) fn override_text(target: &mut String, value: &Option<String>) {
    if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
        *target = v.to_string();
    }
}

/// Applies a link list override if it is set and non-empty.
pub(crate) fn override_links(target: &mut Vec<Link>, value: &Option<Vec<Link>>) {
    if let Some(links) = value.as_ref().filter(|l| !l.is_empty()) {
        *target = links.clone();
    }
}
