//! Site chrome: the navbar and footer around every page.
//!
//! Chrome is not part of any page's content tree. Its content comes from
//! the CMS when reachable, from static brokerage defaults otherwise, and is
//! then overlaid with the editor-managed [`SiteGlobals`].

use crate::content::ContentSource;
use crate::root::{override_links, override_text, Link, SiteGlobals};
use serde::Deserialize;
use serde_json::Value;
use storefront_compose::{Element, Markup};
use tracing::{debug, warn};

const SECTION_PATH: &str = "/api/home-main-section";

/// Logo with optional image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    pub text: String,
    pub href: String,
    pub image: Option<String>,
}

impl Logo {
    fn render(&self, class: &'static str) -> Markup {
        let image = self.image.as_deref().filter(|s| !s.is_empty()).map(|src| {
            Element::void("img")
                .attr("src", src)
                .attr("alt", &self.text)
                .attr("width", "32")
                .attr("height", "32")
                .build()
        });
        Element::new("a")
            .attr("href", &self.href)
            .class(class)
            .children(image)
            .child(Element::new("span").text(&self.text))
            .build()
    }
}

fn link(link: &Link, class: &'static str) -> Markup {
    Element::new("a")
        .attr("href", &link.href)
        .class(class)
        .text(&link.text)
        .build()
}

// ── Navbar ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navbar {
    pub logo: Logo,
    /// Menu entries, call-to-action excluded.
    pub links: Vec<Link>,
    pub cta: Link,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CmsNavbarEntry {
    navbar: CmsNavbar,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CmsNavbar {
    nav_logo: CmsNavLogo,
    #[serde(default)]
    nav_links: Vec<CmsNavLink>,
}

#[derive(Debug, Deserialize)]
struct CmsNavLogo {
    #[serde(rename = "LogoText")]
    logo_text: String,
    #[serde(default = "home")]
    href: String,
    #[serde(rename = "LogoImage", default)]
    logo_image: Option<CmsMedia>,
}

#[derive(Debug, Deserialize)]
struct CmsNavLink {
    #[serde(rename = "LinkText")]
    link_text: String,
    href: String,
    #[serde(rename = "isAuth", default)]
    is_auth: bool,
}

#[derive(Debug, Deserialize)]
struct CmsMedia {
    url: String,
}

fn home() -> String {
    "/".to_string()
}

impl Navbar {
    /// Static brokerage navbar.
    pub fn fallback() -> Self {
        Self {
            logo: Logo {
                text: "Nobel Realty Group".into(),
                href: "/".into(),
                image: Some("/img/nobel-logo.png".into()),
            },
            links: vec![
                Link::new("BUY", "/buy"),
                Link::new("RENT", "/rent"),
                Link::new("SELL", "/sell"),
                Link::new("AGENTS", "/agents"),
                Link::new("CONTACT US", "/contact"),
            ],
            cta: Self::default_cta(),
        }
    }

    fn default_cta() -> Link {
        Link::new("Get Started", "#")
    }

    /// Reads the CMS `Navbar` component. The first auth link becomes the
    /// call to action.
    pub fn from_cms(entry: &Value) -> Option<Self> {
        let parsed: CmsNavbarEntry = match serde_json::from_value(entry.clone()) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!(error = %e, "CMS entry has no usable navbar");
                return None;
            }
        };
        let navbar = parsed.navbar;
        let cta = navbar
            .nav_links
            .iter()
            .find(|l| l.is_auth)
            .map(|l| Link::new(&l.link_text, &l.href))
            .unwrap_or_else(Self::default_cta);
        let links = navbar
            .nav_links
            .iter()
            .filter(|l| !l.is_auth)
            .map(|l| Link::new(&l.link_text, &l.href))
            .collect();
        Some(Self {
            logo: Logo {
                text: navbar.nav_logo.logo_text,
                href: navbar.nav_logo.href,
                image: navbar.nav_logo.logo_image.map(|m| m.url),
            },
            links,
            cta,
        })
    }

    /// Overlays the editor-managed overrides.
    #[must_use]
    pub fn with_globals(mut self, globals: &SiteGlobals) -> Self {
        override_text(&mut self.logo.text, &globals.nav_logo_text);
        if let Some(image) = globals.nav_logo_image.as_deref().filter(|s| !s.is_empty()) {
            self.logo.image = Some(image.to_string());
        }
        override_links(&mut self.links, &globals.nav_links);
        override_text(&mut self.cta.text, &globals.nav_cta_text);
        override_text(&mut self.cta.href, &globals.nav_cta_href);
        self
    }

    pub fn render(&self) -> Markup {
        let menu: Markup = self
            .links
            .iter()
            .map(|l| {
                Element::new("li")
                    .class("nav__item")
                    .child(link(l, "inline-block px-3 py-2 text-sm font-nobel-content font-bold text-gray-800 no-underline uppercase dark:text-gray-200"))
                    .build()
            })
            .collect();
        Element::new("div")
            .class("w-full border-b border-gray-200 dark:border-gray-800")
            .child(
                Element::new("nav")
                    .class("container relative flex flex-wrap items-center justify-between px-4 py-2 mx-auto max-w-screen-xl")
                    .child(self.logo.render("flex items-center space-x-2 text-2xl font-medium"))
                    .child(
                        Element::new("ul")
                            .class("items-center justify-end flex-1 list-none lg:flex")
                            .child(menu),
                    )
                    .child(link(
                        &self.cta,
                        "px-4 py-1.5 text-sm font-nobel-content font-bold text-white bg-nobel-blue rounded",
                    )),
            )
            .build()
    }
}

// ── Footer ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    pub description: String,
    pub logo: Logo,
    pub col_one: Vec<Link>,
    pub col_two: Vec<Link>,
    pub social_heading: String,
    pub social: Vec<Link>,
    pub copyright: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CmsFooterEntry {
    footer: CmsFooter,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CmsFooter {
    #[serde(default)]
    description: String,
    logo_link: CmsLogoLink,
    #[serde(default)]
    col_one_links: Vec<Link>,
    #[serde(default)]
    col_two_links: Vec<Link>,
    #[serde(default)]
    social_links: Option<CmsSocialLinks>,
}

#[derive(Debug, Deserialize)]
struct CmsLogoLink {
    text: String,
    #[serde(default = "home")]
    href: String,
    #[serde(default)]
    image: Option<CmsMedia>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CmsSocialLinks {
    #[serde(default)]
    heading: String,
    #[serde(default)]
    social_link: Vec<Link>,
}

const COPYRIGHT: &str = "Copyright © NOBEL Realty Group. All rights reserved.";

impl Footer {
    /// Static brokerage footer.
    pub fn fallback() -> Self {
        Self {
            description:
                "NOBEL Realty Group - Award-winning buying and selling real estate services in Florida."
                    .into(),
            logo: Logo {
                text: "NOBEL".into(),
                href: "/".into(),
                image: Some("/img/logo.svg".into()),
            },
            col_one: vec![
                Link::new("Buy a Home", "/buy"),
                Link::new("Sell a Home", "/sell"),
                Link::new("Rent a Home", "/rent"),
                Link::new("Our Agents", "/agents"),
                Link::new("About Us", "/about"),
            ],
            col_two: vec![
                Link::new("Contact", "/contact"),
                Link::new("Careers", "/careers"),
                Link::new("Insights", "/insights"),
            ],
            social_heading: "Follow us!".into(),
            social: vec![
                Link::new("Facebook", "https://www.facebook.com"),
                Link::new("Instagram", "https://www.instagram.com"),
                Link::new("LinkedIn", "https://www.linkedin.com"),
                Link::new("Twitter", "https://www.twitter.com"),
            ],
            copyright: COPYRIGHT.into(),
        }
    }

    /// Reads the CMS `Footer` component.
    pub fn from_cms(entry: &Value) -> Option<Self> {
        let parsed: CmsFooterEntry = match serde_json::from_value(entry.clone()) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!(error = %e, "CMS entry has no usable footer");
                return None;
            }
        };
        let footer = parsed.footer;
        let (social_heading, social) = match footer.social_links {
            Some(s) => (s.heading, s.social_link),
            None => (String::new(), Vec::new()),
        };
        Some(Self {
            description: footer.description,
            logo: Logo {
                text: footer.logo_link.text,
                href: footer.logo_link.href,
                image: footer.logo_link.image.map(|m| m.url),
            },
            col_one: footer.col_one_links,
            col_two: footer.col_two_links,
            social_heading,
            social,
            copyright: COPYRIGHT.into(),
        })
    }

    /// Overlays the editor-managed overrides.
    #[must_use]
    pub fn with_globals(mut self, globals: &SiteGlobals) -> Self {
        override_text(&mut self.description, &globals.footer_description);
        override_text(&mut self.logo.text, &globals.footer_logo_text);
        if let Some(image) = globals.footer_logo_image.as_deref().filter(|s| !s.is_empty()) {
            self.logo.image = Some(image.to_string());
        }
        override_links(&mut self.col_one, &globals.footer_col_one_links);
        override_links(&mut self.col_two, &globals.footer_col_two_links);
        override_text(&mut self.social_heading, &globals.footer_social_heading);
        override_links(&mut self.social, &globals.footer_social_links);
        override_text(&mut self.copyright, &globals.footer_copyright);
        self
    }

    pub fn render(&self) -> Markup {
        let column = |links: &[Link]| {
            Element::new("div")
                .class("flex flex-wrap w-full -mt-2 -ml-3 lg:ml-0")
                .children(links.iter().map(|l| {
                    link(l, "w-full px-4 py-2 text-gray-500 rounded-md dark:text-gray-300 hover:text-nobel-blue")
                }))
                .build()
        };
        let social = Element::new("div")
            .child(Element::new("div").text(&self.social_heading))
            .child(
                Element::new("div")
                    .class("flex mt-5 space-x-5 text-gray-400 dark:text-gray-500")
                    .children(self.social.iter().map(|l| {
                        Element::new("a")
                            .attr("href", &l.href)
                            .attr("target", "_blank")
                            .attr("rel", "noopener")
                            .text(&l.text)
                            .build()
                    })),
            );
        Element::new("footer")
            .class("relative border-t border-gray-100 dark:border-gray-700")
            .child(
                Element::new("div")
                    .class("grid max-w-screen-xl grid-cols-1 gap-10 pt-10 mx-auto mt-5 lg:grid-cols-5 px-4")
                    .child(
                        Element::new("div")
                            .class("lg:col-span-2")
                            .child(self.logo.render("flex items-center space-x-2 text-2xl font-medium"))
                            .child(
                                Element::new("div")
                                    .class("max-w-md mt-4 text-gray-500 dark:text-gray-400")
                                    .text(&self.description),
                            ),
                    )
                    .child(column(&self.col_one))
                    .child(column(&self.col_two))
                    .child(social),
            )
            .child(
                Element::new("div")
                    .class("my-10 text-sm text-center text-gray-600 dark:text-gray-400")
                    .text(&self.copyright),
            )
            .build()
    }
}

// ── Loading ───────────────────────────────────────────────────────

fn navbar_query() -> Vec<(&'static str, String)> {
    vec![
        ("populate[Navbar][populate][NavLogo][populate][LogoImage]", "true".into()),
        ("populate[Navbar][populate][NavLogo][fields][0]", "LogoText".into()),
        ("populate[Navbar][populate][NavLogo][fields][1]", "href".into()),
        ("populate[Navbar][populate][NavLinks][fields][0]", "LinkText".into()),
        ("populate[Navbar][populate][NavLinks][fields][1]", "href".into()),
        ("populate[Navbar][populate][NavLinks][fields][2]", "isAuth".into()),
    ]
}

fn footer_query() -> Vec<(&'static str, String)> {
    vec![
        ("populate[Footer][populate][logoLink][populate][image]", "true".into()),
        ("populate[Footer][populate][colOneLinks]", "true".into()),
        ("populate[Footer][populate][colTwoLinks]", "true".into()),
        ("populate[Footer][populate][socialLinks][populate][socialLink]", "true".into()),
    ]
}

/// Navbar and footer for one page render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chrome {
    pub navbar: Navbar,
    pub footer: Footer,
}

impl Chrome {
    /// Static chrome with overrides applied, without consulting the CMS.
    pub fn fallback(globals: &SiteGlobals) -> Self {
        Self {
            navbar: Navbar::fallback().with_globals(globals),
            footer: Footer::fallback().with_globals(globals),
        }
    }

    /// Fetches both parts concurrently. Any CMS failure falls back to the
    /// static content of that part; overrides apply either way.
    pub async fn load(content: &dyn ContentSource, globals: &SiteGlobals) -> Self {
        let (nav_query, foot_query) = (navbar_query(), footer_query());
        let (nav, foot) = tokio::join!(
            content.fetch_json(SECTION_PATH, &nav_query),
            content.fetch_json(SECTION_PATH, &foot_query),
        );

        let navbar = match nav {
            Ok(entry) => Navbar::from_cms(&entry),
            Err(e) => {
                warn!(error = %e, "Navbar content unavailable, using fallback");
                None
            }
        }
        .unwrap_or_else(Navbar::fallback);

        let footer = match foot {
            Ok(entry) => Footer::from_cms(&entry),
            Err(e) => {
                warn!(error = %e, "Footer content unavailable, using fallback");
                None
            }
        }
        .unwrap_or_else(Footer::fallback);

        Self {
            navbar: navbar.with_globals(globals),
            footer: footer.with_globals(globals),
        }
    }
}
