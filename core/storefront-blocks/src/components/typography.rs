use super::{align_options, category, non_empty, section, PAGE_WIDTH};
use serde::{Deserialize, Serialize};
use storefront_compose::{ComponentDefinition, Element, Markup, RenderContext, RenderError};
use storefront_model::{FieldMap, FieldSpec, LayoutProps};

// ── Heading ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingProps {
    pub text: String,
    pub size: String,
    /// `""` renders an `h2`.
    pub level: String,
    pub align: String,
}

impl Default for HeadingProps {
    fn default() -> Self {
        Self {
            text: "Heading".into(),
            size: "m".into(),
            level: String::new(),
            align: "left".into(),
        }
    }
}

/// Font size of a heading size key.
fn heading_size(size: &str) -> &'static str {
    match size {
        "xxxl" => "64px",
        "xxl" => "48px",
        "xl" => "40px",
        "l" => "32px",
        "s" => "20px",
        "xs" => "16px",
        _ => "24px",
    }
}

fn heading_tag(level: &str) -> &'static str {
    match level {
        "1" => "h1",
        "3" => "h3",
        "4" => "h4",
        "5" => "h5",
        "6" => "h6",
        _ => "h2",
    }
}

pub struct Heading;

impl ComponentDefinition for Heading {
    type Props = HeadingProps;

    fn name(&self) -> &'static str {
        "Heading"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::TYPOGRAPHY)
    }

    fn fields(&self) -> FieldMap {
        FieldMap::new()
            .with("text", FieldSpec::textarea())
            .with(
                "size",
                FieldSpec::select(&[
                    ("XXXL", "xxxl"),
                    ("XXL", "xxl"),
                    ("XL", "xl"),
                    ("L", "l"),
                    ("M", "m"),
                    ("S", "s"),
                    ("XS", "xs"),
                ]),
            )
            .with(
                "level",
                FieldSpec::select(&[
                    ("", ""),
                    ("1", "1"),
                    ("2", "2"),
                    ("3", "3"),
                    ("4", "4"),
                    ("5", "5"),
                    ("6", "6"),
                ])
                .labeled("Level"),
            )
            .with("align", align_options())
    }

    fn defaults(&self) -> HeadingProps {
        HeadingProps::default()
    }

    fn layout(&self) -> Option<LayoutProps> {
        Some(LayoutProps {
            padding: Some("8px".into()),
            ..LayoutProps::default()
        })
    }

    fn render(&self, props: &HeadingProps, _ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let heading = Element::new(heading_tag(&props.level))
            .class("text-gray-900 dark:text-white")
            .style("display", "block")
            .style("text-align", &props.align)
            .style("width", "100%")
            .style("font-size", heading_size(&props.size))
            .style("font-weight", "700")
            .style("line-height", "1.2")
            .style("margin", "0")
            .text(&props.text);
        Ok(section(PAGE_WIDTH, heading).build())
    }
}

// ── Text ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextProps {
    pub text: String,
    pub size: String,
    pub align: String,
    pub color: String,
    pub max_width: String,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            text: "Text".into(),
            size: "m".into(),
            align: "left".into(),
            color: "default".into(),
            max_width: String::new(),
        }
    }
}

pub struct Text;

impl ComponentDefinition for Text {
    type Props = TextProps;

    fn name(&self) -> &'static str {
        "Text"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::TYPOGRAPHY)
    }

    fn fields(&self) -> FieldMap {
        FieldMap::new()
            .with("text", FieldSpec::textarea())
            .with("size", FieldSpec::select(&[("S", "s"), ("M", "m")]))
            .with("align", align_options())
            .with(
                "color",
                FieldSpec::radio(&[("Default", "default"), ("Muted", "muted")]),
            )
            .with("maxWidth", FieldSpec::text())
    }

    fn defaults(&self) -> TextProps {
        TextProps::default()
    }

    fn layout(&self) -> Option<LayoutProps> {
        Some(LayoutProps::default())
    }

    fn render(&self, props: &TextProps, _ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let class = if props.color == "muted" {
            "text-gray-500 dark:text-gray-400"
        } else {
            "text-gray-800 dark:text-gray-200"
        };
        let justify = match props.align.as_str() {
            "center" => "center",
            "right" => "flex-end",
            _ => "flex-start",
        };
        let max_width = non_empty(&props.max_width);
        let span = Element::new("span")
            .class(class)
            .style("display", "flex")
            .style("text-align", &props.align)
            .style("width", "100%")
            .style("font-size", if props.size == "m" { "20px" } else { "16px" })
            .style("font-weight", "300")
            .style_opt("max-width", max_width)
            .style("justify-content", justify)
            .text(&props.text);
        Ok(section(max_width.unwrap_or(PAGE_WIDTH), span).build())
    }
}

// ── RichText ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RichTextProps {
    /// Editor-authored HTML, rendered as is.
    pub richtext: String,
}

impl Default for RichTextProps {
    fn default() -> Self {
        Self {
            richtext: "<h2>Heading</h2><p>Body text goes here. You can use <strong>bold</strong>, <em>italic</em>, and more.</p>".into(),
        }
    }
}

pub struct RichText;

impl ComponentDefinition for RichText {
    type Props = RichTextProps;

    fn name(&self) -> &'static str {
        "RichText"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::TYPOGRAPHY)
    }

    fn fields(&self) -> FieldMap {
        FieldMap::new().with("richtext", FieldSpec::richtext())
    }

    fn defaults(&self) -> RichTextProps {
        RichTextProps::default()
    }

    fn layout(&self) -> Option<LayoutProps> {
        Some(LayoutProps::default())
    }

    fn render(&self, props: &RichTextProps, _ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let body = Element::new("div")
            .class("text-gray-800 dark:text-gray-200 prose dark:prose-invert max-w-none")
            .style("line-height", "1.6")
            .child(Markup::raw(props.richtext.clone()));
        Ok(section(PAGE_WIDTH, body).build())
    }
}
