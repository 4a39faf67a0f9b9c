use super::{category, non_empty, section, PAGE_WIDTH};
use serde::{Deserialize, Serialize};
use storefront_compose::{ComponentDefinition, Element, Markup, RenderContext, RenderError};
use storefront_model::{FieldMap, FieldSpec, LayoutProps};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageProps {
    pub url: String,
    pub alt: String,
    pub width: String,
    pub height: String,
    pub object_fit: String,
    pub border_radius: String,
}

impl Default for ImageProps {
    fn default() -> Self {
        Self {
            url: "https://placehold.co/600x400".into(),
            alt: "Image".into(),
            width: "100%".into(),
            height: "auto".into(),
            object_fit: "cover".into(),
            border_radius: "0px".into(),
        }
    }
}

pub struct Image;

impl ComponentDefinition for Image {
    type Props = ImageProps;

    fn name(&self) -> &'static str {
        "Image"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::MEDIA)
    }

    fn fields(&self) -> FieldMap {
        FieldMap::new()
            .with("url", FieldSpec::text().labeled("Image URL"))
            .with("alt", FieldSpec::text().labeled("Alt text"))
            .with("width", FieldSpec::text().labeled("Width (e.g. 100%, 400px)"))
            .with("height", FieldSpec::text().labeled("Height (e.g. auto, 300px)"))
            .with(
                "objectFit",
                FieldSpec::select(&[
                    ("Cover", "cover"),
                    ("Contain", "contain"),
                    ("Fill", "fill"),
                    ("None", "none"),
                ])
                .labeled("Object Fit"),
            )
            .with("borderRadius", FieldSpec::text().labeled("Border Radius"))
    }

    fn defaults(&self) -> ImageProps {
        ImageProps::default()
    }

    fn layout(&self) -> Option<LayoutProps> {
        Some(LayoutProps::default())
    }

    fn render(&self, props: &ImageProps, _ctx: &RenderContext<'_>) -> Result<Markup, RenderError> {
        let img = Element::void("img")
            .attr("src", &props.url)
            .attr("alt", &props.alt)
            .style("width", non_empty(&props.width).unwrap_or("100%"))
            .style("height", non_empty(&props.height).unwrap_or("auto"))
            .style("object-fit", non_empty(&props.object_fit).unwrap_or("cover"))
            .style("border-radius", non_empty(&props.border_radius).unwrap_or("0px"))
            .style("display", "block");
        Ok(section(PAGE_WIDTH, img).build())
    }
}
