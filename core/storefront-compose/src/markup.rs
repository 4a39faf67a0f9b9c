//! Rendered output.
//!
//! [`Markup`] is an HTML fragment. Text goes in escaped; [`Markup::raw`] is
//! reserved for editor-authored rich text and already-rendered fragments.
//! [`Element`] is a small builder that keeps attribute and style escaping in
//! one place.

use std::fmt;

/// An HTML fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps trusted HTML without escaping.
    pub fn raw(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Escaped text content.
    pub fn text(text: &str) -> Self {
        Self(escape(text))
    }

    pub fn push(&mut self, other: Markup) {
        self.0.push_str(&other.0);
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromIterator<Markup> for Markup {
    fn from_iter<I: IntoIterator<Item = Markup>>(iter: I) -> Self {
        let mut out = Markup::new();
        for m in iter {
            out.push(m);
        }
        out
    }
}

impl From<Element> for Markup {
    fn from(el: Element) -> Self {
        el.build()
    }
}

/// Escapes `&`, `<`, `>`, `"` and `'`.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Builder for a single HTML element.
#[derive(Debug, Clone)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    styles: Vec<(&'static str, String)>,
    children: Markup,
    void: bool,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            styles: Vec::new(),
            children: Markup::new(),
            void: false,
        }
    }

    /// An element without children or closing tag (`img`, `br`, ...).
    pub fn void(tag: &'static str) -> Self {
        Self {
            void: true,
            ..Self::new(tag)
        }
    }

    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn attr_opt(self, name: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.attr(name, v),
            None => self,
        }
    }

    #[must_use]
    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    #[must_use]
    pub fn style(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.styles.push((property, value.into()));
        self
    }

    #[must_use]
    pub fn style_opt(self, property: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.style(property, v),
            None => self,
        }
    }

    #[must_use]
    pub fn child(mut self, child: impl Into<Markup>) -> Self {
        self.children.push(child.into());
        self
    }

    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Markup>) -> Self {
        for c in children {
            self.children.push(c);
        }
        self
    }

    /// Appends escaped text.
    #[must_use]
    pub fn text(self, text: &str) -> Self {
        self.child(Markup::text(text))
    }

    pub fn build(self) -> Markup {
        let mut out = format!("<{}", self.tag);
        for (name, value) in &self.attrs {
            out.push_str(&format!(" {name}=\"{}\"", escape(value)));
        }
        if !self.styles.is_empty() {
            let css: Vec<String> = self
                .styles
                .iter()
                .map(|(p, v)| format!("{p}:{v}"))
                .collect();
            out.push_str(&format!(" style=\"{}\"", escape(&css.join(";"))));
        }
        out.push('>');
        if !self.void {
            out.push_str(self.children.as_str());
            out.push_str(&format!("</{}>", self.tag));
        }
        Markup(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_text_and_attributes() {
        let m = Element::new("a")
            .attr("href", "/x?a=1&b=\"2\"")
            .text("<script>")
            .build();
        assert_eq!(
            m.as_str(),
            "<a href=\"/x?a=1&amp;b=&quot;2&quot;\">&lt;script&gt;</a>"
        );
    }

    #[test]
    fn styles_joined_in_order() {
        let m = Element::new("div")
            .style("padding-top", "8px")
            .style_opt("flex", None::<&str>)
            .style("grid-column", "span 2")
            .build();
        assert_eq!(
            m.as_str(),
            "<div style=\"padding-top:8px;grid-column:span 2\"></div>"
        );
    }

    #[test]
    fn void_elements_have_no_close_tag() {
        let m = Element::void("img").attr("src", "a.png").build();
        assert_eq!(m.as_str(), "<img src=\"a.png\">");
    }

    #[test]
    fn collect_concatenates() {
        let m: Markup = ["a", "b"].iter().map(|s| Markup::text(s)).collect();
        assert_eq!(m.as_str(), "ab");
    }
}
