//! Computed-style lookup for the handful of properties the sanitizer keeps.
//!
//! Emphasis is sometimes expressed in CSS rather than markup. The sanitizer
//! asks a [`StyleResolver`] for the computed value of each [`StyleProperty`]
//! and copies it onto the clean element when it differs from the default.

use std::sync::LazyLock;

use regex::Regex;

use crate::parse::Element;

/// Style properties preserved on sanitized elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleProperty {
    FontWeight,
    FontStyle,
    TextDecoration,
}

impl StyleProperty {
    pub const ALL: [StyleProperty; 3] = [Self::FontWeight, Self::FontStyle, Self::TextDecoration];

    pub fn css_name(&self) -> &'static str {
        match self {
            Self::FontWeight => "font-weight",
            Self::FontStyle => "font-style",
            Self::TextDecoration => "text-decoration",
        }
    }

    /// Whether `value` is this property's initial value.
    pub fn is_default(&self, value: &str) -> bool {
        let value = value.trim().to_ascii_lowercase();
        match self {
            Self::FontWeight => matches!(value.as_str(), "" | "normal" | "400" | "initial" | "inherit"),
            Self::FontStyle => matches!(value.as_str(), "" | "normal" | "initial" | "inherit"),
            Self::TextDecoration => {
                value.is_empty()
                    || value == "normal"
                    || value == "initial"
                    || value == "inherit"
                    || value.starts_with("none")
            }
        }
    }
}

/// Resolves the computed value of a style property on a source element.
pub trait StyleResolver {
    fn resolve(&self, element: &Element<'_>, property: StyleProperty) -> Option<String>;
}

/// Reads declarations from the element's own `style` attribute.
///
/// A static document has no cascade, so the inline declaration is the
/// computed value as far as this engine can know it.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineStyleResolver;

static DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*([a-z-]+)\s*:\s*(.*?)\s*(?:!important)?\s*$").expect("valid regex"));

impl StyleResolver for InlineStyleResolver {
    fn resolve(&self, element: &Element<'_>, property: StyleProperty) -> Option<String> {
        let style = element.attr("style")?;
        let wanted = property.css_name();

        style
            .split(';')
            .filter_map(|declaration| DECLARATION.captures(declaration))
            .filter(|caps| caps[1].eq_ignore_ascii_case(wanted))
            .map(|caps| caps[2].to_string())
            .last()
    }
}

/// Collects the non-default preserved properties into a `style` attribute value.
pub fn preserved_style(resolver: &dyn StyleResolver, element: &Element<'_>) -> Option<String> {
    let declarations: Vec<String> = StyleProperty::ALL
        .iter()
        .filter_map(|property| {
            let value = resolver.resolve(element, *property)?;
            if property.is_default(&value) {
                None
            } else {
                Some(format!("{}: {}", property.css_name(), value.trim()))
            }
        })
        .collect();

    if declarations.is_empty() { None } else { Some(declarations.join("; ")) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Document;
    use rstest::rstest;

    fn first_span(doc: &Document) -> Element<'_> {
        doc.select("span").unwrap().into_iter().next().unwrap()
    }

    #[rstest]
    #[case(StyleProperty::FontWeight, "normal", true)]
    #[case(StyleProperty::FontWeight, "400", true)]
    #[case(StyleProperty::FontWeight, "bold", false)]
    #[case(StyleProperty::FontWeight, "700", false)]
    #[case(StyleProperty::FontStyle, "italic", false)]
    #[case(StyleProperty::FontStyle, "Normal", true)]
    #[case(StyleProperty::TextDecoration, "none", true)]
    #[case(StyleProperty::TextDecoration, "none solid rgb(0, 0, 0)", true)]
    #[case(StyleProperty::TextDecoration, "underline", false)]
    fn test_is_default(#[case] property: StyleProperty, #[case] value: &str, #[case] expected: bool) {
        assert_eq!(property.is_default(value), expected);
    }

    #[test]
    fn test_inline_resolver_reads_declarations() {
        let doc = Document::parse(r#"<span style="color: red; FONT-WEIGHT: bold !important;font-style:italic">x</span>"#)
            .unwrap();
        let span = first_span(&doc);
        let resolver = InlineStyleResolver;

        assert_eq!(resolver.resolve(&span, StyleProperty::FontWeight), Some("bold".to_string()));
        assert_eq!(resolver.resolve(&span, StyleProperty::FontStyle), Some("italic".to_string()));
        assert_eq!(resolver.resolve(&span, StyleProperty::TextDecoration), None);
    }

    #[test]
    fn test_preserved_style_skips_defaults() {
        let doc = Document::parse(
            r#"<span style="font-weight: normal; font-style: italic; text-decoration: underline; color: blue">x</span>"#,
        )
        .unwrap();
        let span = first_span(&doc);

        let style = preserved_style(&InlineStyleResolver, &span);
        assert_eq!(style, Some("font-style: italic; text-decoration: underline".to_string()));
    }

    #[test]
    fn test_preserved_style_none_without_attribute() {
        let doc = Document::parse("<span>plain</span>").unwrap();
        let span = first_span(&doc);
        assert_eq!(preserved_style(&InlineStyleResolver, &span), None);
    }
}
