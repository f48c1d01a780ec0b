// src/core/html.rs
//
// Thin helpers over `scraper` so page specs read as selector walks.

use scraper::{ElementRef, Selector};

use super::sanitize::normalize_ws;

/// Parse a selector known at compile time.
/// Only used with literal selectors from `specs`; a bad literal is a programming error.
pub fn selector(css: &'static str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e:?}"))
}

/// Visible text of an element, text nodes joined by a space and whitespace-collapsed.
pub fn text_of(el: ElementRef<'_>) -> String {
    let joined = el.text().collect::<Vec<_>>().join(" ");
    normalize_ws(&joined)
}

/// True when `name` appears among the element's classes.
pub fn has_class(el: ElementRef<'_>, name: &str) -> bool {
    el.value().classes().any(|c| c == name)
}

/// Direct element children matching a tag name (case-insensitive).
pub fn child_elements<'a>(el: ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| c.value().name().eq_ignore_ascii_case(tag))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn text_joins_nodes_with_space() {
        let doc = Html::parse_fragment(r#"<a href="x">Miér.<br>15 ene.<span>2024</span></a>"#);
        let a = doc.select(&selector("a")).next().unwrap();
        assert_eq!(text_of(a), "Miér. 15 ene. 2024");
    }

    #[test]
    fn class_and_children() {
        let doc = Html::parse_fragment(r#"<ul class="balls small"><li>Día</li><li class="ball">3</li></ul>"#);
        let ul = doc.select(&selector("ul")).next().unwrap();
        assert!(has_class(ul, "balls"));
        assert!(!has_class(ul, "ball"));
        assert_eq!(child_elements(ul, "li").len(), 2);
    }
}
