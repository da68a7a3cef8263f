use log::info;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, ScrollBehavior, ScrollIntoViewOptions};

use crate::config::FRAGMENT_LINK_SELECTOR;
use crate::dom::listen;

/// Element id a fragment link points at. A bare `#` points nowhere.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

fn scroll_to_fragment(document: &Document, href: &str) {
    let Some(id) = fragment_id(href) else {
        return;
    };
    if let Some(target) = document.get_element_by_id(id) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        target.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

pub fn init(document: &Document) -> Result<(), JsValue> {
    let links = document.query_selector_all(FRAGMENT_LINK_SELECTOR)?;
    let mut wired = 0;
    for i in 0..links.length() {
        let Some(link) = links.item(i).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };
        let document = document.clone();
        let source = link.clone();
        listen(&link, "click", move |e: Event| {
            e.prevent_default();
            if let Some(href) = source.get_attribute("href") {
                scroll_to_fragment(&document, &href);
            }
        })?;
        wired += 1;
    }
    info!("Smooth scroll wired on {} fragment links", wired);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hash_has_no_target() {
        assert_eq!(fragment_id("#"), None);
    }

    #[test]
    fn named_fragment_resolves_to_id() {
        assert_eq!(fragment_id("#section"), Some("section"));
        assert_eq!(fragment_id("#pricing-table"), Some("pricing-table"));
    }

    #[test]
    fn non_fragment_hrefs_are_ignored() {
        assert_eq!(fragment_id("/pricing#faq"), None);
        assert_eq!(fragment_id("javascript:void(0)"), None);
        assert_eq!(fragment_id(""), None);
    }
}
