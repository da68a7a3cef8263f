use log::{debug, info, warn};
use url::{ParseError, Url};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

use crate::config::ANY_LINK_SELECTOR;

/// Query parameters of the page, in order.
pub fn current_params(page: &Url) -> Vec<(String, String)> {
    page.query_pairs().into_owned().collect()
}

/// Fragment-only and script links keep their href untouched.
pub fn is_propagatable(href: &str) -> bool {
    let href = href.trim_start();
    if href.is_empty() || href.starts_with('#') {
        return false;
    }
    let scheme = href.get(..11).unwrap_or(href);
    !scheme.eq_ignore_ascii_case("javascript:")
}

/// Replaces the first `key` pair in place and drops any later ones, or
/// appends the pair when `key` is absent.
fn set_param(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    match pairs.iter().position(|(k, _)| k == key) {
        Some(first) => {
            pairs[first].1 = value.to_owned();
            let mut index = 0;
            pairs.retain(|(k, _)| {
                let keep = k != key || index == first;
                index += 1;
                keep
            });
        }
        None => pairs.push((key.to_owned(), value.to_owned())),
    }
}

/// Absolute href carrying `params`, or `None` if the link is left alone.
/// With empty `params` the href is only made absolute; a link that ends up
/// with no pairs gets no dangling `?`.
pub fn rewrite_href(
    base: &Url,
    params: &[(String, String)],
    href: &str,
) -> Result<Option<String>, ParseError> {
    if !is_propagatable(href) {
        return Ok(None);
    }
    let mut url = base.join(href)?;
    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    for (key, value) in params {
        set_param(&mut pairs, key, value);
    }
    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs.iter());
    }
    Ok(Some(url.to_string()))
}

fn page_url(document: &Document) -> Option<Url> {
    let href = document.location()?.href().ok()?;
    match Url::parse(&href) {
        Ok(url) => Some(url),
        Err(err) => {
            warn!("Could not parse page URL {}: {}", href, err);
            None
        }
    }
}

pub fn init(document: &Document) -> Result<(), JsValue> {
    let Some(page) = page_url(document) else {
        return Ok(());
    };
    let params = current_params(&page);
    if params.is_empty() {
        debug!("No query parameters to carry over");
        return Ok(());
    }
    // Relative hrefs resolve against the document base, like `anchor.href`.
    let base = document
        .base_uri()
        .ok()
        .flatten()
        .and_then(|uri| Url::parse(&uri).ok())
        .unwrap_or_else(|| page.clone());

    let links = document.query_selector_all(ANY_LINK_SELECTOR)?;
    let mut updated = 0;
    for i in 0..links.length() {
        let Some(link) = links.item(i).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };
        let Some(href) = link.get_attribute("href") else {
            continue;
        };
        match rewrite_href(&base, &params, &href) {
            Ok(Some(rewritten)) => match link.set_attribute("href", &rewritten) {
                Ok(()) => updated += 1,
                Err(err) => warn!("Could not update link: {} {:?}", href, err),
            },
            Ok(None) => {}
            Err(err) => warn!("Could not update link: {} {}", href, err),
        }
    }
    info!("Carried {} query parameters onto {} links", params.len(), updated);
    Ok(())
}
