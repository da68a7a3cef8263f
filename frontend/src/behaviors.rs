use log::{error, info};
use wasm_bindgen::JsValue;
use web_sys::{window, Document};

use crate::{params, popup, scroll, video};

type Init = fn(&Document) -> Result<(), JsValue>;

/// Wires every page behaviour, in order. They share no state, so one failing
/// does not keep the others from attaching.
pub fn setup() {
    let Some(document) = window().and_then(|w| w.document()) else {
        error!("No document available, page behaviours not wired");
        return;
    };

    let components: [(&str, Init); 4] = [
        ("offer popup", popup::init),
        ("smooth scroll", scroll::init),
        ("video player", video::init),
        ("url parameters", params::init),
    ];
    for (name, init) in components {
        if let Err(err) = init(&document) {
            error!("Failed to wire {}: {:?}", name, err);
        }
    }
    info!("Landing page behaviours ready");
}
