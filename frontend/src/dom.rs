use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement};

/// Attaches `handler` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

pub fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) -> Result<(), JsValue> {
    el.style().set_property(property, value)
}

pub fn set_marker(el: &Element, class: &str, present: bool) -> Result<(), JsValue> {
    el.class_list().toggle_with_force(class, present)?;
    Ok(())
}

/// Logs a failed DOM mutation from inside a callback, where there is nobody to
/// return the error to.
pub fn report(context: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        log::error!("{}: {:?}", context, err);
    }
}
