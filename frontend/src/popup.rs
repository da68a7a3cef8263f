use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Event, EventTarget};

use crate::config::{
    HIDDEN_CLASS, POPUP_CLOSE_ID, POPUP_ENTER_DELAY_MS, POPUP_OVERLAY_ID, SHOW_CLASS,
    TRANSITION_MS, TRIGGER_BUTTON_ID,
};
use crate::dom::{listen, report, set_marker};
use crate::timing::{defer, Generation};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopupPhase {
    Hidden,
    /// `hidden` removed, waiting for the display change to apply.
    Entering,
    Shown,
    /// `show` removed, waiting for the opacity transition to finish.
    Exiting,
}

/// Which class markers the overlay carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Markers {
    pub hidden: bool,
    pub show: bool,
}

impl PopupPhase {
    pub fn markers(self) -> Markers {
        match self {
            PopupPhase::Hidden => Markers { hidden: true, show: false },
            PopupPhase::Entering | PopupPhase::Exiting => Markers { hidden: false, show: false },
            PopupPhase::Shown => Markers { hidden: false, show: true },
        }
    }

    pub fn from_markers(markers: Markers) -> Self {
        if markers.show {
            PopupPhase::Shown
        } else {
            PopupPhase::Hidden
        }
    }

    fn is_opening(self) -> bool {
        matches!(self, PopupPhase::Entering | PopupPhase::Shown)
    }
}

/// A phase to enter now and the phase to settle in once `delay_ms` passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub now: PopupPhase,
    pub delay_ms: u32,
    pub then: PopupPhase,
}

#[derive(Debug)]
pub struct PopupMachine {
    phase: PopupPhase,
}

impl PopupMachine {
    pub fn new(initial: PopupPhase) -> Self {
        Self { phase: initial }
    }

    pub fn phase(&self) -> PopupPhase {
        self.phase
    }

    /// `None` when the popup is already open or opening.
    pub fn open(&mut self) -> Option<Transition> {
        if self.phase.is_opening() {
            return None;
        }
        self.phase = PopupPhase::Entering;
        Some(Transition {
            now: PopupPhase::Entering,
            delay_ms: POPUP_ENTER_DELAY_MS,
            then: PopupPhase::Shown,
        })
    }

    /// `None` when the popup is already closed or closing.
    pub fn close(&mut self) -> Option<Transition> {
        if !self.phase.is_opening() {
            return None;
        }
        self.phase = PopupPhase::Exiting;
        Some(Transition {
            now: PopupPhase::Exiting,
            delay_ms: TRANSITION_MS,
            then: PopupPhase::Hidden,
        })
    }

    pub fn settle(&mut self, phase: PopupPhase) {
        self.phase = phase;
    }
}

#[derive(Clone)]
pub struct PopupController {
    overlay: Element,
    machine: Rc<RefCell<PopupMachine>>,
    generation: Generation,
}

impl PopupController {
    pub fn new(overlay: Element) -> Self {
        let classes = overlay.class_list();
        let initial = PopupPhase::from_markers(Markers {
            hidden: classes.contains(HIDDEN_CLASS),
            show: classes.contains(SHOW_CLASS),
        });
        Self {
            overlay,
            machine: Rc::new(RefCell::new(PopupMachine::new(initial))),
            generation: Generation::new(),
        }
    }

    pub fn open(&self) -> Result<(), JsValue> {
        let transition = self.machine.borrow_mut().open();
        match transition {
            Some(transition) => self.run(transition),
            None => Ok(()),
        }
    }

    pub fn close(&self) -> Result<(), JsValue> {
        let transition = self.machine.borrow_mut().close();
        match transition {
            Some(transition) => self.run(transition),
            None => Ok(()),
        }
    }

    fn run(&self, transition: Transition) -> Result<(), JsValue> {
        apply_markers(&self.overlay, transition.now.markers())?;
        let ticket = self.generation.bump();
        let this = self.clone();
        defer(transition.delay_ms, &self.generation, ticket, move || {
            {
                let mut machine = this.machine.borrow_mut();
                debug!("Popup {:?} -> {:?}", machine.phase(), transition.then);
                machine.settle(transition.then);
            }
            report(
                "Failed to settle popup",
                apply_markers(&this.overlay, transition.then.markers()),
            );
        });
        Ok(())
    }
}

/// Clicks bubbling up from the popup content carry the content as target,
/// only a click on the overlay itself counts as a background click.
pub fn is_background_click<T: PartialEq>(target: Option<&T>, overlay: &T) -> bool {
    target == Some(overlay)
}

fn apply_markers(overlay: &Element, markers: Markers) -> Result<(), JsValue> {
    set_marker(overlay, HIDDEN_CLASS, markers.hidden)?;
    set_marker(overlay, SHOW_CLASS, markers.show)
}

pub fn init(document: &Document) -> Result<(), JsValue> {
    let Some(overlay) = document.get_element_by_id(POPUP_OVERLAY_ID) else {
        debug!("No #{} on page, popup disabled", POPUP_OVERLAY_ID);
        return Ok(());
    };
    let controller = PopupController::new(overlay.clone());

    if let Some(trigger) = document.get_element_by_id(TRIGGER_BUTTON_ID) {
        let controller = controller.clone();
        listen(&trigger, "click", move |e: Event| {
            e.prevent_default();
            report("Failed to open popup", controller.open());
        })?;
    }

    if let Some(close) = document.get_element_by_id(POPUP_CLOSE_ID) {
        let controller = controller.clone();
        listen(&close, "click", move |_| {
            report("Failed to close popup", controller.close());
        })?;
    }

    {
        let background: EventTarget = overlay.clone().into();
        listen(&overlay, "click", move |e: Event| {
            if is_background_click(e.target().as_ref(), &background) {
                report("Failed to close popup", controller.close());
            }
        })?;
    }

    info!("Offer popup wired");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_then_close_returns_to_initial_markers() {
        let initial = PopupPhase::Hidden;
        let mut machine = PopupMachine::new(initial);

        let open = machine.open().expect("open from hidden");
        assert_eq!(open.now.markers(), Markers { hidden: false, show: false });
        assert_eq!(open.delay_ms, POPUP_ENTER_DELAY_MS);
        machine.settle(open.then);
        assert_eq!(machine.phase().markers(), Markers { hidden: false, show: true });

        let close = machine.close().expect("close from shown");
        assert_eq!(close.delay_ms, TRANSITION_MS);
        machine.settle(close.then);
        assert_eq!(machine.phase().markers(), initial.markers());
    }

    #[test]
    fn repeated_open_and_close_are_no_ops() {
        let mut machine = PopupMachine::new(PopupPhase::Hidden);
        assert!(machine.close().is_none());

        assert!(machine.open().is_some());
        assert!(machine.open().is_none());
        machine.settle(PopupPhase::Shown);
        assert!(machine.open().is_none());

        assert!(machine.close().is_some());
        assert!(machine.close().is_none());
        assert_eq!(machine.phase(), PopupPhase::Exiting);
    }

    #[test]
    fn reopening_while_exiting_starts_a_new_entry() {
        let mut machine = PopupMachine::new(PopupPhase::Shown);
        machine.close();
        let reopen = machine.open().expect("reopen during exit");
        assert_eq!(reopen.now, PopupPhase::Entering);
        assert_eq!(reopen.then, PopupPhase::Shown);
    }

    #[test]
    fn closing_during_entry_is_allowed() {
        let mut machine = PopupMachine::new(PopupPhase::Hidden);
        machine.open();
        let close = machine.close().expect("close during entry");
        assert_eq!(close.then, PopupPhase::Hidden);
    }

    #[test]
    fn only_the_overlay_itself_is_background() {
        let overlay = "offer-popup";
        assert!(is_background_click(Some(&overlay), &overlay));
        assert!(!is_background_click(Some(&"popup-content"), &overlay));
        assert!(!is_background_click(Some(&"close-popup"), &overlay));
        assert!(!is_background_click(None, &overlay));
    }

    #[test]
    fn initial_phase_follows_show_marker() {
        assert_eq!(
            PopupPhase::from_markers(Markers { hidden: true, show: false }),
            PopupPhase::Hidden
        );
        assert_eq!(
            PopupPhase::from_markers(Markers { hidden: false, show: true }),
            PopupPhase::Shown
        );
    }
}
