// Element ids and class markers shared between the rendered markup and the
// controllers that wire behaviour onto it.

pub const TRIGGER_BUTTON_ID: &str = "btn-basic";
pub const POPUP_OVERLAY_ID: &str = "offer-popup";
pub const POPUP_CLOSE_ID: &str = "close-popup";

pub const VIDEO_ID: &str = "vsl-video";
pub const PLAY_OVERLAY_ID: &str = "play-overlay";
pub const PAUSE_OVERLAY_ID: &str = "pause-overlay";
pub const PROGRESS_ID: &str = "video-progress";
pub const VIDEO_CONTAINER_SELECTOR: &str = ".video-container";

pub const FRAGMENT_LINK_SELECTOR: &str = "a[href^=\"#\"]";
pub const ANY_LINK_SELECTOR: &str = "a";

pub const HIDDEN_CLASS: &str = "hidden";
pub const SHOW_CLASS: &str = "show";

/// Opacity transition used by the stylesheet. The popup close delay and the
/// play overlay fade both wait exactly this long.
pub const TRANSITION_MS: u32 = 300;

/// Lets a `display` change apply before the transition class goes on.
pub const POPUP_ENTER_DELAY_MS: u32 = 10;

pub const OVERLAY_FADE_IN_DELAY_MS: u32 = 10;
