use std::cell::Cell;
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, EventTarget, HtmlElement, HtmlVideoElement};

use crate::config::{
    HIDDEN_CLASS, OVERLAY_FADE_IN_DELAY_MS, PAUSE_OVERLAY_ID, PLAY_OVERLAY_ID, PROGRESS_ID,
    TRANSITION_MS, VIDEO_CONTAINER_SELECTOR, VIDEO_ID,
};
use crate::dom::{html_by_id, listen, report, set_marker, set_style};
use crate::timing::{defer, Generation};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerPhase {
    PausedAtStart,
    /// Playback requested from a click, native `play` not seen yet.
    Starting,
    Playing,
    PausedMid,
    /// Stays here until playback starts again.
    Ended,
}

/// Clicks on the player and the native media events it reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerEvent {
    StartRequested,
    PauseRequested,
    Play,
    Pause { ended: bool },
    Ended,
}

/// State of the play prompt overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayPrompt {
    Visible,
    FadingIn,
    FadingOut,
    /// `hidden` marker on and out of layout.
    Removed,
}

impl PlayPrompt {
    /// How long a fading prompt waits before it settles.
    pub fn delay_ms(self) -> Option<u32> {
        match self {
            PlayPrompt::FadingIn => Some(OVERLAY_FADE_IN_DELAY_MS),
            PlayPrompt::FadingOut => Some(TRANSITION_MS),
            PlayPrompt::Visible | PlayPrompt::Removed => None,
        }
    }

    pub fn settled(self) -> PlayPrompt {
        match self {
            PlayPrompt::FadingIn | PlayPrompt::Visible => PlayPrompt::Visible,
            PlayPrompt::FadingOut | PlayPrompt::Removed => PlayPrompt::Removed,
        }
    }
}

/// What the overlays must look like in a given phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayView {
    pub play_prompt: PlayPrompt,
    pub pause_prompt: bool,
    pub reset_progress: bool,
}

impl PlayerPhase {
    pub fn next(self, event: PlayerEvent) -> PlayerPhase {
        match event {
            PlayerEvent::StartRequested => PlayerPhase::Starting,
            PlayerEvent::PauseRequested => PlayerPhase::PausedMid,
            PlayerEvent::Play => PlayerPhase::Playing,
            // The pause that accompanies end-of-media is not a mid-video pause.
            PlayerEvent::Pause { ended: true } => self,
            PlayerEvent::Pause { ended: false } => PlayerPhase::PausedMid,
            PlayerEvent::Ended => PlayerPhase::Ended,
        }
    }

    pub fn view(self) -> OverlayView {
        match self {
            PlayerPhase::PausedAtStart => OverlayView {
                play_prompt: PlayPrompt::Visible,
                pause_prompt: false,
                reset_progress: false,
            },
            PlayerPhase::Starting => OverlayView {
                play_prompt: PlayPrompt::FadingOut,
                pause_prompt: false,
                reset_progress: false,
            },
            PlayerPhase::Playing => OverlayView {
                play_prompt: PlayPrompt::Removed,
                pause_prompt: false,
                reset_progress: false,
            },
            PlayerPhase::PausedMid => OverlayView {
                play_prompt: PlayPrompt::Removed,
                pause_prompt: true,
                reset_progress: false,
            },
            PlayerPhase::Ended => OverlayView {
                play_prompt: PlayPrompt::FadingIn,
                pause_prompt: false,
                reset_progress: true,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickAction {
    StartPlay,
    Pause,
}

pub fn click_action(paused: bool) -> ClickAction {
    if paused {
        ClickAction::StartPlay
    } else {
        ClickAction::Pause
    }
}

/// Playback position as a percentage in `[0, 100]`. Until the duration is
/// known (NaN) or when it is not a usable positive number this is 0.
pub fn progress_percent(current_time: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !current_time.is_finite() {
        return 0.0;
    }
    (current_time / duration * 100.0).clamp(0.0, 100.0)
}

pub fn width_value(percent: f64) -> String {
    format!("{}%", percent)
}

#[derive(Clone)]
struct VideoPlayer {
    video: HtmlVideoElement,
    play_overlay: Option<HtmlElement>,
    pause_overlay: Option<HtmlElement>,
    progress: Option<HtmlElement>,
    fade: Generation,
    phase: Rc<Cell<PlayerPhase>>,
}

impl VideoPlayer {
    fn handle(&self, event: PlayerEvent) -> Result<(), JsValue> {
        let from = self.phase.get();
        let to = from.next(event);
        if from == to {
            return Ok(());
        }
        debug!("Video {:?} -> {:?}", from, to);
        self.phase.set(to);
        self.apply(to.view())
    }

    fn apply(&self, view: OverlayView) -> Result<(), JsValue> {
        if let Some(play) = &self.play_overlay {
            // Any prompt change supersedes a fade still in flight.
            let ticket = self.fade.bump();
            match view.play_prompt {
                PlayPrompt::FadingOut => set_style(play, "opacity", "0")?,
                PlayPrompt::FadingIn => {
                    set_style(play, "display", "flex")?;
                    set_marker(play, HIDDEN_CLASS, false)?;
                }
                settled => render_play_prompt(play, settled)?,
            }
            if let Some(delay) = view.play_prompt.delay_ms() {
                let play = play.clone();
                let settled = view.play_prompt.settled();
                defer(delay, &self.fade, ticket, move || {
                    report("Failed to settle play overlay", render_play_prompt(&play, settled));
                });
            }
        }
        if let Some(pause) = &self.pause_overlay {
            let display = if view.pause_prompt { "flex" } else { "none" };
            set_style(pause, "display", display)?;
        }
        if view.reset_progress {
            if let Some(progress) = &self.progress {
                set_style(progress, "width", &width_value(0.0))?;
            }
        }
        Ok(())
    }

    fn toggle(&self) -> Result<(), JsValue> {
        match click_action(self.video.paused()) {
            ClickAction::StartPlay => {
                self.play_media();
                self.handle(PlayerEvent::StartRequested)
            }
            ClickAction::Pause => {
                self.video.pause()?;
                self.handle(PlayerEvent::PauseRequested)
            }
        }
    }

    fn play_media(&self) {
        match self.video.play() {
            Ok(promise) => spawn_local(async move {
                if let Err(err) = JsFuture::from(promise).await {
                    warn!("Video playback was rejected: {:?}", err);
                }
            }),
            Err(err) => warn!("Could not start video playback: {:?}", err),
        }
    }

    fn on_time_update(&self) -> Result<(), JsValue> {
        if let Some(progress) = &self.progress {
            let percent = progress_percent(self.video.current_time(), self.video.duration());
            set_style(progress, "width", &width_value(percent))?;
        }
        Ok(())
    }
}

fn render_play_prompt(play: &HtmlElement, prompt: PlayPrompt) -> Result<(), JsValue> {
    match prompt {
        PlayPrompt::Removed => {
            set_marker(play, HIDDEN_CLASS, true)?;
            set_style(play, "display", "none")
        }
        _ => {
            set_marker(play, HIDDEN_CLASS, false)?;
            set_style(play, "display", "flex")?;
            set_style(play, "opacity", "1")
        }
    }
}

pub fn init(document: &Document) -> Result<(), JsValue> {
    let Some(video) = document
        .get_element_by_id(VIDEO_ID)
        .and_then(|el| el.dyn_into::<HtmlVideoElement>().ok())
    else {
        debug!("No #{} video on page, player disabled", VIDEO_ID);
        return Ok(());
    };
    if document.query_selector(VIDEO_CONTAINER_SELECTOR)?.is_none() {
        debug!("No {} around the video", VIDEO_CONTAINER_SELECTOR);
    }

    let player = VideoPlayer {
        video: video.clone(),
        play_overlay: html_by_id(document, PLAY_OVERLAY_ID),
        pause_overlay: html_by_id(document, PAUSE_OVERLAY_ID),
        progress: html_by_id(document, PROGRESS_ID),
        fade: Generation::new(),
        phase: Rc::new(Cell::new(PlayerPhase::PausedAtStart)),
    };

    let click_targets: [Option<EventTarget>; 3] = [
        player.play_overlay.clone().map(Into::into),
        Some(video.clone().into()),
        player.pause_overlay.clone().map(Into::into),
    ];
    for target in click_targets.iter().flatten() {
        let player = player.clone();
        listen(target, "click", move |_| {
            report("Failed to toggle video", player.toggle());
        })?;
    }

    {
        let player = player.clone();
        listen(&video, "play", move |_| {
            report("Failed to handle play", player.handle(PlayerEvent::Play));
        })?;
    }
    {
        let player = player.clone();
        listen(&video, "pause", move |_| {
            let ended = player.video.ended();
            report("Failed to handle pause", player.handle(PlayerEvent::Pause { ended }));
        })?;
    }
    {
        let player = player.clone();
        listen(&video, "timeupdate", move |_| {
            report("Failed to update progress", player.on_time_update());
        })?;
    }
    listen(&video, "ended", move |_| {
        report("Failed to reset player", player.handle(PlayerEvent::Ended));
    })?;

    info!("Video player wired");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_duration_gives_zero_progress() {
        assert_eq!(progress_percent(3.0, f64::NAN), 0.0);
        assert_eq!(progress_percent(3.0, f64::INFINITY), 0.0);
        assert_eq!(progress_percent(3.0, 0.0), 0.0);
        assert_eq!(width_value(progress_percent(0.0, f64::NAN)), "0%");
    }

    #[test]
    fn progress_is_a_clamped_percentage() {
        assert_eq!(progress_percent(30.0, 120.0), 25.0);
        assert_eq!(progress_percent(120.0, 120.0), 100.0);
        assert_eq!(progress_percent(130.0, 120.0), 100.0);
        assert_eq!(width_value(progress_percent(30.0, 120.0)), "25%");
    }

    #[test]
    fn click_toggles_on_paused_state() {
        assert_eq!(click_action(true), ClickAction::StartPlay);
        assert_eq!(click_action(false), ClickAction::Pause);
    }

    #[test]
    fn starting_hides_pause_prompt_and_removes_play_prompt_after_one_transition() {
        let view = PlayerPhase::PausedAtStart
            .next(PlayerEvent::StartRequested)
            .view();
        assert!(!view.pause_prompt);
        assert_eq!(view.play_prompt, PlayPrompt::FadingOut);
        assert_eq!(view.play_prompt.delay_ms(), Some(TRANSITION_MS));
        assert_eq!(view.play_prompt.settled(), PlayPrompt::Removed);
    }

    #[test]
    fn native_play_removes_play_prompt_at_once() {
        for from in [PlayerPhase::PausedAtStart, PlayerPhase::Starting, PlayerPhase::PausedMid] {
            let view = from.next(PlayerEvent::Play).view();
            assert_eq!(view.play_prompt, PlayPrompt::Removed);
            assert!(!view.pause_prompt);
        }
    }

    #[test]
    fn pausing_mid_video_shows_pause_prompt() {
        let playing = PlayerPhase::Playing;
        assert!(playing.next(PlayerEvent::PauseRequested).view().pause_prompt);
        assert!(playing.next(PlayerEvent::Pause { ended: false }).view().pause_prompt);
        assert_eq!(playing.next(PlayerEvent::Pause { ended: true }), PlayerPhase::Playing);
    }

    #[test]
    fn ending_resets_progress_and_restores_play_prompt() {
        let view = PlayerPhase::Playing.next(PlayerEvent::Ended).view();
        assert!(view.reset_progress);
        assert!(!view.pause_prompt);
        assert_eq!(view.play_prompt, PlayPrompt::FadingIn);
        assert_eq!(view.play_prompt.delay_ms(), Some(OVERLAY_FADE_IN_DELAY_MS));
        assert_eq!(view.play_prompt.settled(), PlayPrompt::Visible);
        assert_eq!(width_value(0.0), "0%");
    }

    #[test]
    fn replay_after_end_starts_a_new_fade_out() {
        let phase = PlayerPhase::Ended.next(PlayerEvent::StartRequested);
        assert_eq!(phase, PlayerPhase::Starting);
        assert_eq!(phase.view().play_prompt, PlayPrompt::FadingOut);
    }
}
