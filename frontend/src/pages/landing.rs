use log::error;
use stylist::yew::Global;
use stylist::StyleSource;
use yew::prelude::*;

use crate::behaviors;
use crate::config::{
    PAUSE_OVERLAY_ID, PLAY_OVERLAY_ID, POPUP_CLOSE_ID, POPUP_OVERLAY_ID, PROGRESS_ID,
    TRIGGER_BUTTON_ID, VIDEO_ID,
};
use crate::styles;

#[function_component(Landing)]
pub fn landing() -> Html {
    // Markup has to be in the document before the behaviours look it up.
    use_effect_with_deps(
        move |_| {
            behaviors::setup();
            || ()
        },
        (),
    );

    let global_style = match StyleSource::try_from(styles::global_css()) {
        Ok(css) => html! { <Global css={css} /> },
        Err(err) => {
            error!("Failed to parse landing page stylesheet: {}", err);
            html! {}
        }
    };

    html! {
        <>
            { global_style }
            <div class="landing-page">
                <header class="hero">
                    <nav class="hero-nav">
                        <a href="#watch" class="nav-link">{"Watch"}</a>
                        <a href="#offer" class="nav-link">{"The offer"}</a>
                        <a href="#" class="nav-link">{"Top"}</a>
                    </nav>
                    <h1>{"Stop scrolling. Start shipping."}</h1>
                    <p class="hero-subtitle">
                        {"Watch the short video below to see how the program works."}
                    </p>
                </header>

                <section id="watch" class="video-section">
                    <div class="video-container">
                        <video id={VIDEO_ID} preload="metadata">
                            <source src="/assets/vsl.mp4" type="video/mp4" />
                        </video>
                        <div id={PLAY_OVERLAY_ID} class="play-overlay">
                            <span class="play-icon">{"▶"}</span>
                        </div>
                        <div id={PAUSE_OVERLAY_ID} class="pause-overlay">
                            <span class="play-icon">{"▶"}</span>
                        </div>
                        <div class="video-progress-track">
                            <div id={PROGRESS_ID} class="video-progress"></div>
                        </div>
                    </div>
                </section>

                <section id="offer" class="offer-section">
                    <h2>{"Choose your plan"}</h2>
                    <div class="plans">
                        <div class="plan">
                            <h3>{"Basic"}</h3>
                            <a id={TRIGGER_BUTTON_ID} href="/checkout?plan=basic" class="plan-cta">
                                {"Get Basic"}
                            </a>
                        </div>
                        <div class="plan">
                            <h3>{"Complete"}</h3>
                            <a href="/checkout?plan=complete" class="plan-cta">
                                {"Get Complete"}
                            </a>
                        </div>
                    </div>
                </section>

                <footer class="landing-footer">
                    <a href="/terms">{"Terms"}</a>
                    <a href="/privacy">{"Privacy"}</a>
                    <a href="javascript:void(0)" class="cookie-settings">{"Cookie settings"}</a>
                </footer>

                <div id={POPUP_OVERLAY_ID} class="popup-overlay hidden">
                    <div class="popup-content">
                        <button id={POPUP_CLOSE_ID} class="close-popup" aria-label="Close">{"×"}</button>
                        <h3>{"Wait, upgrade for less"}</h3>
                        <p>{"Get the Complete plan for the price of Basic, today only."}</p>
                        <a href="/checkout?plan=complete&offer=upgrade" class="plan-cta">
                            {"Claim the upgrade"}
                        </a>
                        <a href="/checkout?plan=basic" class="decline-link">
                            {"No thanks, continue with Basic"}
                        </a>
                    </div>
                </div>
            </div>
        </>
    }
}
