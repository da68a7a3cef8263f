use crate::config::TRANSITION_MS;

/// Global stylesheet for the overlays. The opacity transitions are generated
/// from `TRANSITION_MS` so they always last as long as the code waits.
pub fn global_css() -> String {
    format!(
        r#"
        html {{
            scroll-behavior: smooth;
        }}
        .popup-overlay {{
            position: fixed;
            top: 0;
            left: 0;
            width: 100%;
            height: 100%;
            display: flex;
            align-items: center;
            justify-content: center;
            background: rgba(0, 0, 0, 0.7);
            opacity: 0;
            transition: opacity {ms}ms ease;
            z-index: 1000;
        }}
        .popup-overlay.show {{
            opacity: 1;
        }}
        .popup-overlay.hidden {{
            display: none;
        }}
        .popup-content {{
            position: relative;
            max-width: 480px;
            padding: 2rem;
            border-radius: 16px;
            background: #1a1a1a;
            color: #fff;
        }}
        .close-popup {{
            position: absolute;
            top: 0.75rem;
            right: 0.75rem;
            background: none;
            border: none;
            color: #aaa;
            font-size: 1.5rem;
            cursor: pointer;
        }}
        .video-container {{
            position: relative;
            max-width: 860px;
            margin: 0 auto;
            aspect-ratio: 16 / 9;
            background: #000;
        }}
        .video-container video {{
            width: 100%;
            height: 100%;
            display: block;
        }}
        .play-overlay, .pause-overlay {{
            position: absolute;
            top: 0;
            left: 0;
            width: 100%;
            height: 100%;
            display: flex;
            align-items: center;
            justify-content: center;
            background: rgba(0, 0, 0, 0.45);
            cursor: pointer;
        }}
        .play-overlay {{
            opacity: 1;
            transition: opacity {ms}ms ease;
        }}
        .play-overlay.hidden {{
            pointer-events: none;
        }}
        .pause-overlay {{
            display: none;
        }}
        .video-progress-track {{
            position: absolute;
            left: 0;
            bottom: 0;
            width: 100%;
            height: 4px;
            background: rgba(255, 255, 255, 0.2);
        }}
        .video-progress {{
            width: 0%;
            height: 100%;
            background: #1e90ff;
        }}
        "#,
        ms = TRANSITION_MS
    )
}

#[cfg(test)]
mod tests {
    use stylist::StyleSource;

    use super::*;

    #[test]
    fn stylesheet_parses() {
        assert!(StyleSource::try_from(global_css()).is_ok());
    }

    #[test]
    fn transitions_use_the_shared_duration() {
        let css = global_css();
        let expected = format!("transition: opacity {}ms ease;", TRANSITION_MS);
        assert_eq!(css.matches(&expected).count(), 2);
    }
}
