// components/ytdlp_bridge/src/diagnose.rs
//! Best-effort translation of known yt-dlp stderr fragments into
//! one-line messages fit for the UI. Anything unrecognized falls through
//! and the caller reports the raw stderr tail instead.

const KNOWN_FAILURES: &[(&str, &str)] = &[
    ("Video unavailable", "This video is unavailable."),
    ("Private video", "This video is private."),
    (
        "Sign in to confirm",
        "The site requires sign-in to access this video.",
    ),
    ("Unsupported URL", "This URL is not supported."),
    ("is not a valid URL", "This URL is not valid."),
    ("HTTP Error 403", "Access was denied by the server (HTTP 403)."),
    (
        "HTTP Error 429",
        "The server is rate limiting requests (HTTP 429). Try again later.",
    ),
    (
        "Unable to download webpage",
        "Could not reach the site. Check the URL and your connection.",
    ),
];

/// Match stderr text against known failure fragments.
pub fn classify_stderr(stderr: &str) -> Option<&'static str> {
    KNOWN_FAILURES
        .iter()
        .find(|(needle, _)| stderr.contains(needle))
        .map(|(_, friendly)| *friendly)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_fragments_map_to_friendly_text() {
        let stderr = "ERROR: [youtube] abc123: Video unavailable";
        assert_eq!(classify_stderr(stderr), Some("This video is unavailable."));
    }

    #[test]
    fn http_errors_are_recognized() {
        assert!(classify_stderr("urlopen error HTTP Error 429: Too Many Requests")
            .unwrap()
            .contains("429"));
    }

    #[test]
    fn unknown_text_falls_through() {
        assert_eq!(classify_stderr("ERROR: something novel went wrong"), None);
    }
}
