// components/ytdlp_bridge/src/progress.rs
//! Parsing of yt-dlp progress lines.
//!
//! Downloads run with `--newline --progress-template download:vidhaul:%(progress)j`,
//! so every progress update arrives on stdout as a single line:
//!
//! ```text
//! vidhaul:{"status": "downloading", "downloaded_bytes": 1048576, ...}
//! ```
//!
//! Anything that does not carry the prefix (warnings, merger output,
//! post-processor chatter) is ignored.

use serde::Deserialize;

pub const PROGRESS_PREFIX: &str = "vidhaul:";
pub const PROGRESS_TEMPLATE: &str = "download:vidhaul:%(progress)j";

/// One parsed progress update, numbers only. Display formatting happens
/// where the snapshot is assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    pub percent: f64,
    pub downloaded_bytes: u64,
    pub total_bytes: Option<u64>,
    pub speed_bytes_per_sec: Option<f64>,
    pub eta_seconds: Option<u64>,
    pub filename: Option<String>,
    pub finished: bool,
}

/// Raw shape of `%(progress)j`. yt-dlp emits floats for most numeric
/// fields, and omits whichever ones it does not know yet.
#[derive(Debug, Deserialize)]
struct RawProgress {
    status: Option<String>,
    #[serde(default)]
    downloaded_bytes: Option<f64>,
    #[serde(default)]
    total_bytes: Option<f64>,
    #[serde(default)]
    total_bytes_estimate: Option<f64>,
    #[serde(default)]
    speed: Option<f64>,
    #[serde(default)]
    eta: Option<f64>,
    #[serde(default)]
    filename: Option<String>,
}

/// Parse one stdout line. Returns `None` for anything that is not a
/// progress line, including malformed JSON after the prefix.
pub fn parse_progress_line(line: &str) -> Option<ProgressUpdate> {
    let payload = line.trim().strip_prefix(PROGRESS_PREFIX)?;
    let raw: RawProgress = match serde_json::from_str(payload) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::debug!("unparseable progress line: {err}");
            return None;
        }
    };

    let finished = raw.status.as_deref() == Some("finished");
    let downloaded = raw.downloaded_bytes.unwrap_or(0.0).max(0.0);
    // Exact total when known, estimate otherwise
    let total = raw.total_bytes.or(raw.total_bytes_estimate).filter(|t| *t > 0.0);

    let percent = if finished {
        100.0
    } else {
        total
            .map(|t| (downloaded / t * 100.0).clamp(0.0, 100.0))
            .unwrap_or(0.0)
    };

    Some(ProgressUpdate {
        percent,
        downloaded_bytes: downloaded as u64,
        total_bytes: total.map(|t| t as u64),
        speed_bytes_per_sec: raw.speed.filter(|s| *s > 0.0),
        eta_seconds: raw.eta.filter(|e| *e >= 0.0).map(|e| e as u64),
        filename: raw.filename,
        finished,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_unprefixed_lines() {
        assert_eq!(parse_progress_line("[download] Destination: a.mp4"), None);
        assert_eq!(parse_progress_line(""), None);
    }

    #[test]
    fn ignores_malformed_payload() {
        assert_eq!(parse_progress_line("vidhaul:{not json"), None);
    }

    #[test]
    fn parses_downloading_line() {
        let line = r#"vidhaul:{"status": "downloading", "downloaded_bytes": 5242880.0, "total_bytes": 10485760, "speed": 1048576.0, "eta": 5, "filename": "clip.mp4"}"#;
        let update = parse_progress_line(line).unwrap();
        assert_eq!(update.percent, 50.0);
        assert_eq!(update.downloaded_bytes, 5 * 1024 * 1024);
        assert_eq!(update.total_bytes, Some(10 * 1024 * 1024));
        assert_eq!(update.speed_bytes_per_sec, Some(1048576.0));
        assert_eq!(update.eta_seconds, Some(5));
        assert_eq!(update.filename.as_deref(), Some("clip.mp4"));
        assert!(!update.finished);
    }

    #[test]
    fn falls_back_to_estimated_total() {
        let line = r#"vidhaul:{"status": "downloading", "downloaded_bytes": 250.0, "total_bytes_estimate": 1000.0}"#;
        let update = parse_progress_line(line).unwrap();
        assert_eq!(update.percent, 25.0);
        assert_eq!(update.total_bytes, Some(1000));
    }

    #[test]
    fn no_total_means_zero_percent() {
        let line = r#"vidhaul:{"status": "downloading", "downloaded_bytes": 42.0}"#;
        let update = parse_progress_line(line).unwrap();
        assert_eq!(update.percent, 0.0);
        assert_eq!(update.total_bytes, None);
    }

    #[test]
    fn finished_pins_percent_to_hundred() {
        let line = r#"vidhaul:{"status": "finished", "downloaded_bytes": 999.0, "filename": "done.mp4"}"#;
        let update = parse_progress_line(line).unwrap();
        assert!(update.finished);
        assert_eq!(update.percent, 100.0);
    }
}
