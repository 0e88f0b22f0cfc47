// components/ytdlp_bridge/src/probe.rs
//! Parsing of `--dump-json` output into the metadata the UI shows.

use crate::humanize;
use crate::types::{FormatCatalogue, FormatInfo, FormatKind, VideoMetadata};
use serde::Deserialize;

/// How many choices the UI lists per category.
const MAX_VIDEO_FORMATS: usize = 10;
const MAX_AUDIO_FORMATS: usize = 5;

/// The subset of the yt-dlp info document we care about.
#[derive(Debug, Deserialize)]
pub(crate) struct RawInfo {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    uploader: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    view_count: Option<u64>,
    #[serde(default)]
    upload_date: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    formats: Vec<RawFormat>,
}

#[derive(Debug, Deserialize)]
struct RawFormat {
    format_id: String,
    #[serde(default)]
    ext: Option<String>,
    #[serde(default)]
    resolution: Option<String>,
    #[serde(default)]
    filesize: Option<u64>,
    #[serde(default)]
    abr: Option<f64>,
    #[serde(default)]
    vcodec: Option<String>,
    #[serde(default)]
    acodec: Option<String>,
}

impl RawFormat {
    fn has_video(&self) -> bool {
        self.vcodec.as_deref().is_some_and(|c| c != "none")
    }

    fn has_audio(&self) -> bool {
        self.acodec.as_deref().is_some_and(|c| c != "none")
    }
}

pub(crate) fn parse_info(json: &[u8]) -> Result<VideoMetadata, serde_json::Error> {
    let raw: RawInfo = serde_json::from_slice(json)?;
    Ok(metadata_from(raw))
}

fn metadata_from(raw: RawInfo) -> VideoMetadata {
    VideoMetadata {
        title: raw.title.unwrap_or_else(|| "Unknown Title".to_string()),
        channel: raw.uploader.unwrap_or_else(|| "Unknown Channel".to_string()),
        duration: humanize::format_duration(raw.duration.unwrap_or(0.0).max(0.0) as u64),
        view_count: humanize::format_count(raw.view_count.unwrap_or(0)),
        upload_date: humanize::format_upload_date(raw.upload_date.as_deref().unwrap_or("")),
        thumbnail: raw.thumbnail.unwrap_or_default(),
        formats: catalogue_from(raw.formats),
    }
}

/// Split formats into video and audio-only lists, dropping entries with
/// neither track, and cap each list.
fn catalogue_from(formats: Vec<RawFormat>) -> FormatCatalogue {
    let mut catalogue = FormatCatalogue::default();

    for fmt in formats {
        let kind = match (fmt.has_video(), fmt.has_audio()) {
            (true, true) => FormatKind::VideoAudio,
            (true, false) => FormatKind::Video,
            (false, true) => FormatKind::Audio,
            (false, false) => continue,
        };

        let info = FormatInfo {
            format_id: fmt.format_id,
            ext: fmt.ext.unwrap_or_default(),
            resolution: fmt.resolution,
            abr: fmt.abr,
            filesize: fmt.filesize.unwrap_or(0),
            kind,
        };

        match kind {
            FormatKind::Audio => catalogue.audio.push(info),
            _ => catalogue.video.push(info),
        }
    }

    catalogue.video.truncate(MAX_VIDEO_FORMATS);
    catalogue.audio.truncate(MAX_AUDIO_FORMATS);
    catalogue
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info_json(formats: &str) -> String {
        format!(
            r#"{{
                "title": "A Video",
                "uploader": "A Channel",
                "duration": 192.0,
                "view_count": 1234567,
                "upload_date": "20240131",
                "thumbnail": "https://example.com/t.jpg",
                "formats": {formats}
            }}"#
        )
    }

    #[test]
    fn metadata_fields_are_formatted() {
        let meta = parse_info(info_json("[]").as_bytes()).unwrap();
        assert_eq!(meta.title, "A Video");
        assert_eq!(meta.channel, "A Channel");
        assert_eq!(meta.duration, "3:12");
        assert_eq!(meta.view_count, "1,234,567");
        assert_eq!(meta.upload_date, "01/31/2024");
    }

    #[test]
    fn missing_fields_get_placeholders() {
        let meta = parse_info(br#"{"formats": []}"#).unwrap();
        assert_eq!(meta.title, "Unknown Title");
        assert_eq!(meta.channel, "Unknown Channel");
        assert_eq!(meta.duration, "0:00");
        assert_eq!(meta.upload_date, "Unknown date");
    }

    #[test]
    fn formats_are_split_by_track_kind() {
        let formats = r#"[
            {"format_id": "22", "ext": "mp4", "resolution": "1280x720",
             "filesize": 1000, "vcodec": "avc1", "acodec": "mp4a"},
            {"format_id": "137", "ext": "mp4", "resolution": "1920x1080",
             "filesize": 2000, "vcodec": "avc1", "acodec": "none"},
            {"format_id": "140", "ext": "m4a", "abr": 128.0,
             "filesize": 500, "vcodec": "none", "acodec": "mp4a"},
            {"format_id": "sb0", "ext": "mhtml", "vcodec": "none", "acodec": "none"}
        ]"#;
        let meta = parse_info(info_json(formats).as_bytes()).unwrap();
        assert_eq!(meta.formats.video.len(), 2);
        assert_eq!(meta.formats.audio.len(), 1);
        assert_eq!(meta.formats.video[0].kind, FormatKind::VideoAudio);
        assert_eq!(meta.formats.video[1].kind, FormatKind::Video);
        assert_eq!(meta.formats.audio[0].format_id, "140");
    }

    #[test]
    fn format_lists_are_capped() {
        let mut entries = Vec::new();
        for i in 0..30 {
            entries.push(format!(
                r#"{{"format_id": "{i}", "ext": "mp4", "vcodec": "avc1", "acodec": "mp4a"}}"#
            ));
        }
        let formats = format!("[{}]", entries.join(","));
        let meta = parse_info(info_json(&formats).as_bytes()).unwrap();
        assert_eq!(meta.formats.video.len(), 10);
    }
}
