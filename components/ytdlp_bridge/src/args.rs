// components/ytdlp_bridge/src/args.rs
use crate::progress::PROGRESS_TEMPLATE;
use crate::types::DownloadSpec;

/// Output template placing files under the destination directory, named by
/// the media title.
const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Build the full argument vector for a download invocation.
///
/// `--newline` plus the progress template make yt-dlp emit one machine
/// readable progress line per update on stdout; see `progress`.
pub fn download_args(spec: &DownloadSpec) -> Vec<String> {
    let output = spec.dest_dir.join(OUTPUT_TEMPLATE);

    let mut args = vec![
        "--no-check-certificate".to_string(),
        "-f".to_string(),
        spec.format_selector.clone(),
        "--output".to_string(),
        output.to_string_lossy().into_owned(),
        "--newline".to_string(),
        "--progress-template".to_string(),
        PROGRESS_TEMPLATE.to_string(),
    ];

    if spec.options.subtitles {
        args.push("--write-subs".to_string());
        args.push("--sub-langs".to_string());
        args.push("en".to_string());
    }
    if spec.options.thumbnail {
        args.push("--write-thumbnail".to_string());
    }
    if spec.options.extract_audio {
        args.push("-x".to_string());
        args.push("--audio-format".to_string());
        args.push("mp3".to_string());
    }

    args.push(spec.url.to_string());
    args
}

/// Arguments for a metadata probe: dump the info JSON, download nothing.
pub fn probe_args(url: &url::Url) -> Vec<String> {
    vec![
        "--no-check-certificate".to_string(),
        "--dump-json".to_string(),
        "--no-download".to_string(),
        url.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DownloadOptions;
    use std::path::Path;

    fn spec() -> DownloadSpec {
        DownloadSpec::new(
            url::Url::parse("https://example.com/watch?v=abc").unwrap(),
            Path::new("/tmp/out"),
        )
    }

    #[test]
    fn base_args_carry_format_and_output() {
        let args = download_args(&spec());
        assert!(args.contains(&"-f".to_string()));
        assert!(args.contains(&DownloadSpec::DEFAULT_FORMAT.to_string()));
        assert!(args.iter().any(|a| a.ends_with("%(title)s.%(ext)s")));
        assert_eq!(args.last().unwrap(), "https://example.com/watch?v=abc");
    }

    #[test]
    fn progress_template_is_requested() {
        let args = download_args(&spec());
        let idx = args
            .iter()
            .position(|a| a == "--progress-template")
            .expect("progress template flag missing");
        assert!(args[idx + 1].starts_with("download:"));
    }

    #[test]
    fn option_flags_are_appended() {
        let mut spec = spec();
        spec.options = DownloadOptions {
            subtitles: true,
            thumbnail: true,
            extract_audio: true,
        };
        let args = download_args(&spec);
        assert!(args.contains(&"--write-subs".to_string()));
        assert!(args.contains(&"--write-thumbnail".to_string()));
        assert!(args.contains(&"-x".to_string()));
        // URL stays last even with every option enabled
        assert_eq!(args.last().unwrap(), "https://example.com/watch?v=abc");
    }

    #[test]
    fn probe_args_do_not_download() {
        let url = url::Url::parse("https://example.com/v/1").unwrap();
        let args = probe_args(&url);
        assert!(args.contains(&"--dump-json".to_string()));
        assert!(args.contains(&"--no-download".to_string()));
    }
}
