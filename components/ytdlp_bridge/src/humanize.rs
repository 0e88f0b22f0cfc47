// components/ytdlp_bridge/src/humanize.rs
//! Display formatting for durations, counts, sizes, speeds and ETAs.
//! All of these feed JSON fields the browser shows verbatim.

const MIB: f64 = 1024.0 * 1024.0;

/// Format a duration in seconds as `M:SS`, or `H:MM:SS` past the hour.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Format a large count with thousands separators, e.g. `1,234,567`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Turn a `YYYYMMDD` upload date into `MM/DD/YYYY`.
pub fn format_upload_date(raw: &str) -> String {
    if raw.len() < 8 || !raw.is_ascii() {
        return "Unknown date".to_string();
    }
    format!("{}/{}/{}", &raw[4..6], &raw[6..8], &raw[..4])
}

/// Format a transfer rate, switching to KB/s below one MB/s.
pub fn format_speed(bytes_per_sec: f64) -> String {
    if bytes_per_sec > MIB {
        format!("{:.1} MB/s", bytes_per_sec / MIB)
    } else {
        format!("{:.1} KB/s", bytes_per_sec / 1024.0)
    }
}

/// Format an ETA in seconds as `MM:SS`.
pub fn format_eta(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format a downloaded/total pair as `a / b MB`.
pub fn format_size_pair(downloaded: u64, total: u64) -> String {
    format!("{:.1} / {:.1} MB", downloaded as f64 / MIB, total as f64 / MIB)
}
