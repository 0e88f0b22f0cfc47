// bases/ui_server/src/config.rs
use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 5000;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind
    pub bind: IpAddr,

    /// Port to listen on
    pub port: u16,

    /// Directory served at `/` (the bundled browser UI)
    pub static_dir: PathBuf,

    /// Download folder used when a request names none
    pub download_dir: PathBuf,
}

/// Vidhaul - local web UI around yt-dlp
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address to bind. The default keeps the server local-only; bind
    /// 0.0.0.0 explicitly to expose it on the network.
    #[arg(long, default_value = "127.0.0.1")]
    pub bind: IpAddr,

    /// Directory with the static UI files
    #[arg(long, default_value = "static")]
    pub static_dir: PathBuf,

    /// Default download folder (defaults to <Downloads>/vidhaul)
    #[arg(long)]
    pub download_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_args(args: CliArgs) -> Self {
        Self {
            bind: args.bind,
            port: args.port.unwrap_or(DEFAULT_PORT),
            static_dir: args.static_dir,
            download_dir: args
                .download_dir
                .unwrap_or_else(folder_browser::default_download_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CliArgs {
        CliArgs {
            port: None,
            bind: "127.0.0.1".parse().unwrap(),
            static_dir: PathBuf::from("static"),
            download_dir: None,
        }
    }

    #[test]
    fn defaults_are_local_only_on_port_5000() {
        let config = Config::from_args(args());
        assert_eq!(config.port, 5000);
        assert!(config.bind.is_loopback());
    }

    #[test]
    fn custom_port_overrides_default() {
        let mut args = args();
        args.port = Some(3000);
        assert_eq!(Config::from_args(args).port, 3000);
    }

    #[test]
    fn explicit_download_dir_wins() {
        let mut args = args();
        args.download_dir = Some(PathBuf::from("/srv/media"));
        assert_eq!(
            Config::from_args(args).download_dir,
            PathBuf::from("/srv/media")
        );
    }
}
