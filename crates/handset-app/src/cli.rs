use clap::Parser;

/// Handset: browse the web inside a phone-sized device frame.
#[derive(Parser, Debug)]
#[command(name = "handset", version, about)]
pub struct Args {
    /// URL to open in the first tab. Defaults to the configured home page.
    pub url: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log filter directive override (e.g. `handset=debug`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Enable developer mode: devtools and `file:` URLs.
    #[arg(long)]
    pub dev: bool,

    /// Start in landscape orientation.
    #[arg(long)]
    pub landscape: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_url_and_flags() {
        let args = Args::parse_from(["handset", "--dev", "--landscape", "example.com"]);
        assert_eq!(args.url.as_deref(), Some("example.com"));
        assert!(args.dev);
        assert!(args.landscape);
        assert!(args.config.is_none());
    }

    #[test]
    fn defaults_are_off() {
        let args = Args::parse_from(["handset"]);
        assert!(args.url.is_none());
        assert!(!args.dev);
        assert!(!args.landscape);
        assert!(args.log_level.is_none());
    }

    #[test]
    fn config_and_log_level_take_values() {
        let args = Args::parse_from([
            "handset",
            "--config",
            "/tmp/h.toml",
            "--log-level",
            "handset=trace",
        ]);
        assert_eq!(args.config.as_deref(), Some("/tmp/h.toml"));
        assert_eq!(args.log_level.as_deref(), Some("handset=trace"));
    }
}
