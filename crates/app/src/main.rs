use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use portfolio_core::Preference;
use portfolio_core::model::ProfileData;
use services::{
    CatalogConfig, CatalogSource, HttpCatalogSource, ManualPreferenceHost, Pacer, TokioPacer,
};
use tracing_subscriber::EnvFilter;
use ui::{App, DesktopLinkOpener, LinkOpenerRef, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidEndpoint { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidEndpoint { raw } => write!(f, "invalid --endpoint value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    catalog_source: Arc<HttpCatalogSource>,
    preference_host: ManualPreferenceHost,
    link_opener: LinkOpenerRef,
}

impl UiApp for DesktopApp {
    fn catalog_source(&self) -> Arc<dyn CatalogSource> {
        self.catalog_source.clone()
    }

    fn pacer(&self) -> Arc<dyn Pacer> {
        Arc::new(TokioPacer)
    }

    fn preference_host(&self) -> ManualPreferenceHost {
        self.preference_host.clone()
    }

    fn link_opener(&self) -> LinkOpenerRef {
        Arc::clone(&self.link_opener)
    }

    fn profile(&self) -> ProfileData {
        ProfileData::default_profile()
    }
}

#[derive(Debug, Default)]
struct Args {
    endpoint: Option<String>,
    reduced_motion: Option<bool>,
    high_contrast: Option<bool>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--endpoint <url>] [--reduced-motion] [--high-contrast]");
    eprintln!();
    eprintln!("Without a forced preference the system media queries are used.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PORTFOLIO_CATALOG_URL, PORTFOLIO_REDUCED_MOTION, PORTFOLIO_HIGH_CONTRAST, RUST_LOG");
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().and_then(|value| parse_flag(&value))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            endpoint: None,
            reduced_motion: env_flag("PORTFOLIO_REDUCED_MOTION"),
            high_contrast: env_flag("PORTFOLIO_HIGH_CONTRAST"),
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--endpoint" => {
                    let value = require_value(args, "--endpoint")?;
                    if !(value.starts_with("http://") || value.starts_with("https://")) {
                        return Err(ArgsError::InvalidEndpoint { raw: value });
                    }
                    parsed.endpoint = Some(value);
                }
                "--reduced-motion" => parsed.reduced_motion = Some(true),
                "--high-contrast" => parsed.high_contrast = Some(true),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    fn catalog_config(&self) -> CatalogConfig {
        let config = CatalogConfig::from_env();
        match &self.endpoint {
            Some(endpoint) => config.with_endpoint(endpoint.clone()),
            None => config,
        }
    }

    /// Forced preferences are pinned so the webview media queries cannot
    /// override them.
    fn preference_host(&self) -> ManualPreferenceHost {
        let host = ManualPreferenceHost::new();
        let forced = [
            (Preference::ReducedMotion, self.reduced_motion),
            (Preference::HighContrast, self.high_contrast),
        ];
        for (pref, value) in forced {
            if let Some(value) = value {
                host.pin(pref, value);
            }
        }
        host
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    let catalog_source = Arc::new(HttpCatalogSource::new(parsed.catalog_config()));
    tracing::info!(endpoint = catalog_source.endpoint(), "starting portfolio");

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        catalog_source,
        preference_host: parsed.preference_host(),
        link_opener: Arc::new(DesktopLinkOpener),
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Learning Portfolio")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
