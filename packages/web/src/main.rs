use dioxus::logger::tracing::Level;
use dioxus::prelude::*;
use store::ClientConfig;
use ui::{AppProvider, GuardedShell, MISSIONS_CSS};

const MAIN_CSS: Asset = asset!("/assets/main.css");
const CONFIG_TOML: &str = include_str!("../viiveo.toml");

fn main() {
    let (config, problem) = load_config(CONFIG_TOML, option_env!("VIIVEO_API_BASE_URL"));

    let level = if config.debug { Level::DEBUG } else { Level::INFO };
    if let Err(e) = dioxus::logger::init(level) {
        eprintln!("Failed to initialize logging: {e}");
    }
    if let Some(problem) = problem {
        tracing::warn!("Invalid {}, using defaults: {problem}", ClientConfig::filename());
    }
    tracing::debug!("API base URL: {}", config.api.base_url);

    dioxus::LaunchBuilder::new().with_context(config).launch(App);
}

/// Parse the bundled configuration, falling back to defaults, and apply the
/// build-time base URL override.
fn load_config(toml: &str, base_url: Option<&str>) -> (ClientConfig, Option<String>) {
    let (config, problem) = match ClientConfig::from_toml(toml) {
        Ok(config) => (config, None),
        Err(e) => (ClientConfig::default(), Some(e.to_string())),
    };
    match base_url {
        Some(url) if !url.trim().is_empty() => (config.with_base_url(url.trim()), problem),
        _ => (config, problem),
    }
}

#[component]
fn App() -> Element {
    let config = use_context::<ClientConfig>();

    rsx! {
        document::Title { "Viiveo - Mes missions" }
        document::Stylesheet { href: MAIN_CSS }
        document::Stylesheet { href: MISSIONS_CSS }

        AppProvider { config, GuardedShell {} }
    }
}
