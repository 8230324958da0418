//! KyoBrowser entry point.
//!
//! Installs logging, loads the configuration and opens the browser window.
//! When built without the `gui` feature, prints what the shell would start
//! with instead.

use kyobrowser::config::AppConfig;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(feature = "gui")]
fn main() {
    init_logging();
    let config = AppConfig::load_or_default();

    if let Err(e) = kyobrowser::ui::webview_app::run(config) {
        tracing::error!(error = %e, "KyoBrowser failed to start");
        eprintln!("KyoBrowser failed to start: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
fn main() {
    use kyobrowser::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
    use kyobrowser::managers::shortcut_manager::{ShortcutManager, ShortcutManagerTrait};
    use kyobrowser::services::address_resolver::resolve_input;

    init_logging();
    let config = AppConfig::load_or_default();

    println!("KyoBrowser v{} (headless build)", env!("CARGO_PKG_VERSION"));
    println!("  data dir:  {}", config.data_dir.display());
    println!("  downloads: {}", config.download_dir().display());
    println!("  home:      {}", config.home_url);

    let bookmarks = BookmarkManager::open(config.bookmarks_path());
    println!();
    println!("Bookmarks ({}):", bookmarks.len());
    for bookmark in bookmarks.list() {
        println!("  {}  {}", bookmark.title, bookmark.url);
    }

    let shortcuts = ShortcutManager::new();
    println!();
    println!("Shortcuts:");
    for entry in shortcuts.list_shortcuts() {
        println!("  {:<14} {}", entry.keys, entry.description);
    }

    for input in std::env::args().skip(1) {
        match resolve_input(&input, &config.search_url) {
            Some(url) => println!("{} -> {}", input, url),
            None => println!("{} -> (no navigation)", input),
        }
    }
}
