//! WebView-based browser window using `wry` + `tao`.
//!
//! Architecture:
//! - One chrome webview across the top renders the tab strip, toolbar, find
//!   bar and auxiliary panel from `ChromeState`.
//! - Every tab is its own child webview below the chrome; only the active
//!   one is visible. All of them share one persistent `WebContext`.
//! - Internal pages (bookmarks, downloads, about, shortcuts) are served via
//!   the `kyo://` custom protocol.
//! - IPC from JS → Rust via `window.ipc.postMessage()`.
//! - wry callbacks only post `UserEvent`s; the shell is touched from the
//!   event loop alone.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use tao::window::{Window, WindowBuilder};
use tracing::{debug, info, warn};
use wry::dpi::{LogicalPosition, LogicalSize};
use wry::http::header::ACCEPT_LANGUAGE;
use wry::http::{HeaderMap, HeaderValue, Request};
use wry::{Rect, WebContext, WebView, WebViewBuilder};

use crate::app::App;
use crate::config::AppConfig;
use crate::managers::download_manager::{default_target, prepare_target};
use crate::types::command::{
    is_internal_url, Origin, PageEvent, ShellCommand, ShellEffect, INTERNAL_SCHEME,
};
use crate::types::errors::ViewError;
use crate::types::find::{FindDirection, FindQuery};
use crate::types::tab::TabId;
use crate::ui::internal_pages;
use crate::view::{PageView, ViewFactory};

/// Height of one chrome row in logical pixels.
const ROW_HEIGHT: f64 = 36.0;
const WINDOW_TITLE: &str = "KyoBrowser";

const PAGE_HOOKS_JS: &str = include_str!("../../resources/ui/page_hooks.js");
const CHROME_HTML: &str = include_str!("../../resources/ui/chrome.html");
const CHROME_CSS: &str = include_str!("../../resources/ui/chrome.css");
const CHROME_JS: &str = include_str!("../../resources/ui/chrome.js");

#[derive(Debug)]
enum UserEvent {
    ChromeIpc(String),
    PageIpc {
        tab: TabId,
        internal: bool,
        body: String,
    },
    Page {
        tab: TabId,
        event: PageEvent,
    },
    DownloadStarted {
        url: String,
        target: Option<PathBuf>,
    },
    DownloadFinished {
        url: String,
        path: Option<PathBuf>,
        success: bool,
    },
}

/// Reports from the injected page hooks that are not shell commands.
#[derive(Debug, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
enum PageNotice {
    PageIcon {
        #[serde(default)]
        href: Option<String>,
    },
    PageUrl {
        url: String,
    },
}

impl From<PageNotice> for PageEvent {
    fn from(notice: PageNotice) -> Self {
        match notice {
            PageNotice::PageIcon { href } => PageEvent::IconChanged(href),
            PageNotice::PageUrl { url } => PageEvent::UrlChanged(url),
        }
    }
}

/// Settings every page view is built with.
#[derive(Debug, Clone)]
struct ViewSettings {
    user_agent: String,
    accept_language: String,
    /// `accept_language` as bare tags, for engines configured per profile.
    languages: Vec<String>,
    download_dir: PathBuf,
}

impl ViewSettings {
    fn from_config(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            accept_language: config.accept_language.clone(),
            languages: config.preferred_languages(),
            download_dir: config.download_dir(),
        }
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        match HeaderValue::from_str(&self.accept_language) {
            Ok(value) => {
                headers.insert(ACCEPT_LANGUAGE, value);
            }
            Err(e) => warn!(value = %self.accept_language, error = %e, "invalid Accept-Language"),
        }
        headers
    }
}

// ─── Page views ───

/// A tab's webview.
pub struct WryView {
    webview: WebView,
    headers: HeaderMap,
}

impl WryView {
    fn eval(&self, js: &str) -> Result<(), ViewError> {
        self.webview
            .evaluate_script(js)
            .map_err(|e| ViewError::Script(e.to_string()))
    }

    fn set_bounds(&self, bounds: Rect) -> Result<(), ViewError> {
        self.webview
            .set_bounds(bounds)
            .map_err(|e| ViewError::Layout(e.to_string()))
    }
}

impl PageView for WryView {
    fn navigate(&self, url: &str) -> Result<(), ViewError> {
        let result = if is_internal_url(url) {
            self.webview.load_url(url)
        } else {
            self.webview.load_url_with_headers(url, self.headers.clone())
        };
        result.map_err(|e| ViewError::Navigation(format!("{}: {}", url, e)))
    }

    fn back(&self) -> Result<(), ViewError> {
        self.eval("history.back()")
    }

    fn forward(&self) -> Result<(), ViewError> {
        self.eval("history.forward()")
    }

    fn reload(&self) -> Result<(), ViewError> {
        self.eval("location.reload()")
    }

    fn find(&self, query: &FindQuery) -> Result<(), ViewError> {
        self.eval(&format!(
            "window.__kyoFind && window.__kyoFind({}, {}, {}, {})",
            serde_json::Value::from(query.text.as_str()),
            query.case_sensitive,
            query.whole_word,
            query.direction == FindDirection::Backward,
        ))
    }

    fn clear_find(&self) -> Result<(), ViewError> {
        self.eval("window.__kyoClearFind && window.__kyoClearFind()")
    }

    fn set_visible(&self, visible: bool) -> Result<(), ViewError> {
        self.webview
            .set_visible(visible)
            .map_err(|e| ViewError::Layout(e.to_string()))
    }
}

/// Builds tab webviews as children of the main window.
struct WryViewFactory<'a> {
    window: &'a Window,
    context: &'a mut WebContext,
    proxy: &'a EventLoopProxy<UserEvent>,
    settings: &'a ViewSettings,
    bounds: Rect,
}

impl ViewFactory for WryViewFactory<'_> {
    type View = WryView;

    fn create_view(&mut self, id: TabId) -> Result<WryView, ViewError> {
        let ipc_proxy = self.proxy.clone();
        let load_proxy = self.proxy.clone();
        let title_proxy = self.proxy.clone();
        let nw_proxy = self.proxy.clone();
        let dl_proxy = self.proxy.clone();
        let done_proxy = self.proxy.clone();
        let download_dir = self.settings.download_dir.clone();

        let builder = WebViewBuilder::new_with_web_context(self.context)
            .with_bounds(self.bounds)
            .with_user_agent(&self.settings.user_agent)
            .with_devtools(cfg!(debug_assertions))
            .with_initialization_script(PAGE_HOOKS_JS)
            .with_custom_protocol(INTERNAL_SCHEME.into(), move |_wv_id, request| {
                internal_pages::respond(request.uri().path())
            })
            .with_ipc_handler(move |msg: Request<String>| {
                let internal = is_internal_url(&msg.uri().to_string());
                let _ = ipc_proxy.send_event(UserEvent::PageIpc {
                    tab: id,
                    internal,
                    body: msg.body().clone(),
                });
            })
            .with_on_page_load_handler(move |event, url| {
                let event = match event {
                    wry::PageLoadEvent::Started => PageEvent::LoadStarted { url },
                    wry::PageLoadEvent::Finished => PageEvent::LoadFinished { url },
                };
                let _ = load_proxy.send_event(UserEvent::Page { tab: id, event });
            })
            .with_document_title_changed_handler(move |title| {
                let _ = title_proxy.send_event(UserEvent::Page {
                    tab: id,
                    event: PageEvent::TitleChanged(title),
                });
            })
            .with_new_window_req_handler(move |url, _features| {
                debug!(tab = %id, url = %url, "new window requested");
                let _ = nw_proxy.send_event(UserEvent::Page {
                    tab: id,
                    event: PageEvent::NewWindowRequested(url),
                });
                wry::NewWindowResponse::Deny
            })
            .with_download_started_handler(move |url, suggested_path| {
                let target = choose_download_target(&download_dir, &url, suggested_path);
                if let Some(path) = &target {
                    *suggested_path = path.clone();
                }
                let accepted = target.is_some();
                let _ = dl_proxy.send_event(UserEvent::DownloadStarted { url, target });
                accepted
            })
            .with_download_completed_handler(move |url, path, success| {
                let _ = done_proxy.send_event(UserEvent::DownloadFinished { url, path, success });
            });

        // Link clicks and subresources bypass `load_url_with_headers`, so the
        // engine's own language list has to match the header.
        #[cfg(target_os = "windows")]
        let builder = {
            use wry::WebViewBuilderExtWindows;
            builder.with_additional_browser_args(webview2_browser_args(&self.settings.languages))
        };

        let webview = builder
            .build_as_child(self.window)
            .map_err(|e| ViewError::Creation(e.to_string()))?;

        #[cfg(target_os = "linux")]
        apply_preferred_languages(&webview, &self.settings.languages);

        Ok(WryView {
            webview,
            headers: self.settings.headers(),
        })
    }
}

/// WebView2 process arguments. Replacing wry's default arguments drops its
/// disabled features, so they are repeated here.
#[cfg(any(target_os = "windows", test))]
fn webview2_browser_args(languages: &[String]) -> String {
    let mut args =
        String::from("--disable-features=msWebOOUI,msPdfOOUI,msSmartScreenProtection");
    if !languages.is_empty() {
        args.push_str(" --accept-lang=");
        args.push_str(&languages.join(","));
    }
    args
}

/// Sets the WebKitGTK profile languages, which build its Accept-Language
/// header for every request.
#[cfg(target_os = "linux")]
fn apply_preferred_languages(webview: &WebView, languages: &[String]) {
    use webkit2gtk::{WebContextExt, WebViewExt};
    use wry::WebViewExtUnix;

    if languages.is_empty() {
        return;
    }
    let tags: Vec<&str> = languages.iter().map(String::as_str).collect();
    match webview.webview().context() {
        Some(context) => context.set_preferred_languages(&tags),
        None => warn!("webview has no web context, keeping engine languages"),
    }
}

/// Asks the user where to save a download. `None` means cancelled.
fn choose_download_target(dir: &Path, url: &str, suggested: &Path) -> Option<PathBuf> {
    let default = default_target(dir, url, suggested);
    let mut dialog = rfd::FileDialog::new().set_title("Save file");
    if let Some(parent) = default.parent() {
        dialog = dialog.set_directory(parent);
    }
    if let Some(name) = default.file_name() {
        dialog = dialog.set_file_name(name.to_string_lossy());
    }

    let chosen = dialog.save_file()?;
    if let Err(e) = prepare_target(&chosen) {
        warn!(path = %chosen.display(), error = %e, "download target not writable");
    }
    Some(chosen)
}

// ─── Layout ───

fn logical_size(window: &Window) -> (f64, f64) {
    let scale = window.scale_factor();
    let size = window.inner_size();
    (size.width as f64 / scale, size.height as f64 / scale)
}

fn chrome_rect(window: &Window, rows: u32) -> Rect {
    let (width, _) = logical_size(window);
    Rect {
        position: LogicalPosition::new(0.0, 0.0).into(),
        size: LogicalSize::new(width, ROW_HEIGHT * f64::from(rows)).into(),
    }
}

fn content_rect(window: &Window, rows: u32) -> Rect {
    let (width, height) = logical_size(window);
    let top = ROW_HEIGHT * f64::from(rows);
    Rect {
        position: LogicalPosition::new(0.0, top).into(),
        size: LogicalSize::new(width, (height - top).max(0.0)).into(),
    }
}

fn apply_layout(window: &Window, chrome: &WebView, app: &App<WryView>) {
    let rows = app.chrome_rows();
    if let Err(e) = chrome.set_bounds(chrome_rect(window, rows)) {
        warn!(error = %e, "failed to resize chrome");
    }
    let bounds = content_rect(window, rows);
    for view in app.tabs.views() {
        if let Err(e) = view.set_bounds(bounds) {
            warn!(error = %e, "failed to resize tab");
        }
    }
}

// ─── Chrome ───

fn chrome_html() -> String {
    let mut html = String::with_capacity(
        CHROME_HTML.len() + CHROME_CSS.len() + CHROME_JS.len() + PAGE_HOOKS_JS.len() + 256,
    );
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><style>");
    html.push_str(CHROME_CSS);
    html.push_str("</style></head><body>");
    html.push_str(CHROME_HTML);
    html.push_str("<script>window.__kyoChrome = true;</script><script>");
    html.push_str(PAGE_HOOKS_JS);
    html.push_str("</script><script>");
    html.push_str(CHROME_JS);
    html.push_str("</script></body></html>");
    html
}

fn eval_chrome(chrome: &WebView, js: &str) {
    if let Err(e) = chrome.evaluate_script(js) {
        warn!(error = %e, "chrome script failed");
    }
}

fn focus_chrome(chrome: &WebView) {
    if let Err(e) = chrome.focus() {
        warn!(error = %e, "failed to focus chrome");
    }
}

fn render_chrome(window: &Window, chrome: &WebView, app: &App<WryView>) {
    let state = app.chrome_state();
    match serde_json::to_string(&state) {
        Ok(json) => eval_chrome(chrome, &format!("window.kyo && kyo.render({})", json)),
        Err(e) => warn!(error = %e, "failed to serialize chrome state"),
    }

    let label = state.tabs.iter().find(|t| t.active).map(|t| t.label.as_str());
    match label {
        Some(label) => window.set_title(&format!("{} - {}", label, WINDOW_TITLE)),
        None => window.set_title(WINDOW_TITLE),
    }
}

fn apply_effects(chrome: &WebView, app: &App<WryView>, effects: Vec<ShellEffect>) {
    for effect in effects {
        match effect {
            ShellEffect::Notify(message) => eval_chrome(
                chrome,
                &format!("window.kyo && kyo.notify({})", serde_json::Value::from(message)),
            ),
            ShellEffect::PromptBookmarkTitle { title, url } => eval_chrome(
                chrome,
                &format!(
                    "window.kyo && kyo.promptBookmark({}, {})",
                    serde_json::Value::from(title),
                    serde_json::Value::from(url)
                ),
            ),
            ShellEffect::FocusAddressBar => {
                focus_chrome(chrome);
                eval_chrome(chrome, "window.kyo && kyo.focusAddress()");
            }
            ShellEffect::FocusFind => {
                focus_chrome(chrome);
                eval_chrome(chrome, "window.kyo && kyo.focusFind()");
            }
            ShellEffect::Reply { tab, kind, payload } => {
                let Some(view) = app.tabs.view_of(tab) else {
                    continue;
                };
                let js = format!(
                    "window.__kyoReceive && window.__kyoReceive({}, {})",
                    serde_json::Value::from(kind),
                    payload
                );
                if let Err(e) = view.eval(&js) {
                    warn!(tab = %tab, error = %e, "failed to deliver page data");
                }
            }
        }
    }
}

// ─── IPC ───

fn parse_command(body: &str) -> Option<ShellCommand> {
    match serde_json::from_str(body) {
        Ok(cmd) => Some(cmd),
        Err(e) => {
            let preview: String = body.chars().take(200).collect();
            debug!(error = %e, body = %preview, "ignoring unknown IPC message");
            None
        }
    }
}

// ─── Main entry point ───

pub fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let settings = ViewSettings::from_config(&config);
    let mut context = WebContext::new(Some(config.profile_dir()));

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(tao::dpi::LogicalSize::new(config.window.width, config.window.height))
        .build(&event_loop)?;

    let mut app: App<WryView> = App::new(config);

    let chrome_proxy = proxy.clone();
    let chrome = WebViewBuilder::new()
        .with_html(chrome_html())
        .with_bounds(chrome_rect(&window, app.chrome_rows()))
        .with_devtools(cfg!(debug_assertions))
        .with_ipc_handler(move |msg: Request<String>| {
            let _ = chrome_proxy.send_event(UserEvent::ChromeIpc(msg.body().clone()));
        })
        .build_as_child(&window)?;

    {
        let mut factory = WryViewFactory {
            window: &window,
            context: &mut context,
            proxy: &proxy,
            settings: &settings,
            bounds: content_rect(&window, app.chrome_rows()),
        };
        app.startup(&mut factory)?;
    }
    info!("browser window ready");

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        let rows_before = app.chrome_rows();
        let mut factory = WryViewFactory {
            window: &window,
            context: &mut context,
            proxy: &proxy,
            settings: &settings,
            bounds: content_rect(&window, rows_before),
        };

        let effects = match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("window closed");
                *control_flow = ControlFlow::Exit;
                return;
            }

            Event::WindowEvent {
                event: WindowEvent::Resized(_),
                ..
            } => {
                apply_layout(&window, &chrome, &app);
                return;
            }

            Event::UserEvent(user_event) => match user_event {
                UserEvent::ChromeIpc(body) => match parse_command(&body) {
                    Some(cmd) => app.dispatch(Origin::Chrome, cmd, &mut factory),
                    None => return,
                },
                UserEvent::PageIpc {
                    tab,
                    internal,
                    body,
                } => {
                    if let Ok(notice) = serde_json::from_str::<PageNotice>(&body) {
                        app.handle_page_event(tab, notice.into(), &mut factory)
                    } else if let Some(cmd) = parse_command(&body) {
                        app.dispatch(Origin::Page { tab, internal }, cmd, &mut factory)
                    } else {
                        return;
                    }
                }
                UserEvent::Page { tab, event } => {
                    app.handle_page_event(tab, event, &mut factory)
                }
                UserEvent::DownloadStarted { url, target } => {
                    app.download_started(&url, target.as_deref(), &mut factory)
                }
                UserEvent::DownloadFinished { url, path, success } => {
                    app.download_finished(&url, path.as_deref(), success)
                }
            },

            _ => return,
        };

        if app.chrome_rows() != rows_before {
            apply_layout(&window, &chrome, &app);
        }
        render_chrome(&window, &chrome, &app);
        apply_effects(&chrome, &app, effects);
    });
}
