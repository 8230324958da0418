//! KyoBrowser UI layer.
//!
//! Uses `wry` for the web views and `tao` for the window:
//! - Windows: WebView2
//! - Linux: WebKitGTK (child views need X11)
//! - macOS: WKWebView
//!
//! The browser chrome (tab strip, toolbar, find bar) is HTML/CSS/JS in its own
//! web view above the page views. Communication between the Rust shell and the
//! JS frontend uses wry IPC.

pub mod internal_pages;
pub mod webview_app;
