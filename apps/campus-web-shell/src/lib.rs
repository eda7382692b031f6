#![allow(clippy::needless_pass_by_value)]

#[cfg(any(target_arch = "wasm32", test))]
mod boot;
#[cfg(target_arch = "wasm32")]
mod wasm_constants;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use async_trait::async_trait;
    use campus_client_core::{
        ApiClient, ApiTransport, ConfigError, CsvExport, HttpMethod, PreparedRequest, RawResponse,
        RequestError, Session, TokenStore,
    };
    use campus_ui_core::render::{
        LOADING_OVERLAY_CSS, LOADING_OVERLAY_ID, LOADING_STYLE_ID, banner, loading_overlay,
    };
    use campus_ui_core::{Dashboard, DashboardSurface, Notification, NotificationKind, Role};
    use gloo_net::http::Request;
    use gloo_timers::future::sleep;
    use thiserror::Error;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{
        Document, Element, HtmlAnchorElement, HtmlElement, HtmlFormElement, HtmlInputElement,
        HtmlSelectElement, HtmlTextAreaElement,
    };

    use crate::boot::{detect_role, owned_form, resolve_client_config, roster_form_for_select};
    use crate::wasm_constants::*;

    mod dom;
    mod lifecycle;
    mod network;
    mod routing;

    use dom::*;
    use lifecycle::*;
    use network::*;
    use routing::*;

    type WebDashboard = Dashboard<GlooTransport, WebSurface>;

    thread_local! {
        static DASHBOARD: RefCell<Option<Rc<WebDashboard>>> = const { RefCell::new(None) };
        static CLICK_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static SUBMIT_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static CHANGE_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        install_console_tracing();
        spawn_local(async {
            if let Err(error) = boot().await {
                tracing::error!(%error, "campus dashboard failed to boot");
            }
        });
    }

    /// Opens a section by name, for inline page scripts.
    #[wasm_bindgen]
    pub fn show_section(name: String) {
        spawn_select_section(name);
    }

    /// Exports the records shown in the active section.
    #[wasm_bindgen]
    pub fn export_current_section() {
        if let Some(dashboard) = current_dashboard() {
            let _ = dashboard.export_section();
        }
    }
}
