//! In-memory surface and transport for driving a `Dashboard` in tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use campus_client_core::{
    ApiClient, ApiTransport, ClientConfig, CsvExport, PreparedRequest, RawResponse, RequestError,
    Session,
};
use chrono::NaiveDate;
use serde_json::Value;
use tokio::sync::Notify;

use crate::dashboard::Dashboard;
use crate::notification::{Notification, NotificationKind};
use crate::role::Role;

pub const TEST_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    RenderContainer(String),
    SetHtml(String, String),
    SetText(String, String),
    MarkActive(String),
    ShowLoading,
    HideLoading,
    Banner(Notification),
    RemoveBanners(NotificationKind),
    ResetForm(String),
    Download(CsvExport),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    events: RefCell<Vec<SurfaceEvent>>,
    fields: RefCell<HashMap<String, String>>,
    rows: RefCell<HashMap<String, Vec<Vec<Option<String>>>>>,
    banners: RefCell<Vec<Notification>>,
    loading: Cell<bool>,
}

impl RecordingSurface {
    pub fn set_field(&self, selector: &str, value: &str) {
        self.fields
            .borrow_mut()
            .insert(selector.to_string(), value.to_string());
    }

    pub fn set_rows(&self, table_body: &str, rows: Vec<Vec<Option<String>>>) {
        self.rows.borrow_mut().insert(table_body.to_string(), rows);
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.borrow().clone()
    }

    /// Markup of the latest full render.
    pub fn container(&self) -> Option<String> {
        self.events.borrow().iter().rev().find_map(|event| match event {
            SurfaceEvent::RenderContainer(html) => Some(html.clone()),
            _ => None,
        })
    }

    /// Latest markup written to `selector`.
    pub fn html(&self, selector: &str) -> Option<String> {
        self.events.borrow().iter().rev().find_map(|event| match event {
            SurfaceEvent::SetHtml(target, html) if target == selector => Some(html.clone()),
            _ => None,
        })
    }

    pub fn text(&self, selector: &str) -> Option<String> {
        self.events.borrow().iter().rev().find_map(|event| match event {
            SurfaceEvent::SetText(target, text) if target == selector => Some(text.clone()),
            _ => None,
        })
    }

    /// Latest status slot contents, empty before any section settles.
    pub fn status(&self) -> String {
        self.html("#section-status").unwrap_or_default()
    }

    /// Banners currently on screen, oldest first.
    pub fn banners(&self) -> Vec<Notification> {
        self.banners.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    fn record(&self, event: SurfaceEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl crate::surface::DashboardSurface for RecordingSurface {
    fn render_container(&self, html: &str) {
        self.record(SurfaceEvent::RenderContainer(html.to_string()));
    }

    fn set_html(&self, selector: &str, html: &str) {
        self.record(SurfaceEvent::SetHtml(selector.to_string(), html.to_string()));
    }

    fn set_text(&self, selector: &str, text: &str) {
        self.record(SurfaceEvent::SetText(selector.to_string(), text.to_string()));
    }

    fn mark_active_menu(&self, section: &str) {
        self.record(SurfaceEvent::MarkActive(section.to_string()));
    }

    fn show_loading(&self) {
        self.loading.set(true);
        self.record(SurfaceEvent::ShowLoading);
    }

    fn hide_loading(&self) {
        self.loading.set(false);
        self.record(SurfaceEvent::HideLoading);
    }

    fn show_banner(&self, notification: &Notification) {
        self.banners.borrow_mut().push(notification.clone());
        self.record(SurfaceEvent::Banner(notification.clone()));
    }

    fn remove_banners(&self, kind: NotificationKind) {
        self.banners.borrow_mut().retain(|banner| banner.kind != kind);
        self.record(SurfaceEvent::RemoveBanners(kind));
    }

    fn field_value(&self, selector: &str) -> Option<String> {
        self.fields.borrow().get(selector).cloned()
    }

    fn row_values(&self, table_body: &str, _cells: &[&str]) -> Vec<Vec<Option<String>>> {
        self.rows
            .borrow()
            .get(table_body)
            .cloned()
            .unwrap_or_default()
    }

    fn reset_form(&self, form_id: &str) {
        self.record(SurfaceEvent::ResetForm(form_id.to_string()));
    }

    fn download(&self, export: &CsvExport) {
        self.record(SurfaceEvent::Download(export.clone()));
    }
}

/// Answers requests from per-path queues. Unscripted requests fail at the
/// transport level; gated paths wait for their `Notify` before answering.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: RefCell<HashMap<String, VecDeque<RawResponse>>>,
    gates: RefCell<HashMap<String, Rc<Notify>>>,
    sent: RefCell<Vec<PreparedRequest>>,
}

impl ScriptedTransport {
    pub fn respond(&self, path: &str, status: u16, body: Value) {
        self.responses
            .borrow_mut()
            .entry(path.to_string())
            .or_default()
            .push_back(RawResponse {
                status,
                body: body.to_string(),
            });
    }

    pub fn gate(&self, path: &str) -> Rc<Notify> {
        let gate = Rc::new(Notify::new());
        self.gates
            .borrow_mut()
            .insert(path.to_string(), Rc::clone(&gate));
        gate
    }

    pub fn sent(&self) -> Vec<PreparedRequest> {
        self.sent.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ApiTransport for ScriptedTransport {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, RequestError> {
        let url = request.url.clone();
        let path = url.strip_prefix(TEST_BASE_URL).unwrap_or(&url);
        let path = path.split('?').next().unwrap_or(path).to_string();
        self.sent.borrow_mut().push(request);

        let gate = self.gates.borrow_mut().remove(&path);
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.responses
            .borrow_mut()
            .get_mut(&path)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| RequestError::transport(format!("no scripted response for {path}")))
    }
}

pub fn dashboard(role: Role) -> Dashboard<ScriptedTransport, RecordingSurface> {
    let client = ApiClient::new(
        ClientConfig::new(TEST_BASE_URL).expect("test base url"),
        Session::new("tok_test"),
        ScriptedTransport::default(),
    );
    Dashboard::new(role, client, RecordingSurface::default())
        .with_today(NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date"))
}
