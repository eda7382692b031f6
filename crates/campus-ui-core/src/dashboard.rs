//! Role-driven controller behind every dashboard page.
//!
//! One `Dashboard` owns the API client and the page surface for a single
//! role. Navigation, section loading, form submission and export all go
//! through it; the platform shell only forwards DOM events.

use std::cell::{Cell, RefCell};

use campus_client_core::endpoints::faculty_students_path;
use campus_client_core::{
    ApiClient, ApiRequest, ApiTransport, CsvExport, CsvExportError, FormPayload, RequestError,
    export_to_csv, validate,
};
use chrono::{Local, NaiveDate};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::fallback::{
    sample_activities, sample_department_stats, sample_department_students, sample_roster,
    sample_year_distribution, stat_cards,
};
use crate::forms::{FormKind, FormOutcome, FormPhase, FormTracker};
use crate::models::{
    AttendanceRecord, DashboardSnapshot, DepartmentStudent, FacultyDashboardSnapshot,
    HodDashboardSnapshot, Notice, PrincipalDashboardSnapshot, ResultRecord, RosterStudent,
    StudentDashboardSnapshot, StudentProfile,
};
use crate::notification::{
    GENERIC_FETCH_ERROR, Notification, NotificationKind, REQUIRED_FIELDS_ERROR,
};
use crate::render::{self, ActivityLayout};
use crate::role::{DEFAULT_SECTION, Renderer, Role};
use crate::router::SectionRouter;
use crate::state::SectionLoadState;
use crate::surface::DashboardSurface;

const FAILURE_ICON: &str = "fa-exclamation-triangle";
const EMPTY_ICON: &str = "fa-info-circle";
const STUDENTS_TABLE_BODY: &str = "#students-table tbody";

/// Records currently on screen that the export button serializes.
#[derive(Debug, Clone)]
struct ExportSource {
    file_name: &'static str,
    rows: Vec<Map<String, Value>>,
}

/// Sections that substitute a sample dataset when their fetch fails. The
/// student record sections show a failure notice instead.
fn has_sample_data(renderer: Renderer) -> bool {
    matches!(
        renderer,
        Renderer::StudentDashboard
            | Renderer::FacultyDashboard
            | Renderer::HodDashboard
            | Renderer::PrincipalDashboard
            | Renderer::HodStudentManagement
            | Renderer::FacultyAttendance
            | Renderer::FacultyMarks
    )
}

pub struct Dashboard<T, S> {
    role: Role,
    client: ApiClient<T>,
    surface: S,
    router: RefCell<SectionRouter>,
    forms: RefCell<FormTracker>,
    in_flight: Cell<u32>,
    export: RefCell<Option<ExportSource>>,
    today: Option<NaiveDate>,
}

impl<T: ApiTransport, S: DashboardSurface> Dashboard<T, S> {
    pub fn new(role: Role, client: ApiClient<T>, surface: S) -> Self {
        Self {
            role,
            client,
            surface,
            router: RefCell::new(SectionRouter::new(role)),
            forms: RefCell::new(FormTracker::default()),
            in_flight: Cell::new(0),
            export: RefCell::new(None),
            today: None,
        }
    }

    /// Pins the date form inputs default to.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn active_section(&self) -> Option<&'static str> {
        self.router.borrow().active().map(|section| section.name)
    }

    pub fn form_phase(&self, kind: FormKind) -> FormPhase {
        self.forms.borrow().phase(kind)
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    fn is_current(&self, generation: u64) -> bool {
        self.router.borrow().is_current(generation)
    }

    /// Opens the initial section.
    pub async fn start(&self) -> Option<SectionLoadState> {
        tracing::info!(role = self.role.as_str(), "dashboard starting");
        self.select_section(DEFAULT_SECTION).await
    }

    /// Activates a section and loads it. Returns `None` when the role has no
    /// such section or when a newer navigation superseded this one before
    /// its data arrived.
    pub async fn select_section(&self, name: &str) -> Option<SectionLoadState> {
        let navigation = self.router.borrow_mut().navigate(name)?;
        let renderer = navigation.section.renderer;
        self.export.replace(None);
        self.surface.mark_active_menu(navigation.section.name);
        self.surface
            .render_container(&render::section_skeleton(renderer, self.today()));

        let state = self.load(renderer, navigation.generation).await?;
        self.set_status(state, has_sample_data(renderer));
        Some(state)
    }

    async fn load(&self, renderer: Renderer, generation: u64) -> Option<SectionLoadState> {
        let Some(path) = renderer.endpoint() else {
            return Some(SectionLoadState::Static);
        };
        match renderer {
            Renderer::StudentDashboard => {
                self.load_dashboard::<StudentDashboardSnapshot>(Role::Student, path, generation, |_| {})
                    .await
            }
            Renderer::FacultyDashboard => {
                self.load_dashboard::<FacultyDashboardSnapshot>(Role::Faculty, path, generation, |_| {})
                    .await
            }
            Renderer::HodDashboard => {
                self.load_dashboard::<HodDashboardSnapshot>(Role::Hod, path, generation, |snapshot| {
                    let html = match snapshot.and_then(|s| s.student_distribution.as_deref()) {
                        Some(distribution) => render::year_distribution(distribution),
                        None => render::year_distribution(&sample_year_distribution()),
                    };
                    self.surface.set_html("#student-distribution", &html);
                })
                .await
            }
            Renderer::PrincipalDashboard => {
                self.load_dashboard::<PrincipalDashboardSnapshot>(
                    Role::Principal,
                    path,
                    generation,
                    |snapshot| {
                        let html = match snapshot.and_then(|s| s.department_stats.as_deref()) {
                            Some(stats) => render::department_stat_rows(stats),
                            None => render::department_stat_rows(&sample_department_stats()),
                        };
                        self.surface.set_html("#department-stats tbody", &html);
                    },
                )
                .await
            }
            Renderer::StudentAttendance => self.load_attendance_records(path, generation).await,
            Renderer::StudentResults => self.load_result_records(path, generation).await,
            Renderer::StudentNotices => self.load_notices(path, generation).await,
            Renderer::StudentProfile => self.load_profile(path, generation).await,
            Renderer::HodStudentManagement => self.load_department_students(path, generation).await,
            Renderer::FacultyAttendance
            | Renderer::FacultyMarks
            | Renderer::DeanDashboard
            | Renderer::DeanNotices
            | Renderer::Placeholder { .. } => Some(SectionLoadState::Static),
        }
    }

    /// Fetches `path` and hands back the result only if the navigation that
    /// asked for it is still current.
    async fn fetch<R: DeserializeOwned>(
        &self,
        path: &str,
        generation: u64,
    ) -> Option<Result<R, RequestError>> {
        let result = self.call(&ApiRequest::get(path)).await;
        if self.is_current(generation) {
            Some(result)
        } else {
            tracing::debug!(
                path,
                generation,
                "dropping response for superseded navigation"
            );
            None
        }
    }

    async fn load_dashboard<D>(
        &self,
        role: Role,
        path: &str,
        generation: u64,
        extras: impl FnOnce(Option<&D>),
    ) -> Option<SectionLoadState>
    where
        D: DashboardSnapshot + DeserializeOwned,
    {
        let snapshot = self.fetch::<D>(path, generation).await?.ok();
        for card in stat_cards(role) {
            let live = snapshot.as_ref().and_then(|s| s.stat(card.field));
            self.surface
                .set_text(&format!("#{}", card.element_id), &card.display(live));
        }

        let layout = ActivityLayout::for_role(role);
        let activities = match snapshot.as_ref().and_then(DashboardSnapshot::recent_activities) {
            Some(activities) => render::activity_list(activities, layout),
            None => render::activity_list(&sample_activities(role), layout),
        };
        self.surface.set_html("#recent-activities", &activities);
        extras(snapshot.as_ref());

        Some(if snapshot.is_some() {
            SectionLoadState::LoadedReal
        } else {
            SectionLoadState::FetchFailed
        })
    }

    /// Fetches a list of flat records, keeping the raw rows for export
    /// alongside the typed view. `Some(None)` means the fetch or decode
    /// failed.
    async fn fetch_records<R: DeserializeOwned>(
        &self,
        path: &str,
        generation: u64,
    ) -> Option<Option<(Vec<Map<String, Value>>, Vec<R>)>> {
        let Ok(rows) = self.fetch::<Vec<Map<String, Value>>>(path, generation).await? else {
            return Some(None);
        };
        let decoded: Result<Vec<R>, _> = rows
            .iter()
            .map(|row| serde_json::from_value(Value::Object(row.clone())))
            .collect();
        match decoded {
            Ok(records) => Some(Some((rows, records))),
            Err(error) => {
                self.report_failure(
                    path,
                    &RequestError::Decode {
                        message: error.to_string(),
                    },
                );
                Some(None)
            }
        }
    }

    async fn load_attendance_records(&self, path: &str, generation: u64) -> Option<SectionLoadState> {
        const BODY: &str = "#attendance-table tbody";
        let Some((rows, records)) = self.fetch_records::<AttendanceRecord>(path, generation).await?
        else {
            self.surface.set_html(
                BODY,
                &render::table_notice_row(5, FAILURE_ICON, "Failed to load attendance data"),
            );
            return Some(SectionLoadState::FetchFailed);
        };
        if records.is_empty() {
            self.surface.set_html(
                BODY,
                &render::table_notice_row(5, EMPTY_ICON, "No attendance records found"),
            );
        } else {
            self.surface.set_html(BODY, &render::attendance_rows(&records));
            self.export.replace(Some(ExportSource {
                file_name: "attendance",
                rows,
            }));
        }
        Some(SectionLoadState::from_list_len(records.len()))
    }

    async fn load_result_records(&self, path: &str, generation: u64) -> Option<SectionLoadState> {
        const BODY: &str = "#results-table tbody";
        let Some((rows, records)) = self.fetch_records::<ResultRecord>(path, generation).await?
        else {
            self.surface.set_html(
                BODY,
                &render::table_notice_row(6, FAILURE_ICON, "Failed to load results"),
            );
            return Some(SectionLoadState::FetchFailed);
        };
        if records.is_empty() {
            self.surface.set_html(
                BODY,
                &render::table_notice_row(6, EMPTY_ICON, "No results available"),
            );
        } else {
            self.surface.set_html(BODY, &render::result_rows(&records));
            self.export.replace(Some(ExportSource {
                file_name: "results",
                rows,
            }));
        }
        Some(SectionLoadState::from_list_len(records.len()))
    }

    async fn load_notices(&self, path: &str, generation: u64) -> Option<SectionLoadState> {
        let html = match self.fetch::<Vec<Notice>>(path, generation).await? {
            Ok(notices) if notices.is_empty() => {
                self.surface.set_html(
                    "#notices-list",
                    &render::block_notice("fa-bell-slash", "No notices available"),
                );
                return Some(SectionLoadState::LoadedEmpty);
            }
            Ok(notices) => render::notices_list(&notices),
            Err(_) => {
                self.surface.set_html(
                    "#notices-list",
                    &render::block_notice(FAILURE_ICON, "Failed to load notices"),
                );
                return Some(SectionLoadState::FetchFailed);
            }
        };
        self.surface.set_html("#notices-list", &html);
        Some(SectionLoadState::LoadedReal)
    }

    async fn load_profile(&self, path: &str, generation: u64) -> Option<SectionLoadState> {
        match self.fetch::<StudentProfile>(path, generation).await? {
            Ok(profile) => {
                self.surface
                    .set_html("#profile-content", &render::profile_view(&profile));
                Some(SectionLoadState::LoadedReal)
            }
            Err(_) => {
                self.surface.set_html(
                    "#profile-content",
                    &render::block_notice(FAILURE_ICON, "Failed to load profile"),
                );
                Some(SectionLoadState::FetchFailed)
            }
        }
    }

    async fn load_department_students(
        &self,
        path: &str,
        generation: u64,
    ) -> Option<SectionLoadState> {
        let (students, state) = match self.fetch::<Vec<DepartmentStudent>>(path, generation).await? {
            Ok(students) => {
                let state = SectionLoadState::from_list_len(students.len());
                (students, state)
            }
            Err(_) => (sample_department_students(), SectionLoadState::FetchFailed),
        };
        self.surface
            .set_html(STUDENTS_TABLE_BODY, &render::department_student_rows(&students));
        Some(state)
    }

    /// Reloads the roster of a faculty form once both of its filter selects
    /// have a value. Returns `None` when the filters are incomplete, the
    /// form belongs to another role, or the result went stale.
    pub async fn refresh_roster(&self, kind: FormKind) -> Option<SectionLoadState> {
        if kind.role() != self.role {
            return None;
        }
        let roster = kind.roster()?;
        let semester = self.filled_field(roster.semester)?;
        let subject = self.filled_field(roster.subject)?;
        let generation = self.router.borrow().generation();

        let path = faculty_students_path(&semester, &subject);
        let (students, state) = match self.fetch::<Vec<RosterStudent>>(&path, generation).await? {
            Ok(students) => {
                let state = SectionLoadState::from_list_len(students.len());
                (students, state)
            }
            Err(_) => (sample_roster(), SectionLoadState::FetchFailed),
        };
        let rows = match kind {
            FormKind::Marks => render::marks_roster_rows(&students),
            _ => render::attendance_roster_rows(&students),
        };
        self.surface.set_html(roster.table_body, &rows);
        self.set_status(state, true);
        Some(state)
    }

    fn filled_field(&self, selector: &str) -> Option<String> {
        self.surface
            .field_value(selector)
            .filter(|value| !value.trim().is_empty())
    }

    fn set_status(&self, state: SectionLoadState, has_sample: bool) {
        let message = match state {
            SectionLoadState::FetchFailed if has_sample => Some(render::SAMPLE_DATA_NOTICE),
            SectionLoadState::FetchFailed => Some(render::LIVE_DATA_UNAVAILABLE_NOTICE),
            _ => None,
        };
        self.surface.set_html(
            &format!("#{}", render::STATUS_SLOT_ID),
            &render::status_notice(state, message),
        );
    }

    /// Sends a request with the page-level side effects: the loading overlay
    /// stays up while any call is in flight, and failures are logged and
    /// announced with the generic error banner before being returned.
    pub async fn call<R: DeserializeOwned>(&self, request: &ApiRequest) -> Result<R, RequestError> {
        let pending = self.in_flight.get();
        if pending == 0 {
            self.surface.show_loading();
        }
        self.in_flight.set(pending + 1);

        let result = self.client.call(request).await;

        let remaining = self.in_flight.get().saturating_sub(1);
        self.in_flight.set(remaining);
        if remaining == 0 {
            self.surface.hide_loading();
        }
        if let Err(error) = &result {
            self.report_failure(&request.endpoint, error);
        }
        result
    }

    fn report_failure(&self, endpoint: &str, error: &RequestError) {
        tracing::warn!(
            endpoint,
            kind = error.kind().as_str(),
            status = error.status_code(),
            %error,
            "campus api request failed"
        );
        self.notify(GENERIC_FETCH_ERROR, NotificationKind::Error);
    }

    /// Shows a banner. A new error banner replaces any visible ones.
    pub fn notify(&self, text: &str, kind: NotificationKind) {
        if kind.replaces_existing() {
            self.surface.remove_banners(kind);
        }
        let notification = match kind {
            NotificationKind::Success => Notification::success(text),
            NotificationKind::Error => Notification::error(text),
        };
        self.surface.show_banner(&notification);
    }

    /// Handles a submit event for `form_id`.
    pub async fn submit_form(&self, form_id: &str) -> FormOutcome {
        let Some(kind) = FormKind::from_form_id(form_id).filter(|kind| kind.role() == self.role)
        else {
            tracing::debug!(form = form_id, role = self.role.as_str(), "ignoring unknown form");
            return FormOutcome::Ignored;
        };
        if !self.forms.borrow_mut().begin(kind) {
            tracing::debug!(form = form_id, "submission already in progress");
            return FormOutcome::Ignored;
        }

        let generation = self.router.borrow().generation();
        let outcome = self.run_submission(kind, generation).await;
        self.finish_submission(kind, &outcome);
        outcome
    }

    async fn run_submission(&self, kind: FormKind, generation: u64) -> FormOutcome {
        let mut payload = FormPayload::new();
        for field in kind.fields() {
            payload.insert_text(
                field.key,
                self.surface.field_value(field.selector).unwrap_or_default(),
            );
        }

        let errors = validate(&payload, &kind.rules());
        if !errors.is_empty() {
            tracing::debug!(form = kind.form_id(), ?errors, "form validation failed");
            self.notify(REQUIRED_FIELDS_ERROR, NotificationKind::Error);
            return FormOutcome::Invalid(errors);
        }

        if let Some(rows) = kind.rows() {
            let cells = self.surface.row_values(rows.table_body, rows.cells);
            match kind.collect_rows(&cells) {
                Ok(entries) => payload.insert_value(rows.payload_key, Value::Array(entries)),
                Err(message) => {
                    self.notify(&message, NotificationKind::Error);
                    return FormOutcome::Rejected(message);
                }
            }
        }

        let mut forms = self.forms.borrow_mut();
        forms.advance(kind, FormPhase::Valid);
        forms.advance(kind, FormPhase::Submitting);
        drop(forms);

        let sent = match kind.endpoint() {
            Some(endpoint) => self.post(endpoint, &payload).await,
            None => {
                tracing::info!(form = kind.form_id(), "published locally");
                Ok(())
            }
        };
        if let Err(error) = sent {
            self.notify(kind.failure_text(), NotificationKind::Error);
            return FormOutcome::Failed(error);
        }

        tracing::info!(form = kind.form_id(), "form submitted");
        self.notify(kind.success_text(), NotificationKind::Success);
        if kind.resets_on_success() {
            self.surface.reset_form(kind.form_id());
        }
        if kind == FormKind::AddStudent {
            if self.is_current(generation) {
                if let Some(path) = Renderer::HodStudentManagement.endpoint() {
                    self.load_department_students(path, generation).await;
                }
            } else {
                tracing::debug!(generation, "skipping student list reload after navigation");
            }
        }
        FormOutcome::Submitted
    }

    async fn post(&self, endpoint: &str, payload: &FormPayload) -> Result<(), RequestError> {
        let request = match ApiRequest::post(endpoint, payload) {
            Ok(request) => request,
            Err(error) => {
                self.report_failure(endpoint, &error);
                return Err(error);
            }
        };
        self.call::<Value>(&request).await.map(|_| ())
    }

    fn finish_submission(&self, kind: FormKind, outcome: &FormOutcome) {
        let mut forms = self.forms.borrow_mut();
        if let Some(phase) = outcome.terminal_phase() {
            forms.advance(kind, phase);
        }
        forms.advance(kind, FormPhase::Idle);
    }

    /// Serializes the records shown in the active section and hands the
    /// file to the surface.
    pub fn export_section(&self) -> Result<CsvExport, CsvExportError> {
        let result = match self.export.borrow().as_ref() {
            Some(source) => export_to_csv(&source.rows, source.file_name),
            None => Err(CsvExportError::NoRows),
        };
        match &result {
            Ok(export) => {
                tracing::info!(file = %export.file_name, "exporting section records");
                self.surface.download(export);
            }
            Err(error) => self.notify(&error.to_string(), NotificationKind::Error),
        }
        result
    }
}
