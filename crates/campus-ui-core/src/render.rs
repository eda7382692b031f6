//! HTML fragments for every section, built with maud.
//!
//! Skeletons carry `--` placeholders and spinners; the populate helpers
//! return the fragments swapped into them once a fetch settles.

use chrono::{DateTime, NaiveDate};
use maud::{Markup, html};

use crate::fallback::{
    DEAN_DEPARTMENT_DISTRIBUTION, DEAN_PUBLISHED_NOTICES, DEFAULT_TOTAL_MARKS, StatCard,
    sample_activities, stat_cards,
};
use crate::models::{
    Activity, AttendanceRecord, DepartmentStat, DepartmentStudent, Notice, ResultRecord,
    RosterStudent, StudentProfile, YearCount, field_or, field_text,
};
use crate::notification::Notification;
use crate::role::{Renderer, Role};
use crate::state::SectionLoadState;

pub const STATUS_SLOT_ID: &str = "section-status";
pub const LOADING_OVERLAY_ID: &str = "loading-indicator";
pub const LOADING_STYLE_ID: &str = "loading-overlay-style";
pub const SAMPLE_DATA_NOTICE: &str = "Showing sample data";
pub const LIVE_DATA_UNAVAILABLE_NOTICE: &str = "Live data unavailable";
const PLACEHOLDER_BODY: &str = "This section will be fully implemented with backend integration";
const ROSTER_PROMPT: &str = "Select semester and subject to load students";

pub const LOADING_OVERLAY_CSS: &str = r#"
.loading-overlay {
    position: fixed;
    top: 0;
    left: 0;
    width: 100%;
    height: 100%;
    background: rgba(255, 255, 255, 0.8);
    display: none;
    justify-content: center;
    align-items: center;
    z-index: 9999;
}

.loading-spinner {
    text-align: center;
    background: white;
    padding: 30px;
    border-radius: 10px;
    box-shadow: 0 4px 12px rgba(0, 0, 0, 0.1);
}

.loading-spinner .spinner {
    width: 40px;
    height: 40px;
    border: 4px solid #f3f3f3;
    border-top: 4px solid var(--primary-color);
    border-radius: 50%;
    animation: spin 1s linear infinite;
    margin: 0 auto 15px;
}

.section-status .hidden {
    display: none;
}

@keyframes spin {
    0% { transform: rotate(0deg); }
    100% { transform: rotate(360deg); }
}
"#;

/// Inner markup of the page-wide loading overlay.
pub fn loading_overlay() -> String {
    html! {
        div class="loading-spinner" {
            div class="spinner" {}
            p { "Loading..." }
        }
    }
    .into_string()
}

pub fn banner(notification: &Notification) -> String {
    html! {
        div class=(notification.kind.alert_class()) {
            i class={ "fas " (notification.kind.icon()) " me-2" } {}
            (notification.text)
        }
    }
    .into_string()
}

/// Contents of the status slot once a section settles.
pub fn status_notice(state: SectionLoadState, message: Option<&str>) -> String {
    html! {
        @if let Some(message) = message {
            div class="alert alert-warning py-1 small" data-state=(state.as_str()) {
                i class="fas fa-info-circle me-2" {}
                (message)
            }
        } @else {
            div class="hidden" data-state=(state.as_str()) {}
        }
    }
    .into_string()
}

fn status_slot() -> Markup {
    html! {
        div id=(STATUS_SLOT_ID) class="section-status" {
            div class="hidden" data-state=(SectionLoadState::Loading.as_str()) {}
        }
    }
}

fn spinner(message: &str) -> Markup {
    html! {
        div class="text-center" {
            div class="spinner-border text-primary" role="status" {
                span class="visually-hidden" { "Loading..." }
            }
            p class="mt-2" { (message) }
        }
    }
}

fn spinner_row(colspan: u32, message: &str) -> Markup {
    html! {
        tr {
            td colspan=(colspan) class="text-center" { (spinner(message)) }
        }
    }
}

/// Single full-width message row for a table body.
pub fn table_notice_row(colspan: u32, icon: &str, text: &str) -> String {
    html! {
        tr {
            td colspan=(colspan) class="text-center text-muted" {
                i class={ "fas " (icon) " me-2" } {}
                (text)
            }
        }
    }
    .into_string()
}

/// Centered message block for list sections.
pub fn block_notice(icon: &str, text: &str) -> String {
    html! {
        div class="text-center text-muted py-4" {
            i class={ "fas " (icon) " fa-2x mb-3" } {}
            p { (text) }
        }
    }
    .into_string()
}

fn ordinal(value: u32) -> String {
    let suffix = match (value % 10, value % 100) {
        (1, rem) if rem != 11 => "st",
        (2, rem) if rem != 12 => "nd",
        (3, rem) if rem != 13 => "rd",
        _ => "th",
    };
    format!("{value}{suffix}")
}

fn select(id: &str, label: &str, prompt: &str, options: &[(String, String)]) -> Markup {
    html! {
        label for=(id) class="form-label" { (label) }
        select class="form-select" id=(id) required {
            option value="" { (prompt) }
            @for (value, text) in options {
                option value=(value) { (text) }
            }
        }
    }
}

fn semester_options(count: u32) -> Vec<(String, String)> {
    (1..=count)
        .map(|semester| (semester.to_string(), format!("{} Semester", ordinal(semester))))
        .collect()
}

fn pairs(options: &[(&str, &str)]) -> Vec<(String, String)> {
    options
        .iter()
        .map(|(value, text)| ((*value).to_string(), (*text).to_string()))
        .collect()
}

const SUBJECTS: &[(&str, &str)] = &[
    ("ds", "Data Structures"),
    ("algo", "Algorithms"),
    ("db", "Database Systems"),
    ("cn", "Computer Networks"),
];

const ATTENDANCE_STATUSES: &[(&str, &str)] =
    &[("present", "Present"), ("absent", "Absent"), ("leave", "Leave")];

fn stat_row(cards: &[StatCard], values: Option<&[String]>) -> Markup {
    let column = if cards.len() >= 4 { "col-md-3" } else { "col-md-4" };
    html! {
        div class="row" {
            @for (index, card) in cards.iter().enumerate() {
                div class=(column) {
                    div class={ "stats-card " (card.tone) }
                        data-section=[card.navigates_to]
                        style=[card.navigates_to.map(|_| "cursor: pointer;")] {
                        i class={ "fas " (card.icon) " fa-2x" } {}
                        div class="stats-value" id=(card.element_id) {
                            @match values.and_then(|values| values.get(index)) {
                                Some(value) => { (value) }
                                None => { (card.placeholder) }
                            }
                        }
                        div class="stats-label" { (card.label) }
                    }
                }
            }
        }
    }
}

/// How a role lays out its activity feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLayout {
    /// Description left, time right.
    Inline,
    /// Time on its own line below the description.
    Stacked,
}

impl ActivityLayout {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Student | Role::Faculty => Self::Inline,
            Role::Hod | Role::Principal | Role::Dean => Self::Stacked,
        }
    }
}

fn activity_icon(activity: &Activity) -> String {
    format!(
        "fas {} text-{} me-2",
        activity.icon.as_deref().unwrap_or("fa-circle"),
        activity.tone.as_deref().unwrap_or("secondary")
    )
}

fn activity_list_markup(activities: &[Activity], layout: ActivityLayout) -> Markup {
    html! {
        ul class="list-group" {
            @for activity in activities {
                @match layout {
                    ActivityLayout::Inline => {
                        li class="list-group-item d-flex justify-content-between align-items-center" {
                            div {
                                i class=(activity_icon(activity)) {}
                                (activity.description.as_deref().unwrap_or_default())
                            }
                            span class="text-muted small" { (activity.time.as_deref().unwrap_or_default()) }
                        }
                    }
                    ActivityLayout::Stacked => {
                        li class="list-group-item" {
                            i class=(activity_icon(activity)) {}
                            (activity.description.as_deref().unwrap_or_default())
                            small class="text-muted d-block" { (activity.time.as_deref().unwrap_or_default()) }
                        }
                    }
                }
            }
        }
    }
}

pub fn activity_list(activities: &[Activity], layout: ActivityLayout) -> String {
    if activities.is_empty() {
        return html! { p class="text-muted" { "No recent activities" } }.into_string();
    }
    activity_list_markup(activities, layout).into_string()
}

fn year_distribution_markup(entries: impl IntoIterator<Item = (String, String)>) -> Markup {
    html! {
        ul class="list-group" {
            @for (label, count) in entries {
                li class="list-group-item d-flex justify-content-between align-items-center" {
                    (label)
                    span class="badge bg-primary rounded-pill" { (count) }
                }
            }
        }
    }
}

pub fn year_distribution(entries: &[YearCount]) -> String {
    if entries.is_empty() {
        return html! { p class="text-muted" { "No distribution data" } }.into_string();
    }
    year_distribution_markup(entries.iter().map(|entry| {
        (
            field_or(entry.year.as_ref(), ""),
            field_or(entry.count.as_ref(), "0"),
        )
    }))
    .into_string()
}

pub fn department_stat_rows(stats: &[DepartmentStat]) -> String {
    if stats.is_empty() {
        return table_notice_row(4, "fa-info-circle", "No department statistics found");
    }
    html! {
        @for stat in stats {
            tr {
                td { (stat.name.as_deref().unwrap_or_default()) }
                td { (field_or(stat.students.as_ref(), "-")) }
                td { (field_or(stat.faculty.as_ref(), "-")) }
                td { (field_or(stat.attendance.as_ref(), "-")) "%" }
            }
        }
    }
    .into_string()
}

/// Dashboard skeleton for the roles whose overview is fetched.
pub fn dashboard_skeleton(role: Role) -> String {
    let overview = match role {
        Role::Student | Role::Faculty => html! {
            div class="dashboard-card mt-4" {
                div class="card-header" { "Recent Activities" }
                div class="card-body" {
                    div id="recent-activities" { (spinner("Loading activities...")) }
                }
            }
        },
        Role::Hod => html! {
            div class="dashboard-card mt-4" {
                div class="card-header" { "Department Overview" }
                div class="card-body" {
                    div class="row" {
                        div class="col-md-6" {
                            h5 { "Student Distribution by Year" }
                            div id="student-distribution" { (spinner("Loading data...")) }
                        }
                        div class="col-md-6" {
                            h5 { "Recent Activities" }
                            div id="recent-activities" { (spinner("Loading activities...")) }
                        }
                    }
                }
            }
        },
        Role::Principal => html! {
            div class="dashboard-card mt-4" {
                div class="card-header" { "Institution Overview" }
                div class="card-body" {
                    div class="row" {
                        div class="col-md-6" {
                            h5 { "Department Statistics" }
                            div class="table-container" {
                                table class="table table-striped" id="department-stats" {
                                    thead {
                                        tr {
                                            th { "Department" }
                                            th { "Students" }
                                            th { "Faculty" }
                                            th { "Avg Attendance" }
                                        }
                                    }
                                    tbody { (spinner_row(4, "Loading department statistics...")) }
                                }
                            }
                        }
                        div class="col-md-6" {
                            h5 { "Recent Activities" }
                            div id="recent-activities" { (spinner("Loading activities...")) }
                        }
                    }
                }
            }
        },
        Role::Dean => return dean_dashboard(),
    };
    html! {
        (status_slot())
        (stat_row(stat_cards(role), None))
        (overview)
    }
    .into_string()
}

pub fn dean_dashboard() -> String {
    let values: Vec<String> = stat_cards(Role::Dean)
        .iter()
        .map(|card| card.fallback.to_string())
        .collect();
    html! {
        (status_slot())
        (stat_row(stat_cards(Role::Dean), Some(values.as_slice())))
        div class="dashboard-card mt-4" {
            div class="card-header" { "College Overview" }
            div class="card-body" {
                div class="row" {
                    div class="col-md-6" {
                        h5 { "Student Distribution by Department" }
                        (year_distribution_markup(DEAN_DEPARTMENT_DISTRIBUTION.iter().map(
                            |(name, count)| ((*name).to_string(), count.to_string())
                        )))
                    }
                    div class="col-md-6" {
                        h5 { "Recent Activities" }
                        (activity_list_markup(&sample_activities(Role::Dean), ActivityLayout::Stacked))
                    }
                }
            }
        }
    }
    .into_string()
}

pub fn dean_notices() -> String {
    let visibility = [
        ("all", "Entire College (All Departments)"),
        ("ug", "UG Programs Only"),
        ("pg", "PG Programs Only"),
    ];
    html! {
        (status_slot())
        div class="dashboard-card" {
            div class="card-header" { "Upload & Manage Institutional Notices" }
            div class="card-body" {
                div class="mb-4" {
                    h5 { "Create New Institutional Notice" }
                    form id="institutional-notice-form" {
                        div class="mb-3" {
                            label for="institutional-notice-title" class="form-label" { "Title" }
                            input type="text" class="form-control" id="institutional-notice-title"
                                placeholder="Enter notice title";
                        }
                        div class="mb-3" {
                            label for="institutional-notice-content" class="form-label" { "Content" }
                            textarea class="form-control" id="institutional-notice-content" rows="5"
                                placeholder="Enter notice content" {}
                        }
                        div class="mb-3" {
                            label for="institutional-notice-attachment" class="form-label" { "Attachment (Optional)" }
                            input class="form-control" type="file" id="institutional-notice-attachment";
                        }
                        div class="mb-3" {
                            label class="form-label" { "Visibility" }
                            div {
                                @for (value, text) in visibility {
                                    div class="form-check" {
                                        input class="form-check-input" type="radio" name="visibility"
                                            id={ "visibility-" (value) } value=(value) checked[value == "all"];
                                        label class="form-check-label" for={ "visibility-" (value) } { (text) }
                                    }
                                }
                            }
                        }
                        button type="submit" class="btn btn-primary" { "Publish Notice" }
                    }
                }
                div {
                    h5 { "Published Institutional Notices" }
                    div class="table-container" {
                        table class="table table-striped" {
                            thead {
                                tr {
                                    th { "Title" }
                                    th { "Published Date" }
                                    th { "Visibility" }
                                    th { "Status" }
                                    th { "Actions" }
                                }
                            }
                            tbody {
                                @for notice in DEAN_PUBLISHED_NOTICES {
                                    tr {
                                        td { (notice.title) }
                                        td { (notice.published) }
                                        td { (notice.visibility) }
                                        td { span class="badge bg-success" { "Active" } }
                                        td {
                                            button class="btn btn-sm btn-primary" { "Edit" }
                                            " "
                                            button class="btn btn-sm btn-danger" { "Archive" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
    .into_string()
}

pub fn placeholder(heading: &str, icon: &str) -> String {
    html! {
        (status_slot())
        div class="dashboard-card" {
            div class="card-header" { (heading) }
            div class="card-body" {
                div class="text-center py-4" {
                    i class={ "fas " (icon) " fa-3x text-primary mb-3" } {}
                    h5 { (heading) }
                    p class="text-muted" { (PLACEHOLDER_BODY) }
                }
            }
        }
    }
    .into_string()
}

fn export_button() -> Markup {
    html! {
        button type="button" class="btn btn-outline-primary btn-sm" data-action="export" {
            i class="fas fa-download me-1" {}
            "Export"
        }
    }
}

fn record_table(title: &str, table_id: &str, headers: &[&str], colspan: u32, loading: &str) -> Markup {
    html! {
        (status_slot())
        div class="dashboard-card" {
            div class="card-header d-flex justify-content-between align-items-center" {
                span { (title) }
                (export_button())
            }
            div class="card-body" {
                div class="table-container" {
                    table class="table table-striped" id=(table_id) {
                        thead {
                            tr {
                                @for header in headers {
                                    th { (header) }
                                }
                            }
                        }
                        tbody { (spinner_row(colspan, loading)) }
                    }
                }
            }
        }
    }
}

pub fn student_attendance_skeleton() -> String {
    record_table(
        "Attendance Records",
        "attendance-table",
        &["Course", "Total Classes", "Present", "Absent", "Percentage"],
        5,
        "Loading attendance data...",
    )
    .into_string()
}

fn percentage_text(record: &AttendanceRecord) -> String {
    match field_text(record.percentage.as_ref()) {
        Some(value) => format!("{}%", value.trim_end_matches('%')),
        None => "-".to_string(),
    }
}

pub fn attendance_rows(records: &[AttendanceRecord]) -> String {
    html! {
        @for record in records {
            tr {
                td { (record.name.as_deref().unwrap_or_default()) }
                td { (field_or(record.total_classes.as_ref(), "-")) }
                td { (field_or(record.present.as_ref(), "-")) }
                td { (field_or(record.absent.as_ref(), "-")) }
                td {
                    span class={ "badge " (if record.meets_requirement() { "bg-success" } else { "bg-warning" }) } {
                        (percentage_text(record))
                    }
                }
            }
        }
    }
    .into_string()
}

pub fn student_results_skeleton() -> String {
    record_table(
        "Academic Results",
        "results-table",
        &["Course", "Internal 1", "Internal 2", "Assignment", "Lab", "Final Grade"],
        6,
        "Loading results...",
    )
    .into_string()
}

pub fn result_rows(records: &[ResultRecord]) -> String {
    html! {
        @for record in records {
            tr {
                td { (record.name.as_deref().unwrap_or_default()) }
                td { (field_or(record.internal1.as_ref(), "-")) }
                td { (field_or(record.internal2.as_ref(), "-")) }
                td { (field_or(record.assignment.as_ref(), "-")) }
                td { (field_or(record.lab.as_ref(), "-")) }
                td { span class="badge bg-primary" { (field_or(record.final_grade.as_ref(), "-")) } }
            }
        }
    }
    .into_string()
}

fn list_card(title: &str, body_id: &str, loading: &str) -> String {
    html! {
        (status_slot())
        div class="dashboard-card" {
            div class="card-header" { (title) }
            div class="card-body" {
                div id=(body_id) { (spinner(loading)) }
            }
        }
    }
    .into_string()
}

pub fn student_notices_skeleton() -> String {
    list_card("Notices & Events", "notices-list", "Loading notices...")
}

/// `Mon D, YYYY` for ISO dates and timestamps; anything else verbatim.
pub fn format_notice_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.format("%b %-d, %Y").to_string();
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return timestamp.date_naive().format("%b %-d, %Y").to_string();
    }
    trimmed.to_string()
}

pub fn notices_list(notices: &[Notice]) -> String {
    html! {
        div class="list-group" {
            @for notice in notices {
                div class="list-group-item" {
                    div class="d-flex w-100 justify-content-between" {
                        h5 class="mb-1" { (notice.title.as_deref().unwrap_or_default()) }
                        small class="text-muted" {
                            (notice.date.as_deref().map(format_notice_date).unwrap_or_default())
                        }
                    }
                    p class="mb-1" { (notice.content.as_deref().unwrap_or_default()) }
                    small class="text-muted" {
                        "Posted by: " (notice.publisher.as_deref().unwrap_or_default())
                    }
                }
            }
        }
    }
    .into_string()
}

pub fn student_profile_skeleton() -> String {
    list_card("Student Profile", "profile-content", "Loading profile...")
}

pub fn profile_view(profile: &StudentProfile) -> String {
    let rows = [
        ("Registration No:", field_or(profile.registration_number.as_ref(), "")),
        ("Roll No:", field_or(profile.roll_number.as_ref(), "")),
        ("Academic Year:", field_or(profile.academic_year.as_ref(), "")),
        ("Semester:", field_or(profile.semester.as_ref(), "")),
        ("Program:", profile.program.clone().unwrap_or_default()),
        ("Email:", profile.email.clone().unwrap_or_default()),
        (
            "Phone:",
            profile
                .phone
                .clone()
                .filter(|phone| !phone.trim().is_empty())
                .unwrap_or_else(|| "Not provided".to_string()),
        ),
    ];
    html! {
        div class="row" {
            div class="col-md-4 text-center" {
                div class="mb-3" {
                    div class="user-avatar mx-auto" style="width: 100px; height: 100px;" {
                        i class="fas fa-user fa-3x" {}
                    }
                }
                h4 { (profile.full_name.as_deref().unwrap_or_default()) }
                p class="text-muted" { (profile.department.as_deref().unwrap_or_default()) }
            }
            div class="col-md-8" {
                @for (label, value) in rows {
                    div class="row mb-3" {
                        div class="col-sm-4 fw-bold" { (label) }
                        div class="col-sm-8" { (value) }
                    }
                }
            }
        }
    }
    .into_string()
}

pub fn roster_prompt_row(colspan: u32) -> String {
    table_notice_row(colspan, "fa-info-circle", ROSTER_PROMPT)
}

pub fn attendance_form(today: NaiveDate) -> String {
    let today = today.format("%Y-%m-%d").to_string();
    html! {
        (status_slot())
        div class="dashboard-card" {
            div class="card-header" { "Attendance Management" }
            div class="card-body" {
                div class="form-container" {
                    h5 class="mb-4" { "Mark Attendance" }
                    form id="attendance-form" {
                        div class="row mb-3" {
                            div class="col-md-4" {
                                (select("semester", "Select Semester", "-- Select Semester --", &semester_options(8)))
                            }
                            div class="col-md-4" {
                                label for="attendance-date" class="form-label" { "Select Date" }
                                input type="date" class="form-control" id="attendance-date" value=(today) required;
                            }
                            div class="col-md-4" {
                                (select("subject", "Select Subject", "-- Select Subject --", &pairs(SUBJECTS)))
                            }
                        }
                        div class="table-container mt-4" {
                            table class="table table-striped" id="attendance-table" {
                                thead {
                                    tr {
                                        th { "Student ID" }
                                        th { "Student Name" }
                                        th { "Attendance Status" }
                                        th { "Remarks" }
                                    }
                                }
                                tbody { (maud::PreEscaped(roster_prompt_row(4))) }
                            }
                        }
                        div class="mt-4" {
                            button type="submit" class="btn btn-primary" {
                                i class="fas fa-save me-2" {}
                                "Submit Attendance"
                            }
                        }
                    }
                }
            }
        }
    }
    .into_string()
}

pub fn attendance_roster_rows(students: &[RosterStudent]) -> String {
    if students.is_empty() {
        return table_notice_row(4, "fa-info-circle", "No students found for selected criteria");
    }
    html! {
        @for student in students {
            tr {
                td class="student-id" { (field_or(student.id.as_ref(), "")) }
                td { (student.name.as_deref().unwrap_or_default()) }
                td {
                    select class="form-select form-select-sm" {
                        @for (value, text) in ATTENDANCE_STATUSES {
                            option value=(value) { (text) }
                        }
                    }
                }
                td {
                    input type="text" class="form-control form-control-sm" placeholder="Remarks";
                }
            }
        }
    }
    .into_string()
}

pub fn marks_form(today: NaiveDate) -> String {
    let today = today.format("%Y-%m-%d").to_string();
    let assessment_types = [
        ("internal1", "Internal 1"),
        ("internal2", "Internal 2"),
        ("assignment", "Assignment"),
        ("lab", "Lab"),
    ];
    html! {
        (status_slot())
        div class="dashboard-card" {
            div class="card-header" { "Internal Marks Upload" }
            div class="card-body" {
                div class="form-container" {
                    h5 class="mb-4" { "Upload Marks" }
                    form id="marks-form" {
                        div class="row mb-4" {
                            div class="col-md-3" {
                                (select("marks-semester", "Select Semester", "-- Select Semester --", &semester_options(4)))
                            }
                            div class="col-md-3" {
                                label for="marks-date" class="form-label" { "Select Date" }
                                input type="date" class="form-control" id="marks-date" value=(today) required;
                            }
                            div class="col-md-3" {
                                (select("marks-subject", "Select Subject", "-- Select Subject --", &pairs(&SUBJECTS[..3])))
                            }
                            div class="col-md-3" {
                                (select("assessment-type", "Assessment Type", "-- Select Type --", &pairs(&assessment_types)))
                            }
                        }
                        div class="table-container" {
                            table class="table table-striped" id="marks-table" {
                                thead {
                                    tr {
                                        th { "Student ID" }
                                        th { "Student Name" }
                                        th { "Marks Obtained" }
                                        th { "Out Of Marks" }
                                        th { "Remarks" }
                                    }
                                }
                                tbody { (maud::PreEscaped(roster_prompt_row(5))) }
                            }
                        }
                        div class="mt-3" {
                            button type="submit" class="btn btn-primary" {
                                i class="fas fa-save me-2" {}
                                "Save Marks"
                            }
                        }
                    }
                }
            }
        }
    }
    .into_string()
}

pub fn marks_roster_rows(students: &[RosterStudent]) -> String {
    if students.is_empty() {
        return table_notice_row(5, "fa-info-circle", "No students found for selected criteria");
    }
    html! {
        @for student in students {
            tr {
                td class="student-id" { (field_or(student.id.as_ref(), "")) }
                td { (student.name.as_deref().unwrap_or_default()) }
                td {
                    input type="number" class="form-control form-control-sm marks-obtained"
                        value=(field_text(student.marks.as_ref()).unwrap_or_default()) min="0" step="0.5";
                }
                td {
                    input type="number" class="form-control form-control-sm total-marks"
                        value=(DEFAULT_TOTAL_MARKS) min="1" step="0.5";
                }
                td {
                    input type="text" class="form-control form-control-sm" placeholder="Remarks";
                }
            }
        }
    }
    .into_string()
}

pub fn student_management() -> String {
    let years: Vec<(String, String)> = (1..=4)
        .map(|year: u32| (year.to_string(), format!("{} Year", ordinal(year))))
        .collect();
    let programs = [("btech", "B.Tech"), ("mtech", "M.Tech"), ("phd", "Ph.D")];
    let departments: Vec<(String, String)> = [
        "Civil Engineering",
        "Computer Science and Engineering",
        "Electrical Engineering",
        "Mechanical Engineering",
    ]
    .iter()
    .map(|name| ((*name).to_string(), (*name).to_string()))
    .collect();
    html! {
        (status_slot())
        div class="dashboard-card" {
            div class="card-header" { "Student Management" }
            div class="card-body" {
                div class="form-container mb-4" {
                    h5 class="mb-4" { "Add New Student" }
                    form id="add-student-form" {
                        div class="row mb-3" {
                            div class="col-md-6" {
                                label for="student-name" class="form-label" { "Full Name" }
                                input type="text" class="form-control" id="student-name"
                                    placeholder="Enter student name" required;
                            }
                            div class="col-md-6" {
                                label for="student-regd" class="form-label" { "Registration Number" }
                                input type="text" class="form-control" id="student-regd"
                                    placeholder="Enter registration number" required;
                            }
                        }
                        div class="row mb-3" {
                            div class="col-md-4" {
                                (select("student-year", "Year", "-- Select Year --", &years))
                            }
                            div class="col-md-4" {
                                (select("student-semester", "Semester", "-- Select Semester --", &semester_options(8)))
                            }
                            div class="col-md-4" {
                                (select("student-program", "Program", "-- Select Program --", &pairs(&programs)))
                            }
                        }
                        div class="row mb-3" {
                            div class="col-md-6" {
                                (select("student-department", "Department", "-- Select Department --", &departments))
                            }
                            div class="col-md-6" {
                                label for="student-roll" class="form-label" { "Roll Number" }
                                input type="text" class="form-control" id="student-roll"
                                    placeholder="Enter roll number" required;
                            }
                        }
                        button type="submit" class="btn btn-primary" {
                            i class="fas fa-user-plus me-2" {}
                            "Add Student"
                        }
                    }
                }
                div {
                    h5 { "Student List" }
                    div class="table-container" {
                        table class="table table-striped" id="students-table" {
                            thead {
                                tr {
                                    th { "Roll No" }
                                    th { "Name" }
                                    th { "Registration No" }
                                    th { "Year" }
                                    th { "Program" }
                                    th { "Department" }
                                    th { "Actions" }
                                }
                            }
                            tbody { (spinner_row(7, "Loading students...")) }
                        }
                    }
                }
            }
        }
    }
    .into_string()
}

pub fn department_student_rows(students: &[DepartmentStudent]) -> String {
    if students.is_empty() {
        return table_notice_row(7, "fa-info-circle", "No students found");
    }
    html! {
        @for student in students {
            tr data-student-id=[field_text(student.id.as_ref())] {
                td { (field_or(student.roll_number.as_ref(), "")) }
                td { (student.name.as_deref().unwrap_or_default()) }
                td { (field_or(student.registration_number.as_ref(), "")) }
                td { (field_or(student.year.as_ref(), "")) }
                td { (student.program.as_deref().unwrap_or_default()) }
                td { (student.department.as_deref().unwrap_or_default()) }
                td {
                    button type="button" class="btn btn-sm btn-primary" title="Edit" {
                        i class="fas fa-edit" {}
                    }
                    " "
                    button type="button" class="btn btn-sm btn-info" title="View" {
                        i class="fas fa-eye" {}
                    }
                }
            }
        }
    }
    .into_string()
}

/// Initial markup for a section, before any fetch.
pub fn section_skeleton(renderer: Renderer, today: NaiveDate) -> String {
    match renderer {
        Renderer::StudentDashboard => dashboard_skeleton(Role::Student),
        Renderer::FacultyDashboard => dashboard_skeleton(Role::Faculty),
        Renderer::HodDashboard => dashboard_skeleton(Role::Hod),
        Renderer::PrincipalDashboard => dashboard_skeleton(Role::Principal),
        Renderer::DeanDashboard => dean_dashboard(),
        Renderer::StudentAttendance => student_attendance_skeleton(),
        Renderer::StudentResults => student_results_skeleton(),
        Renderer::StudentNotices => student_notices_skeleton(),
        Renderer::StudentProfile => student_profile_skeleton(),
        Renderer::FacultyAttendance => attendance_form(today),
        Renderer::FacultyMarks => marks_form(today),
        Renderer::HodStudentManagement => student_management(),
        Renderer::DeanNotices => dean_notices(),
        Renderer::Placeholder { heading, icon } => placeholder(heading, icon),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date")
    }

    #[test]
    fn dashboard_skeletons_start_with_placeholders_and_spinners() {
        let html = dashboard_skeleton(Role::Student);
        assert!(html.contains(r#"id="section-status""#));
        assert!(html.contains(r#"id="attendance-percentage">--%<"#));
        assert!(html.contains(r#"id="current-courses">--<"#));
        assert!(html.contains(r#"data-section="attendance""#));
        assert!(html.contains("Loading activities..."));

        let principal = dashboard_skeleton(Role::Principal);
        assert!(principal.contains(r#"class="col-md-3""#));
        assert!(principal.contains(r#"id="department-stats""#));
        assert!(!principal.contains("data-section="));
    }

    #[test]
    fn dean_overview_is_fully_static() {
        let html = dean_dashboard();
        assert!(html.contains(">1,250<"));
        assert!(html.contains("Electronics &amp; Communication"));
        assert!(html.contains("Monthly academic report generated"));
        assert!(!html.contains("spinner-border"));
    }

    #[test]
    fn activity_layouts_differ_by_role() {
        let activities = sample_activities(Role::Hod);
        let stacked = activity_list(&activities, ActivityLayout::for_role(Role::Hod));
        assert!(stacked.contains(r#"<small class="text-muted d-block">Today</small>"#));
        let inline = activity_list(&activities, ActivityLayout::for_role(Role::Student));
        assert!(inline.contains(r#"<span class="text-muted small">Today</span>"#));
        assert_eq!(
            activity_list(&[], ActivityLayout::Inline),
            r#"<p class="text-muted">No recent activities</p>"#
        );
    }

    #[test]
    fn attendance_badges_follow_threshold() {
        let records: Vec<AttendanceRecord> = serde_json::from_value(json!([
            { "name": "Data Structures", "totalClasses": 40, "present": 36, "absent": 4, "percentage": 90 },
            { "name": "Algorithms", "totalClasses": 40, "present": 28, "absent": 12, "percentage": 70 }
        ]))
        .expect("records");
        let html = attendance_rows(&records);
        assert!(html.contains(r#"<span class="badge bg-success">90%</span>"#));
        assert!(html.contains(r#"<span class="badge bg-warning">70%</span>"#));
    }

    #[test]
    fn missing_result_columns_render_dashes() {
        let records: Vec<ResultRecord> =
            serde_json::from_value(json!([{ "name": "Networks", "internal1": 18 }])).expect("records");
        let html = result_rows(&records);
        assert!(html.contains("<td>18</td>"));
        assert!(html.contains("<td>-</td>"));
        assert!(html.contains(r#"<span class="badge bg-primary">-</span>"#));
    }

    #[test]
    fn notice_dates_are_humanized_when_parseable() {
        assert_eq!(format_notice_date("2026-10-05"), "Oct 5, 2026");
        assert_eq!(format_notice_date("2026-10-15T09:30:00Z"), "Oct 15, 2026");
        assert_eq!(format_notice_date("next week"), "next week");
    }

    #[test]
    fn profile_without_phone_says_not_provided() {
        let profile: StudentProfile = serde_json::from_value(json!({
            "fullName": "Asha Kiran Samantaray",
            "registrationNumber": 2201110014_u64,
            "semester": 3
        }))
        .expect("profile");
        let html = profile_view(&profile);
        assert!(html.contains("<h4>Asha Kiran Samantaray</h4>"));
        assert!(html.contains("2201110014"));
        assert!(html.contains("Not provided"));
    }

    #[test]
    fn forms_default_dates_to_today_and_prompt_for_roster_filters() {
        let attendance = attendance_form(today());
        assert!(attendance.contains(r#"id="attendance-date" value="2026-10-16""#));
        assert!(attendance.contains(r#"<option value="8">8th Semester</option>"#));
        assert!(attendance.contains(ROSTER_PROMPT));

        let marks = marks_form(today());
        assert!(marks.contains(r#"id="marks-date" value="2026-10-16""#));
        assert!(!marks.contains(r#"<option value="5">"#));
        assert!(!marks.contains(r#"value="cn""#));
    }

    #[test]
    fn roster_rows_are_readable_by_the_form_collector() {
        let html = marks_roster_rows(&crate::fallback::sample_roster());
        assert!(html.contains(r#"<td class="student-id">2201110014</td>"#));
        assert!(html.contains(r#"value="28""#));
        assert!(html.contains(r#"class="form-control form-control-sm total-marks" value="30""#));
        assert!(attendance_roster_rows(&[]).contains("No students found for selected criteria"));
    }

    #[test]
    fn placeholders_and_banners_escape_text() {
        let html = placeholder("Assignments & Announcements", "fa-tasks");
        assert!(html.contains("<h5>Assignments &amp; Announcements</h5>"));
        assert!(html.contains(PLACEHOLDER_BODY));

        let banner = banner(&Notification::error("<b>oops</b>"));
        assert!(banner.starts_with(r#"<div class="alert alert-danger">"#));
        assert!(banner.contains("&lt;b&gt;oops&lt;/b&gt;"));
    }

    #[test]
    fn status_notice_is_visible_only_with_a_message() {
        assert!(
            status_notice(SectionLoadState::FetchFailed, Some(SAMPLE_DATA_NOTICE))
                .contains("Showing sample data")
        );
        assert_eq!(
            status_notice(SectionLoadState::LoadedReal, None),
            r#"<div class="hidden" data-state="live"></div>"#
        );
    }

    #[test]
    fn ordinals_cover_teens() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(22), "22nd");
    }
}
