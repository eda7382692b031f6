use std::collections::HashMap;

use campus_client_core::endpoints::{FACULTY_ATTENDANCE_PATH, FACULTY_MARKS_PATH, HOD_STUDENTS_PATH};
use campus_client_core::{RequestError, RuleSet, ValidationErrors};
use serde_json::{Map, Number, Value};

use crate::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    AddStudent,
    Attendance,
    Marks,
    InstitutionalNotice,
}

/// Payload key and the selector its value is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBinding {
    pub key: &'static str,
    pub selector: &'static str,
}

const fn bind(key: &'static str, selector: &'static str) -> FieldBinding {
    FieldBinding { key, selector }
}

/// Per-student table rows collected into the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpec {
    pub payload_key: &'static str,
    pub table_body: &'static str,
    /// Cell selectors relative to each row; the first identifies the student
    /// and rows without it are skipped.
    pub cells: &'static [&'static str],
}

/// Filter selects that drive a roster reload, and where the roster goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterSpec {
    pub semester: &'static str,
    pub subject: &'static str,
    pub table_body: &'static str,
}

const STUDENT_ID_CELL: &str = ".student-id";
const REMARKS_CELL: &str = "input[type=\"text\"]";

const ADD_STUDENT_FIELDS: &[FieldBinding] = &[
    bind("name", "#student-name"),
    bind("registrationNumber", "#student-regd"),
    bind("year", "#student-year"),
    bind("semester", "#student-semester"),
    bind("program", "#student-program"),
    bind("department", "#student-department"),
    bind("rollNumber", "#student-roll"),
];

const ATTENDANCE_FIELDS: &[FieldBinding] = &[
    bind("semester", "#semester"),
    bind("date", "#attendance-date"),
    bind("subject", "#subject"),
];

const MARKS_FIELDS: &[FieldBinding] = &[
    bind("semester", "#marks-semester"),
    bind("date", "#marks-date"),
    bind("subject", "#marks-subject"),
    bind("assessmentType", "#assessment-type"),
];

const NOTICE_FIELDS: &[FieldBinding] = &[
    bind("title", "#institutional-notice-title"),
    bind("content", "#institutional-notice-content"),
    bind("visibility", "input[name=\"visibility\"]:checked"),
];

impl FormKind {
    pub const ALL: [Self; 4] = [
        Self::AddStudent,
        Self::Attendance,
        Self::Marks,
        Self::InstitutionalNotice,
    ];

    pub fn form_id(self) -> &'static str {
        match self {
            Self::AddStudent => "add-student-form",
            Self::Attendance => "attendance-form",
            Self::Marks => "marks-form",
            Self::InstitutionalNotice => "institutional-notice-form",
        }
    }

    pub fn from_form_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.form_id() == id)
    }

    pub fn role(self) -> Role {
        match self {
            Self::AddStudent => Role::Hod,
            Self::Attendance | Self::Marks => Role::Faculty,
            Self::InstitutionalNotice => Role::Dean,
        }
    }

    /// POST target. The institutional notice form publishes locally.
    pub fn endpoint(self) -> Option<&'static str> {
        match self {
            Self::AddStudent => Some(HOD_STUDENTS_PATH),
            Self::Attendance => Some(FACULTY_ATTENDANCE_PATH),
            Self::Marks => Some(FACULTY_MARKS_PATH),
            Self::InstitutionalNotice => None,
        }
    }

    pub fn fields(self) -> &'static [FieldBinding] {
        match self {
            Self::AddStudent => ADD_STUDENT_FIELDS,
            Self::Attendance => ATTENDANCE_FIELDS,
            Self::Marks => MARKS_FIELDS,
            Self::InstitutionalNotice => NOTICE_FIELDS,
        }
    }

    pub fn rules(self) -> RuleSet {
        match self {
            Self::AddStudent => RuleSet::required_fields(&[
                "name",
                "registrationNumber",
                "year",
                "semester",
                "program",
                "department",
                "rollNumber",
            ]),
            Self::Attendance => RuleSet::required_fields(&["semester", "date", "subject"]),
            Self::Marks => {
                RuleSet::required_fields(&["semester", "date", "subject", "assessmentType"])
            }
            Self::InstitutionalNotice => RuleSet::required_fields(&["title", "content"]),
        }
    }

    pub fn rows(self) -> Option<RowSpec> {
        match self {
            Self::Attendance => Some(RowSpec {
                payload_key: "attendance",
                table_body: "#attendance-table tbody",
                cells: &[STUDENT_ID_CELL, "select", REMARKS_CELL],
            }),
            Self::Marks => Some(RowSpec {
                payload_key: "marks",
                table_body: "#marks-table tbody",
                cells: &[STUDENT_ID_CELL, ".marks-obtained", ".total-marks", REMARKS_CELL],
            }),
            Self::AddStudent | Self::InstitutionalNotice => None,
        }
    }

    pub fn roster(self) -> Option<RosterSpec> {
        match self {
            Self::Attendance => Some(RosterSpec {
                semester: "#semester",
                subject: "#subject",
                table_body: "#attendance-table tbody",
            }),
            Self::Marks => Some(RosterSpec {
                semester: "#marks-semester",
                subject: "#marks-subject",
                table_body: "#marks-table tbody",
            }),
            Self::AddStudent | Self::InstitutionalNotice => None,
        }
    }

    pub fn success_text(self) -> &'static str {
        match self {
            Self::AddStudent => "Student added successfully!",
            Self::Attendance => "Attendance submitted successfully!",
            Self::Marks => "Marks saved successfully!",
            Self::InstitutionalNotice => "Institutional notice published successfully!",
        }
    }

    pub fn failure_text(self) -> &'static str {
        match self {
            Self::AddStudent => "Failed to add student",
            Self::Attendance => "Failed to submit attendance",
            Self::Marks => "Failed to save marks",
            Self::InstitutionalNotice => "Failed to publish notice",
        }
    }

    pub fn resets_on_success(self) -> bool {
        matches!(self, Self::AddStudent | Self::InstitutionalNotice)
    }

    /// Converts the raw cell values of each table row into payload entries.
    pub fn collect_rows(self, rows: &[Vec<Option<String>>]) -> Result<Vec<Value>, String> {
        match self {
            Self::Attendance => Ok(attendance_entries(rows)),
            Self::Marks => marks_entries(rows),
            Self::AddStudent | Self::InstitutionalNotice => Ok(Vec::new()),
        }
    }
}

fn cell(row: &[Option<String>], index: usize) -> String {
    row.get(index).cloned().flatten().unwrap_or_default()
}

fn student_rows(rows: &[Vec<Option<String>>]) -> impl Iterator<Item = &Vec<Option<String>>> {
    rows.iter()
        .filter(|row| row.first().is_some_and(Option::is_some))
}

fn attendance_entries(rows: &[Vec<Option<String>>]) -> Vec<Value> {
    student_rows(rows)
        .map(|row| {
            let mut entry = Map::new();
            entry.insert("studentId".to_string(), Value::String(cell(row, 0).trim().to_string()));
            entry.insert("status".to_string(), Value::String(cell(row, 1)));
            entry.insert("remarks".to_string(), Value::String(cell(row, 2)));
            Value::Object(entry)
        })
        .collect()
}

/// Marks rows reject any student whose obtained marks exceed the total.
/// Unparseable numbers are sent as `null`.
fn marks_entries(rows: &[Vec<Option<String>>]) -> Result<Vec<Value>, String> {
    let mut entries = Vec::new();
    for row in student_rows(rows) {
        let student_id = cell(row, 0).trim().to_string();
        let obtained = parse_mark(&cell(row, 1));
        let total = parse_mark(&cell(row, 2));
        if let (Some(obtained), Some(total)) = (obtained, total) {
            if obtained > total {
                return Err(format!(
                    "Marks obtained cannot exceed total marks for student {student_id}"
                ));
            }
        }
        let mut entry = Map::new();
        entry.insert("studentId".to_string(), Value::String(student_id));
        entry.insert("marksObtained".to_string(), mark_value(obtained));
        entry.insert("totalMarks".to_string(), mark_value(total));
        entry.insert("remarks".to_string(), Value::String(cell(row, 3)));
        entries.push(Value::Object(entry));
    }
    Ok(entries)
}

fn parse_mark(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

fn mark_value(mark: Option<f64>) -> Value {
    mark.and_then(Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Validating,
    Invalid,
    Valid,
    Submitting,
    Succeeded,
    Failed,
}

impl FormPhase {
    pub fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Validating)
                | (Self::Validating, Self::Invalid | Self::Valid)
                | (Self::Valid, Self::Submitting)
                | (Self::Submitting, Self::Succeeded | Self::Failed)
                | (Self::Invalid | Self::Succeeded | Self::Failed, Self::Idle)
        )
    }
}

/// Submission phase of every form on the page.
#[derive(Debug, Clone, Default)]
pub struct FormTracker {
    phases: HashMap<FormKind, FormPhase>,
}

impl FormTracker {
    pub fn phase(&self, kind: FormKind) -> FormPhase {
        self.phases.get(&kind).copied().unwrap_or(FormPhase::Idle)
    }

    /// Moves `kind` to `next` when the transition is legal.
    pub fn advance(&mut self, kind: FormKind, next: FormPhase) -> bool {
        let current = self.phase(kind);
        if !current.can_advance_to(next) {
            tracing::debug!(
                form = kind.form_id(),
                from = ?current,
                to = ?next,
                "rejected form phase transition"
            );
            return false;
        }
        self.phases.insert(kind, next);
        true
    }

    /// Starts a submission. Returns false while an earlier one is still in
    /// flight.
    pub fn begin(&mut self, kind: FormKind) -> bool {
        self.advance(kind, FormPhase::Validating)
    }
}

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    /// Unknown form, or one already being submitted.
    Ignored,
    /// Field rules failed; nothing was sent.
    Invalid(ValidationErrors),
    /// A table row failed its check; nothing was sent.
    Rejected(String),
    Submitted,
    Failed(RequestError),
}

impl FormOutcome {
    pub fn terminal_phase(&self) -> Option<FormPhase> {
        match self {
            Self::Ignored => None,
            Self::Invalid(_) | Self::Rejected(_) => Some(FormPhase::Invalid),
            Self::Submitted => Some(FormPhase::Succeeded),
            Self::Failed(_) => Some(FormPhase::Failed),
        }
    }
}

#[cfg(test)]
mod tests {
    use campus_client_core::{FormPayload, validate};
    use serde_json::json;

    use super::*;

    fn row(cells: &[Option<&str>]) -> Vec<Option<String>> {
        cells.iter().map(|cell| cell.map(str::to_string)).collect()
    }

    #[test]
    fn form_ids_resolve_to_owning_roles() {
        for kind in FormKind::ALL {
            assert_eq!(FormKind::from_form_id(kind.form_id()), Some(kind));
        }
        assert_eq!(FormKind::from_form_id("login-form"), None);
        assert_eq!(FormKind::Marks.role(), Role::Faculty);
        assert_eq!(FormKind::InstitutionalNotice.endpoint(), None);
    }

    #[test]
    fn every_required_field_has_a_binding() {
        for kind in FormKind::ALL {
            let bound: Vec<&str> = kind.fields().iter().map(|field| field.key).collect();
            for (field, _) in kind.rules().iter() {
                assert!(bound.contains(&field), "{field} unbound in {}", kind.form_id());
            }
        }
    }

    #[test]
    fn empty_add_student_form_flags_every_field() {
        let errors = validate(&FormPayload::new(), &FormKind::AddStudent.rules());
        assert_eq!(errors.len(), 7);
        assert_eq!(errors["rollNumber"], "rollNumber is required");
    }

    #[test]
    fn attendance_rows_skip_message_rows() {
        let rows = vec![
            row(&[Some("2201110014"), Some("present"), Some("")]),
            row(&[None, None, None]),
            row(&[Some(" 2201110076 "), Some("leave"), Some("medical")]),
        ];
        let entries = FormKind::Attendance.collect_rows(&rows).expect("rows");
        assert_eq!(
            entries,
            vec![
                json!({ "studentId": "2201110014", "status": "present", "remarks": "" }),
                json!({ "studentId": "2201110076", "status": "leave", "remarks": "medical" }),
            ]
        );
    }

    #[test]
    fn marks_rows_enforce_total_and_null_unparseable_values() {
        let ok = FormKind::Marks
            .collect_rows(&[row(&[Some("2201110014"), Some("28"), Some("30"), Some("")])])
            .expect("valid marks");
        assert_eq!(
            ok,
            vec![json!({
                "studentId": "2201110014",
                "marksObtained": 28.0,
                "totalMarks": 30.0,
                "remarks": ""
            })]
        );

        let blank = FormKind::Marks
            .collect_rows(&[row(&[Some("2201110076"), Some(""), Some("30"), None])])
            .expect("blank marks pass");
        assert_eq!(blank[0]["marksObtained"], Value::Null);

        let error = FormKind::Marks
            .collect_rows(&[
                row(&[Some("2201110014"), Some("28"), Some("30"), Some("")]),
                row(&[Some("2201110076"), Some("31"), Some("30"), Some("")]),
            ])
            .expect_err("over total");
        assert_eq!(
            error,
            "Marks obtained cannot exceed total marks for student 2201110076"
        );
    }

    #[test]
    fn phases_follow_the_submission_lifecycle() {
        let mut tracker = FormTracker::default();
        let kind = FormKind::Attendance;
        assert!(tracker.begin(kind));
        assert!(!tracker.begin(kind), "second submit while validating is ignored");
        assert!(tracker.advance(kind, FormPhase::Valid));
        assert!(tracker.advance(kind, FormPhase::Submitting));
        assert!(!tracker.begin(kind), "second submit while submitting is ignored");
        assert!(!tracker.advance(kind, FormPhase::Idle));
        assert!(tracker.advance(kind, FormPhase::Failed));
        assert!(tracker.advance(kind, FormPhase::Idle));
        assert!(tracker.begin(kind));
        assert_eq!(tracker.phase(FormKind::Marks), FormPhase::Idle);
    }

    #[test]
    fn outcomes_map_to_terminal_phases() {
        assert_eq!(FormOutcome::Submitted.terminal_phase(), Some(FormPhase::Succeeded));
        assert_eq!(
            FormOutcome::Rejected("over".to_string()).terminal_phase(),
            Some(FormPhase::Invalid)
        );
        assert_eq!(FormOutcome::Ignored.terminal_phase(), None);
    }
}
