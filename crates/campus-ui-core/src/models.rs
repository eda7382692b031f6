//! Response shapes read by the section renderers.
//!
//! Every field is optional and unknown keys are ignored. Counts, marks and
//! identifiers stay as raw JSON because the backend sends them as either
//! numbers or preformatted strings (`"1,250"`, `"85%"`), and both are shown
//! verbatim.

use serde::Deserialize;
use serde_json::Value;

/// Display text for a raw field. `null`, a missing key and an empty string
/// all read as absent.
pub fn field_text(field: Option<&Value>) -> Option<String> {
    match field? {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

pub fn field_or(field: Option<&Value>, fallback: &str) -> String {
    field_text(field).unwrap_or_else(|| fallback.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Activity {
    pub icon: Option<String>,
    #[serde(rename = "type")]
    pub tone: Option<String>,
    pub description: Option<String>,
    pub time: Option<String>,
}

impl Activity {
    pub fn new(icon: &str, tone: &str, description: &str, time: &str) -> Self {
        Self {
            icon: Some(icon.to_string()),
            tone: Some(tone.to_string()),
            description: Some(description.to_string()),
            time: Some(time.to_string()),
        }
    }
}

/// Role dashboard aggregate: stat fields addressed by their JSON key plus
/// the recent activity feed.
pub trait DashboardSnapshot {
    fn stat(&self, key: &str) -> Option<&Value>;

    fn recent_activities(&self) -> Option<&[Activity]>;
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentDashboardSnapshot {
    pub attendance_percentage: Option<Value>,
    pub current_courses: Option<Value>,
    pub new_notices: Option<Value>,
    pub recent_activities: Option<Vec<Activity>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FacultyDashboardSnapshot {
    pub courses_assigned: Option<Value>,
    pub total_students: Option<Value>,
    pub new_notices: Option<Value>,
    pub recent_activities: Option<Vec<Activity>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct YearCount {
    pub year: Option<Value>,
    pub count: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HodDashboardSnapshot {
    pub total_students: Option<Value>,
    pub faculty_members: Option<Value>,
    pub active_courses: Option<Value>,
    pub avg_attendance: Option<Value>,
    pub student_distribution: Option<Vec<YearCount>>,
    pub recent_activities: Option<Vec<Activity>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DepartmentStat {
    pub name: Option<String>,
    pub students: Option<Value>,
    pub faculty: Option<Value>,
    pub attendance: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrincipalDashboardSnapshot {
    pub total_students: Option<Value>,
    pub faculty_members: Option<Value>,
    pub departments: Option<Value>,
    pub college_attendance: Option<Value>,
    pub department_stats: Option<Vec<DepartmentStat>>,
    pub recent_activities: Option<Vec<Activity>>,
}

impl DashboardSnapshot for StudentDashboardSnapshot {
    fn stat(&self, key: &str) -> Option<&Value> {
        match key {
            "attendancePercentage" => self.attendance_percentage.as_ref(),
            "currentCourses" => self.current_courses.as_ref(),
            "newNotices" => self.new_notices.as_ref(),
            _ => None,
        }
    }

    fn recent_activities(&self) -> Option<&[Activity]> {
        self.recent_activities.as_deref()
    }
}

impl DashboardSnapshot for FacultyDashboardSnapshot {
    fn stat(&self, key: &str) -> Option<&Value> {
        match key {
            "coursesAssigned" => self.courses_assigned.as_ref(),
            "totalStudents" => self.total_students.as_ref(),
            "newNotices" => self.new_notices.as_ref(),
            _ => None,
        }
    }

    fn recent_activities(&self) -> Option<&[Activity]> {
        self.recent_activities.as_deref()
    }
}

impl DashboardSnapshot for HodDashboardSnapshot {
    fn stat(&self, key: &str) -> Option<&Value> {
        match key {
            "totalStudents" => self.total_students.as_ref(),
            "facultyMembers" => self.faculty_members.as_ref(),
            "activeCourses" => self.active_courses.as_ref(),
            "avgAttendance" => self.avg_attendance.as_ref(),
            _ => None,
        }
    }

    fn recent_activities(&self) -> Option<&[Activity]> {
        self.recent_activities.as_deref()
    }
}

impl DashboardSnapshot for PrincipalDashboardSnapshot {
    fn stat(&self, key: &str) -> Option<&Value> {
        match key {
            "totalStudents" => self.total_students.as_ref(),
            "facultyMembers" => self.faculty_members.as_ref(),
            "departments" => self.departments.as_ref(),
            "collegeAttendance" => self.college_attendance.as_ref(),
            _ => None,
        }
    }

    fn recent_activities(&self) -> Option<&[Activity]> {
        self.recent_activities.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub name: Option<String>,
    pub total_classes: Option<Value>,
    pub present: Option<Value>,
    pub absent: Option<Value>,
    pub percentage: Option<Value>,
}

impl AttendanceRecord {
    /// Courses at or above 75% attendance get the success badge.
    pub fn meets_requirement(&self) -> bool {
        let numeric = match self.percentage.as_ref() {
            Some(Value::Number(number)) => number.as_f64(),
            Some(Value::String(text)) => text.trim().trim_end_matches('%').parse().ok(),
            _ => None,
        };
        numeric.is_some_and(|percentage| percentage >= 75.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResultRecord {
    pub name: Option<String>,
    pub internal1: Option<Value>,
    pub internal2: Option<Value>,
    pub assignment: Option<Value>,
    pub lab: Option<Value>,
    pub final_grade: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Notice {
    pub title: Option<String>,
    pub date: Option<String>,
    pub content: Option<String>,
    pub publisher: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentProfile {
    pub full_name: Option<String>,
    pub department: Option<String>,
    pub registration_number: Option<Value>,
    pub roll_number: Option<Value>,
    pub academic_year: Option<Value>,
    pub semester: Option<Value>,
    pub program: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Student row offered to faculty for attendance and marks entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RosterStudent {
    pub id: Option<Value>,
    pub name: Option<String>,
    pub marks: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DepartmentStudent {
    pub id: Option<Value>,
    pub roll_number: Option<Value>,
    pub name: Option<String>,
    pub registration_number: Option<Value>,
    pub year: Option<Value>,
    pub program: Option<String>,
    pub department: Option<String>,
}
