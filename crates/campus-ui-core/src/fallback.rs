//! Stat card table and the sample datasets shown when live data is missing.

use serde_json::Value;

use crate::models::{Activity, DepartmentStat, DepartmentStudent, RosterStudent, YearCount};
use crate::role::Role;

/// One dashboard stat tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatCard {
    pub element_id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub tone: &'static str,
    /// Response key the live value is read from.
    pub field: &'static str,
    pub placeholder: &'static str,
    /// Appended to live values only; fallbacks already carry their unit.
    pub suffix: &'static str,
    pub fallback: &'static str,
    pub navigates_to: Option<&'static str>,
}

const fn card(
    element_id: &'static str,
    label: &'static str,
    icon: &'static str,
    tone: &'static str,
    field: &'static str,
    fallback: &'static str,
) -> StatCard {
    StatCard {
        element_id,
        label,
        icon,
        tone,
        field,
        placeholder: "--",
        suffix: "",
        fallback,
        navigates_to: None,
    }
}

const fn linked(mut stat: StatCard, section: &'static str) -> StatCard {
    stat.navigates_to = Some(section);
    stat
}

const fn percent_placeholder(mut stat: StatCard) -> StatCard {
    stat.placeholder = "--%";
    stat
}

const STUDENT_CARDS: &[StatCard] = &[
    linked(
        StatCard {
            suffix: "%",
            ..percent_placeholder(card(
                "attendance-percentage",
                "Attendance",
                "fa-calendar-check",
                "primary",
                "attendancePercentage",
                "87%",
            ))
        },
        "attendance",
    ),
    linked(
        card("current-courses", "Current Courses", "fa-book", "success", "currentCourses", "5"),
        "results",
    ),
    linked(
        card("new-notices", "New Notices", "fa-bullhorn", "info", "newNotices", "3"),
        "notices",
    ),
];

const FACULTY_CARDS: &[StatCard] = &[
    linked(
        card(
            "courses-assigned",
            "Courses Assigned",
            "fa-chalkboard-teacher",
            "primary",
            "coursesAssigned",
            "4",
        ),
        "lesson-plans",
    ),
    linked(
        card("total-students", "Total Students", "fa-users", "success", "totalStudents", "120"),
        "attendance",
    ),
    linked(
        card("new-notices", "New Notices", "fa-bullhorn", "info", "newNotices", "2"),
        "notices",
    ),
];

const HOD_CARDS: &[StatCard] = &[
    card("total-students", "Total Students", "fa-user-graduate", "primary", "totalStudents", "240"),
    card(
        "faculty-members",
        "Faculty Members",
        "fa-chalkboard-teacher",
        "success",
        "facultyMembers",
        "18",
    ),
    card("active-courses", "Active Courses", "fa-book", "warning", "activeCourses", "32"),
    percent_placeholder(card(
        "avg-attendance",
        "Avg Attendance",
        "fa-calendar-check",
        "info",
        "avgAttendance",
        "85%",
    )),
];

const PRINCIPAL_CARDS: &[StatCard] = &[
    card("total-students", "Total Students", "fa-user-graduate", "primary", "totalStudents", "1,250"),
    card(
        "faculty-members",
        "Faculty Members",
        "fa-chalkboard-teacher",
        "success",
        "facultyMembers",
        "85",
    ),
    card("departments", "Departments", "fa-building", "warning", "departments", "6"),
    percent_placeholder(card(
        "college-attendance",
        "College Attendance",
        "fa-calendar-check",
        "info",
        "collegeAttendance",
        "86%",
    )),
];

/// The dean overview has no endpoint; its tiles always show these values.
const DEAN_CARDS: &[StatCard] = &[
    card("total-students", "Total Students", "fa-user-graduate", "primary", "totalStudents", "1,250"),
    card(
        "faculty-members",
        "Faculty Members",
        "fa-chalkboard-teacher",
        "success",
        "facultyMembers",
        "85",
    ),
    card("departments", "Departments", "fa-building", "warning", "departments", "6"),
];

pub fn stat_cards(role: Role) -> &'static [StatCard] {
    match role {
        Role::Student => STUDENT_CARDS,
        Role::Faculty => FACULTY_CARDS,
        Role::Hod => HOD_CARDS,
        Role::Principal => PRINCIPAL_CARDS,
        Role::Dean => DEAN_CARDS,
    }
}

impl StatCard {
    /// Text shown once the fetch settles: the live value when present,
    /// otherwise the fallback literal.
    pub fn display(&self, live: Option<&Value>) -> String {
        match crate::models::field_text(live) {
            Some(value) => format!("{value}{}", self.suffix),
            None => self.fallback.to_string(),
        }
    }
}

pub fn sample_activities(role: Role) -> Vec<Activity> {
    match role {
        Role::Student => vec![
            Activity::new(
                "fa-check-circle",
                "success",
                "Attendance marked for Data Structures",
                "Today, 10:30 AM",
            ),
            Activity::new(
                "fa-file-alt",
                "primary",
                "New assignment uploaded for Algorithms",
                "Yesterday, 3:45 PM",
            ),
            Activity::new(
                "fa-bullhorn",
                "warning",
                "New notice: Mid-term exam schedule",
                "2 days ago",
            ),
        ],
        Role::Faculty => vec![
            Activity::new(
                "fa-check-circle",
                "success",
                "Attendance marked for Data Structures (3rd Year)",
                "Today, 10:30 AM",
            ),
            Activity::new(
                "fa-file-alt",
                "primary",
                "New assignment created for Algorithms",
                "Yesterday, 3:45 PM",
            ),
            Activity::new(
                "fa-upload",
                "warning",
                "Internal marks uploaded for Database Systems",
                "2 days ago",
            ),
        ],
        Role::Hod => vec![
            Activity::new("fa-user-plus", "success", "2 new students added", "Today"),
            Activity::new("fa-book", "primary", "5 lesson plans submitted", "Yesterday"),
            Activity::new("fa-bullhorn", "warning", "Department notice published", "2 days ago"),
        ],
        Role::Principal => vec![
            Activity::new("fa-users-cog", "primary", "2 new faculty members added", "Today"),
            Activity::new("fa-bullhorn", "success", "Institutional notice published", "Yesterday"),
            Activity::new("fa-chart-pie", "warning", "Monthly report generated", "3 days ago"),
        ],
        Role::Dean => vec![
            Activity::new("fa-bullhorn", "primary", "New college notice published", "Today"),
            Activity::new("fa-calendar-alt", "success", "Academic calendar updated", "2 days ago"),
            Activity::new(
                "fa-chart-line",
                "warning",
                "Monthly academic report generated",
                "1 week ago",
            ),
        ],
    }
}

pub fn sample_year_distribution() -> Vec<YearCount> {
    [("1st Year", 60), ("2nd Year", 58), ("3rd Year", 62), ("4th Year", 60)]
        .into_iter()
        .map(|(year, count)| YearCount {
            year: Some(Value::from(year)),
            count: Some(Value::from(count)),
        })
        .collect()
}

pub fn sample_department_stats() -> Vec<DepartmentStat> {
    [
        ("Computer Science", 240, 18, 85),
        ("Electrical", 220, 16, 84),
        ("Mechanical", 210, 15, 86),
    ]
    .into_iter()
    .map(|(name, students, faculty, attendance)| DepartmentStat {
        name: Some(name.to_string()),
        students: Some(Value::from(students)),
        faculty: Some(Value::from(faculty)),
        attendance: Some(Value::from(attendance)),
    })
    .collect()
}

/// Out-of marks prefilled in every marks row.
pub const DEFAULT_TOTAL_MARKS: u32 = 30;

pub fn sample_roster() -> Vec<RosterStudent> {
    [
        ("2201110014", "Asha Kiran Samantaray", 28),
        ("2201110076", "Yubaraj Mohanty", 26),
    ]
    .into_iter()
    .map(|(id, name, marks)| RosterStudent {
        id: Some(Value::from(id)),
        name: Some(name.to_string()),
        marks: Some(Value::from(marks)),
    })
    .collect()
}

pub fn sample_department_students() -> Vec<DepartmentStudent> {
    [
        ("CS2022001", "Asha Kiran Samantaray", "2201110014"),
        ("CS2022002", "Yubaraj Mohanty", "2201110076"),
    ]
    .into_iter()
    .map(|(roll, name, registration)| DepartmentStudent {
        id: None,
        roll_number: Some(Value::from(roll)),
        name: Some(name.to_string()),
        registration_number: Some(Value::from(registration)),
        year: Some(Value::from("2nd Year")),
        program: Some("B.Tech".to_string()),
        department: Some("Computer Science and Engineering".to_string()),
    })
    .collect()
}

pub const DEAN_DEPARTMENT_DISTRIBUTION: &[(&str, u32)] = &[
    ("Computer Science & Engineering", 240),
    ("Electrical Engineering", 220),
    ("Mechanical Engineering", 210),
    ("Civil Engineering", 200),
    ("Electronics & Communication", 190),
    ("Information Technology", 190),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishedNotice {
    pub title: &'static str,
    pub published: &'static str,
    pub visibility: &'static str,
}

pub const DEAN_PUBLISHED_NOTICES: &[PublishedNotice] = &[
    PublishedNotice {
        title: "College Foundation Day Celebration",
        published: "Oct 15, 2023",
        visibility: "Entire College",
    },
    PublishedNotice {
        title: "UG Mid-term Examination Schedule",
        published: "Oct 10, 2023",
        visibility: "UG Programs",
    },
    PublishedNotice {
        title: "PG Research Symposium",
        published: "Oct 5, 2023",
        visibility: "PG Programs",
    },
];

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn stat_display_prefers_live_values() {
        let attendance = &stat_cards(Role::Student)[0];
        assert_eq!(attendance.display(Some(&json!(91))), "91%");
        assert_eq!(attendance.display(None), "87%");
        assert_eq!(attendance.display(Some(&Value::Null)), "87%");

        let hod_attendance = &stat_cards(Role::Hod)[3];
        assert_eq!(hod_attendance.display(Some(&json!("79%"))), "79%");
        assert_eq!(hod_attendance.placeholder, "--%");
    }

    #[test]
    fn every_role_has_three_sample_activities() {
        for role in Role::ALL {
            assert_eq!(sample_activities(role).len(), 3, "{}", role.as_str());
        }
    }

    #[test]
    fn fallback_literals_match_the_card_table() {
        let fallbacks = |role: Role| -> Vec<&str> {
            stat_cards(role).iter().map(|card| card.fallback).collect()
        };
        assert_eq!(fallbacks(Role::Student), vec!["87%", "5", "3"]);
        assert_eq!(fallbacks(Role::Faculty), vec!["4", "120", "2"]);
        assert_eq!(fallbacks(Role::Hod), vec!["240", "18", "32", "85%"]);
        assert_eq!(fallbacks(Role::Principal), vec!["1,250", "85", "6", "86%"]);
    }

    #[test]
    fn sample_lists_carry_documented_values() {
        let counts: Vec<Option<Value>> = sample_year_distribution()
            .into_iter()
            .map(|entry| entry.count)
            .collect();
        assert_eq!(
            counts,
            vec![Some(json!(60)), Some(json!(58)), Some(json!(62)), Some(json!(60))]
        );
        assert_eq!(sample_department_stats().len(), 3);
        assert_eq!(sample_roster()[1].marks, Some(json!(26)));
        assert_eq!(
            sample_department_students()[0].roll_number,
            Some(json!("CS2022001"))
        );
    }
}
