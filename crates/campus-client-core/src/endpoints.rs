pub const STUDENT_DASHBOARD_PATH: &str = "/students/dashboard";
pub const STUDENT_ATTENDANCE_PATH: &str = "/students/attendance";
pub const STUDENT_RESULTS_PATH: &str = "/students/results";
pub const STUDENT_NOTICES_PATH: &str = "/students/notices";
pub const STUDENT_PROFILE_PATH: &str = "/students/profile";
pub const FACULTY_DASHBOARD_PATH: &str = "/faculty/dashboard";
pub const FACULTY_ATTENDANCE_PATH: &str = "/faculty/attendance";
pub const FACULTY_STUDENTS_PATH: &str = "/faculty/students";
pub const FACULTY_MARKS_PATH: &str = "/faculty/marks";
pub const HOD_DASHBOARD_PATH: &str = "/hod/dashboard";
pub const HOD_STUDENTS_PATH: &str = "/hod/students";
pub const PRINCIPAL_DASHBOARD_PATH: &str = "/principal/dashboard";

/// Read-only endpoints that are safe to hit when checking backend
/// reachability.
pub const PROBE_PATHS: [&str; 10] = [
    STUDENT_DASHBOARD_PATH,
    STUDENT_ATTENDANCE_PATH,
    STUDENT_RESULTS_PATH,
    STUDENT_NOTICES_PATH,
    STUDENT_PROFILE_PATH,
    FACULTY_DASHBOARD_PATH,
    FACULTY_STUDENTS_PATH,
    HOD_DASHBOARD_PATH,
    HOD_STUDENTS_PATH,
    PRINCIPAL_DASHBOARD_PATH,
];

pub fn faculty_students_path(semester: &str, subject: &str) -> String {
    format!(
        "{FACULTY_STUDENTS_PATH}?semester={}&subject={}",
        urlencoding::encode(semester.trim()),
        urlencoding::encode(subject.trim())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_path_carries_both_filters() {
        assert_eq!(
            faculty_students_path("3", "ds"),
            "/faculty/students?semester=3&subject=ds"
        );
    }

    #[test]
    fn roster_path_escapes_query_values() {
        assert_eq!(
            faculty_students_path(" 5 ", "Data Structures&Algo"),
            "/faculty/students?semester=5&subject=Data%20Structures%26Algo"
        );
    }

    #[test]
    fn probe_paths_are_read_only_dashboard_routes() {
        assert!(!PROBE_PATHS.contains(&FACULTY_MARKS_PATH));
        assert!(!PROBE_PATHS.contains(&FACULTY_ATTENDANCE_PATH));
        assert!(PROBE_PATHS.iter().all(|path| path.starts_with('/')));
    }
}
