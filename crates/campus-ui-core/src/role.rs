use campus_client_core::endpoints::{
    FACULTY_DASHBOARD_PATH, HOD_DASHBOARD_PATH, HOD_STUDENTS_PATH, PRINCIPAL_DASHBOARD_PATH,
    STUDENT_ATTENDANCE_PATH, STUDENT_DASHBOARD_PATH, STUDENT_NOTICES_PATH, STUDENT_PROFILE_PATH,
    STUDENT_RESULTS_PATH,
};

pub const DEFAULT_SECTION: &str = "dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Student,
    Faculty,
    Hod,
    Principal,
    Dean,
}

impl Role {
    pub const ALL: [Self; 5] = [
        Self::Student,
        Self::Faculty,
        Self::Hod,
        Self::Principal,
        Self::Dean,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
            Self::Hod => "hod",
            Self::Principal => "principal",
            Self::Dean => "dean",
        }
    }

    /// Id of the element every section of this role renders into.
    pub fn container_id(self) -> &'static str {
        match self {
            Self::Student => "student-dashboard-content",
            Self::Faculty => "faculty-dashboard-content",
            Self::Hod => "hod-dashboard-content",
            Self::Principal => "principal-dashboard-content",
            Self::Dean => "dean-dashboard-content",
        }
    }

    pub fn sections(self) -> &'static [SectionSpec] {
        match self {
            Self::Student => STUDENT_SECTIONS,
            Self::Faculty => FACULTY_SECTIONS,
            Self::Hod => HOD_SECTIONS,
            Self::Principal => PRINCIPAL_SECTIONS,
            Self::Dean => DEAN_SECTIONS,
        }
    }

    pub fn section(self, name: &str) -> Option<&'static SectionSpec> {
        self.sections().iter().find(|section| section.name == name)
    }
}

/// Which renderer draws a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Renderer {
    StudentDashboard,
    StudentAttendance,
    StudentResults,
    StudentNotices,
    StudentProfile,
    FacultyDashboard,
    FacultyAttendance,
    FacultyMarks,
    HodDashboard,
    HodStudentManagement,
    PrincipalDashboard,
    DeanDashboard,
    DeanNotices,
    Placeholder {
        heading: &'static str,
        icon: &'static str,
    },
}

impl Renderer {
    /// Endpoint fetched when the section opens. Form sections fetch their
    /// rosters on demand and static sections fetch nothing.
    pub fn endpoint(self) -> Option<&'static str> {
        match self {
            Self::StudentDashboard => Some(STUDENT_DASHBOARD_PATH),
            Self::StudentAttendance => Some(STUDENT_ATTENDANCE_PATH),
            Self::StudentResults => Some(STUDENT_RESULTS_PATH),
            Self::StudentNotices => Some(STUDENT_NOTICES_PATH),
            Self::StudentProfile => Some(STUDENT_PROFILE_PATH),
            Self::FacultyDashboard => Some(FACULTY_DASHBOARD_PATH),
            Self::HodDashboard => Some(HOD_DASHBOARD_PATH),
            Self::HodStudentManagement => Some(HOD_STUDENTS_PATH),
            Self::PrincipalDashboard => Some(PRINCIPAL_DASHBOARD_PATH),
            Self::FacultyAttendance
            | Self::FacultyMarks
            | Self::DeanDashboard
            | Self::DeanNotices
            | Self::Placeholder { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    /// Value of the sidebar entry's `data-section` attribute.
    pub name: &'static str,
    pub renderer: Renderer,
}

const fn section(name: &'static str, renderer: Renderer) -> SectionSpec {
    SectionSpec { name, renderer }
}

const fn placeholder(name: &'static str, heading: &'static str, icon: &'static str) -> SectionSpec {
    SectionSpec {
        name,
        renderer: Renderer::Placeholder { heading, icon },
    }
}

const STUDENT_SECTIONS: &[SectionSpec] = &[
    section("dashboard", Renderer::StudentDashboard),
    section("attendance", Renderer::StudentAttendance),
    section("results", Renderer::StudentResults),
    section("notices", Renderer::StudentNotices),
    section("profile", Renderer::StudentProfile),
];

const FACULTY_SECTIONS: &[SectionSpec] = &[
    section("dashboard", Renderer::FacultyDashboard),
    section("attendance", Renderer::FacultyAttendance),
    section("marks", Renderer::FacultyMarks),
    placeholder("assignments", "Assignments & Announcements", "fa-tasks"),
    placeholder("notices", "Institutional Notices", "fa-bullhorn"),
    placeholder("lesson-plans", "Lesson Plans", "fa-book"),
];

const HOD_SECTIONS: &[SectionSpec] = &[
    section("dashboard", Renderer::HodDashboard),
    section("student-management", Renderer::HodStudentManagement),
    placeholder("faculty-management", "Faculty Management", "fa-chalkboard-teacher"),
    placeholder("assign-course", "Assign Course", "fa-book"),
    placeholder("attendance-overview", "Attendance Overview", "fa-calendar-check"),
    placeholder("lesson-plan-monitoring", "Lesson Plan Monitoring", "fa-tasks"),
    placeholder("department-notices", "Department Notices", "fa-bullhorn"),
];

const PRINCIPAL_SECTIONS: &[SectionSpec] = &[
    section("dashboard", Renderer::PrincipalDashboard),
    placeholder("user-management", "User Management", "fa-users-cog"),
    placeholder("department-management", "Department Management", "fa-building"),
    placeholder("global-data", "Global Data Access", "fa-database"),
    placeholder("notices", "Notices & Announcements", "fa-bullhorn"),
];

const DEAN_SECTIONS: &[SectionSpec] = &[
    section("dashboard", Renderer::DeanDashboard),
    section("notices", Renderer::DeanNotices),
];
