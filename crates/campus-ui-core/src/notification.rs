use std::time::Duration;

pub const GENERIC_FETCH_ERROR: &str = "Failed to fetch data. Please try again.";
pub const REQUIRED_FIELDS_ERROR: &str = "Please fill all required fields";
pub const SUCCESS_EXPIRY: Duration = Duration::from_secs(3);
pub const ERROR_EXPIRY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn expiry(self) -> Duration {
        match self {
            Self::Success => SUCCESS_EXPIRY,
            Self::Error => ERROR_EXPIRY,
        }
    }

    pub fn alert_class(self) -> &'static str {
        match self {
            Self::Success => "alert alert-success",
            Self::Error => "alert alert-danger",
        }
    }

    /// Class selector matching every banner of this kind.
    pub fn selector(self) -> &'static str {
        match self {
            Self::Success => ".alert-success",
            Self::Error => ".alert-danger",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "fa-check-circle",
            Self::Error => "fa-exclamation-triangle",
        }
    }

    /// Error banners replace each other; success banners stack.
    pub fn replaces_existing(self) -> bool {
        matches!(self, Self::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NotificationKind::Error,
        }
    }

    pub fn expiry(&self) -> Duration {
        self.kind.expiry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiries_differ_by_kind() {
        assert_eq!(Notification::success("saved").expiry(), Duration::from_secs(3));
        assert_eq!(Notification::error("failed").expiry(), Duration::from_secs(5));
    }

    #[test]
    fn only_errors_replace_existing_banners() {
        assert!(NotificationKind::Error.replaces_existing());
        assert!(!NotificationKind::Success.replaces_existing());
        assert_eq!(NotificationKind::Error.alert_class(), "alert alert-danger");
    }
}
