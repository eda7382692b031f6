use campus_client_core::CsvExport;

use crate::notification::{Notification, NotificationKind};

/// Everything the dashboard controller needs from the page.
///
/// Selectors are CSS selectors scoped to the document. Writes to a missing
/// element are silently skipped, matching a section that was replaced
/// underneath an in-flight request.
pub trait DashboardSurface {
    /// Replaces the whole role container.
    fn render_container(&self, html: &str);

    fn set_html(&self, selector: &str, html: &str);

    fn set_text(&self, selector: &str, text: &str);

    /// Moves the `active` class to the sidebar entry for `section`.
    fn mark_active_menu(&self, section: &str);

    /// Shows the page-wide loading overlay, creating it on first use.
    fn show_loading(&self);

    fn hide_loading(&self);

    /// Prepends a banner to the role container and schedules its removal
    /// after the notification's expiry.
    fn show_banner(&self, notification: &Notification);

    fn remove_banners(&self, kind: NotificationKind);

    /// Current value of an input, select or textarea. `None` when the
    /// element does not exist.
    fn field_value(&self, selector: &str) -> Option<String>;

    /// For each row under `table_body`, the value (form controls) or text
    /// (anything else) of the first match of every cell selector.
    fn row_values(&self, table_body: &str, cells: &[&str]) -> Vec<Vec<Option<String>>>;

    fn reset_form(&self, form_id: &str);

    fn download(&self, export: &CsvExport);
}
