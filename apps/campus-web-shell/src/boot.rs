use campus_client_core::config::API_BASE_SOURCE_DEFAULT_LOCAL;
use campus_client_core::{ClientConfig, ConfigError};
use campus_ui_core::{FormKind, Role};

pub(crate) const API_BASE_SOURCE_WINDOW: &str = "window_global";

/// Role whose container element is present on the page. Pages carry
/// exactly one; the first match in role order wins otherwise.
pub(crate) fn detect_role(has_element: impl Fn(&str) -> bool) -> Option<Role> {
    Role::ALL
        .into_iter()
        .find(|role| has_element(role.container_id()))
}

/// Base URL from the page override when one is set, otherwise the local
/// default. Returns the config and where it came from.
pub(crate) fn resolve_client_config(
    page_override: Option<String>,
) -> Result<(ClientConfig, &'static str), ConfigError> {
    match page_override.filter(|value| !value.trim().is_empty()) {
        Some(base_url) => Ok((ClientConfig::new(&base_url)?, API_BASE_SOURCE_WINDOW)),
        None => Ok((ClientConfig::default(), API_BASE_SOURCE_DEFAULT_LOCAL)),
    }
}

/// Dashboard form with this id that belongs to `role`. Any other form on
/// the page is left to submit normally.
pub(crate) fn owned_form(role: Role, form_id: &str) -> Option<FormKind> {
    FormKind::from_form_id(form_id).filter(|kind| kind.role() == role)
}

/// Faculty form whose roster filter select has this element id.
pub(crate) fn roster_form_for_select(element_id: &str) -> Option<FormKind> {
    if element_id.is_empty() {
        return None;
    }
    let selector = format!("#{element_id}");
    FormKind::ALL.into_iter().find(|kind| {
        kind.roster()
            .is_some_and(|roster| roster.semester == selector || roster.subject == selector)
    })
}
