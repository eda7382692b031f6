/// Global a page can set before the module loads to point at another API.
pub(crate) const BASE_URL_GLOBAL: &str = "__CAMPUS_API_BASE_URL__";
pub(crate) const SIDEBAR_LINK_SELECTOR: &str = ".sidebar-menu a";
pub(crate) const SECTION_ATTRIBUTE: &str = "data-section";
pub(crate) const ACTION_ATTRIBUTE: &str = "data-action";
pub(crate) const EXPORT_ACTION: &str = "export";
pub(crate) const ACTIVE_CLASS: &str = "active";
