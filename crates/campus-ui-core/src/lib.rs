//! Platform-neutral half of the campus dashboards: the role table, section
//! renderers, fallback datasets, form handling, and the `Dashboard`
//! controller that drives a [`DashboardSurface`].

pub mod dashboard;
pub mod fallback;
pub mod forms;
pub mod models;
pub mod notification;
pub mod render;
pub mod role;
pub mod router;
pub mod state;
pub mod surface;
#[cfg(test)]
mod test_support;

pub use dashboard::Dashboard;
pub use forms::{FormKind, FormOutcome, FormPhase};
pub use notification::{Notification, NotificationKind};
pub use role::{DEFAULT_SECTION, Renderer, Role, SectionSpec};
pub use router::{Navigation, SectionRouter};
pub use state::SectionLoadState;
pub use surface::DashboardSurface;
