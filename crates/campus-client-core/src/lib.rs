//! Client core shared by the campus dashboards: where requests go, who they
//! are sent as, how they travel, and the small pieces of data handling every
//! role needs (form payloads, validation, CSV export).

pub mod api;
pub mod config;
pub mod csv_export;
pub mod endpoints;
pub mod error;
pub mod payload;
pub mod session;
#[cfg(not(target_arch = "wasm32"))]
pub mod transport;
pub mod validation;

pub use api::{ApiClient, ApiRequest, ApiTransport, HttpMethod, PreparedRequest, RawResponse};
pub use config::{ClientConfig, ConfigError};
pub use csv_export::{CsvExport, CsvExportError, export_to_csv};
pub use error::{RequestError, RequestErrorKind};
pub use payload::FormPayload;
pub use session::{Session, TokenStore};
pub use validation::{FieldRule, RuleSet, ValidationErrors, validate};
