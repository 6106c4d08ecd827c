pub mod config;
pub mod entry;
pub mod partner;
pub mod value;

pub use config::{AppConfig, LoggingConfig};
pub use entry::{ConfigEntry, EntrySpec, ValueOrigin};
pub use partner::{
    Certificate, Contact, Endpoint, EndpointPurpose, FederationPartner, LocalizedString,
    Organization, HTTP_REDIRECT_BINDING,
};
pub use value::{ConfigValue, Days, FromConfigValue, ValueKind};
