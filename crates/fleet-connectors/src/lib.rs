//! fleet-connectors: acceso web y SQL a las plantas
pub mod fallback;
pub mod markup;
pub mod sql_local;
pub mod sql_remote;
pub mod web;

pub use fallback::with_fallback;
pub use markup::extract_version_report;
pub use sql_local::LocalSqlConnector;
pub use sql_remote::RemoteSqlConnector;
pub use web::{PlantSession, WebSessionConnector};
