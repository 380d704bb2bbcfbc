// fleet-domain library entry point
pub mod credentials;
pub mod error;
pub mod outcome;
pub mod plant;
pub mod report;
pub mod table;
pub use credentials::{LocalDbAccess, RemoteDbAccess, SqlCredentials, WebCredentials};
pub use error::FleetError;
pub use outcome::{Outcome, ERROR_MARKER};
pub use plant::Plant;
pub use report::VersionReport;
pub use table::QueryTable;
