//! fleet-artifacts: artefactos CSV de los lotes
pub mod combine;
pub mod query_sink;
pub mod version_sink;

pub use combine::combine_csv_dir;
pub use query_sink::{LocalQueryFileSink, RemoteQueryFileSink};
pub use version_sink::{dated_filename, VersionCsvSink};

use fleet_core::sink::SinkError;

pub(crate) fn csv_error(e: csv::Error) -> SinkError {
    if e.is_io_error() {
        SinkError::Io(e.to_string())
    } else {
        SinkError::Encode(e.to_string())
    }
}
