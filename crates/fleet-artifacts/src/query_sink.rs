//! Artefactos CSV de las consultas por planta.

use crate::csv_error;
use csv::Writer;
use fleet_core::sink::{OutcomeSink, SinkError};
use fleet_domain::{Outcome, Plant, QueryTable, ERROR_MARKER};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

fn write_table(path: &Path, table: &QueryTable) -> Result<(), SinkError> {
    let mut writer = Writer::from_path(path).map_err(csv_error)?;
    writer.write_record(table.columns()).map_err(csv_error)?;
    for row in table.rows() {
        writer.write_record(row).map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

/// Sumidero de `query-local`: un `<etiqueta>.csv` por planta.
///
/// Un fallo de planta no deja archivo: queda en el log y en el resumen del
/// lote. El histórico en cambio sí deja constancia en disco, ver
/// [`RemoteQueryFileSink`].
pub struct LocalQueryFileSink {
    dir: PathBuf,
}

impl LocalQueryFileSink {
    /// Crea el directorio destino si no existe.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(LocalQueryFileSink { dir })
    }

    fn table_path(&self, plant: &Plant) -> PathBuf {
        self.dir.join(format!("{}.csv", plant.display_label()))
    }
}

impl OutcomeSink<QueryTable> for LocalQueryFileSink {
    fn record(&mut self, outcome: &Outcome<QueryTable>) -> Result<(), SinkError> {
        match outcome {
            Outcome::Success { payload, .. } => write_table(&self.table_path(outcome.plant()), payload),
            Outcome::Failure { plant, error } => {
                warn!("{plant}: local query failed, no artifact written ({error})");
                Ok(())
            }
        }
    }
}

/// Sumidero de `query-rds`: `<esquema>.csv` por planta, más un
/// `error_<esquema>.csv` con el detalle cuando la consulta falla.
pub struct RemoteQueryFileSink {
    dir: PathBuf,
}

impl RemoteQueryFileSink {
    /// Crea el directorio destino si no existe.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(RemoteQueryFileSink { dir })
    }

    fn table_path(&self, plant: &Plant) -> PathBuf {
        self.dir.join(format!("{}.csv", plant.display_label()))
    }

    fn error_path(&self, plant: &Plant) -> PathBuf {
        self.dir.join(format!("error_{}.csv", plant.display_label()))
    }
}

impl OutcomeSink<QueryTable> for RemoteQueryFileSink {
    fn record(&mut self, outcome: &Outcome<QueryTable>) -> Result<(), SinkError> {
        match outcome {
            Outcome::Success { payload, .. } => write_table(&self.table_path(outcome.plant()), payload),
            Outcome::Failure { plant, error } => {
                let detail = error.to_string();
                let mut writer = Writer::from_path(self.error_path(plant)).map_err(csv_error)?;
                writer.write_record(["Column1", "Column2"]).map_err(csv_error)?;
                writer.write_record([ERROR_MARKER, detail.as_str()]).map_err(csv_error)?;
                writer.flush()?;
                Ok(())
            }
        }
    }
}
