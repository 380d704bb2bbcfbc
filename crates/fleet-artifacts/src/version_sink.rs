//! Artefacto CSV del chequeo de versiones.

use crate::csv_error;
use chrono::{Local, NaiveDate};
use csv::Writer;
use fleet_core::sink::{OutcomeSink, SinkError};
use fleet_domain::{Outcome, VersionReport, ERROR_MARKER};
use log::debug;
use std::fs::File;
use std::path::{Path, PathBuf};

const VERSION_HEADER: [&str; 3] = ["version", "planta", "ip"];

/// Nombre del artefacto del día: `YYYY-MM-DD.csv`.
pub fn dated_filename(date: NaiveDate) -> String {
    format!("{date}.csv")
}

/// Sumidero del chequeo de versiones: un CSV fechado por corrida.
///
/// Crearlo trunca el archivo del día si ya existía, así repetir el chequeo
/// reemplaza el artefacto en vez de acumular filas. Cada resultado se
/// escribe y se vuelca a disco en el momento, de modo que el archivo queda
/// completo hasta la última planta atendida aunque el proceso muera a mitad
/// del lote.
pub struct VersionCsvSink {
    writer: Writer<File>,
    path: PathBuf,
}

impl VersionCsvSink {
    /// Crea el artefacto del día corriente dentro de `dir`.
    pub fn create(dir: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = dir.as_ref().join(dated_filename(Local::now().date_naive()));
        Self::create_at(path)
    }

    /// Variante con ruta explícita.
    pub fn create_at(path: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let path = path.into();
        let mut writer = Writer::from_path(&path).map_err(csv_error)?;
        writer.write_record(VERSION_HEADER).map_err(csv_error)?;
        writer.flush()?;
        Ok(VersionCsvSink { writer, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutcomeSink<VersionReport> for VersionCsvSink {
    fn record(&mut self, outcome: &Outcome<VersionReport>) -> Result<(), SinkError> {
        let plant = outcome.plant();
        let row: [String; 3] = match outcome {
            Outcome::Success { payload, .. } => {
                debug!("{plant}: {payload}");
                [payload.version.clone(), payload.site.clone(), plant.address().to_string()]
            }
            Outcome::Failure { error, .. } => {
                debug!("{plant}: recorded as {ERROR_MARKER} ({error})");
                [ERROR_MARKER.to_string(), plant.display_label().to_string(), plant.address().to_string()]
            }
        };
        self.writer.write_record(&row).map_err(csv_error)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dated_filename_matches_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(dated_filename(date), "2024-03-09.csv");
    }
}
