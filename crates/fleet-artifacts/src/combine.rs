//! Combinación de artefactos CSV en un solo archivo.

use crate::csv_error;
use csv::{Reader, Writer};
use fleet_core::sink::SinkError;
use log::info;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const SOURCE_COLUMN: &str = "archivo";

/// Combina los `*.csv` de `dir` en un `Archivo_<dir>_combinado.csv` junto
/// al directorio.
///
/// Cada fila sale precedida por una columna `archivo` con el nombre (sin
/// extensión) del CSV de origen. Las cabeceras de todos los archivos se
/// unen preservando el orden de primera aparición y las celdas ausentes
/// quedan vacías. Los archivos se procesan en orden alfabético para que la
/// salida sea estable entre corridas.
///
/// # Errores
/// Retorna error si el directorio no tiene ningún `.csv` o si alguno de los
/// archivos no se puede leer.
pub fn combine_csv_dir(dir: impl AsRef<Path>) -> Result<PathBuf, SinkError> {
    let dir = dir.as_ref();
    let label = dir.file_name()
                   .map(|name| name.to_string_lossy().into_owned())
                   .ok_or_else(|| SinkError::Io(format!("cannot derive a name from {}", dir.display())))?;

    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "csv").unwrap_or(false))
        .collect();
    entries.sort();
    if entries.is_empty() {
        return Err(SinkError::Io(format!("no csv files to combine in {}", dir.display())));
    }

    let mut columns: Vec<String> = vec![SOURCE_COLUMN.to_string()];
    let mut rows: Vec<HashMap<String, String>> = Vec::new();
    for path in &entries {
        let stem = path.file_stem()
                       .map(|name| name.to_string_lossy().into_owned())
                       .unwrap_or_default();
        let mut reader = Reader::from_path(path).map_err(csv_error)?;
        let file_columns: Vec<String> = reader.headers()
                                              .map_err(csv_error)?
                                              .iter()
                                              .map(str::to_string)
                                              .collect();
        for column in &file_columns {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            let mut row: HashMap<String, String> = HashMap::with_capacity(file_columns.len() + 1);
            for (column, value) in file_columns.iter().zip(record.iter()) {
                row.insert(column.clone(), value.to_string());
            }
            // La columna de origen manda sobre cualquier homónima del archivo.
            row.insert(SOURCE_COLUMN.to_string(), stem.clone());
            rows.push(row);
        }
    }

    let output = dir.parent()
                    .unwrap_or_else(|| Path::new("."))
                    .join(format!("Archivo_{label}_combinado.csv"));
    let mut writer = Writer::from_path(&output).map_err(csv_error)?;
    writer.write_record(&columns).map_err(csv_error)?;
    for row in &rows {
        let record: Vec<&str> = columns.iter()
                                       .map(|column| row.get(column).map(String::as_str).unwrap_or(""))
                                       .collect();
        writer.write_record(&record).map_err(csv_error)?;
    }
    writer.flush()?;

    info!("combined {} files from {} into {}", entries.len(), dir.display(), output.display());
    Ok(output)
}
