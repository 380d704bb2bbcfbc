// table.rs
use serde::{Deserialize, Serialize};

/// Resultado tabular de una consulta SQL, ya convertido a texto plano.
///
/// Los conectores normalizan cualquier tipo de columna a `String` para que
/// los artefactos CSV no dependan del motor de base de datos de origen. Una
/// consulta sin filas conserva igualmente sus cabeceras.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl QueryTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        QueryTable { columns, rows }
    }

    /// Tabla sin filas, conservando las cabeceras de la consulta.
    pub fn empty(columns: Vec<String>) -> Self {
        QueryTable { columns, rows: Vec::new() }
    }

    pub fn columns(&self) -> &[String] { &self.columns }

    pub fn rows(&self) -> &[Vec<String>] { &self.rows }

    pub fn row_count(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}
