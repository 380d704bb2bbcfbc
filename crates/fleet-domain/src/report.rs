// report.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Datos que el chequeo de versión obtiene de la página de configuración
/// de una planta: la versión instalada y el nombre de sitio que la propia
/// aplicación declara.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionReport {
    pub version: String,
    pub site: String,
}

impl fmt::Display for VersionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.version, self.site)
    }
}
