// plant.rs
use serde::{Deserialize, Serialize};

use crate::FleetError;
use std::fmt;

/// Descriptor inmutable de un objetivo del lote: una planta remota.
///
/// La dirección (`address`) identifica la planta dentro del lote; la etiqueta
/// (`label`) es el nombre amigable que aparece en los artefactos cuando la
/// operación no llega a resolver datos de la planta.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Plant {
    address: String,
    label: Option<String>,
}

impl Plant {
    /// Crea un descriptor de planta validando que la dirección no esté vacía.
    ///
    /// # Errores
    /// Retorna `FleetError::Internal` si la dirección es vacía o sólo espacios.
    pub fn new(address: impl Into<String>, label: Option<String>) -> Result<Self, FleetError> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(FleetError::Internal("plant address must not be empty".to_string()));
        }
        let label = label.filter(|l| !l.trim().is_empty());
        Ok(Plant { address, label })
    }

    pub fn address(&self) -> &str { &self.address }

    pub fn label(&self) -> Option<&str> { self.label.as_deref() }

    /// Nombre a mostrar en artefactos: la etiqueta si existe, la dirección si no.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.address)
    }
}

impl fmt::Display for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{} ({})", label, self.address),
            None => write!(f, "{}", self.address),
        }
    }
}
