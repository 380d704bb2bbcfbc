//! Nóminas de plantas en YAML.
//!
//! El archivo agrupa entradas bajo claves arbitrarias (región, ola de
//! despliegue, lo que el operador prefiera); todas se aplanan en una sola
//! lista respetando el orden del documento. Cada entrada es
//! `[dirección, etiqueta]`, o bien una dirección sola (el caso de los
//! esquemas del histórico).

use fleet_domain::Plant;
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Nómina por defecto para operaciones contra las plantas.
pub const DEFAULT_ROSTER: &str = "plantas.yaml";
/// Nómina de esquemas para consultas al histórico central.
pub const DEFAULT_RDS_ROSTER: &str = "rds_plantas.yaml";

/// Errores al cargar una nómina.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("no se pudo leer {0}: {1}")]
    Io(String, String),
    #[error("yaml inválido: {0}")]
    Parse(String),
    #[error("entrada inválida ({0})")]
    Entry(String),
}

/// Una entrada del YAML: dirección sola o par `[dirección, etiqueta]`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RosterEntry {
    Single(String),
    Pair(Vec<String>),
}

/// Lee la nómina desde `path` y la aplana en una lista de plantas.
///
/// # Errores
/// `RosterError::Io` si el archivo no se puede leer; `Parse` o `Entry`
/// según falle el YAML o una entrada concreta.
pub fn load_roster(path: impl AsRef<Path>) -> Result<Vec<Plant>, RosterError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .map_err(|e| RosterError::Io(path.display().to_string(), e.to_string()))?;
    let plants = parse_roster(&raw)?;
    debug!("load_roster path={} plantas={}", path.display(), plants.len());
    Ok(plants)
}

/// Interpreta el YAML de una nómina. Un documento vacío es una nómina vacía.
pub fn parse_roster(yaml: &str) -> Result<Vec<Plant>, RosterError> {
    if yaml.trim().is_empty() {
        return Ok(Vec::new());
    }
    let groups: Option<IndexMap<String, Vec<RosterEntry>>> =
        serde_yaml::from_str(yaml).map_err(|e| RosterError::Parse(e.to_string()))?;
    let mut plants = Vec::new();
    for (group, entries) in groups.unwrap_or_default() {
        for entry in entries {
            plants.push(plant_from_entry(&group, entry)?);
        }
    }
    Ok(plants)
}

fn plant_from_entry(group: &str, entry: RosterEntry) -> Result<Plant, RosterError> {
    let built = match entry {
        RosterEntry::Single(address) => Plant::new(address, None),
        RosterEntry::Pair(mut parts) => match parts.len() {
            1 => Plant::new(parts.remove(0), None),
            2 => {
                let label = parts.pop();
                Plant::new(parts.remove(0), label)
            }
            n => {
                return Err(RosterError::Entry(format!(
                    "grupo {group}: se esperaba [dirección, etiqueta], llegaron {n} elementos"
                )))
            }
        },
    };
    built.map_err(|e| RosterError::Entry(format!("grupo {group}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roster_flattens_groups_in_document_order() {
        let yaml = "norte:\n  - [10.0.0.1, planta_mty]\n  - [10.0.0.2, planta_slt]\nsur:\n  - [10.0.0.3, planta_qro]\n";
        let plants = parse_roster(yaml).unwrap();
        assert_eq!(plants.len(), 3);
        assert_eq!(plants[0].address(), "10.0.0.1");
        assert_eq!(plants[0].label(), Some("planta_mty"));
        assert_eq!(plants[2].address(), "10.0.0.3");
    }

    #[test]
    fn parse_roster_accepts_bare_addresses() {
        let yaml = "esquemas:\n  - planta_mty\n  - planta_slt\n";
        let plants = parse_roster(yaml).unwrap();
        assert_eq!(plants.len(), 2);
        assert_eq!(plants[0].address(), "planta_mty");
        assert_eq!(plants[0].label(), None);
    }

    #[test]
    fn parse_roster_treats_empty_document_as_empty_roster() {
        assert!(parse_roster("").unwrap().is_empty());
        assert!(parse_roster("---\n").unwrap().is_empty());
    }

    #[test]
    fn parse_roster_rejects_oversized_entries() {
        let yaml = "norte:\n  - [10.0.0.1, planta_mty, extra]\n";
        let err = parse_roster(yaml).unwrap_err();
        assert!(err.to_string().contains("llegaron 3 elementos"), "{err}");
    }

    #[test]
    fn parse_roster_rejects_empty_addresses() {
        let yaml = "norte:\n  - [\"\", planta_mty]\n";
        assert!(parse_roster(yaml).is_err());
    }

    #[test]
    fn parse_roster_drops_blank_labels() {
        let yaml = "norte:\n  - [10.0.0.1, \"\"]\n";
        let plants = parse_roster(yaml).unwrap();
        assert_eq!(plants[0].label(), None);
    }

    #[test]
    fn load_roster_reports_missing_files() {
        let err = load_roster("definitivamente_no_existe.yaml").unwrap_err();
        assert!(matches!(err, RosterError::Io(_, _)));
    }
}
