//! fleetdk: utilitario de soporte para la flota de plantas.
//!
//! Este crate raíz aporta lo que rodea al motor de lotes:
//! - `config` lee credenciales y parámetros desde variables de entorno.
//! - `roster` carga las nóminas de plantas en YAML.
//!
//! El binario `fleetdk` (src/main.rs) arma los comandos sobre estas piezas
//! y sobre los crates del workspace.

pub mod config;
pub mod roster;
