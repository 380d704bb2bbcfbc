//! Extracción de datos de la página de configuración de fábrica.
//!
//! La página privada de la planta presenta el nombre del sitio y la versión
//! instalada como etiquetas `<b>` con formato `Etiqueta: valor`. Se parsea
//! el HTML en lugar de recortar por offsets fijos, de modo que cambios de
//! espaciado o de atributos en las etiquetas no rompan la lectura.

use fleet_domain::{FleetError, VersionReport};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static BOLD_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("b").expect("selector <b> válido"));

/// Extrae versión y nombre de sitio del HTML de `configuracionfabrica`.
///
/// El segundo `<b>` de la página lleva el nombre del sitio y el tercero la
/// versión instalada; en ambos el valor va después del primer `:`. Una
/// página sin esa estructura (por ejemplo el formulario de login, cuando la
/// sesión no quedó autenticada) produce `FleetError::Call`.
pub fn extract_version_report(html: &str) -> Result<VersionReport, FleetError> {
    let document = Html::parse_document(html);
    let bolds: Vec<String> = document.select(&BOLD_SELECTOR)
                                     .map(|element| element.text().collect::<String>())
                                     .collect();
    if bolds.len() < 3 {
        return Err(FleetError::Call(format!("factory config page has {} <b> markers, expected at least 3",
                                            bolds.len())));
    }
    Ok(VersionReport { version: value_after_label(&bolds[2]),
                       site: value_after_label(&bolds[1]) })
}

fn value_after_label(text: &str) -> String {
    match text.split_once(':') {
        Some((_, value)) => value.trim().to_string(),
        None => text.trim().to_string(),
    }
}
