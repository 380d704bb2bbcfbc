//! Sesión web autenticada contra la aplicación de planta.

use crate::markup;
use fleet_domain::{FleetError, Plant, VersionReport, WebCredentials};
use log::debug;
use std::collections::HashMap;

const LOGIN_PATH: &str = "login";
const FACTORY_CONFIG_PATH: &str = "private/configuracionfabrica";
const CACHE_EVICTION_PATH: &str = "actuator/eliminacioncache";
const CSRF_COOKIE: &str = "XSRF-TOKEN";
const CSRF_FIELD: &str = "_csrf";

fn base_url(plant: &Plant) -> String {
    format!("http://{}:8080/gbconnected/", plant.address())
}

/// Conector web: abre sesiones autenticadas y ejecuta las operaciones que
/// pasan por el frontal de la planta.
///
/// Cada operación usa su propia sesión (cliente HTTP con cookie jar), igual
/// que un operador abriendo el navegador contra cada planta.
#[derive(Debug, Clone)]
pub struct WebSessionConnector {
    credentials: WebCredentials,
}

/// Sesión ya autenticada contra una planta concreta.
pub struct PlantSession {
    client: reqwest::Client,
    base_url: String,
}

impl WebSessionConnector {
    pub fn new(credentials: WebCredentials) -> Self {
        WebSessionConnector { credentials }
    }

    /// Abre una sesión autenticada contra la planta.
    ///
    /// El GET inicial entrega la cookie CSRF, que el POST de login devuelve
    /// como campo de formulario. El servidor no responde con un código de
    /// error ante credenciales malas; una sesión sin autenticar se detecta
    /// recién al pedir la página privada, que en ese caso devuelve el
    /// formulario de login.
    pub async fn open(&self, plant: &Plant) -> Result<PlantSession, FleetError> {
        let client = reqwest::Client::builder().cookie_store(true)
                                               .build()
                                               .map_err(|e| FleetError::Internal(e.to_string()))?;
        let base_url = base_url(plant);

        let first = client.get(&base_url)
                          .send()
                          .await
                          .map_err(|e| FleetError::Connect(e.to_string()))?;
        let csrf_token = first.cookies()
                              .find(|cookie| cookie.name() == CSRF_COOKIE)
                              .map(|cookie| cookie.value().to_string())
                              .ok_or_else(|| FleetError::Auth(format!("no {CSRF_COOKIE} cookie in first response")))?;
        debug!("{plant}: got csrf cookie, logging in");

        let mut form = HashMap::new();
        form.insert(CSRF_FIELD, csrf_token.as_str());
        form.insert("username", self.credentials.username());
        form.insert("password", self.credentials.password());
        client.post(format!("{base_url}{LOGIN_PATH}"))
              .form(&form)
              .send()
              .await
              .map_err(|e| FleetError::Auth(e.to_string()))?;

        Ok(PlantSession { client, base_url })
    }

    /// Abre sesión y lee versión y nombre de sitio de la página privada.
    pub async fn check_version(&self, plant: &Plant) -> Result<VersionReport, FleetError> {
        let session = self.open(plant).await?;
        session.fetch_version_report().await
    }

    /// Abre sesión y dispara el borrado de cache de la planta.
    pub async fn clear_cache(&self, plant: &Plant) -> Result<(), FleetError> {
        let session = self.open(plant).await?;
        session.evict_cache().await
    }
}

impl PlantSession {
    /// Descarga la página de configuración de fábrica y extrae el reporte.
    pub async fn fetch_version_report(&self) -> Result<VersionReport, FleetError> {
        let body = self.client
                       .get(format!("{}{FACTORY_CONFIG_PATH}", self.base_url))
                       .send()
                       .await
                       .map_err(|e| FleetError::Call(e.to_string()))?
                       .text()
                       .await
                       .map_err(|e| FleetError::Call(e.to_string()))?;
        markup::extract_version_report(&body)
    }

    /// Invoca el endpoint de borrado de cache.
    pub async fn evict_cache(&self) -> Result<(), FleetError> {
        self.client
            .get(format!("{}{CACHE_EVICTION_PATH}", self.base_url))
            .send()
            .await
            .map_err(|e| FleetError::Call(e.to_string()))?;
        Ok(())
    }
}
