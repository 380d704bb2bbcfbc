// credentials.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Credenciales para el login web de la aplicación de planta.
///
/// `Debug` redacta la contraseña para que nunca termine en logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebCredentials {
    username: String,
    password: String,
}

impl WebCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        WebCredentials { username: username.into(), password: password.into() }
    }

    pub fn username(&self) -> &str { &self.username }

    pub fn password(&self) -> &str { &self.password }
}

impl fmt::Debug for WebCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Par usuario/contraseña para una base de datos.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlCredentials {
    user: String,
    password: String,
}

impl SqlCredentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        SqlCredentials { user: user.into(), password: password.into() }
    }

    pub fn user(&self) -> &str { &self.user }

    pub fn password(&self) -> &str { &self.password }
}

impl fmt::Debug for SqlCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlCredentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Acceso a la base MySQL local de cada planta.
///
/// Incluye dos juegos de credenciales: el primario y el de respaldo que se
/// intenta una única vez cuando el primario es rechazado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalDbAccess {
    primary: SqlCredentials,
    fallback: SqlCredentials,
    port: u16,
    database: String,
}

impl LocalDbAccess {
    pub fn new(
        primary: SqlCredentials,
        fallback: SqlCredentials,
        port: u16,
        database: impl Into<String>,
    ) -> Self {
        LocalDbAccess { primary, fallback, port, database: database.into() }
    }

    pub fn primary(&self) -> &SqlCredentials { &self.primary }

    pub fn fallback(&self) -> &SqlCredentials { &self.fallback }

    pub fn port(&self) -> u16 { self.port }

    pub fn database(&self) -> &str { &self.database }
}

/// Acceso a la base Postgres central compartida por todas las plantas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteDbAccess {
    host: String,
    port: u16,
    dbname: String,
    credentials: SqlCredentials,
}

impl RemoteDbAccess {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        dbname: impl Into<String>,
        credentials: SqlCredentials,
    ) -> Self {
        RemoteDbAccess { host: host.into(), port, dbname: dbname.into(), credentials }
    }

    pub fn host(&self) -> &str { &self.host }

    pub fn port(&self) -> u16 { self.port }

    pub fn dbname(&self) -> &str { &self.dbname }

    pub fn credentials(&self) -> &SqlCredentials { &self.credentials }
}
