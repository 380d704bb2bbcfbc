//! Consultas a la base histórica central (Postgres), un esquema por planta.

use fleet_domain::{FleetError, Plant, QueryTable, RemoteDbAccess};
use log::debug;
use tokio_postgres::{Config as PgConfig, NoTls, SimpleQueryMessage};

/// Conector a la base histórica compartida.
///
/// Todas las plantas viven en el mismo servidor Postgres, cada una bajo su
/// propio esquema. El SQL del usuario se ejecuta tal cual, con el
/// `search_path` de la sesión apuntando al esquema de la planta.
#[derive(Debug, Clone)]
pub struct RemoteSqlConnector {
    access: RemoteDbAccess,
}

impl RemoteSqlConnector {
    pub fn new(access: RemoteDbAccess) -> Self {
        RemoteSqlConnector { access }
    }

    /// Antepone el `SET search_path` del esquema al SQL del usuario.
    pub fn compose_scoped_query(schema: &str, sql: &str) -> String {
        format!("SET search_path TO {schema}; {sql}")
    }

    /// Ejecuta `sql` dentro del esquema de la planta indicada.
    ///
    /// Usa el protocolo simple, que admite varias sentencias en un solo
    /// viaje; si el SQL produce más de un result set gana el último. Una
    /// consulta sin filas conserva sus cabeceras.
    pub async fn run_query(&self, plant: &Plant, sql: &str) -> Result<QueryTable, FleetError> {
        let mut config = PgConfig::new();
        config.host(self.access.host())
              .port(self.access.port())
              .user(self.access.credentials().user())
              .password(self.access.credentials().password())
              .dbname(self.access.dbname());

        let (client, connection) = config.connect(NoTls)
                                         .await
                                         .map_err(|e| FleetError::Connect(e.to_string()))?;
        // El driver corre aparte; termina solo cuando el cliente se suelta.
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                debug!("postgres connection closed: {e}");
            }
        });

        let scoped = Self::compose_scoped_query(plant.address(), sql);
        let messages = client.simple_query(&scoped)
                             .await
                             .map_err(|e| FleetError::Query(e.to_string()))?;
        Ok(table_from_messages(messages))
    }
}

fn table_from_messages(messages: Vec<SimpleQueryMessage>) -> QueryTable {
    let mut columns: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for message in messages {
        match message {
            SimpleQueryMessage::RowDescription(description) => {
                // Cada result set nuevo reemplaza al anterior.
                columns = description.iter().map(|c| c.name().to_string()).collect();
                rows.clear();
            }
            SimpleQueryMessage::Row(row) => {
                if columns.is_empty() {
                    columns = row.columns().iter().map(|c| c.name().to_string()).collect();
                }
                rows.push((0..row.len()).map(|i| row.get(i).map(str::to_string).unwrap_or_default())
                                        .collect());
            }
            SimpleQueryMessage::CommandComplete(_) => {}
            _ => {}
        }
    }
    QueryTable::new(columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_query_prefixes_search_path() {
        let scoped = RemoteSqlConnector::compose_scoped_query("planta_norte", "SELECT * FROM lecturas");
        assert_eq!(scoped, "SET search_path TO planta_norte; SELECT * FROM lecturas");
    }

    #[test]
    fn scoped_query_keeps_multi_statement_sql_intact() {
        let scoped = RemoteSqlConnector::compose_scoped_query("p1", "SELECT 1; SELECT 2");
        assert_eq!(scoped, "SET search_path TO p1; SELECT 1; SELECT 2");
    }
}
