//! Consultas a la base MySQL local de cada planta.

use crate::fallback::with_fallback;
use fleet_domain::{FleetError, LocalDbAccess, Plant, QueryTable, SqlCredentials};
use log::debug;
use mysql_async::prelude::Queryable;
use mysql_async::{Conn, Opts, OptsBuilder, Row, Value};

/// Conector MySQL con doble juego de credenciales.
///
/// Parte del parque de plantas quedó instalado con otro usuario de base de
/// datos; cuando el primario es rechazado se repite el intento completo con
/// el de respaldo antes de dar la planta por fallida.
#[derive(Debug, Clone)]
pub struct LocalSqlConnector {
    access: LocalDbAccess,
}

impl LocalSqlConnector {
    pub fn new(access: LocalDbAccess) -> Self {
        LocalSqlConnector { access }
    }

    /// Ejecuta `sql` contra la base local de la planta y devuelve el primer
    /// result set como tabla de texto.
    pub async fn run_query(&self, plant: &Plant, sql: &str) -> Result<QueryTable, FleetError> {
        let host = plant.address();
        with_fallback(|| self.query_with(host, self.access.primary(), sql),
                      || self.query_with(host, self.access.fallback(), sql)).await
    }

    async fn query_with(&self,
                        host: &str,
                        credentials: &SqlCredentials,
                        sql: &str)
                        -> Result<QueryTable, FleetError> {
        let opts: Opts = OptsBuilder::default().ip_or_hostname(host)
                                               .tcp_port(self.access.port())
                                               .user(Some(credentials.user()))
                                               .pass(Some(credentials.password()))
                                               .db_name(Some(self.access.database()))
                                               .into();
        let mut conn = Conn::new(opts).await.map_err(|e| FleetError::Connect(e.to_string()))?;

        let result = conn.query_iter(sql).await.map_err(|e| FleetError::Query(e.to_string()))?;
        let columns: Vec<String> = match result.columns() {
            Some(cols) => cols.iter().map(|c| c.name_str().into_owned()).collect(),
            None => return Err(FleetError::Query("statement produced no result set".to_string())),
        };
        let raw_rows: Vec<Row> = result.collect_and_drop()
                                       .await
                                       .map_err(|e| FleetError::Query(e.to_string()))?;
        let rows = raw_rows.iter()
                           .map(|row| {
                               (0..row.len()).map(|i| row.as_ref(i).map(value_to_text).unwrap_or_default())
                                             .collect()
                           })
                           .collect();

        if let Err(e) = conn.disconnect().await {
            debug!("mysql disconnect after query: {e}");
        }
        Ok(QueryTable::new(columns, rows))
    }
}

/// Render plano de un valor MySQL para el artefacto CSV.
///
/// Con el protocolo de texto casi todo llega como `Bytes`; las demás
/// variantes aparecen sólo con sentencias preparadas y se formatean de la
/// manera menos sorprendente posible. `NULL` queda como celda vacía.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::NULL => String::new(),
        Value::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        Value::Int(n) => n.to_string(),
        Value::UInt(n) => n.to_string(),
        Value::Float(n) => n.to_string(),
        Value::Double(n) => n.to_string(),
        Value::Date(year, month, day, 0, 0, 0, 0) => format!("{year:04}-{month:02}-{day:02}"),
        Value::Date(year, month, day, hour, minute, second, 0) => {
            format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}")
        }
        Value::Date(year, month, day, hour, minute, second, micros) => {
            format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}.{micros:06}")
        }
        Value::Time(negative, days, hours, minutes, seconds, micros) => {
            let sign = if *negative { "-" } else { "" };
            let total_hours = u32::from(*hours) + *days * 24;
            if *micros == 0 {
                format!("{sign}{total_hours:02}:{minutes:02}:{seconds:02}")
            } else {
                format!("{sign}{total_hours:02}:{minutes:02}:{seconds:02}.{micros:06}")
            }
        }
    }
}
