//! Pruebas contra servicios reales (requieren entorno configurado).
//!
//! Cada test se omite solo si su variable de entorno no está definida, así
//! la suite corre limpia en cualquier máquina y completa en las que tienen
//! acceso a una planta o a las bases.

use fleet_connectors::{LocalSqlConnector, RemoteSqlConnector, WebSessionConnector};
use fleet_domain::{LocalDbAccess, Plant, RemoteDbAccess, SqlCredentials, WebCredentials};

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[tokio::test]
async fn local_select_against_real_mysql() {
    if std::env::var("FLEET_TEST_MYSQL_HOST").is_err() {
        eprintln!("FLEET_TEST_MYSQL_HOST no definido: omitiendo test");
        return;
    }
    let host = env_or("FLEET_TEST_MYSQL_HOST", "");
    let access = LocalDbAccess::new(SqlCredentials::new(env_or("FLEET_MYSQL_USER", "root"),
                                                        env_or("FLEET_MYSQL_PASSWORD", "")),
                                    SqlCredentials::new(env_or("FLEET_MYSQL_FALLBACK_USER", "root"),
                                                        env_or("FLEET_MYSQL_FALLBACK_PASSWORD", "")),
                                    env_or("FLEET_MYSQL_PORT", "3306").parse().expect("puerto"),
                                    env_or("FLEET_MYSQL_DATABASE", "mysql"));
    let plant = Plant::new(host, Some("taller".to_string())).expect("planta");

    let connector = LocalSqlConnector::new(access);
    let table = connector.run_query(&plant, "SELECT 1 AS uno").await.expect("query");
    assert_eq!(table.columns(), ["uno".to_string()]);
    assert_eq!(table.rows(), [vec!["1".to_string()]]);
}

#[tokio::test]
async fn remote_select_against_real_postgres() {
    if std::env::var("FLEET_TEST_PG_HOST").is_err() {
        eprintln!("FLEET_TEST_PG_HOST no definido: omitiendo test");
        return;
    }
    let access = RemoteDbAccess::new(env_or("FLEET_TEST_PG_HOST", ""),
                                     env_or("FLEET_RDS_PORT", "5432").parse().expect("puerto"),
                                     env_or("FLEET_RDS_DBNAME", "postgres"),
                                     SqlCredentials::new(env_or("FLEET_RDS_USER", "postgres"),
                                                         env_or("FLEET_RDS_PASSWORD", "")));
    let schema = Plant::new(env_or("FLEET_TEST_PG_SCHEMA", "public"), None).expect("esquema");

    let connector = RemoteSqlConnector::new(access);
    let table = connector.run_query(&schema, "SELECT 1 AS uno").await.expect("query");
    assert_eq!(table.columns(), ["uno".to_string()]);
    assert_eq!(table.rows(), [vec!["1".to_string()]]);
}

#[tokio::test]
async fn version_check_against_real_plant() {
    if std::env::var("FLEET_TEST_PLANT_IP").is_err() {
        eprintln!("FLEET_TEST_PLANT_IP no definido: omitiendo test");
        return;
    }
    let credentials = WebCredentials::new(env_or("FLEET_WEB_USER", "admin"),
                                          env_or("FLEET_WEB_PASSWORD", ""));
    let plant = Plant::new(env_or("FLEET_TEST_PLANT_IP", ""), None).expect("planta");

    let connector = WebSessionConnector::new(credentials);
    let report = connector.check_version(&plant).await.expect("version");
    assert!(!report.version.is_empty());
    assert!(!report.site.is_empty());
}
