//! Binario fleetdk: diagnóstico y soporte sobre la flota de plantas.
//!
//! Comandos:
//!   version-check   releva la versión instalada por planta y deja un CSV fechado
//!   clear-cache     borra la cache de servicios de una planta concreta
//!   query-local     corre un SQL en la base local de cada planta (CSV por planta)
//!   query-rds       corre un SQL por esquema en el histórico central
//!   combinar        une los CSV de un directorio en un solo archivo
//!
//! Los fallos por planta quedan asentados en los artefactos y el proceso
//! termina igual con 0; se reservan 2 para error de uso, 4 para problemas
//! de configuración o nómina y 5 para fallas de infraestructura.

use std::time::Duration;

use fleet_artifacts::{combine_csv_dir, LocalQueryFileSink, RemoteQueryFileSink, VersionCsvSink};
use fleet_connectors::{LocalSqlConnector, RemoteSqlConnector, WebSessionConnector};
use fleet_core::{BatchRunner, BatchSummary};
use fleet_domain::Plant;
use fleetdk::config;
use fleetdk::roster::{load_roster, DEFAULT_RDS_ROSTER, DEFAULT_ROSTER};

fn print_usage() {
    eprintln!("Uso: fleetdk <comando> [opciones]");
    eprintln!("  version-check [--roster <archivo>] [--out <dir>] [--workers <N>] [--timeout <SEGS>]");
    eprintln!("  clear-cache --planta <IP>");
    eprintln!("  query-local --query <SQL> [--roster <archivo>] [--out <dir>] [--workers <N>] [--timeout <SEGS>]");
    eprintln!("  query-rds --query <SQL> [--roster <archivo>] [--out <dir>] [--workers <N>] [--timeout <SEGS>]");
    eprintln!("  combinar --dir <directorio>");
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    config::init_dotenv();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(2);
    }

    match args[1].as_str() {
        "version-check" => run_version_check(&args[2..]).await,
        "clear-cache" => run_clear_cache(&args[2..]).await,
        "query-local" => run_query_local(&args[2..]).await,
        "query-rds" => run_query_rds(&args[2..]).await,
        "combinar" => run_combine(&args[2..]),
        other => {
            eprintln!("[fleetdk] comando desconocido: {other}");
            print_usage();
            std::process::exit(2);
        }
    }
}

/// Flags comunes a los comandos de lote.
#[derive(Debug)]
struct BatchArgs {
    roster_path: String,
    out_dir: Option<String>,
    query: Option<String>,
    workers: Option<usize>,
    timeout_secs: Option<u64>,
}

fn parse_batch_args(args: &[String], default_roster: &str) -> Result<BatchArgs, String> {
    let mut parsed = BatchArgs {
        roster_path: default_roster.to_string(),
        out_dir: None,
        query: None,
        workers: None,
        timeout_secs: None,
    };
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--roster" => {
                i += 1;
                if i < args.len() {
                    parsed.roster_path = args[i].clone();
                }
            }
            "--out" => {
                i += 1;
                if i < args.len() {
                    parsed.out_dir = Some(args[i].clone());
                }
            }
            "--query" => {
                i += 1;
                if i < args.len() {
                    parsed.query = Some(args[i].clone());
                }
            }
            "--workers" => {
                i += 1;
                if i < args.len() {
                    let raw = &args[i];
                    parsed.workers =
                        Some(raw.parse()
                                .map_err(|_| format!("--workers espera un número, llegó {raw}"))?);
                }
            }
            "--timeout" => {
                i += 1;
                if i < args.len() {
                    let raw = &args[i];
                    parsed.timeout_secs =
                        Some(raw.parse()
                                .map_err(|_| format!("--timeout espera segundos, llegó {raw}"))?);
                }
            }
            _ => {}
        }
        i += 1;
    }
    Ok(parsed)
}

fn batch_args_or_exit(command: &str, args: &[String], default_roster: &str) -> BatchArgs {
    match parse_batch_args(args, default_roster) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("[fleetdk {command}] {e}");
            print_usage();
            std::process::exit(2);
        }
    }
}

fn load_roster_or_exit(command: &str, path: &str) -> Vec<Plant> {
    match load_roster(path) {
        Ok(plants) => plants,
        Err(e) => {
            eprintln!("[fleetdk {command}] nómina: {e}");
            std::process::exit(4);
        }
    }
}

fn runner_or_exit(command: &str, parsed: &BatchArgs) -> BatchRunner {
    let settings = match config::runner_settings() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[fleetdk {command}] configuración: {e}");
            std::process::exit(4);
        }
    };
    let pool = parsed.workers.unwrap_or(settings.pool_size);
    let timeout = parsed.timeout_secs
                        .map(Duration::from_secs)
                        .unwrap_or(settings.op_timeout);
    BatchRunner::new().with_pool_size(pool).with_op_timeout(timeout)
}

fn print_summary(summary: &BatchSummary) {
    println!("  plantas: {}  ok: {}  con error: {}  en {:?}",
             summary.total, summary.succeeded, summary.failed, summary.elapsed);
}

async fn run_version_check(args: &[String]) {
    let parsed = batch_args_or_exit("version-check", args, DEFAULT_ROSTER);
    let credentials = match config::web_credentials() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[fleetdk version-check] configuración: {e}");
            std::process::exit(4);
        }
    };
    let plants = load_roster_or_exit("version-check", &parsed.roster_path);
    let runner = runner_or_exit("version-check", &parsed);
    let out = parsed.out_dir.as_deref().unwrap_or(".");
    let mut sink = match VersionCsvSink::create(out) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[fleetdk version-check] artefacto: {e}");
            std::process::exit(5);
        }
    };

    let connector = WebSessionConnector::new(credentials);
    let outcome = runner.run_batch(plants,
                                   move |plant| {
                                       let connector = connector.clone();
                                       async move { connector.check_version(&plant).await }
                                   },
                                   &mut sink)
                        .await;
    let summary = match outcome {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[fleetdk version-check] lote: {e}");
            std::process::exit(5);
        }
    };
    println!("Archivo generado: {}", sink.path().display());
    print_summary(&summary);
}

async fn run_clear_cache(args: &[String]) {
    let mut target: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--planta" => {
                i += 1;
                if i < args.len() {
                    target = Some(args[i].clone());
                }
            }
            _ => {}
        }
        i += 1;
    }
    let address = match target {
        Some(a) => a,
        None => {
            eprintln!("Uso: fleetdk clear-cache --planta <IP>");
            std::process::exit(2);
        }
    };
    let plant = match Plant::new(address, None) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("[fleetdk clear-cache] {e}");
            std::process::exit(2);
        }
    };
    let credentials = match config::web_credentials() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[fleetdk clear-cache] configuración: {e}");
            std::process::exit(4);
        }
    };
    let connector = WebSessionConnector::new(credentials);
    match connector.clear_cache(&plant).await {
        Ok(()) => println!("Borrado de cache listo"),
        Err(e) => {
            eprintln!("[fleetdk clear-cache] {}: {e}", plant.display_label());
            std::process::exit(4);
        }
    }
}

async fn run_query_local(args: &[String]) {
    let parsed = batch_args_or_exit("query-local", args, DEFAULT_ROSTER);
    let sql = match parsed.query.clone() {
        Some(q) => q,
        None => {
            eprintln!("Uso: fleetdk query-local --query <SQL> [--roster <archivo>] [--out <dir>] [--workers <N>] [--timeout <SEGS>]");
            std::process::exit(2);
        }
    };
    let access = match config::local_db_access() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("[fleetdk query-local] configuración: {e}");
            std::process::exit(4);
        }
    };
    let plants = load_roster_or_exit("query-local", &parsed.roster_path);
    let runner = runner_or_exit("query-local", &parsed);
    let out = parsed.out_dir.clone().unwrap_or_else(|| "Local".to_string());
    let mut sink = match LocalQueryFileSink::create(out.as_str()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[fleetdk query-local] artefacto: {e}");
            std::process::exit(5);
        }
    };

    let connector = LocalSqlConnector::new(access);
    let outcome = runner.run_batch(plants,
                                   move |plant| {
                                       let connector = connector.clone();
                                       let sql = sql.clone();
                                       async move { connector.run_query(&plant, &sql).await }
                                   },
                                   &mut sink)
                        .await;
    let summary = match outcome {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[fleetdk query-local] lote: {e}");
            std::process::exit(5);
        }
    };
    println!("Archivo generado: un CSV por planta bajo {out}/");
    print_summary(&summary);
}

async fn run_query_rds(args: &[String]) {
    let parsed = batch_args_or_exit("query-rds", args, DEFAULT_RDS_ROSTER);
    let sql = match parsed.query.clone() {
        Some(q) => q,
        None => {
            eprintln!("Uso: fleetdk query-rds --query <SQL> [--roster <archivo>] [--out <dir>] [--workers <N>] [--timeout <SEGS>]");
            std::process::exit(2);
        }
    };
    let access = match config::remote_db_access() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("[fleetdk query-rds] configuración: {e}");
            std::process::exit(4);
        }
    };
    let plants = load_roster_or_exit("query-rds", &parsed.roster_path);
    let runner = runner_or_exit("query-rds", &parsed);
    let out = parsed.out_dir.clone().unwrap_or_else(|| "Historico".to_string());
    let mut sink = match RemoteQueryFileSink::create(out.as_str()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[fleetdk query-rds] artefacto: {e}");
            std::process::exit(5);
        }
    };

    let connector = RemoteSqlConnector::new(access);
    let outcome = runner.run_batch(plants,
                                   move |plant| {
                                       let connector = connector.clone();
                                       let sql = sql.clone();
                                       async move { connector.run_query(&plant, &sql).await }
                                   },
                                   &mut sink)
                        .await;
    let summary = match outcome {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[fleetdk query-rds] lote: {e}");
            std::process::exit(5);
        }
    };
    println!("Archivo generado: un CSV por esquema bajo {out}/");
    print_summary(&summary);
}

fn run_combine(args: &[String]) {
    let mut dir: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--dir" => {
                i += 1;
                if i < args.len() {
                    dir = Some(args[i].clone());
                }
            }
            _ => {}
        }
        i += 1;
    }
    let dir = match dir {
        Some(d) => d,
        None => {
            eprintln!("Uso: fleetdk combinar --dir <directorio>");
            std::process::exit(2);
        }
    };
    match combine_csv_dir(&dir) {
        Ok(path) => println!("Archivo generado: {}", path.display()),
        Err(e) => {
            eprintln!("[fleetdk combinar] {e}");
            std::process::exit(4);
        }
    }
}
