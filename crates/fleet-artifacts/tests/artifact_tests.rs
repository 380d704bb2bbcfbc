use fleet_artifacts::{combine_csv_dir, LocalQueryFileSink, RemoteQueryFileSink, VersionCsvSink};
use fleet_core::sink::OutcomeSink;
use fleet_domain::{FleetError, Outcome, Plant, QueryTable, VersionReport};
use std::fs;
use std::path::Path;

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    let mut rows = vec![header];
    for record in reader.records() {
        rows.push(record.unwrap().iter().map(str::to_string).collect());
    }
    rows
}

fn plant(address: &str, label: Option<&str>) -> Plant {
    Plant::new(address, label.map(str::to_string)).unwrap()
}

#[test]
fn version_sink_writes_header_success_and_error_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrida.csv");
    let mut sink = VersionCsvSink::create_at(&path).unwrap();

    let report = VersionReport { version: "4.2.1".to_string(), site: "Monterrey".to_string() };
    sink.record(&Outcome::success(plant("10.0.0.1", Some("norte")), report)).unwrap();
    sink.record(&Outcome::failure(plant("10.0.0.2", Some("sur")),
                                  FleetError::Connect("refused".to_string())))
        .unwrap();

    let rows = read_rows(&path);
    assert_eq!(rows[0], ["version", "planta", "ip"]);
    // On success the site name comes from the page, not from the roster label
    assert_eq!(rows[1], ["4.2.1", "Monterrey", "10.0.0.1"]);
    assert_eq!(rows[2], ["ERROR", "sur", "10.0.0.2"]);
}

#[test]
fn version_sink_failure_without_label_falls_back_to_address() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrida.csv");
    let mut sink = VersionCsvSink::create_at(&path).unwrap();

    sink.record(&Outcome::<VersionReport>::failure(plant("10.0.0.9", None),
                                                   FleetError::Timeout(30)))
        .unwrap();

    let rows = read_rows(&path);
    assert_eq!(rows[1], ["ERROR", "10.0.0.9", "10.0.0.9"]);
}

#[test]
fn recreating_the_version_sink_truncates_previous_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("2024-03-09.csv");

    let report = VersionReport { version: "1.0".to_string(), site: "A".to_string() };
    {
        let mut sink = VersionCsvSink::create_at(&path).unwrap();
        sink.record(&Outcome::success(plant("10.0.0.1", None), report.clone())).unwrap();
        sink.record(&Outcome::success(plant("10.0.0.2", None), report.clone())).unwrap();
    }
    {
        let mut sink = VersionCsvSink::create_at(&path).unwrap();
        sink.record(&Outcome::success(plant("10.0.0.3", None), report)).unwrap();
    }

    let rows = read_rows(&path);
    assert_eq!(rows.len(), 2, "a rerun must replace the file, not append to it");
    assert_eq!(rows[1], ["1.0", "A", "10.0.0.3"]);
}

#[test]
fn version_sink_create_places_dated_file_in_dir() {
    let dir = tempfile::tempdir().unwrap();
    let sink = VersionCsvSink::create(dir.path()).unwrap();
    assert_eq!(sink.path().parent(), Some(dir.path()));
    assert!(sink.path().extension().map(|e| e == "csv").unwrap_or(false));
}

#[test]
fn local_sink_writes_table_and_skips_failures() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("Local");
    let mut sink = LocalQueryFileSink::create(&out).unwrap();

    let table = QueryTable::new(vec!["id".to_string(), "valor".to_string()],
                                vec![vec!["1".to_string(), "a,b".to_string()]]);
    sink.record(&Outcome::success(plant("10.0.0.1", Some("norte")), table)).unwrap();
    sink.record(&Outcome::<QueryTable>::failure(plant("10.0.0.2", Some("sur")),
                                                FleetError::Query("denied".to_string())))
        .unwrap();

    let rows = read_rows(&out.join("norte.csv"));
    assert_eq!(rows[0], ["id", "valor"]);
    // Values with commas survive the round trip thanks to quoting
    assert_eq!(rows[1], ["1", "a,b"]);

    let written: Vec<String> = fs::read_dir(&out).unwrap()
                                                 .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                                                 .collect();
    assert_eq!(written, ["norte.csv"], "failures must not leave files behind");
}

#[test]
fn remote_sink_writes_error_file_with_marker() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("Historico");
    let mut sink = RemoteQueryFileSink::create(&out).unwrap();

    let table = QueryTable::new(vec!["uno".to_string()], vec![vec!["1".to_string()]]);
    sink.record(&Outcome::success(plant("planta_norte", None), table)).unwrap();
    sink.record(&Outcome::<QueryTable>::failure(plant("planta_sur", None),
                                                FleetError::Query("relation missing".to_string())))
        .unwrap();

    let ok_rows = read_rows(&out.join("planta_norte.csv"));
    assert_eq!(ok_rows[1], ["1"]);

    let err_rows = read_rows(&out.join("error_planta_sur.csv"));
    assert_eq!(err_rows[0], ["Column1", "Column2"]);
    assert_eq!(err_rows[1][0], "ERROR");
    assert!(err_rows[1][1].contains("relation missing"));
}

#[test]
fn empty_table_keeps_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("Local");
    let mut sink = LocalQueryFileSink::create(&out).unwrap();

    let table = QueryTable::empty(vec!["id".to_string(), "nombre".to_string()]);
    sink.record(&Outcome::success(plant("10.0.0.1", Some("vacia")), table)).unwrap();

    let rows = read_rows(&out.join("vacia.csv"));
    assert_eq!(rows, vec![vec!["id".to_string(), "nombre".to_string()]]);
}

#[test]
fn combine_unions_headers_and_tags_source_rows() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("Historico");
    fs::create_dir(&data_dir).unwrap();
    fs::write(data_dir.join("a.csv"), "x,y\n1,2\n").unwrap();
    fs::write(data_dir.join("b.csv"), "x,z\n3,4\n").unwrap();
    fs::write(data_dir.join("notas.txt"), "ignorar").unwrap();

    let output = combine_csv_dir(&data_dir).unwrap();
    assert_eq!(output.file_name().and_then(|n| n.to_str()),
               Some("Archivo_Historico_combinado.csv"));
    assert_eq!(output.parent(), Some(dir.path()));

    let rows = read_rows(&output);
    assert_eq!(rows[0], ["archivo", "x", "y", "z"]);
    assert_eq!(rows[1], ["a", "1", "2", ""]);
    assert_eq!(rows[2], ["b", "3", "", "4"]);
}

#[test]
fn combine_keeps_header_only_files_without_rows() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("Local");
    fs::create_dir(&data_dir).unwrap();
    fs::write(data_dir.join("vacia.csv"), "id,nombre\n").unwrap();
    fs::write(data_dir.join("llena.csv"), "id,nombre\n7,siete\n").unwrap();

    let rows = read_rows(&combine_csv_dir(&data_dir).unwrap());
    assert_eq!(rows[0], ["archivo", "id", "nombre"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1], ["llena", "7", "siete"]);
}

#[test]
fn combine_rejects_a_directory_without_csv_files() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("vacio");
    fs::create_dir(&data_dir).unwrap();
    fs::write(data_dir.join("notas.txt"), "nada").unwrap();

    assert!(combine_csv_dir(&data_dir).is_err());
}

#[test]
fn combine_output_can_be_recombined_without_self_inclusion() {
    // The combined file lands next to the directory, so a second run sees
    // exactly the same inputs
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("Local");
    fs::create_dir(&data_dir).unwrap();
    fs::write(data_dir.join("a.csv"), "x\n1\n").unwrap();

    let first = combine_csv_dir(&data_dir).unwrap();
    let first_rows = read_rows(&first);
    let second = combine_csv_dir(&data_dir).unwrap();
    assert_eq!(first, second);
    assert_eq!(read_rows(&second), first_rows);
}
