use encoding_rs::{EUC_KR, UTF_8};
use registry_dashboard::charts::{ChartSpec, DashboardCharts, SortSelection};
use registry_dashboard::data::{
    records_to_frame, DataLoader, DataSource, LoaderError, NormalizeError, Normalizer,
};
use registry_dashboard::{DashboardConfig, DashboardError, NumericField, Session};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FILE_NAME: &str = "registry.csv";

fn registry_csv(rows: &[&str]) -> String {
    let schema = DashboardConfig::default().schema();
    let mut text = schema.header().join(",");
    text.push('\n');
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text
}

fn example_rows() -> Vec<&'static str> {
    vec![
        r#"A,"1,000",400,2.50,510,490,104.1"#,
        r#"B,"2,000",900,2.22,950,"1,050",90.5"#,
    ]
}

fn write_euc_kr(dir: &Path, text: &str) -> PathBuf {
    let (bytes, _, had_errors) = EUC_KR.encode(text);
    assert!(!had_errors);
    let path = dir.join(FILE_NAME);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(&bytes).unwrap();
    path
}

fn config_for(dirs: Vec<PathBuf>) -> DashboardConfig {
    DashboardConfig {
        file_name: FILE_NAME.to_string(),
        search_dirs: dirs,
        ..Default::default()
    }
}

#[test]
fn falls_back_to_later_candidate_directory() {
    let empty = TempDir::new().unwrap();
    let with_data = TempDir::new().unwrap();
    let path = write_euc_kr(with_data.path(), &registry_csv(&example_rows()));

    let config = config_for(vec![
        empty.path().to_path_buf(),
        with_data.path().to_path_buf(),
    ]);
    let session = Session::open_default(&config).unwrap();

    assert_eq!(session.source(), &DataSource::File(path));
    assert_eq!(session.regions(), vec!["A", "B"]);
}

#[test]
fn korean_region_names_survive_decoding() {
    let dir = TempDir::new().unwrap();
    write_euc_kr(
        dir.path(),
        &registry_csv(&[
            r#"서울특별시  (1100000000),"9,321,537","4,473,862",2.08,"4,497,106","4,824,431",93.22"#,
            r#"부산광역시  (2600000000),"3,235,418","1,573,424",2.06,"1,579,207","1,656,211",95.35"#,
        ]),
    );
    let session = Session::open_default(&config_for(vec![dir.path().to_path_buf()])).unwrap();

    let seoul = session.select_region("서울특별시  (1100000000)");
    assert_eq!(seoul.len(), 1);
    assert_eq!(seoul[0].total_population(), 9_321_537.0);
    assert_eq!(seoul[0].sex_ratio(), 93.22);

    let top = session.top_n(NumericField::TotalPopulation, 1, false);
    assert_eq!(top[0].region, "서울특별시  (1100000000)");
}

#[test]
fn no_candidate_reports_all_paths() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    let config = config_for(vec![a.path().to_path_buf(), b.path().to_path_buf()]);

    match Session::open_default(&config) {
        Err(DashboardError::Load(LoaderError::SourceNotFound { attempted })) => {
            assert_eq!(
                attempted,
                vec![a.path().join(FILE_NAME), b.path().join(FILE_NAME)]
            );
        }
        other => panic!("unexpected: {:?}", other.map(|s| s.source().clone())),
    }
}

#[test]
fn invalid_bytes_are_decode_error() {
    let dir = TempDir::new().unwrap();
    let path = write_euc_kr(dir.path(), &registry_csv(&example_rows()));
    // 0xFF can never start an EUC-KR sequence
    let mut bytes = std::fs::read(&path).unwrap();
    bytes.extend_from_slice(b"\xFF\xFF,1,1,1,1,1,1\n");
    std::fs::write(&path, bytes).unwrap();

    let err = Session::open_path(&DashboardConfig::default(), &path).unwrap_err();
    assert!(matches!(
        err,
        DashboardError::Load(LoaderError::Decode { encoding: "EUC-KR", .. })
    ));
    assert!(err.to_string().contains("EUC-KR"));
}

#[test]
fn wrong_header_is_schema_error() {
    let config = DashboardConfig::default();
    let text = "지역,인구\nA,1\n";
    let (bytes, _, _) = EUC_KR.encode(text);
    let err = Session::open_upload(&config, Some(("upload.csv", &bytes[..]))).unwrap_err();
    match err {
        DashboardError::Normalize(NormalizeError::Schema { missing }) => {
            assert_eq!(missing.len(), 7);
            assert_eq!(missing[0], "행정구역");
        }
        other => panic!("unexpected: {other}"),
    }
}

#[test]
fn malformed_number_aborts_whole_load() {
    let config = DashboardConfig::default();
    let text = registry_csv(&[
        r#"A,"1,000",400,2.50,510,490,104.1"#,
        r#"B,"2,000",900,n/a,950,"1,050",90.5"#,
    ]);
    let (bytes, _, _) = EUC_KR.encode(&text);
    let err = Session::open_upload(&config, Some(("upload.csv", &bytes[..]))).unwrap_err();
    match err {
        DashboardError::Normalize(NormalizeError::MalformedNumericField {
            field, row, value, ..
        }) => {
            assert_eq!(field, "2025년09월_세대당 인구");
            assert_eq!(row, 2);
            assert_eq!(value, "n/a");
        }
        other => panic!("unexpected: {other}"),
    }
}

#[test]
fn missing_field_drops_the_row() {
    let config = DashboardConfig::default();
    let text = registry_csv(&[
        r#"A,"1,000",400,2.50,510,490,104.1"#,
        r#"B,"2,000",,2.22,950,"1,050",90.5"#,
    ]);
    let (bytes, _, _) = EUC_KR.encode(&text);
    let session = Session::open_upload(&config, Some(("upload.csv", &bytes[..]))).unwrap();
    assert_eq!(session.regions(), vec!["A"]);
    assert_eq!(session.totals().total_population, 1000.0);
}

#[test]
fn quoted_empty_field_drops_the_row() {
    let config = DashboardConfig::default();
    let text = registry_csv(&[
        r#""A","1,000","400","2.50","510","490","104.1""#,
        r#""B","2,000","","2.22","950","1,050","90.5""#,
        r#""","3,000","1","1","1","1","1""#,
    ]);
    let (bytes, _, _) = EUC_KR.encode(&text);
    let session = Session::open_upload(&config, Some(("upload.csv", &bytes[..]))).unwrap();
    assert_eq!(session.regions(), vec!["A"]);
    assert_eq!(session.totals().total_population, 1000.0);
}

#[test]
fn export_reload_round_trip() {
    let config = DashboardConfig::default();
    let text = registry_csv(&example_rows());
    let (bytes, _, _) = EUC_KR.encode(&text);
    let session = Session::open_upload(&config, Some(("upload.csv", &bytes[..]))).unwrap();

    let rows = session.sorted_by(NumericField::SexRatio, true);
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("export.csv");
    session.export_csv_file(&rows, &out).unwrap();

    // Exports are UTF-8, unlike the source
    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("행정구역,2025년09월_총인구수"));

    let reloaded = DataLoader::new(UTF_8, Vec::new()).load_path(&out).unwrap();
    let again = Normalizer::new(session.schema())
        .normalize(&reloaded.frame)
        .unwrap();

    assert_eq!(again.regions(), vec!["B", "A"]);
    for record in again.records() {
        let original = &session.select_region(&record.region)[0];
        for field in NumericField::ALL {
            assert!((record.get(field) - original.get(field)).abs() < 1e-9);
        }
    }
}

#[test]
fn normalizing_twice_is_a_no_op() {
    let config = DashboardConfig::default();
    let text = registry_csv(&example_rows());
    let (bytes, _, _) = EUC_KR.encode(&text);
    let session = Session::open_upload(&config, Some(("upload.csv", &bytes[..]))).unwrap();

    let frame = records_to_frame(session.dataset().records(), session.schema()).unwrap();
    let again = Normalizer::new(session.schema()).normalize(&frame).unwrap();
    assert_eq!(&again, session.dataset());
}

#[test]
fn dashboard_charts_follow_selection() {
    let config = DashboardConfig::default();
    let text = registry_csv(&example_rows());
    let (bytes, _, _) = EUC_KR.encode(&text);
    let session = Session::open_upload(&config, Some(("upload.csv", &bytes[..]))).unwrap();

    let sort = SortSelection {
        field: NumericField::TotalPopulation,
        ascending: false,
        n: 1,
    };
    let charts = DashboardCharts::build(&session, "A", &sort);
    assert_eq!(charts.totals.total_population, 3000.0);
    assert_eq!(charts.totals.total_households, 1300.0);

    let ChartSpec::Bar(top) = &charts.top_n else {
        panic!("top-n should be a bar chart");
    };
    assert_eq!(top.bars.len(), 1);
    assert_eq!(top.bars[0].label, "B");

    let ChartSpec::Bar(split) = &charts.sex_split else {
        panic!("sex split should be a bar chart");
    };
    assert_eq!(split.bars[0].value, 510.0);
    assert_eq!(split.bars[1].value, 490.0);

    assert_eq!(charts.sorted_table.rows.len(), 2);
    assert_eq!(charts.sorted_table.rows[0][0], "B");

    // Unknown region: empty chart, totals unchanged
    let charts = DashboardCharts::build(&session, "Z", &sort);
    assert!(charts.sex_split.is_empty());
    assert_eq!(charts.totals.total_population, 3000.0);
}
