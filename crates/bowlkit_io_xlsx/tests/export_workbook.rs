use std::io::Cursor;

use bowlkit_io_xlsx::{
    DirectoryDelivery, EnumCellValue, MemoryDelivery, SpecExportOptions, SpecExportRequest,
    SpecRecord, XlsxExporter, derive_records_from_json_str, export_records,
};
use calamine::{Data, Range, Reader, Xlsx, open_workbook, open_workbook_from_rs};
use chrono::NaiveDate;

fn read_workbook(v_bytes: &[u8]) -> (Vec<String>, Range<Data>) {
    let mut workbook: Xlsx<_> =
        open_workbook_from_rs(Cursor::new(v_bytes.to_vec())).expect("open xlsx bytes");
    let l_names = workbook.sheet_names();
    let range = workbook.worksheet_range(&l_names[0]).expect("sheet range");
    (l_names, range)
}

fn export_to_memory(request: SpecExportRequest) -> Vec<u8> {
    let mut delivery = MemoryDelivery::new();
    export_records(request, &SpecExportOptions::default(), &mut delivery)
        .expect("export")
        .expect("report");
    let mut l_payloads = delivery.into_payloads();
    assert_eq!(l_payloads.len(), 1);
    l_payloads.remove(0).bytes
}

fn is_blank(range: &Range<Data>, pos: (u32, u32)) -> bool {
    matches!(range.get_value(pos), None | Some(Data::Empty))
}

#[test]
fn exports_bowler_averages_with_numeric_cells() {
    let records = vec![
        SpecRecord::new().with("name", "Ana").with("avg", 185.456),
        SpecRecord::new().with("name", "Luis").with("avg", 190.2),
    ];

    let v_bytes = export_to_memory(SpecExportRequest::new(records, "promedios"));
    let (l_names, range) = read_workbook(&v_bytes);

    assert_eq!(l_names, vec!["Resultados".to_string()]);
    assert_eq!(range.get_value((0, 0)), Some(&Data::String("name".into())));
    assert_eq!(range.get_value((0, 1)), Some(&Data::String("avg".into())));
    assert_eq!(range.get_value((1, 0)), Some(&Data::String("Ana".into())));
    assert_eq!(range.get_value((1, 1)), Some(&Data::Float(185.46)));
    assert_eq!(range.get_value((2, 0)), Some(&Data::String("Luis".into())));
    assert_eq!(range.get_value((2, 1)), Some(&Data::Float(190.2)));
    assert_eq!(range.end(), Some((2, 1)));
}

#[test]
fn places_metadata_above_one_blank_row_and_header() {
    let records = vec![
        SpecRecord::new().with("equipo", "Pinos").with("puntos", 1520.0),
        SpecRecord::new().with("equipo", "Rayo"),
    ];
    let request = SpecExportRequest::new(records, "equipos").with_meta_data(vec![
        vec!["Reporte de equipos".into()],
        vec!["Sucursal".into(), "Centro".into()],
    ]);

    let (_, range) = read_workbook(&export_to_memory(request));

    assert_eq!(
        range.get_value((0, 0)),
        Some(&Data::String("Reporte de equipos".into()))
    );
    assert_eq!(range.get_value((1, 1)), Some(&Data::String("Centro".into())));
    assert!(is_blank(&range, (2, 0)));
    assert!(is_blank(&range, (2, 1)));
    assert_eq!(range.get_value((3, 0)), Some(&Data::String("equipo".into())));
    assert_eq!(range.get_value((3, 1)), Some(&Data::String("puntos".into())));
    assert_eq!(range.get_value((4, 1)), Some(&Data::Float(1520.0)));
    assert_eq!(range.get_value((5, 0)), Some(&Data::String("Rayo".into())));
    assert!(is_blank(&range, (5, 1)));
}

#[test]
fn keeps_text_boolean_and_date_types() {
    let dt = NaiveDate::from_ymd_opt(2026, 10, 14)
        .and_then(|d| d.and_hms_opt(18, 0, 0))
        .expect("valid date");
    let records = vec![
        SpecRecord::new()
            .with("codigo", "3.14159")
            .with("activo", true)
            .with("fecha", dt),
    ];

    let (_, range) = read_workbook(&export_to_memory(SpecExportRequest::new(records, "tipos")));

    assert_eq!(range.get_value((1, 0)), Some(&Data::String("3.14159".into())));
    assert_eq!(range.get_value((1, 1)), Some(&Data::Bool(true)));
    assert!(matches!(
        range.get_value((1, 2)),
        Some(Data::DateTime(_)) | Some(Data::DateTimeIso(_))
    ));
}

#[test]
fn explicit_headers_drive_column_order() {
    let records = vec![SpecRecord::new().with("a", 1.0).with("b", 2.0)];
    let request = SpecExportRequest::new(records, "orden").with_headers(["b", "c"]);

    let (_, range) = read_workbook(&export_to_memory(request));

    assert_eq!(range.get_value((0, 0)), Some(&Data::String("b".into())));
    assert_eq!(range.get_value((0, 1)), Some(&Data::String("c".into())));
    assert_eq!(range.get_value((1, 0)), Some(&Data::Float(2.0)));
    assert!(is_blank(&range, (1, 1)));
}

#[test]
fn json_records_export_to_directory() {
    let records = derive_records_from_json_str(
        r#"[
            {"categoria": "Juvenil", "sucursal": "Sucursal Central", "promedio": 171.333},
            {"categoria": "Master", "jugadores": 14}
        ]"#,
    )
    .expect("json records");
    let tmp = tempfile::tempdir().expect("tempdir");
    let mut exporter = XlsxExporter::with_delivery(DirectoryDelivery::new(tmp.path()));

    let report = exporter
        .export(SpecExportRequest::new(records, "categorias"))
        .expect("export")
        .expect("report");

    assert_eq!(
        report.columns,
        vec!["categoria", "sucursal", "promedio", "jugadores"]
    );
    assert_eq!(report.widths, vec![11, 18, 10, 11]);

    let mut workbook: Xlsx<_> =
        open_workbook(tmp.path().join("categorias.xlsx")).expect("open delivered file");
    let range = workbook.worksheet_range("Resultados").expect("sheet range");
    assert_eq!(range.get_value((1, 2)), Some(&Data::Float(171.33)));
    assert_eq!(range.get_value((2, 3)), Some(&Data::Float(14.0)));
    assert!(is_blank(&range, (2, 1)));
}

#[test]
fn empty_records_deliver_nothing() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mut exporter = XlsxExporter::with_delivery(DirectoryDelivery::new(tmp.path()));

    let report = exporter
        .export(SpecExportRequest::new(Vec::new(), "vacio"))
        .expect("no-op");

    assert!(report.is_none());
    assert!(!tmp.path().join("vacio.xlsx").exists());
}

#[test]
fn custom_sheet_name_is_sanitized() {
    let options = SpecExportOptions {
        sheet_name: "Torneo 2026/Final".to_string(),
        ..Default::default()
    };
    let mut delivery = MemoryDelivery::new();
    let records = vec![SpecRecord::from_iter([("x", EnumCellValue::Number(1.0))])];

    let report = export_records(SpecExportRequest::new(records, "final"), &options, &mut delivery)
        .expect("export")
        .expect("report");

    assert_eq!(report.sheet_name, "Torneo 2026_Final");
    let (l_names, _) = read_workbook(&delivery.payloads()[0].bytes);
    assert_eq!(l_names, vec!["Torneo 2026_Final".to_string()]);
}
