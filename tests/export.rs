use simplitrac::domain::{DomainError, FormSchema, RowRenderer, Tag};
use simplitrac::infrastructure::{BuildConfig, ExportPipeline, SchemaRepository};
use std::fs;
use tempfile::tempdir;

#[test]
fn export_writes_artifacts_under_base_path() {
    let dir = tempdir().unwrap();
    let config = BuildConfig::from_toml(
        r#"
        base = "simplitrac/frontend_changed/"
        plugins = ["html", "csv"]
        "#,
    )
    .unwrap();

    let written = ExportPipeline::from_config(&config)
        .run(&FormSchema::default(), dir.path())
        .unwrap();

    let target = dir.path().join("simplitrac").join("frontend_changed");
    assert_eq!(written, vec![target.join("index.html"), target.join("form.csv")]);

    let html = fs::read_to_string(&written[0]).unwrap();
    assert!(html.contains(r#"<base href="simplitrac/frontend_changed/">"#));
    assert!(html.contains(r#"<td>Category</td>"#));
    assert!(html.contains(r#"placeholder="Input 6""#));

    let csv = fs::read_to_string(&written[1]).unwrap();
    assert_eq!(csv.lines().count(), 7);
}

#[test]
fn export_from_schema_file() {
    let dir = tempdir().unwrap();
    let schema_path = dir.path().join("labels.json");
    fs::write(&schema_path, r#"["Date", "Retailer & Co", "Cost"]"#).unwrap();

    let schema = SchemaRepository::load_schema(&schema_path).unwrap();
    let out = dir.path().join("dist");
    let written = ExportPipeline::from_config(&BuildConfig::default())
        .run(&schema, &out)
        .unwrap();

    assert_eq!(written, vec![out.join("index.html")]);
    let html = fs::read_to_string(&written[0]).unwrap();
    assert!(html.contains("<td>Retailer &amp; Co</td>"));
    assert!(html.contains(r#"placeholder="Input 3""#));
    assert!(!html.contains("Input 4"));
}

#[test]
fn export_empty_schema_writes_empty_table() {
    let dir = tempdir().unwrap();
    let written = ExportPipeline::from_config(&BuildConfig::default())
        .run(&FormSchema::new(Vec::<String>::new()), dir.path())
        .unwrap();

    let html = fs::read_to_string(&written[0]).unwrap();
    assert!(html.contains(r#"<table border="1"><tbody></tbody></table>"#));
}

#[test]
fn invalid_schema_file_is_rejected() {
    let dir = tempdir().unwrap();
    let schema_path = dir.path().join("labels.json");
    fs::write(&schema_path, r#"["Date", null]"#).unwrap();

    let result = SchemaRepository::load_schema(&schema_path);
    assert!(matches!(result, Err(DomainError::InvalidSchema(_))));
}

#[test]
fn rendered_table_matches_rows() {
    let schema = FormSchema::default();
    let rows = RowRenderer::render(&schema);
    let table = RowRenderer::render_table(&schema);

    let rendered: Vec<String> = table
        .find_all(Tag::Tr)
        .iter()
        .map(|tr| tr.find_all(Tag::Td)[0].text_content())
        .collect();
    let labels: Vec<String> = rows.into_iter().map(|r| r.label).collect();
    assert_eq!(rendered, labels);
}
