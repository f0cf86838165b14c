use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_fixture(base: &Path) {
    let data = base.join("data");
    fs::create_dir_all(&data).unwrap();

    fs::write(
        data.join("gastos.json"),
        r#"[
            {"id": 1, "descripcion": "Supermercado", "monto": "100.00", "fecha": "2024-01-15T00:00:00.000Z",
             "divisa_id": 1, "tipostransaccion_id": 2, "metodopago_id": 1, "categoria_id": 1, "usuario_id": 1},
            {"id": 2, "descripcion": "Sueldo", "monto": 50, "fecha": "2024-01-20",
             "divisa_id": 1, "tipostransaccion_id": 1, "metodopago_id": 1, "categoria_id": 9, "usuario_id": 1},
            {"id": 3, "descripcion": "Ajeno", "monto": "999", "fecha": "2024-01-21",
             "divisa_id": 1, "tipostransaccion_id": 2, "metodopago_id": 1, "categoria_id": 1, "usuario_id": 2}
        ]"#,
    )
    .unwrap();
    fs::write(
        data.join("categorias.json"),
        r#"[{"id": 1, "descripcion": "Comida", "usuario_id": 1}]"#,
    )
    .unwrap();
    fs::write(
        data.join("metodosPagos.json"),
        r#"[{"id": 1, "descripcion": "Efectivo", "usuario_id": 1}]"#,
    )
    .unwrap();
    fs::write(
        data.join("tiposTransacciones.json"),
        r#"[
            {"id": 1, "descripcion": "Ingreso", "usuario_id": 1},
            {"id": 2, "descripcion": "Egreso", "usuario_id": 1}
        ]"#,
    )
    .unwrap();
    fs::write(
        data.join("divisas.json"),
        r#"[{"id": 1, "descripcion": "ARS", "usuario_id": 1}]"#,
    )
    .unwrap();
}

fn gastos(base: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gastos").unwrap();
    cmd.env("GASTOS_DATA_DIR", base).env_remove("GASTOS_TOKEN");
    cmd
}

fn logged_in() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    write_fixture(temp_dir.path());
    gastos(temp_dir.path())
        .args(["login", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as user 1"));
    temp_dir
}

#[test]
fn test_data_commands_require_login() {
    let temp_dir = TempDir::new().unwrap();
    write_fixture(temp_dir.path());

    gastos(temp_dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_session_lifecycle() {
    let temp_dir = logged_in();

    gastos(temp_dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("User:      1"));

    gastos(temp_dir.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));

    gastos(temp_dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

#[test]
fn test_list_shows_only_own_records() {
    let temp_dir = logged_in();

    gastos(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Supermercado"))
        .stdout(predicate::str::contains("15/01/2024"))
        .stdout(predicate::str::contains("$ 100,00"))
        .stdout(predicate::str::contains("Ajeno").not());
}

#[test]
fn test_list_with_date_filter() {
    let temp_dir = logged_in();

    gastos(temp_dir.path())
        .args(["list", "--from", "2024-01-18"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sueldo"))
        .stdout(predicate::str::contains("Supermercado").not());
}

#[test]
fn test_invalid_filter_is_rejected() {
    let temp_dir = logged_in();

    gastos(temp_dir.path())
        .args(["list", "--min", "mucho"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount for --min"));
}

#[test]
fn test_report_summary() {
    let temp_dir = logged_in();

    gastos(temp_dir.path())
        .args(["report", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Egresos ARS"))
        .stdout(predicate::str::contains("-$ 50,00"));
}

#[test]
fn test_report_summary_totals_ignore_filters() {
    let temp_dir = logged_in();

    let full = gastos(temp_dir.path())
        .args(["report", "summary"])
        .output()
        .unwrap();
    let filtered = gastos(temp_dir.path())
        .args(["report", "summary", "--from", "2024-01-18"])
        .output()
        .unwrap();
    assert!(full.status.success());
    assert!(filtered.status.success());

    let full = String::from_utf8(full.stdout).unwrap();
    let filtered = String::from_utf8(filtered.stdout).unwrap();
    assert!(filtered.starts_with(&full));
    assert!(filtered.contains("-$ 50,00"));
    assert!(filtered.contains("1 de 2 registros coinciden con los filtros"));
}

#[test]
fn test_export_summary_covers_every_record() {
    let temp_dir = logged_in();
    let json_path = temp_dir.path().join("filtrado.json");

    gastos(temp_dir.path())
        .args(["export", "json"])
        .arg(&json_path)
        .args(["--from", "2024-01-18"])
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["record_count"], 1);
    assert_eq!(json["records"][0]["descripcion"], "Sueldo");
    assert_eq!(json["summary"]["expense_ars"], "100.00");
    assert_eq!(json["summary"]["income_ars"], "50.00");
    assert_eq!(json["summary"]["total_ars"], "-50.00");
}

#[test]
fn test_list_plain_decimal_amount_bound() {
    let temp_dir = logged_in();

    gastos(temp_dir.path())
        .args(["list", "--min", "60.50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Supermercado"))
        .stdout(predicate::str::contains("Sueldo").not());
}

#[test]
fn test_report_categories_uses_placeholder() {
    let temp_dir = logged_in();

    gastos(temp_dir.path())
        .args(["report", "categories", "--kind", "Ingreso"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sin Categoría"));
}

#[test]
fn test_report_monthly_to_csv() {
    let temp_dir = logged_in();
    let output = temp_dir.path().join("mensual.csv");

    gastos(temp_dir.path())
        .args(["report", "monthly", "--output"])
        .arg(&output)
        .assert()
        .success();

    let contents = fs::read_to_string(&output).unwrap();
    assert!(contents.contains("2024-01,Enero 2024,50.00,100.00,-50.00"));
}

#[test]
fn test_chart_categories() {
    let temp_dir = logged_in();

    gastos(temp_dir.path())
        .args(["chart", "categories", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Comida"))
        .stdout(predicate::str::contains("rgba(75, 192, 192, 0.6)"));
}

#[test]
fn test_export_csv_and_json() {
    let temp_dir = logged_in();
    let csv_path = temp_dir.path().join("movimientos.csv");
    let json_path = temp_dir.path().join("reporte.json");

    gastos(temp_dir.path())
        .args(["export", "csv"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 records"));

    let csv = fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("Descripción,Monto,Fecha,Divisa,Tipo_Transacción,Método_Pago,Categoría"));
    assert!(csv.contains("Sueldo,50.00,20/01/2024,ARS,Ingreso,Efectivo,N/A"));

    gastos(temp_dir.path())
        .args(["export", "json"])
        .arg(&json_path)
        .args(["--description", "super"])
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["record_count"], 1);
    assert_eq!(json["summary"]["expense_ars"], "100.00");
}

#[test]
fn test_missing_resource_fails_the_load() {
    let temp_dir = logged_in();
    fs::remove_file(temp_dir.path().join("data").join("divisas.json")).unwrap();

    gastos(temp_dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch divisas"));
}
