//! Integration tests for the HTTP API.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use partida_api::{AppState, create_router, routes::reports::REPORT_CACHE_HEADER};
use partida_core::chart::{Account, AccountType, ChartOfAccounts};
use partida_shared::AppConfig;
use rstest::{fixture, rstest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tower::ServiceExt;

#[fixture]
fn app() -> Router {
    let chart = ChartOfAccounts::load(vec![
        Account::new("1", "Activo", AccountType::Asset, 1, None),
        Account::new("1111", "Caja", AccountType::Asset, 2, Some("1")),
        Account::new("1112", "Bancos", AccountType::Asset, 2, Some("1")),
        Account::new("2", "Pasivo", AccountType::Liability, 1, None),
        Account::new("2111", "Proveedores", AccountType::Liability, 2, Some("2")),
        Account::new("3", "Patrimonio", AccountType::Equity, 1, None),
        Account::new("3111", "Capital", AccountType::Equity, 2, Some("3")),
        Account::new("4", "Ingresos", AccountType::Income, 1, None),
        Account::new("4111", "Ventas", AccountType::Income, 2, Some("4")),
    ])
    .unwrap();
    create_router(AppState::new(chart, &AppConfig::default()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn money(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

fn entry(debit: &str, credit: &str, debit_amount: &str, credit_amount: &str) -> Value {
    json!({
        "date": "2026-01-10",
        "concept": "Venta al contado",
        "lines": [
            { "account_code": debit, "debit": debit_amount },
            { "account_code": credit, "credit": credit_amount },
        ]
    })
}

#[rstest]
#[tokio::test]
async fn test_health(app: Router) {
    let response = send(&app, "GET", "/api/v1/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["accounts"], 9);
    assert_eq!(body["chart_version"], 0);
}

#[rstest]
#[tokio::test]
async fn test_unbalanced_entry_is_rejected(app: Router) {
    let response = send(&app, "POST", "/api/v1/entries", Some(entry("1111", "4111", "100.00", "90.00"))).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(response).await;
    assert_eq!(body["error"], "UNBALANCED_ENTRY");
    assert_eq!(money(&body["details"]["debit"]), dec!(100));
    assert_eq!(money(&body["details"]["credit"]), dec!(90));
    assert_eq!(money(&body["details"]["diff"]), dec!(10));

    let list = json_body(send(&app, "GET", "/api/v1/entries", None).await).await;
    assert_eq!(list["meta"]["total"], 0);
}

#[rstest]
#[tokio::test]
async fn test_posting_to_grouping_account_is_rejected(app: Router) {
    let response = send(&app, "POST", "/api/v1/entries", Some(entry("1", "4111", "5", "5"))).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["error"], "NOT_POSTABLE");
}

#[rstest]
#[tokio::test]
async fn test_trial_balance_after_sale(app: Router) {
    let response = send(&app, "POST", "/api/v1/entries", Some(entry("1111", "4111", "100.00", "100.00"))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let posted = json_body(response).await;
    assert_eq!(posted["entry"]["id"], 1);
    assert_eq!(posted["version"], 1);

    let response = send(&app, "GET", "/api/v1/reports/trial-balance?format=4", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[&REPORT_CACHE_HEADER], "miss");

    let body = json_body(response).await;
    assert_eq!(body["ledger_version"], 1);
    assert_eq!(body["warnings"], json!([]));

    let rows = body["report"]["rows"].as_array().unwrap();
    let caja = rows.iter().find(|r| r["code"] == "1111").unwrap();
    assert_eq!(money(&caja["suma_debe"]), dec!(100.00));
    assert_eq!(money(&caja["saldo_deudor"]), dec!(100.00));
    let ventas = rows.iter().find(|r| r["code"] == "4111").unwrap();
    assert_eq!(money(&ventas["suma_haber"]), dec!(100.00));
    assert_eq!(money(&ventas["saldo_acreedor"]), dec!(100.00));
    assert_eq!(body["report"]["totals"]["sumas_cuadradas"], true);

    let again = send(&app, "GET", "/api/v1/reports/trial-balance?format=4", None).await;
    assert_eq!(again.headers()[&REPORT_CACHE_HEADER], "hit");
}

#[rstest]
#[tokio::test]
async fn test_void_then_void_again(app: Router) {
    send(&app, "POST", "/api/v1/entries", Some(entry("1111", "4111", "75", "75"))).await;

    let response = send(&app, "POST", "/api/v1/entries/1/void", Some(json!({ "date": "2026-01-15" }))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let reversal = json_body(response).await;
    assert_eq!(reversal["entry"]["id"], 2);
    assert_eq!(reversal["entry"]["reverses"], 1);

    let original = json_body(send(&app, "GET", "/api/v1/entries/1", None).await).await;
    assert_eq!(original["status"], "voided");
    assert_eq!(original["reversed_by"], 2);

    let response = send(&app, "POST", "/api/v1/entries/1/void", Some(json!({ "date": "2026-01-16" }))).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(json_body(response).await["error"], "ALREADY_VOIDED");

    let sheet = json_body(send(&app, "GET", "/api/v1/reports/balance-sheet?as_of=2026-01-31", None).await).await;
    assert_eq!(money(&sheet["report"]["activos"]["total"]), Decimal::ZERO);
}

#[rstest]
#[tokio::test]
async fn test_missing_entry(app: Router) {
    let response = send(&app, "GET", "/api/v1/entries/42", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"], "ENTRY_NOT_FOUND");
}

#[rstest]
#[tokio::test]
async fn test_import_reports_discrepancies(app: Router) {
    let response = send(
        &app,
        "POST",
        "/api/v1/entries/import",
        Some(json!([entry("1111", "4111", "100", "90")])),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert_eq!(body["ids"], json!([1]));
    let kinds: Vec<&str> = body["discrepancies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["kind"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"unbalanced_entry"));
    assert!(kinds.contains(&"unbalanced_ledger"));

    let check = json_body(send(&app, "GET", "/api/v1/reports/ledger-check", None).await).await;
    assert_eq!(check["report"]["cuadrado"], false);
    assert!(!check["warnings"].as_array().unwrap().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_account_lifecycle(app: Router) {
    let new_account = json!({
        "code": "1113",
        "name": "Caja chica",
        "type": "activo",
        "level": 2,
        "parentCode": "1"
    });
    let response = send(&app, "POST", "/api/v1/accounts", Some(new_account.clone())).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(&app, "POST", "/api/v1/accounts", Some(new_account)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let orphan = json!({ "code": "9111", "name": "Huérfana", "type": "asset", "level": 2, "parent_code": "9" });
    let response = send(&app, "POST", "/api/v1/accounts", Some(orphan)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = send(&app, "DELETE", "/api/v1/accounts/1113", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "GET", "/api/v1/accounts/1113", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn test_chart_edit_misses_report_cache(app: Router) {
    let uri = "/api/v1/reports/balance-sheet?as_of=2026-12-31";
    send(&app, "GET", uri, None).await;
    let cached = send(&app, "GET", uri, None).await;
    assert_eq!(cached.headers()[&REPORT_CACHE_HEADER], "hit");

    let account = json!({ "code": "1113", "name": "Caja chica", "type": "asset", "level": 2, "parent_code": "1" });
    let response = send(&app, "POST", "/api/v1/accounts", Some(account)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let fresh = send(&app, "GET", uri, None).await;
    assert_eq!(fresh.headers()[&REPORT_CACHE_HEADER], "miss");
    let body = json_body(fresh).await;
    let codes: Vec<&str> = body["report"]["activos"]["cuentas"]
        .as_array()
        .unwrap()
        .iter()
        .map(|line| line["code"].as_str().unwrap())
        .collect();
    assert!(codes.contains(&"1113"));

    let health = json_body(send(&app, "GET", "/api/v1/health", None).await).await;
    assert_eq!(health["chart_version"], 1);
}

#[rstest]
#[tokio::test]
async fn test_account_in_use_cannot_be_deleted(app: Router) {
    send(&app, "POST", "/api/v1/entries", Some(entry("1112", "3111", "10", "10"))).await;

    let response = send(&app, "DELETE", "/api/v1/accounts/1112", None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(json_body(response).await["error"], "ACCOUNT_IN_USE");
}

#[rstest]
#[tokio::test]
async fn test_group_balance_is_rolled_up(app: Router) {
    send(&app, "POST", "/api/v1/entries", Some(entry("1111", "3111", "200", "200"))).await;
    send(&app, "POST", "/api/v1/entries", Some(entry("1112", "3111", "300", "300"))).await;

    let response = send(&app, "GET", "/api/v1/accounts/1/balance?as_of=2026-12-31", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["rollup"], true);
    assert_eq!(money(&body["balance"]["saldo_deudor"]), dec!(500));
}

#[rstest]
#[tokio::test]
async fn test_accounts_filtered_by_type(app: Router) {
    let body = json_body(send(&app, "GET", "/api/v1/accounts?type=pasivo", None).await).await;
    let codes: Vec<&str> = body.as_array().unwrap().iter().map(|a| a["code"].as_str().unwrap()).collect();
    assert_eq!(codes, ["2", "2111"]);

    let response = send(&app, "GET", "/api/v1/accounts?type=nope", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[tokio::test]
async fn test_report_parameter_errors(app: Router) {
    let response = send(&app, "GET", "/api/v1/reports/trial-balance?format=3", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        "GET",
        "/api/v1/reports/income-statement?from=2026-02-01&to=2026-01-01",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "INVALID_DATE_RANGE");
}

#[rstest]
#[tokio::test]
async fn test_tax_penalty(app: Router) {
    let request = json!({
        "tipo": "iva",
        "fecha_vencimiento": "2026-06-20",
        "monto_impuesto": "1000",
        "today": "2026-06-30"
    });
    let response = send(&app, "POST", "/api/v1/tax/penalty", Some(request)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["dias_retraso"], 10);
    assert_eq!(money(&body["multa"]), dec!(2550.00));
    assert_eq!(money(&body["interes"]), dec!(1.64));
}

#[rstest]
#[tokio::test]
async fn test_oversized_amounts_are_rejected(app: Router) {
    let huge = "40000000000000000000000000000";
    let body = json!({
        "date": "2026-01-10",
        "concept": "Desborde",
        "lines": [
            { "account_code": "1111", "debit": huge },
            { "account_code": "1112", "debit": huge },
            { "account_code": "4111", "credit": huge },
        ]
    });
    let response = send(&app, "POST", "/api/v1/entries", Some(body)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let request = json!({
        "tipo": "iva",
        "fecha_vencimiento": "2026-06-20",
        "monto_impuesto": "1000000000000001",
        "today": "2026-06-30"
    });
    let response = send(&app, "POST", "/api/v1/tax/penalty", Some(request)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "INVALID_INPUT");

    let health = json_body(send(&app, "GET", "/api/v1/health", None).await).await;
    assert_eq!(health["ledger_version"], 0);
}
