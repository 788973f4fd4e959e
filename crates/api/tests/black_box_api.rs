use std::io::Read;

use reqwest::StatusCode;
use serde_json::Value;

use restock_api::config::ApiConfig;
use restock_api::middleware::SESSION_HEADER;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = restock_api::app::build_app(&ApiConfig::default());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

fn session_of(res: &reqwest::Response) -> String {
    res.headers()
        .get(SESSION_HEADER)
        .expect("missing session header")
        .to_str()
        .unwrap()
        .to_string()
}

async fn start_session(client: &reqwest::Client, server: &TestServer) -> (String, Value) {
    let res = client.get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let session = session_of(&res);
    (session, res.json().await.unwrap())
}

async fn upload(
    client: &reqwest::Client,
    server: &TestServer,
    session: &str,
    file_name: &str,
    contents: &str,
) -> reqwest::Response {
    let part = reqwest::multipart::Part::bytes(contents.as_bytes().to_vec())
        .file_name(file_name.to_string());
    let form = reqwest::multipart::Form::new().part("file", part);

    client
        .post(server.url("/upload"))
        .header(SESSION_HEADER, session)
        .multipart(form)
        .send()
        .await
        .unwrap()
}

async fn predict(
    client: &reqwest::Client,
    server: &TestServer,
    session: &str,
    fields: &[(&str, &str)],
) -> Value {
    let res = client
        .post(server.url("/predict"))
        .header(SESSION_HEADER, session)
        .form(fields)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let server = TestServer::spawn().await;
    let res = client().get(server.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn new_session_sees_fallback_data() {
    let server = TestServer::spawn().await;
    let (session, body) = start_session(&client(), &server).await;

    assert!(!session.is_empty());
    assert_eq!(body["session_id"], session.as_str());
    assert_eq!(body["is_custom_data"], false);
    assert_eq!(body["periods"], 12);
    assert_eq!(
        body["items"],
        serde_json::json!(["Kain_A_Batik_Sutera", "Kain_B_Katun_Polos", "Kain_C_Sutra_Murni"])
    );
    assert_eq!(body["default_factors"]["safety_factor"], 0.5);
    assert_eq!(body["default_factors"]["reorder_factor"], 1.5);
    assert_eq!(body["has_result"], false);
}

#[tokio::test]
async fn predict_on_fallback_data() {
    let server = TestServer::spawn().await;
    let client = client();
    let (session, _) = start_session(&client, &server).await;

    let body = predict(
        &client,
        &server,
        &session,
        &[
            ("safety_factor", "0.5"),
            ("reorder_factor", "1.5"),
            ("Kain_A_Batik_Sutera", "30"),
            ("Kain_B_Katun_Polos", "1000"),
            ("Kain_C_Sutra_Murni", "not a number"),
        ],
    )
    .await;

    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);

    let batik = &rows[0];
    assert_eq!(batik["item_name"], "Kain_A_Batik_Sutera");
    assert_eq!(batik["safety_stock"], 31);
    assert_eq!(batik["reorder_point"], 92);
    assert_eq!(batik["current_stock"], 30);
    assert_eq!(batik["recommendation"], "critical");
    assert_eq!(batik["recommendation_label"], "critical, reorder immediately");
    assert!((batik["avg_sale"].as_f64().unwrap() - 61.6667).abs() < 1e-3);

    assert_eq!(rows[1]["recommendation"], "safe");
    assert_eq!(rows[2]["current_stock"], 0);
    assert_eq!(rows[2]["recommendation"], "critical");

    assert_eq!(body["summary"]["total"], 3);
    assert_eq!(body["summary"]["critical"], 2);
    assert_eq!(body["summary"]["safe"], 1);
}

#[tokio::test]
async fn invalid_factors_fall_back_to_defaults() {
    let server = TestServer::spawn().await;
    let client = client();
    let (session, _) = start_session(&client, &server).await;

    let body = predict(
        &client,
        &server,
        &session,
        &[("safety_factor", "lots"), ("reorder_factor", "-3")],
    )
    .await;

    assert_eq!(body["factors"]["safety_factor"], 0.5);
    assert_eq!(body["factors"]["reorder_factor"], 1.5);
}

#[tokio::test]
async fn predict_without_form_body_uses_defaults() {
    let server = TestServer::spawn().await;
    let client = client();
    let (session, _) = start_session(&client, &server).await;

    let res = client
        .post(server.url("/predict"))
        .header(SESSION_HEADER, &session)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["factors"]["safety_factor"], 0.5);
    assert_eq!(body["factors"]["reorder_factor"], 1.5);
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|row| row["current_stock"] == 0));

    let res = client
        .post(server.url("/predict"))
        .header(SESSION_HEADER, &session)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(r#"{"safety_factor": 2}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["factors"]["safety_factor"], 0.5);
}

#[tokio::test]
async fn upload_replaces_table_for_this_session_only() {
    let server = TestServer::spawn().await;
    let client = client();
    let (mine, _) = start_session(&client, &server).await;
    let (other, _) = start_session(&client, &server).await;
    assert_ne!(mine, other);

    let csv = "\
Month,Velvet,Linen,Remarks
Jan,10,40,ok
Feb,20,N/A,late
Mar,30,44,ok
";
    let res = upload(&client, &server, &mine, "history.csv", csv).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(session_of(&res), mine);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["is_custom_data"], true);
    assert_eq!(body["items"], serde_json::json!(["Velvet"]));
    assert_eq!(body["file_name"], "history.csv");

    let body = predict(&client, &server, &mine, &[("Velvet", "25")]).await;
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["avg_sale"], 20.0);
    assert_eq!(rows[0]["safety_stock"], 10);
    assert_eq!(rows[0]["reorder_point"], 30);
    assert_eq!(rows[0]["recommendation"], "reorder_soon");

    let res = client
        .get(server.url("/"))
        .header(SESSION_HEADER, &other)
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["is_custom_data"], false);
}

#[tokio::test]
async fn rejected_uploads_keep_current_table() {
    let server = TestServer::spawn().await;
    let client = client();
    let (session, _) = start_session(&client, &server).await;

    let res = upload(&client, &server, &session, "history.xlsx", "Month,A\nJan,1\n").await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "unsupported_file");

    let res = upload(&client, &server, &session, "history.csv", "Month,A\nJan,x\n").await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "no_usable_data");

    let res = client
        .get(server.url("/"))
        .header(SESSION_HEADER, &session)
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["is_custom_data"], false);
}

#[tokio::test]
async fn upload_without_file_field_is_rejected() {
    let server = TestServer::spawn().await;
    let client = client();
    let (session, _) = start_session(&client, &server).await;

    let form = reqwest::multipart::Form::new().text("note", "no file here");
    let res = client
        .post(server.url("/upload"))
        .header(SESSION_HEADER, &session)
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "missing_file");
}

#[tokio::test]
async fn download_redirects_until_a_result_exists() {
    let server = TestServer::spawn().await;
    let client = client();
    let (session, _) = start_session(&client, &server).await;

    let res = client
        .get(server.url("/download"))
        .header(SESSION_HEADER, &session)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[reqwest::header::LOCATION], "/");

    predict(&client, &server, &session, &[("Kain_A_Batik_Sutera", "95")]).await;

    let res = client
        .get(server.url("/download"))
        .header(SESSION_HEADER, &session)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[reqwest::header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert!(res.headers()[reqwest::header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("stock_prediction.xlsx"));

    let bytes = res.bytes().await.unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes.to_vec())).unwrap();
    let mut workbook = String::new();
    archive
        .by_name("xl/workbook.xml")
        .unwrap()
        .read_to_string(&mut workbook)
        .unwrap();
    assert!(workbook.contains(r#"name="Stock_Recommendations""#));
    let mut strings = String::new();
    archive
        .by_name("xl/sharedStrings.xml")
        .unwrap()
        .read_to_string(&mut strings)
        .unwrap();
    assert!(strings.contains("<t>Kain_A_Batik_Sutera</t>"));
    assert!(strings.contains("<t>stock safe</t>"));

    let res = client
        .get(server.url("/"))
        .header(SESSION_HEADER, &session)
        .send()
        .await
        .unwrap();
    let index: Value = res.json().await.unwrap();
    assert_eq!(index["has_result"], true);
}

#[tokio::test]
async fn malformed_session_header_starts_a_new_session() {
    let server = TestServer::spawn().await;
    let res = client()
        .get(server.url("/"))
        .header(SESSION_HEADER, "garbage")
        .send()
        .await
        .unwrap();
    let session = session_of(&res);
    assert_ne!(session, "garbage");
    assert!(session.parse::<restock_core::SessionId>().is_ok());
}
