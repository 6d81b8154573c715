use super::*;
use crate::error::HttpError;
use crate::web::{MockTransport, RequestBody};

// =========================================================
// 辅助函数
// =========================================================

const BASE: &str = "http://api.test/";

fn client(token: Option<&str>) -> (RxLensApi<MockTransport>, MockTransport) {
    let transport = MockTransport::new();
    let api = RxLensApi::new(BASE, token.map(str::to_string), transport.clone());
    (api, transport)
}

fn file_response(disposition: Option<&str>) -> HttpResponse {
    HttpResponse {
        status: 200,
        content_type: Some("application/pdf".to_string()),
        content_disposition: disposition.map(str::to_string),
        body: b"%PDF-1.4".to_vec(),
    }
}

// =========================================================
// 认证与令牌
// =========================================================

#[tokio::test]
async fn test_missing_token_issues_no_request() {
    let (api, transport) = client(None);

    assert_eq!(api.history().await, Err(ApiError::MissingSession));
    assert_eq!(api.admin_dashboard().await, Err(ApiError::MissingSession));
    assert_eq!(
        api.predict(SelectedFile::detached("rx.png", "image/png", 1.0)).await,
        Err(ApiError::MissingSession)
    );
    assert_eq!(
        api.export_report(ReportPeriod::Month).await,
        Err(ApiError::MissingSession)
    );
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_login_does_not_need_token() {
    let (api, transport) = client(None);
    transport.respond_json(
        200,
        r#"{"message":"ok","token":"jwt","user":{"id":"1","name":"Ana","email":"ana@x.org","role":"user"}}"#,
    );

    let resp = api.login(" ana@x.org ", "secret").await.unwrap();
    assert_eq!(resp.token, "jwt");
    assert_eq!(resp.user.role, Role::User);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "http://api.test/api/auth/login");
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert!(requests[0].header_value("authorization").is_none());
    match &requests[0].body {
        RequestBody::Json(body) => {
            let value: serde_json::Value = serde_json::from_str(body).unwrap();
            assert_eq!(value["email"], "ana@x.org");
        }
        other => panic!("unexpected body: {:?}", other),
    }
}

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let (api, transport) = client(Some("abc"));
    transport.respond_json(200, r#"{"history": []}"#);

    assert!(api.history().await.unwrap().is_empty());
    let request = &transport.requests()[0];
    assert_eq!(request.url, "http://api.test/api/history");
    assert_eq!(request.header_value("Authorization"), Some("Bearer abc"));
}

// =========================================================
// 错误映射
// =========================================================

#[tokio::test]
async fn test_unauthorized_maps_to_auth_failure() {
    let (api, transport) = client(Some("expired"));
    transport.respond_json(401, r#"{"error": "Token has expired"}"#);

    let err = api.user_dashboard().await.unwrap_err();
    assert!(err.is_auth_failure());
    assert_eq!(err.to_string(), "Token has expired");
}

#[tokio::test]
async fn test_wrong_current_password_keeps_session() {
    let (api, transport) = client(Some("valid"));
    transport.respond_json(401, r#"{"error": "Current password is incorrect"}"#);
    transport.respond_json(401, r#"{"message": "Current password is incorrect"}"#);

    let err = api.update_password("u1", "wrong", "new-secret").await.unwrap_err();
    assert_eq!(err, ApiError::Rejected("Current password is incorrect".to_string()));
    assert!(!err.is_auth_failure());
    assert_eq!(err.to_string(), "Current password is incorrect");

    let err = api.change_admin_password("wrong", "new-secret").await.unwrap_err();
    assert!(!err.is_auth_failure());
    assert_eq!(err.to_string(), "Current password is incorrect");
}

#[tokio::test]
async fn test_password_endpoint_forbidden_still_expires() {
    let (api, transport) = client(Some("revoked"));
    transport.respond_json(403, r#"{"error": "Forbidden"}"#);

    let err = api.change_admin_password("old", "new-secret").await.unwrap_err();
    assert!(err.is_auth_failure());
}

#[tokio::test]
async fn test_bad_login_is_not_session_expiry() {
    let (api, transport) = client(None);
    transport.respond_json(401, r#"{"error": "Invalid credentials"}"#);

    let err = api.login("ana@x.org", "nope").await.unwrap_err();
    assert!(!err.is_auth_failure());
    assert_eq!(err.to_string(), "Invalid credentials");
}

#[tokio::test]
async fn test_server_error_message_is_surfaced() {
    let (api, transport) = client(Some("t"));
    transport.respond_json(400, r#"{"error": "No image uploaded"}"#);

    let err = api
        .predict(SelectedFile::detached("rx.jpg", "image/jpeg", 1.0))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 400,
            message: "No image uploaded".to_string()
        }
    );
    assert!(!err.is_auth_failure());
}

#[tokio::test]
async fn test_transport_failure_maps_to_network() {
    let (api, transport) = client(Some("t"));
    transport.fail(HttpError::NetworkError("TypeError: Failed to fetch".to_string()));

    assert!(matches!(api.logs().await, Err(ApiError::Network(_))));
}

#[tokio::test]
async fn test_missing_required_field_is_decode_error() {
    let (api, transport) = client(Some("t"));
    transport.respond_json(200, r#"{"ocr_text": "x", "found_drugs": []}"#);

    let result = api
        .predict(SelectedFile::detached("rx.jpg", "image/jpeg", 1.0))
        .await;
    assert!(matches!(result, Err(ApiError::Decode(_))));
}

// =========================================================
// 端点
// =========================================================

#[tokio::test]
async fn test_predict_sends_multipart_image_field() {
    let (api, transport) = client(Some("t"));
    transport.respond_json(
        200,
        r#"{"ocr_text":"Amoxicillin","found_drugs":["Amoxicillin"],"ocr_confidence":85,"drug_confidence":55}"#,
    );

    let result = api
        .predict(SelectedFile::detached("rx.png", "image/png", 10.0))
        .await
        .unwrap();
    assert_eq!(result.found_drugs, vec!["Amoxicillin"]);

    let request = &transport.requests()[0];
    assert_eq!(request.url, "http://api.test/api/predict");
    assert!(request.header_value("Content-Type").is_none());
    match &request.body {
        RequestBody::File { field, file } => {
            assert_eq!(field, "image");
            assert_eq!(file.name(), "rx.png");
        }
        other => panic!("unexpected body: {:?}", other),
    }
}

#[tokio::test]
async fn test_reports_query_and_user_status_path() {
    let (api, transport) = client(Some("t"));
    transport
        .respond_json(
            200,
            r#"{"total_patients":3,"active_prescriptions":2,"recognition_accuracy":91.5}"#,
        )
        .respond_json(200, r#"{"message":"Status updated"}"#);

    let report = api.reports(ReportPeriod::Year).await.unwrap();
    assert_eq!(report.total_patients, 3);
    assert!(report.recognition_activity.is_empty());

    let msg = api.update_user_status("u1", UserStatus::Inactive).await.unwrap();
    assert_eq!(msg.message.as_deref(), Some("Status updated"));

    let requests = transport.requests();
    assert_eq!(requests[0].url, "http://api.test/api/admin/reports?period=year");
    assert_eq!(requests[1].url, "http://api.test/api/users/u1/status");
    assert_eq!(requests[1].method, HttpMethod::Put);
}

#[tokio::test]
async fn test_export_uses_disposition_filename() {
    let (api, transport) = client(Some("t"));
    transport.respond(file_response(Some(r#"attachment; filename="rx-week.pdf""#)));

    let file = api.export_report(ReportPeriod::Week).await.unwrap();
    assert_eq!(file.filename, "rx-week.pdf");
    assert_eq!(file.bytes, b"%PDF-1.4");
    assert_eq!(
        transport.requests()[0].url,
        "http://api.test/api/admin/reports/export"
    );
}

#[tokio::test]
async fn test_export_falls_back_to_period_filename() {
    let (api, transport) = client(Some("t"));
    transport.respond(file_response(None));

    let file = api.export_report(ReportPeriod::Today).await.unwrap();
    assert_eq!(file.filename, "report-today.pdf");
    assert_eq!(file.content_type, "application/pdf");
}
