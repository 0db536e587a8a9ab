use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use campus_core::{Student, StudentStore, encoding};

use crate::event::{ApiGatewayRequest, ApiGatewayResponse, cors_headers};

/// The one supported resource path.
const STUDENTS_PATH: &str = "/V1/students";

/// Routing decision for one inbound request, first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// CORS preflight, matched on method alone.
    Preflight,
    ListStudents,
    CreateStudent,
    /// Anything outside the students resource.
    UnknownPath,
    /// Right path, unsupported method.
    MethodNotAllowed,
}

impl Route {
    pub fn resolve(method: &str, path: &str) -> Self {
        if method == "OPTIONS" {
            return Self::Preflight;
        }
        if path != STUDENTS_PATH {
            return Self::UnknownPath;
        }
        match method {
            "GET" => Self::ListStudents,
            "POST" => Self::CreateStudent,
            _ => Self::MethodNotAllowed,
        }
    }
}

/// Create-request body. Fields deserialize as `Option` so that missing and
/// null are both "absent"; empty strings are rejected separately to match
/// the falsy check the frontend relies on.
#[derive(Debug, Deserialize)]
struct NewStudent {
    student_id: Option<String>,
    name: Option<String>,
    major: Option<String>,
}

/// Dispatch one API Gateway request against the registry table.
///
/// `now` is the ISO-8601 timestamp assigned to any row created by this
/// invocation.
pub async fn handle_request(
    store: &dyn StudentStore,
    request: &ApiGatewayRequest,
    now: &str,
) -> ApiGatewayResponse {
    match Route::resolve(request.method(), request.path()) {
        Route::Preflight => empty_response(200),
        Route::UnknownPath => json_response(404, json!({ "error": "Not Found" })),
        Route::ListStudents => list_students(store).await,
        Route::CreateStudent => create_student(store, request.body.as_deref(), now).await,
        Route::MethodNotAllowed => json_response(405, json!({ "error": "Method not allowed" })),
    }
}

async fn list_students(store: &dyn StudentStore) -> ApiGatewayResponse {
    match store.scan_students().await {
        Ok(items) => json_response(200, encoding::items_to_json(&items)),
        Err(e) => {
            error!(error = %e, "student scan failed");
            json_response(500, json!({ "error": e.to_string() }))
        }
    }
}

async fn create_student(
    store: &dyn StudentStore,
    body: Option<&str>,
    now: &str,
) -> ApiGatewayResponse {
    let Some(body) = body else {
        return json_response(400, json!({ "error": "Missing request body" }));
    };

    let fields: NewStudent = match serde_json::from_str(body) {
        Ok(fields) => fields,
        Err(e) => {
            error!(error = %e, "request body is not valid JSON");
            return json_response(500, json!({ "error": e.to_string() }));
        }
    };

    let (Some(student_id), Some(name), Some(major)) = (
        required(fields.student_id.as_deref()),
        required(fields.name.as_deref()),
        required(fields.major.as_deref()),
    ) else {
        return json_response(
            400,
            json!({ "error": "Missing required fields (student_id, name, major)" }),
        );
    };

    let student = Student {
        student_id: student_id.to_string(),
        name: name.to_string(),
        major: major.to_string(),
        timestamp: now.to_string(),
    };

    if let Err(e) = store.put_student(&student).await {
        error!(student_id = %student.student_id, error = %e, "student write failed");
        return json_response(500, json!({ "error": e.to_string() }));
    }

    info!(student_id = %student.student_id, "student record written");
    json_response(
        201,
        json!({ "message": format!("Student {} added successfully", student.student_id) }),
    )
}

fn required(field: Option<&str>) -> Option<&str> {
    match field {
        Some(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn json_response(status_code: u16, body: impl serde::Serialize) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: cors_headers(),
        body: serde_json::to_string(&body).expect("response payload should serialize"),
    }
}

fn empty_response(status_code: u16) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: cors_headers(),
        body: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use aws_sdk_dynamodb::types::AttributeValue;
    use serde_json::Value;

    use campus_core::{CoreError, Item};

    use super::*;

    struct InMemoryStudents {
        rows: Mutex<Vec<Item>>,
        fail: bool,
    }

    impl InMemoryStudents {
        fn new() -> Self {
            Self {
                rows: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                rows: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn with_rows(rows: Vec<Item>) -> Self {
            Self {
                rows: Mutex::new(rows),
                fail: false,
            }
        }

        fn rows(&self) -> Vec<Item> {
            self.rows.lock().expect("poisoned mutex").clone()
        }
    }

    #[async_trait]
    impl StudentStore for InMemoryStudents {
        async fn scan_students(&self) -> Result<Vec<Item>, CoreError> {
            if self.fail {
                return Err(CoreError::DynamoSdk("scan failed".into()));
            }
            Ok(self.rows())
        }

        async fn put_student(&self, student: &Student) -> Result<(), CoreError> {
            if self.fail {
                return Err(CoreError::DynamoSdk("put failed".into()));
            }
            let mut item: Item = HashMap::new();
            item.insert(
                "student_id".into(),
                AttributeValue::S(student.student_id.clone()),
            );
            item.insert("name".into(), AttributeValue::S(student.name.clone()));
            item.insert("major".into(), AttributeValue::S(student.major.clone()));
            item.insert(
                "timestamp".into(),
                AttributeValue::S(student.timestamp.clone()),
            );
            self.rows.lock().expect("poisoned mutex").push(item);
            Ok(())
        }
    }

    const NOW: &str = "2026-08-06T10:00:00.000000+00:00";

    fn request(method: &str, path: &str, body: Option<&str>) -> ApiGatewayRequest {
        ApiGatewayRequest {
            http_method: Some(method.to_string()),
            path: Some(path.to_string()),
            body: body.map(str::to_string),
            request_context: None,
        }
    }

    fn body_json(response: &ApiGatewayResponse) -> Value {
        serde_json::from_str(&response.body).expect("response body should be JSON")
    }

    // -- Route resolution --

    #[test]
    fn options_wins_regardless_of_path() {
        assert_eq!(Route::resolve("OPTIONS", "/V1/students"), Route::Preflight);
        assert_eq!(Route::resolve("OPTIONS", "/anything"), Route::Preflight);
    }

    #[test]
    fn unknown_path_beats_method_check() {
        assert_eq!(Route::resolve("GET", "/V2/students"), Route::UnknownPath);
        assert_eq!(Route::resolve("DELETE", "/other"), Route::UnknownPath);
    }

    #[test]
    fn supported_path_routes_by_method() {
        assert_eq!(Route::resolve("GET", "/V1/students"), Route::ListStudents);
        assert_eq!(Route::resolve("POST", "/V1/students"), Route::CreateStudent);
        assert_eq!(
            Route::resolve("PUT", "/V1/students"),
            Route::MethodNotAllowed
        );
        assert_eq!(
            Route::resolve("DELETE", "/V1/students"),
            Route::MethodNotAllowed
        );
    }

    // -- Handler branches --

    #[tokio::test]
    async fn preflight_returns_empty_200() {
        let store = InMemoryStudents::new();
        let response =
            handle_request(&store, &request("OPTIONS", "/nowhere", Some("ignored")), NOW).await;

        assert_eq!(response.status_code, 200);
        assert!(response.body.is_empty());
        assert_eq!(response.headers, cors_headers());
    }

    #[tokio::test]
    async fn unknown_path_returns_404() {
        let store = InMemoryStudents::new();
        let response = handle_request(&store, &request("GET", "/V1/courses", None), NOW).await;

        assert_eq!(response.status_code, 404);
        assert_eq!(body_json(&response)["error"], "Not Found");
    }

    #[tokio::test]
    async fn unsupported_method_returns_405() {
        let store = InMemoryStudents::new();
        let response = handle_request(&store, &request("PUT", "/V1/students", None), NOW).await;

        assert_eq!(response.status_code, 405);
        assert_eq!(body_json(&response)["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn list_returns_every_row_with_numbers_as_strings() {
        let mut row: Item = HashMap::new();
        row.insert("student_id".into(), AttributeValue::S("S1".into()));
        row.insert("gpa".into(), AttributeValue::N("3.5".into()));
        let store = InMemoryStudents::with_rows(vec![row]);

        let response = handle_request(&store, &request("GET", "/V1/students", None), NOW).await;

        assert_eq!(response.status_code, 200);
        let body = body_json(&response);
        assert_eq!(body[0]["student_id"], "S1");
        assert_eq!(body[0]["gpa"], Value::String("3.5".into()));
    }

    #[tokio::test]
    async fn create_then_list_roundtrip() {
        let store = InMemoryStudents::new();
        let response = handle_request(
            &store,
            &request(
                "POST",
                "/V1/students",
                Some(r#"{"student_id":"S1","name":"A","major":"CS"}"#),
            ),
            NOW,
        )
        .await;

        assert_eq!(response.status_code, 201);
        assert_eq!(
            body_json(&response)["message"],
            "Student S1 added successfully"
        );

        let listed = handle_request(&store, &request("GET", "/V1/students", None), NOW).await;
        let body = body_json(&listed);
        assert_eq!(body[0]["student_id"], "S1");
        assert_eq!(body[0]["timestamp"], NOW);
    }

    #[tokio::test]
    async fn create_without_body_returns_400() {
        let store = InMemoryStudents::new();
        let response = handle_request(&store, &request("POST", "/V1/students", None), NOW).await;

        assert_eq!(response.status_code, 400);
        assert_eq!(body_json(&response)["error"], "Missing request body");
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn create_with_missing_field_returns_400_and_writes_nothing() {
        let store = InMemoryStudents::new();
        for body in [
            r#"{"name":"A","major":"CS"}"#,
            r#"{"student_id":"S1","major":"CS"}"#,
            r#"{"student_id":"S1","name":"A"}"#,
            r#"{"student_id":"","name":"A","major":"CS"}"#,
            r#"{"student_id":null,"name":"A","major":"CS"}"#,
        ] {
            let response =
                handle_request(&store, &request("POST", "/V1/students", Some(body)), NOW).await;

            assert_eq!(response.status_code, 400, "body: {body}");
            assert_eq!(
                body_json(&response)["error"],
                "Missing required fields (student_id, name, major)"
            );
        }
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn malformed_body_returns_500_envelope() {
        let store = InMemoryStudents::new();
        let response = handle_request(
            &store,
            &request("POST", "/V1/students", Some("{not json")),
            NOW,
        )
        .await;

        assert_eq!(response.status_code, 500);
        assert!(body_json(&response)["error"].is_string());
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn store_failure_returns_500_envelope() {
        let store = InMemoryStudents::failing();
        let response = handle_request(&store, &request("GET", "/V1/students", None), NOW).await;

        assert_eq!(response.status_code, 500);
        assert!(
            body_json(&response)["error"]
                .as_str()
                .unwrap()
                .contains("scan failed")
        );
    }

    #[tokio::test]
    async fn every_branch_carries_the_same_headers() {
        let store = InMemoryStudents::new();
        for (method, path, body) in [
            ("OPTIONS", "/x", None),
            ("GET", "/x", None),
            ("GET", "/V1/students", None),
            ("POST", "/V1/students", None),
            ("PATCH", "/V1/students", None),
        ] {
            let response = handle_request(&store, &request(method, path, body), NOW).await;
            assert_eq!(response.headers, cors_headers(), "{method} {path}");
        }
    }
}
