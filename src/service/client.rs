//! HTTP client for the employee record service
//!
//! The backend is a plain JSON REST resource:
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/employees` | List employees |
//! | GET    | `/employees/{id}` | Get by id |
//! | POST   | `/employees` | Create employee |
//! | PUT    | `/employees/{id}` | Update employee |

use super::traits::EmployeeService;
use crate::state::Employee;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Default service address
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:3000";

/// Errors from record service calls
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// HTTP transport error
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Service returned a non-2xx status
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response body did not match the expected shape
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
}

/// Record service reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpEmployeeService {
    http: reqwest::Client,
    base_url: String,
}

impl HttpEmployeeService {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a request and check its status
    async fn send(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ServiceError> {
        tracing::debug!(endpoint, "Calling employee service");

        let resp = request.send().await.map_err(|e| ServiceError::Http {
            endpoint: endpoint.to_string(),
            source: e,
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                endpoint: endpoint.to_string(),
                status,
                body,
            });
        }

        Ok(resp)
    }

    async fn read_json<T: DeserializeOwned>(
        endpoint: &str,
        resp: reqwest::Response,
    ) -> Result<T, ServiceError> {
        resp.json().await.map_err(|e| ServiceError::Deserialization {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }
}

#[async_trait]
impl EmployeeService for HttpEmployeeService {
    async fn get_employee(&self, id: u64) -> Result<Employee, ServiceError> {
        let endpoint = format!("GET /employees/{id}");
        let request = self.http.get(self.url(&format!("/employees/{id}")));
        let resp = self.send(&endpoint, request).await?;
        Self::read_json(&endpoint, resp).await
    }

    async fn get_employees(&self) -> Result<Vec<Employee>, ServiceError> {
        let endpoint = "GET /employees";
        let request = self.http.get(self.url("/employees"));
        let resp = self.send(endpoint, request).await?;
        Self::read_json(endpoint, resp).await
    }

    async fn add_employee(&self, employee: &Employee) -> Result<Employee, ServiceError> {
        let endpoint = "POST /employees";
        let request = self.http.post(self.url("/employees")).json(employee);
        let resp = self.send(endpoint, request).await?;
        Self::read_json(endpoint, resp).await
    }

    async fn update_employee(&self, employee: &Employee) -> Result<(), ServiceError> {
        let endpoint = format!("PUT /employees/{}", employee.id);
        let request = self
            .http
            .put(self.url(&format!("/employees/{}", employee.id)))
            .json(employee);
        self.send(&endpoint, request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ContactPreference, Skill};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn employee_json(id: u64) -> serde_json::Value {
        json!({
            "id": id,
            "fullName": "Mark Smith",
            "email": "mark@gmail.com",
            "phone": 5551234,
            "contactPreference": "email",
            "skills": [
                {"skillName": "C#", "experienceInYears": 4, "proficiency": "advanced"}
            ]
        })
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = HttpEmployeeService::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.url("/employees"), "http://localhost:3000/employees");
    }

    #[tokio::test]
    async fn test_get_employee() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/employees/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(employee_json(1)))
            .mount(&server)
            .await;

        let client = HttpEmployeeService::new(&server.uri());
        let employee = client.get_employee(1).await.unwrap();
        assert_eq!(employee.id, 1);
        assert_eq!(employee.phone.as_deref(), Some("5551234"));
        assert_eq!(employee.contact_preference, Some(ContactPreference::Email));
        assert_eq!(employee.skills, vec![Skill::new("C#", 4, "advanced")]);
    }

    #[tokio::test]
    async fn test_get_employees() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/employees"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([employee_json(1), employee_json(2)])),
            )
            .mount(&server)
            .await;

        let client = HttpEmployeeService::new(&server.uri());
        let employees = client.get_employees().await.unwrap();
        assert_eq!(employees.len(), 2);
        assert_eq!(employees[1].id, 2);
    }

    #[tokio::test]
    async fn test_not_found_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/employees/9"))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .mount(&server)
            .await;

        let client = HttpEmployeeService::new(&server.uri());
        let err = client.get_employee(9).await.unwrap_err();
        match err {
            ServiceError::Status { status, body, .. } => {
                assert_eq!(status, 404);
                assert_eq!(body, "missing");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_deserialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/employees"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = HttpEmployeeService::new(&server.uri());
        let err = client.get_employees().await.unwrap_err();
        assert!(matches!(err, ServiceError::Deserialization { .. }));
    }

    #[tokio::test]
    async fn test_add_employee_posts_camel_case() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/employees"))
            .and(body_partial_json(json!({"fullName": "Mark Smith"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(employee_json(5)))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpEmployeeService::new(&server.uri());
        let draft = Employee {
            full_name: "Mark Smith".into(),
            email: "mark@gmail.com".into(),
            ..Default::default()
        };
        let stored = client.add_employee(&draft).await.unwrap();
        assert_eq!(stored.id, 5);
    }

    #[tokio::test]
    async fn test_update_employee_puts_to_id() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/employees/3"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpEmployeeService::new(&server.uri());
        let employee = Employee {
            id: 3,
            ..Default::default()
        };
        client.update_employee(&employee).await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_service_is_http_error() {
        // Port 9 (discard) is not expected to serve HTTP
        let client = HttpEmployeeService::new("http://127.0.0.1:9");
        let err = client.get_employees().await.unwrap_err();
        assert!(matches!(err, ServiceError::Http { .. }));
    }
}
