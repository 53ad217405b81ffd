/* 📖 # Why a single unified API service?

The ApiService is the one HttpService the server runs. It routes on method and
path itself:
- `POST /students` -> create
- `GET /students` -> list
- `GET|PUT|DELETE /students/{id}` -> get, replace, delete
- `GET /api-docs` -> Swagger UI page, `GET /api-docs/openapi.json` -> OpenAPI document
- anything else -> 404 `Cannot <METHOD> <path>`

Path segments match case-insensitively, and `HEAD` runs the `GET` handler with
the body dropped.

One service means one store handle, one place where bodies are decoded and one
place where JSON responses are produced.
*/

/* 📖 # Why is "Not Found" plain text when everything else is JSON?

Clients of this API already match on a 404 whose body is the bare text
`Not Found`. The inconsistency is kept so they keep working.
*/

use percent_encoding::percent_decode_str;
use roster_base::pal::http::{
    HttpBody, HttpMethod, HttpRequest, HttpResponse, HttpService, HttpStatusCode,
};
use roster_base::{RosterError, RosterResult};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::api::docs::{ApiInfo, OPENAPI_PATH, openapi_document, viewer_page};
use crate::store::StoreHandle;
use crate::student::{StudentFields, StudentId};

const STUDENTS_SEGMENT: &str = "students";
const DOCS_SEGMENT: &str = "api-docs";

/// The endpoint a request path addresses.
#[derive(Debug, PartialEq, Eq)]
enum Route<'a> {
    Students,
    Student(&'a str),
    Docs,
    DocsDocument,
    Unknown,
}

impl<'a> Route<'a> {
    fn parse(path: &'a str) -> Self {
        // A single trailing slash addresses the same route
        let path = match path.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => path,
        };
        let Some(rest) = path.strip_prefix('/') else {
            return Route::Unknown;
        };

        let segments: Vec<&str> = rest.split('/').collect();
        match segments.as_slice() {
            [collection] if collection.eq_ignore_ascii_case(STUDENTS_SEGMENT) => Route::Students,
            [collection, id] if collection.eq_ignore_ascii_case(STUDENTS_SEGMENT) && !id.is_empty() => {
                Route::Student(*id)
            }
            [docs] if docs.eq_ignore_ascii_case(DOCS_SEGMENT) => Route::Docs,
            _ if path.eq_ignore_ascii_case(OPENAPI_PATH) => Route::DocsDocument,
            _ => Route::Unknown,
        }
    }
}

/// HTTP service exposing the student registry and its documentation.
#[derive(Clone)]
pub struct ApiService {
    store: StoreHandle,
    api_info: ApiInfo,
}

impl ApiService {
    /// Create a new ApiService over the given registry.
    ///
    /// # Examples
    /// ```
    /// use roster_engine::{ApiInfo, ApiService, InMemoryStore, StoreHandle};
    ///
    /// let store = StoreHandle::new(InMemoryStore::new());
    /// let service = ApiService::new(store, ApiInfo::default());
    /// ```
    pub fn new(store: StoreHandle, api_info: ApiInfo) -> Self {
        Self { store, api_info }
    }

    /// Serialize data to JSON and wrap it in a response with the given status.
    fn serialize_json_response<T: Serialize>(
        status: HttpStatusCode,
        data: &T,
    ) -> RosterResult<HttpResponse> {
        serde_json::to_string(data)
            .map(|json| HttpResponse::json(json).with_status(status))
            .map_err(|e| roster_base::err!("JSON serialization error: {}", e))
    }

    /* 📖 # How are request bodies decoded?
    Like a lenient JSON body parser: only a JSON content type is parsed, so an
    empty body, a missing content type or a non-JSON one means "no fields". A
    JSON object is read field by field with every value kept as sent (unknown
    keys are ignored); a JSON array carries no named fields. Any other
    top-level value, or JSON that does not parse, is a bad request.
    */

    /// True for `application/json` and `*/*+json` media types, ignoring parameters.
    fn is_json_content_type(content_type: &str) -> bool {
        let media_type = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        media_type == "application/json"
            || media_type
                .split_once('/')
                .is_some_and(|(_, subtype)| subtype.ends_with("+json"))
    }

    /// Extract the student fields carried by a request body.
    fn decode_fields(request: &HttpRequest) -> RosterResult<StudentFields> {
        let body = request.body();
        if body.is_empty() {
            return Ok(StudentFields::default());
        }
        match request.headers().get("Content-Type") {
            Some(content_type) if Self::is_json_content_type(content_type) => {}
            content_type => {
                debug!(content_type = ?content_type, "ignoring non-JSON request body");
                return Ok(StudentFields::default());
            }
        }

        let value: Value = serde_json::from_slice(body.as_bytes()).map_err(|e| {
            Box::new(RosterError::bad_request(format!("malformed JSON body: {}", e)))
        })?;
        match value {
            Value::Object(object) => Ok(StudentFields::from_object(object)),
            Value::Array(_) => Ok(StudentFields::default()),
            _ => Err(Box::new(RosterError::bad_request(
                "request body must be a JSON object",
            ))),
        }
    }

    /// Decode a path segment into an id, or None if it cannot name any student.
    fn decode_id(raw: &str) -> RosterResult<Option<StudentId>> {
        let decoded = percent_decode_str(raw).decode_utf8().map_err(|_| {
            Box::new(RosterError::bad_request(format!(
                "failed to decode path parameter '{}'",
                raw
            )))
        })?;
        Ok(StudentId::parse_loose(&decoded))
    }

    #[instrument(skip(self, request))]
    fn create_student(&self, request: &HttpRequest) -> RosterResult<HttpResponse> {
        let fields = Self::decode_fields(request)?;
        let student = self.store.insert(fields)?;
        info!(student_id = %student.id, "student created");
        Self::serialize_json_response(HttpStatusCode::Created, &student)
    }

    fn list_students(&self) -> RosterResult<HttpResponse> {
        let students = self.store.list()?;
        debug!(count = students.len(), "listing students");
        Self::serialize_json_response(HttpStatusCode::Ok, &students)
    }

    #[instrument(skip(self))]
    fn get_student(&self, raw_id: &str) -> RosterResult<HttpResponse> {
        let Some(id) = Self::decode_id(raw_id)? else {
            return Ok(HttpResponse::not_found());
        };
        match self.store.get(id)? {
            Some(student) => Self::serialize_json_response(HttpStatusCode::Ok, &student),
            None => {
                debug!(student_id = %id, "student not found");
                Ok(HttpResponse::not_found())
            }
        }
    }

    #[instrument(skip(self, request))]
    fn update_student(&self, raw_id: &str, request: &HttpRequest) -> RosterResult<HttpResponse> {
        // Body errors take precedence over an unknown id
        let fields = Self::decode_fields(request)?;
        let Some(id) = Self::decode_id(raw_id)? else {
            return Ok(HttpResponse::not_found());
        };
        match self.store.replace(id, fields)? {
            Some(student) => {
                info!(student_id = %id, "student replaced");
                Self::serialize_json_response(HttpStatusCode::Ok, &student)
            }
            None => {
                debug!(student_id = %id, "student not found");
                Ok(HttpResponse::not_found())
            }
        }
    }

    #[instrument(skip(self))]
    fn delete_student(&self, raw_id: &str) -> RosterResult<HttpResponse> {
        if let Some(id) = Self::decode_id(raw_id)? {
            let removed = self.store.remove(id)?;
            info!(student_id = %id, removed, "student delete requested");
        }
        Ok(HttpResponse::no_content())
    }

    fn docs_page(&self) -> HttpResponse {
        HttpResponse::html(viewer_page(&self.api_info))
    }

    fn docs_document(&self) -> RosterResult<HttpResponse> {
        Self::serialize_json_response(HttpStatusCode::Ok, &openapi_document(&self.api_info))
    }

    /// Response for any method/path combination without a handler.
    fn unmatched(request: &HttpRequest) -> HttpResponse {
        warn!(method = %request.method(), path = %request.route_path(), "no route");
        HttpResponse::text(format!("Cannot {} {}", request.method(), request.route_path()))
            .with_status(HttpStatusCode::NotFound)
    }
}

impl std::fmt::Debug for ApiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiService")
            .field("api_info", &self.api_info)
            .finish()
    }
}

impl HttpService for ApiService {
    fn handle_request(&self, request: HttpRequest) -> RosterResult<HttpResponse> {
        let route = Route::parse(request.route_path());
        debug!(method = %request.method(), path = %request.path(), route = ?route, "routing request");

        let is_head = *request.method() == HttpMethod::Head;
        let method = if is_head {
            HttpMethod::Get
        } else {
            request.method().clone()
        };

        let response = match (method, route) {
            (HttpMethod::Post, Route::Students) => self.create_student(&request),
            (HttpMethod::Get, Route::Students) => self.list_students(),
            (HttpMethod::Get, Route::Student(id)) => self.get_student(id),
            (HttpMethod::Put, Route::Student(id)) => self.update_student(id, &request),
            (HttpMethod::Delete, Route::Student(id)) => self.delete_student(id),
            (HttpMethod::Get, Route::Docs) => Ok(self.docs_page()),
            (HttpMethod::Get, Route::DocsDocument) => self.docs_document(),
            _ => Ok(Self::unmatched(&request)),
        }?;

        if is_head {
            Ok(response.with_body(HttpBody::empty()))
        } else {
            Ok(response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use crate::student::Student;
    use expect_test::expect;
    use roster_base::pal::http::HttpServerConfig;
    use roster_base::{MockPal, Pal, RealPal};
    use serde_json::json;
    use std::io::{Read, Write};
    use std::net::TcpStream;

    fn create_test_service() -> (ApiService, StoreHandle) {
        let store = StoreHandle::new(InMemoryStore::new());
        (ApiService::new(store.clone(), ApiInfo::default()), store)
    }

    fn json_request(method: HttpMethod, path: &str, body: Value) -> HttpRequest {
        HttpRequest::new(method, path)
            .with_header("Content-Type", "application/json")
            .with_body(body.to_string())
    }

    fn send(service: &ApiService, request: HttpRequest) -> HttpResponse {
        service.handle_request(request).unwrap()
    }

    fn body_json(response: &HttpResponse) -> Value {
        serde_json::from_slice(response.body().as_bytes()).unwrap()
    }

    fn create(service: &ApiService, body: Value) -> Student {
        let response = send(service, json_request(HttpMethod::Post, "/students", body));
        assert_eq!(response.status(), HttpStatusCode::Created);
        serde_json::from_slice(response.body().as_bytes()).unwrap()
    }

    fn sample(name: &str) -> Value {
        json!({ "name": name, "age": 20, "email": "a@x.com", "course": "CS" })
    }

    #[test]
    fn test_route_parse() {
        assert_eq!(Route::parse("/students"), Route::Students);
        assert_eq!(Route::parse("/students/"), Route::Students);
        assert_eq!(Route::parse("/students/12"), Route::Student("12"));
        assert_eq!(Route::parse("/students/12/"), Route::Student("12"));
        assert_eq!(Route::parse("/api-docs"), Route::Docs);
        assert_eq!(Route::parse("/api-docs/"), Route::Docs);
        assert_eq!(Route::parse("/api-docs/openapi.json"), Route::DocsDocument);
        assert_eq!(Route::parse("/students/1/grades"), Route::Unknown);
        assert_eq!(Route::parse("/students//"), Route::Unknown);
        assert_eq!(Route::parse("/"), Route::Unknown);
    }

    #[test]
    fn test_route_parse_ignores_case() {
        assert_eq!(Route::parse("/Students"), Route::Students);
        assert_eq!(Route::parse("/STUDENTS/7"), Route::Student("7"));
        assert_eq!(Route::parse("/API-Docs"), Route::Docs);
        assert_eq!(Route::parse("/api-docs/OpenAPI.json"), Route::DocsDocument);
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let (service, _store) = create_test_service();

        let response = send(&service, json_request(HttpMethod::Post, "/students", sample("A")));
        assert_eq!(response.status(), HttpStatusCode::Created);
        assert_eq!(
            response.headers().get("Content-Type"),
            Some(&"application/json".to_string())
        );
        expect![[r#"{"id":1,"name":"A","age":20,"email":"a@x.com","course":"CS"}"#]]
            .assert_eq(&response.body().as_string().unwrap());

        assert_eq!(create(&service, sample("B")).id, StudentId::new(2));
    }

    #[test]
    fn test_ids_keep_increasing_across_deletes() {
        let (service, _store) = create_test_service();
        let first = create(&service, sample("A"));
        let response = send(&service, HttpRequest::new(HttpMethod::Delete, "/students/1"));
        assert_eq!(response.status(), HttpStatusCode::NoContent);

        let second = create(&service, sample("B"));
        assert_eq!(first.id, StudentId::new(1));
        assert_eq!(second.id, StudentId::new(2));
    }

    #[test]
    fn test_create_with_missing_fields_stores_them_absent() {
        let (service, store) = create_test_service();
        let response = send(
            &service,
            json_request(HttpMethod::Post, "/students", json!({ "name": "Solo" })),
        );
        expect![[r#"{"id":1,"name":"Solo"}"#]].assert_eq(&response.body().as_string().unwrap());
        assert_eq!(store.get(StudentId::FIRST).unwrap().unwrap().fields.email, None);
    }

    #[test]
    fn test_create_without_body_or_with_form_body() {
        let (service, _store) = create_test_service();

        let response = send(&service, HttpRequest::new(HttpMethod::Post, "/students"));
        expect![[r#"{"id":1}"#]].assert_eq(&response.body().as_string().unwrap());

        let form = HttpRequest::new(HttpMethod::Post, "/students")
            .with_header("Content-Type", "application/x-www-form-urlencoded")
            .with_body("name=A&age=20");
        let response = send(&service, form);
        expect![[r#"{"id":2}"#]].assert_eq(&response.body().as_string().unwrap());

        let array = json_request(HttpMethod::Post, "/students", json!(["A", 20]));
        let response = send(&service, array);
        expect![[r#"{"id":3}"#]].assert_eq(&response.body().as_string().unwrap());
    }

    #[test]
    fn test_create_keeps_field_values_as_sent() {
        let (service, _store) = create_test_service();

        let cases = [
            (json!({ "age": "twenty" }), r#"{"id":1,"age":"twenty"}"#),
            (json!({ "age": 20.5 }), r#"{"id":2,"age":20.5}"#),
            (json!({ "name": 5 }), r#"{"id":3,"name":5}"#),
            (json!({ "age": "20" }), r#"{"id":4,"age":"20"}"#),
            (json!({ "name": null }), r#"{"id":5,"name":null}"#),
        ];
        for (body, expected) in cases {
            let response = send(&service, json_request(HttpMethod::Post, "/students", body));
            assert_eq!(response.status(), HttpStatusCode::Created, "{}", expected);
            assert_eq!(response.body().as_string().unwrap(), expected);
        }

        let fetched = send(&service, HttpRequest::new(HttpMethod::Get, "/students/1"));
        assert_eq!(fetched.body().as_string().unwrap(), r#"{"id":1,"age":"twenty"}"#);
    }

    #[test]
    fn test_create_parses_only_json_content_types() {
        let (service, _store) = create_test_service();
        let body = r#"{"name":"NoCT"}"#;

        let untyped = HttpRequest::new(HttpMethod::Post, "/students").with_body(body);
        expect![[r#"{"id":1}"#]].assert_eq(&send(&service, untyped).body().as_string().unwrap());

        let text = HttpRequest::new(HttpMethod::Post, "/students")
            .with_header("Content-Type", "text/plain")
            .with_body(body);
        expect![[r#"{"id":2}"#]].assert_eq(&send(&service, text).body().as_string().unwrap());

        let not_json = HttpRequest::new(HttpMethod::Post, "/students")
            .with_header("Content-Type", "application/jsonp")
            .with_body(body);
        expect![[r#"{"id":3}"#]].assert_eq(&send(&service, not_json).body().as_string().unwrap());

        let with_charset = HttpRequest::new(HttpMethod::Post, "/students")
            .with_header("content-type", "Application/JSON; charset=utf-8")
            .with_body(body);
        expect![[r#"{"id":4,"name":"NoCT"}"#]]
            .assert_eq(&send(&service, with_charset).body().as_string().unwrap());

        let suffixed = HttpRequest::new(HttpMethod::Post, "/students")
            .with_header("Content-Type", "application/merge-patch+json")
            .with_body(body);
        expect![[r#"{"id":5,"name":"NoCT"}"#]]
            .assert_eq(&send(&service, suffixed).body().as_string().unwrap());
    }

    #[test]
    fn test_create_malformed_json_is_bad_request() {
        let (service, store) = create_test_service();
        let request = HttpRequest::new(HttpMethod::Post, "/students")
            .with_header("Content-Type", "application/json")
            .with_body("{\"name\": ");
        let err = service.handle_request(request).unwrap_err();
        assert!(err.is_bad_request());
        assert!(err.to_string().starts_with("malformed JSON body"));
        assert!(store.is_empty().unwrap());

        let scalar = json_request(HttpMethod::Post, "/students", json!(42));
        assert!(service.handle_request(scalar).unwrap_err().is_bad_request());

        let text = json_request(HttpMethod::Post, "/students", json!("student"));
        assert!(service.handle_request(text).unwrap_err().is_bad_request());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_list_returns_records_in_creation_order() {
        let (service, _store) = create_test_service();
        let empty = send(&service, HttpRequest::new(HttpMethod::Get, "/students"));
        assert_eq!(empty.status(), HttpStatusCode::Ok);
        assert_eq!(empty.body().as_string().unwrap(), "[]");

        for name in ["C", "A", "B"] {
            create(&service, sample(name));
        }
        let response = send(&service, HttpRequest::new(HttpMethod::Get, "/students"));
        let listed: Vec<Student> = serde_json::from_slice(response.body().as_bytes()).unwrap();
        let names: Vec<_> = listed.iter().map(|s| s.fields.name.clone().unwrap()).collect();
        assert_eq!(names, vec![json!("C"), json!("A"), json!("B")]);
        assert_eq!(listed.len(), 3);
    }

    #[test]
    fn test_get_round_trip() {
        let (service, _store) = create_test_service();
        let created = create(&service, sample("A"));

        let response = send(
            &service,
            HttpRequest::new(HttpMethod::Get, format!("/students/{}", created.id)),
        );
        assert_eq!(response.status(), HttpStatusCode::Ok);
        let fetched: Student = serde_json::from_slice(response.body().as_bytes()).unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn test_get_missing_is_plain_text_not_found() {
        let (service, _store) = create_test_service();
        create(&service, sample("A"));

        for path in ["/students/9999", "/students/abc", "/students/1.5"] {
            let response = send(&service, HttpRequest::new(HttpMethod::Get, path));
            assert_eq!(response.status(), HttpStatusCode::NotFound, "{}", path);
            assert_eq!(response.body().as_string().unwrap(), "Not Found");
            assert_eq!(
                response.headers().get("content-type"),
                Some(&"text/plain; charset=utf-8".to_string())
            );
        }
    }

    #[test]
    fn test_get_matches_ids_loosely() {
        let (service, _store) = create_test_service();
        create(&service, sample("A"));

        for path in ["/students/01", "/students/1.0", "/students/%201", "/students/1?x=2"] {
            let response = send(&service, HttpRequest::new(HttpMethod::Get, path));
            assert_eq!(response.status(), HttpStatusCode::Ok, "{}", path);
            assert_eq!(body_json(&response)["id"], 1);
        }
    }

    #[test]
    fn test_invalid_percent_encoding_is_bad_request() {
        let (service, _store) = create_test_service();
        let err = service
            .handle_request(HttpRequest::new(HttpMethod::Get, "/students/%FF"))
            .unwrap_err();
        assert!(err.is_bad_request());
    }

    #[test]
    fn test_update_replaces_all_fields() {
        let (service, _store) = create_test_service();
        create(&service, sample("A"));

        let replacement = json!({ "name": "Z", "age": 33, "email": "z@y.org", "course": "Art" });
        let response = send(&service, json_request(HttpMethod::Put, "/students/1", replacement));
        assert_eq!(response.status(), HttpStatusCode::Ok);
        expect![[r#"{"id":1,"name":"Z","age":33,"email":"z@y.org","course":"Art"}"#]]
            .assert_eq(&response.body().as_string().unwrap());
    }

    #[test]
    fn test_partial_update_does_not_keep_old_values() {
        let (service, _store) = create_test_service();
        create(&service, sample("A"));

        let response = send(
            &service,
            json_request(HttpMethod::Put, "/students/1", json!({ "course": "Math" })),
        );
        expect![[r#"{"id":1,"course":"Math"}"#]].assert_eq(&response.body().as_string().unwrap());

        let fetched = send(&service, HttpRequest::new(HttpMethod::Get, "/students/1"));
        let fetched = body_json(&fetched);
        assert!(fetched.get("name").is_none());
        assert!(fetched.get("age").is_none());
        assert!(fetched.get("email").is_none());
    }

    #[test]
    fn test_update_uses_parsed_path_id() {
        let (service, _store) = create_test_service();
        create(&service, sample("A"));

        let response = send(
            &service,
            json_request(HttpMethod::Put, "/students/01", json!({ "id": 77, "name": "B" })),
        );
        assert_eq!(response.status(), HttpStatusCode::Ok);
        expect![[r#"{"id":1,"name":"B"}"#]].assert_eq(&response.body().as_string().unwrap());
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let (service, store) = create_test_service();
        create(&service, sample("A"));

        let response = send(&service, json_request(HttpMethod::Put, "/students/5", sample("X")));
        assert_eq!(response.status(), HttpStatusCode::NotFound);
        assert_eq!(response.body().as_string().unwrap(), "Not Found");
        assert_eq!(store.len().unwrap(), 1);

        let bad_body = HttpRequest::new(HttpMethod::Put, "/students/5")
            .with_header("Content-Type", "application/json")
            .with_body("{");
        assert!(service.handle_request(bad_body).unwrap_err().is_bad_request());
    }

    #[test]
    fn test_delete_existing_then_get_is_not_found() {
        let (service, store) = create_test_service();
        create(&service, sample("A"));
        create(&service, sample("B"));

        let response = send(&service, HttpRequest::new(HttpMethod::Delete, "/students/1"));
        assert_eq!(response.status(), HttpStatusCode::NoContent);
        assert!(response.body().is_empty());
        assert_eq!(store.len().unwrap(), 1);

        let response = send(&service, HttpRequest::new(HttpMethod::Get, "/students/1"));
        assert_eq!(response.status(), HttpStatusCode::NotFound);
        let response = send(&service, HttpRequest::new(HttpMethod::Get, "/students/2"));
        assert_eq!(response.status(), HttpStatusCode::Ok);
    }

    #[test]
    fn test_delete_missing_is_still_no_content() {
        let (service, store) = create_test_service();
        create(&service, sample("A"));
        let before = store.list().unwrap();

        for path in ["/students/9999", "/students/abc"] {
            let response = send(&service, HttpRequest::new(HttpMethod::Delete, path));
            assert_eq!(response.status(), HttpStatusCode::NoContent, "{}", path);
        }
        assert_eq!(store.list().unwrap(), before);
    }

    #[test]
    fn test_unmatched_routes() {
        let (service, _store) = create_test_service();

        let response = send(&service, HttpRequest::new(HttpMethod::Patch, "/students/1"));
        assert_eq!(response.status(), HttpStatusCode::NotFound);
        assert_eq!(response.body().as_string().unwrap(), "Cannot PATCH /students/1");

        let response = send(&service, HttpRequest::new(HttpMethod::Delete, "/students"));
        assert_eq!(response.body().as_string().unwrap(), "Cannot DELETE /students");

        let response = send(&service, HttpRequest::new(HttpMethod::Get, "/courses?all=1"));
        assert_eq!(response.body().as_string().unwrap(), "Cannot GET /courses");
    }

    #[test]
    fn test_mixed_case_paths_reach_handlers() {
        let (service, _store) = create_test_service();
        let response = send(&service, json_request(HttpMethod::Post, "/Students", sample("A")));
        assert_eq!(response.status(), HttpStatusCode::Created);

        let response = send(&service, HttpRequest::new(HttpMethod::Get, "/STUDENTS/1"));
        assert_eq!(response.status(), HttpStatusCode::Ok);
        assert_eq!(body_json(&response)["name"], "A");
    }

    #[test]
    fn test_head_runs_get_handlers_without_body() {
        let (service, _store) = create_test_service();
        create(&service, sample("A"));

        let response = send(&service, HttpRequest::new(HttpMethod::Head, "/students"));
        assert_eq!(response.status(), HttpStatusCode::Ok);
        assert_eq!(
            response.headers().get("Content-Type"),
            Some(&"application/json".to_string())
        );
        assert!(response.body().is_empty());

        let response = send(&service, HttpRequest::new(HttpMethod::Head, "/students/1"));
        assert_eq!(response.status(), HttpStatusCode::Ok);
        assert!(response.body().is_empty());

        let response = send(&service, HttpRequest::new(HttpMethod::Head, "/students/9"));
        assert_eq!(response.status(), HttpStatusCode::NotFound);
        assert!(response.body().is_empty());

        let response = send(&service, HttpRequest::new(HttpMethod::Head, "/courses"));
        assert_eq!(response.status(), HttpStatusCode::NotFound);
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_docs_endpoints() {
        let (service, _store) = create_test_service();

        let page = send(&service, HttpRequest::new(HttpMethod::Get, "/api-docs/"));
        assert_eq!(page.status(), HttpStatusCode::Ok);
        assert_eq!(
            page.headers().get("Content-Type"),
            Some(&"text/html; charset=utf-8".to_string())
        );
        assert!(page.body().as_string().unwrap().contains("SwaggerUIBundle"));

        let document = send(&service, HttpRequest::new(HttpMethod::Get, "/api-docs/openapi.json"));
        let document = body_json(&document);
        assert_eq!(document["info"]["title"], "Student CRUD API");
        assert!(document["paths"]["/students"].is_object());
        assert!(document["paths"]["/students/{id}"].is_object());
    }

    #[test]
    fn test_service_through_mock_pal() {
        let pal = MockPal::new();
        let (service, _store) = create_test_service();
        let handle = pal
            .start_http_server(
                Box::new(service),
                HttpServerConfig::new("0.0.0.0").with_port(3000),
            )
            .unwrap();

        let created = pal
            .simulate_request(
                handle.port(),
                json_request(HttpMethod::Post, "/students", sample("A")),
            )
            .unwrap();
        assert_eq!(created.status(), HttpStatusCode::Created);

        let listed = pal
            .simulate_request(handle.port(), HttpRequest::new(HttpMethod::Get, "/students"))
            .unwrap();
        assert_eq!(body_json(&listed).as_array().map(Vec::len), Some(1));
    }

    fn send_raw(port: u16, raw: &str) -> String {
        let mut stream = TcpStream::connect(("127.0.0.1", port)).unwrap();
        stream.write_all(raw.as_bytes()).unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();
        response
    }

    #[test]
    fn test_service_over_real_http() {
        let pal = RealPal::new(std::env::temp_dir());
        let (service, store) = create_test_service();
        let handle = pal
            .start_http_server(Box::new(service), HttpServerConfig::new("127.0.0.1"))
            .unwrap();

        let body = r#"{"name":"A","age":20,"email":"a@x.com","course":"CS"}"#;
        let response = send_raw(
            handle.port(),
            &format!(
                "POST /students HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            ),
        );
        assert!(response.starts_with("HTTP/1.1 201"), "{}", response);
        assert!(
            response.ends_with(r#"{"id":1,"name":"A","age":20,"email":"a@x.com","course":"CS"}"#),
            "{}",
            response
        );
        assert_eq!(store.len().unwrap(), 1);

        let response = send_raw(
            handle.port(),
            "GET /students/42 HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        );
        assert!(response.starts_with("HTTP/1.1 404"), "{}", response);
        assert!(response.ends_with("Not Found"), "{}", response);

        let response = send_raw(
            handle.port(),
            "POST /students HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: 1\r\nConnection: close\r\n\r\n{",
        );
        assert!(response.starts_with("HTTP/1.1 400"), "{}", response);
        assert!(response.contains("Bad Request: malformed JSON body"), "{}", response);

        handle.shutdown();
    }
}
