/* 📖 # Why build the OpenAPI document with serde_json::json!?

The API has five operations and they change rarely, so the document is written
out next to the routes it describes rather than derived from annotations. The
`json!` macro keeps it close to the shape of the published document while still
going through serde for escaping (the title and version come from config).
*/

use serde_json::{Value, json};

/// Path the OpenAPI document is served from.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Metadata describing the API in its documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiInfo {
    /// Document title (e.g. "Student CRUD API")
    pub title: String,
    /// API version string
    pub version: String,
}

impl ApiInfo {
    /// Create API info with a title and the default version.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: "1.0.0".to_string(),
        }
    }

    /// Set the API version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

impl Default for ApiInfo {
    fn default() -> Self {
        Self::new("Student CRUD API")
    }
}

fn student_properties() -> Value {
    json!({
        "name": { "type": "string" },
        "age": { "type": "integer" },
        "email": { "type": "string" },
        "course": { "type": "string" }
    })
}

fn id_parameter() -> Value {
    json!([{
        "in": "path",
        "name": "id",
        "required": true,
        "schema": { "type": "integer" }
    }])
}

fn json_body(schema_ref: &str) -> Value {
    json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": schema_ref }
            }
        }
    })
}

fn json_response(description: &str, schema: Value) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": schema } }
    })
}

fn not_found_response() -> Value {
    json!({
        "description": "Student not found",
        "content": { "text/plain": { "schema": { "type": "string", "example": "Not Found" } } }
    })
}

/// Build the OpenAPI 3.0 document describing the student endpoints.
pub fn openapi_document(info: &ApiInfo) -> Value {
    let student_ref = json!({ "$ref": "#/components/schemas/Student" });

    let mut student_schema_properties = student_properties();
    student_schema_properties["id"] = json!({ "type": "integer", "minimum": 1 });

    json!({
        "openapi": "3.0.0",
        "info": {
            "title": info.title,
            "version": info.version
        },
        "paths": {
            "/students": {
                "post": {
                    "summary": "Create a new student",
                    "requestBody": json_body("#/components/schemas/NewStudent"),
                    "responses": {
                        "201": json_response("Student created", student_ref.clone())
                    }
                },
                "get": {
                    "summary": "Get all students",
                    "responses": {
                        "200": json_response(
                            "List of students",
                            json!({ "type": "array", "items": student_ref.clone() })
                        )
                    }
                }
            },
            "/students/{id}": {
                "get": {
                    "summary": "Get a student by ID",
                    "parameters": id_parameter(),
                    "responses": {
                        "200": json_response("Student found", student_ref.clone()),
                        "404": not_found_response()
                    }
                },
                "put": {
                    "summary": "Update a student by ID",
                    "parameters": id_parameter(),
                    "requestBody": json_body("#/components/schemas/StudentUpdate"),
                    "responses": {
                        "200": json_response("Student updated", student_ref.clone()),
                        "404": not_found_response()
                    }
                },
                "delete": {
                    "summary": "Delete a student by ID",
                    "parameters": id_parameter(),
                    "responses": {
                        "204": { "description": "Student deleted" }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Student": {
                    "type": "object",
                    "properties": student_schema_properties
                },
                "NewStudent": {
                    "type": "object",
                    "required": ["name", "age", "email", "course"],
                    "properties": student_properties()
                },
                "StudentUpdate": {
                    "type": "object",
                    "properties": student_properties()
                }
            }
        }
    })
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// HTML page that boots the Swagger UI viewer against [`OPENAPI_PATH`].
pub fn viewer_page(info: &ApiInfo) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>{title}</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = function () {{
      window.ui = SwaggerUIBundle({{ url: "{document}", dom_id: "#swagger-ui" }});
    }};
  </script>
</body>
</html>
"##,
        title = escape_html(&info.title),
        document = OPENAPI_PATH,
    )
}
