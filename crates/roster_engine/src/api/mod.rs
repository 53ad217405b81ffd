/* 📖 # Why an API module in roster_engine?

The api module exposes the student registry over HTTP. ApiService implements
the HttpService trait from roster_base, so the same service runs on RealPal in
production and on MockPal in tests.

- service: routing, request body decoding and the CRUD handlers
- docs: the OpenAPI document and the Swagger UI page serving it
*/

mod docs;
mod service;

pub use docs::{ApiInfo, OPENAPI_PATH, openapi_document, viewer_page};
pub use service::ApiService;
