/* 📖 # PAL cross-implementation tests

The same expectations are checked against MockPal and RealPal so code written
against the Pal trait behaves identically in tests and in production.
*/

#[cfg(test)]
mod pal_trait_tests {
    use crate::pal::http::{
        HttpMethod, HttpRequest, HttpResponse, HttpServerConfig, HttpService,
    };
    use crate::pal::{FilePath, MockPal, Pal, PalHandle, RealPal};
    use crate::{ErrorKind, RosterResult};
    use std::fs;
    use tempfile::TempDir;

    fn check_file_semantics(pal: &dyn Pal) {
        assert!(pal.file_exists(&FilePath::from("roster.toml")).unwrap());
        assert_eq!(
            pal.read_file_to_string(&FilePath::from("roster.toml")).unwrap(),
            "port = 4000\n"
        );

        let missing = pal.read_file(&FilePath::from("absent.toml"));
        match missing {
            Err(err) => assert!(matches!(err.kind(), ErrorKind::FileError { .. })),
            Ok(_) => panic!("reading an absent file should fail"),
        }
    }

    #[test]
    fn test_mock_pal_file_semantics() {
        let mock = MockPal::new();
        mock.add_file(FilePath::from("roster.toml"), b"port = 4000\n".to_vec());
        check_file_semantics(&mock);
    }

    #[test]
    fn test_real_pal_file_semantics() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("roster.toml"), "port = 4000\n").unwrap();
        let pal = RealPal::new(temp_dir.path().to_path_buf());
        check_file_semantics(&pal);
    }

    #[derive(Debug)]
    struct HelloService;

    impl HttpService for HelloService {
        fn handle_request(&self, _request: HttpRequest) -> RosterResult<HttpResponse> {
            Ok(HttpResponse::text("hello"))
        }
    }

    #[test]
    fn test_pal_handle_deref_starts_server() {
        let mock = MockPal::new();
        let handle = PalHandle::new(mock.clone());
        let server = handle
            .start_http_server(
                Box::new(HelloService),
                HttpServerConfig::new("127.0.0.1").with_port(3000),
            )
            .unwrap();

        let response = mock
            .simulate_request(server.port(), HttpRequest::new(HttpMethod::Get, "/"))
            .unwrap();
        assert_eq!(response.body().as_string(), Some("hello".to_string()));
    }
}
