    use super::*;

    use crate::error::ClientError;

    #[test]
    fn urls_resolve_against_the_client_default_port() {
        let client = RemoteClient::with_default_port(4100).unwrap();
        assert_eq!(
            client.url("192.168.1.5", "/api/login").unwrap(),
            "http://192.168.1.5:4100/api/login"
        );
        assert_eq!(
            client.url("http://10.0.0.1:3000/", "/api/get-spaces").unwrap(),
            "http://10.0.0.1:3000/api/get-spaces"
        );
        assert!(matches!(
            client.url("", "/api/login"),
            Err(ClientError::Validation(_))
        ));
    }

    #[test]
    fn space_name_body_uses_db_name_key() {
        let body = serde_json::to_value(SpaceNameRequest {
            db_name: "alpha".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"dbName": "alpha"}));
    }

    #[test]
    fn login_and_list_payloads_tolerate_missing_fields() {
        let login: LoginResponse = serde_json::from_str(r#"{"message":"ok"}"#).unwrap();
        assert!(login.token.is_none());

        let spaces: SpacesResponse = serde_json::from_str("{}").unwrap();
        assert!(spaces.spaces.is_none());

        let spaces: SpacesResponse =
            serde_json::from_str(r#"{"spaces":["a","b"]}"#).unwrap();
        assert_eq!(spaces.spaces, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn malformed_body_is_a_parse_error() {
        let err = http_client::parse_body::<SpacesResponse>("<html>", "parse spaces").unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)), "{:?}", err);
    }

    #[test]
    fn connect_and_read_timeouts_are_five_seconds() {
        assert_eq!(CONNECT_TIMEOUT, std::time::Duration::from_secs(5));
        assert_eq!(READ_TIMEOUT, std::time::Duration::from_secs(5));
    }
