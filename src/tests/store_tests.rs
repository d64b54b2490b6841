    use super::*;

    #[test]
    fn fresh_state_dir_has_no_session() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = FileSessionStore::open(dir.path())?;
        let session = store.get();
        assert!(!session.has_token());
        assert_eq!(session.server_host, "");
        assert!(!dir.path().join(SESSION_FILE).exists());
        Ok(())
    }

    #[test]
    fn token_survives_reopen_and_logout_keeps_host() -> Result<()> {
        let dir = tempfile::tempdir()?;
        {
            let store = FileSessionStore::open(dir.path())?;
            store.set_token("abc123", "192.168.1.5")?;
            assert_eq!(store.get().auth_token.as_deref(), Some("abc123"));
        }

        let store = FileSessionStore::open(dir.path())?;
        let session = store.get();
        assert_eq!(session.server_host, "192.168.1.5");
        assert_eq!(session.auth_token.as_deref(), Some("abc123"));

        store.clear()?;
        let reopened = FileSessionStore::open(dir.path())?;
        let session = reopened.get();
        assert!(!session.has_token());
        assert_eq!(session.server_host, "192.168.1.5");
        Ok(())
    }

    #[test]
    fn empty_token_is_rejected_and_nothing_written() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = FileSessionStore::open(dir.path())?;
        let err = store.set_token("", "h").unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)), "{:?}", err);
        assert!(!dir.path().join(SESSION_FILE).exists());

        let mem = MemorySessionStore::new();
        assert!(mem.set_token("", "h").is_err());
        assert!(!mem.get().has_token());
        Ok(())
    }

    #[test]
    fn persisted_empty_token_reads_as_absent() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(
            dir.path().join(SESSION_FILE),
            r#"{"version":1,"last_server_host":"h","auth_token":""}"#,
        )?;
        let store = FileSessionStore::open(dir.path())?;
        assert!(!store.get().has_token());
        assert_eq!(store.get().server_host, "h");
        Ok(())
    }

    #[test]
    fn newer_session_version_is_refused() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join(SESSION_FILE), r#"{"version":2}"#)?;
        let err = match FileSessionStore::open(dir.path()) {
            Ok(_) => panic!("expected version error"),
            Err(err) => err,
        };
        assert!(
            err.to_string().contains("unsupported session record version 2"),
            "{:#}",
            err
        );
        Ok(())
    }

    #[test]
    fn write_leaves_no_temp_files() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = FileSessionStore::open(dir.path())?;
        store.set_token("t", "h")?;
        store.clear()?;
        let names: Vec<String> = fs::read_dir(dir.path())?
            .map(|e| e.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<std::io::Result<_>>()?;
        assert_eq!(names, vec![SESSION_FILE.to_string()]);
        Ok(())
    }

    #[test]
    fn memory_store_clear_keeps_host() -> Result<()> {
        let store = MemorySessionStore::new();
        store.set_token("t", "10.0.0.1")?;
        assert!(store.get().has_token());
        store.clear()?;
        assert_eq!(
            store.get(),
            Session {
                server_host: "10.0.0.1".to_string(),
                auth_token: None,
            }
        );
        Ok(())
    }

    #[test]
    fn config_round_trips_and_rejects_unknown_version() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let cfg = read_config(dir.path())?;
        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.default_port, 3000);

        let custom = ClientConfig {
            default_port: 4000,
            indexer_program: Some(PathBuf::from("/usr/local/bin/space-indexer")),
            ..ClientConfig::default()
        };
        write_config(dir.path(), &custom)?;
        let read = read_config(dir.path())?;
        assert_eq!(read.default_port, 4000);
        assert_eq!(
            read.indexer_program,
            Some(PathBuf::from("/usr/local/bin/space-indexer"))
        );

        fs::write(dir.path().join(CONFIG_FILE), r#"{"version":7}"#)?;
        let err = read_config(dir.path()).unwrap_err();
        assert!(err.to_string().contains("unsupported config version 7"), "{:#}", err);
        Ok(())
    }
