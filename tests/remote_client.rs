mod common;

use anyhow::Result;

use spacectl::error::ClientError;
use spacectl::model::{Auth, SpaceFilter, SpaceRef};
use spacectl::remote::{RemoteClient, SpaceApi};

#[test]
fn remote_client_round_trips_against_stub() -> Result<()> {
    let server = common::spawn_server(&["--indexed-space", "dev:archive"])?;
    let client = RemoteClient::new()?;
    let host = server.base_url.as_str();

    let token = client.login(host, "dev", "dev")?;
    let auth = Auth {
        host: host.to_string(),
        token,
    };

    client.create_space(&auth, "alpha")?;
    assert_eq!(
        client.list_spaces(&auth, SpaceFilter::All)?,
        vec![SpaceRef::new("archive"), SpaceRef::new("alpha")]
    );
    assert_eq!(
        client.list_spaces(&auth, SpaceFilter::Uninitialized)?,
        vec![SpaceRef::new("alpha")]
    );

    client.delete_space(&auth, "alpha")?;
    assert_eq!(
        client.list_spaces(&auth, SpaceFilter::Uninitialized)?,
        Vec::<SpaceRef>::new()
    );

    client.logout(&auth)?;
    let err = client.list_spaces(&auth, SpaceFilter::All).unwrap_err();
    assert!(err.needs_login(), "{:?}", err);
    Ok(())
}

#[test]
fn remote_client_surfaces_server_bodies_verbatim() -> Result<()> {
    let server = common::spawn_server(&[])?;
    let client = RemoteClient::new()?;
    let host = server.base_url.as_str();

    match client.login(host, "dev", "wrong").unwrap_err() {
        ClientError::Server { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid credentials"), "{}", body);
        }
        other => panic!("unexpected error {:?}", other),
    }

    let auth = Auth {
        host: host.to_string(),
        token: client.login(host, "dev", "dev")?,
    };
    match client.delete_space(&auth, "never-created").unwrap_err() {
        ClientError::Server { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("Space not found"), "{}", body);
        }
        other => panic!("unexpected error {:?}", other),
    }

    client.register(host, "newcomer", "pw")?;
    assert!(!client.login(host, "newcomer", "pw")?.is_empty());
    Ok(())
}

#[test]
fn unreachable_host_is_a_network_error() -> Result<()> {
    // Bind and drop to find a port nothing listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();
    let client = RemoteClient::with_default_port(port)?;
    let err = client.login("127.0.0.1", "dev", "dev").unwrap_err();
    assert!(matches!(err, ClientError::Network(_)), "{:?}", err);
    Ok(())
}

#[test]
fn silent_server_is_a_network_error_after_the_read_timeout() -> Result<()> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    std::thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });

    let client = RemoteClient::new()?;
    let started = std::time::Instant::now();
    let err = client
        .login(&format!("http://{}", addr), "dev", "dev")
        .unwrap_err();
    let elapsed = started.elapsed();

    assert!(matches!(err, ClientError::Network(_)), "{:?}", err);
    assert!(elapsed >= std::time::Duration::from_secs(4), "{:?}", elapsed);
    assert!(elapsed < std::time::Duration::from_secs(7), "{:?}", elapsed);
    Ok(())
}
