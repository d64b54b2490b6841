use super::*;

pub(crate) fn handle_login_command(
    app: &App,
    host: Option<String>,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let host = resolve_host(app, host)?;
    let password = resolve_password(password)?;

    let mut screen = app.open_login()?;
    screen.submit(&host, username, &password)?;
    app.drive(&mut screen, NETWORK_WAIT)?;

    if let Some(err) = screen.login().last_error() {
        return Err(surface(err)).context("login");
    }
    println!("Logged in to {} as {}", host, username);
    Ok(())
}

pub(crate) fn handle_logout_command(app: &App, remote: bool) -> Result<()> {
    if !app.services().store.get().has_token() {
        println!("Not logged in");
        return Ok(());
    }
    let mut screen = app.open_login()?;
    screen.logout(remote)?;
    app.drive(&mut screen, NETWORK_WAIT)?;
    println!("Logged out");
    Ok(())
}

pub(crate) fn handle_status_command(app: &App, json: bool) -> Result<()> {
    let session = app.services().store.get();
    let route = app.start_route();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "server_host": session.server_host,
                "logged_in": route == Route::Home,
            }))
            .context("serialize status json")?
        );
        return Ok(());
    }

    let host = if session.server_host.is_empty() {
        "(none)"
    } else {
        session.server_host.as_str()
    };
    println!("server: {}", host);
    match route {
        Route::Home => println!("session: logged in"),
        Route::Login => println!("session: logged out"),
    }
    Ok(())
}

pub(crate) fn handle_register_command(
    app: &App,
    host: Option<String>,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let host = resolve_host(app, host)?;
    let password = resolve_password(password)?;

    let mut screen = app.open_login()?;
    screen.register(&host, username, &password)?;
    app.drive(&mut screen, NETWORK_WAIT)?;

    match screen.login().registration() {
        Some(Ok(())) => {
            println!("Registered {} on {}", username, host);
            Ok(())
        }
        Some(Err(err)) => Err(surface(err)).context("register"),
        None => Err(anyhow!("registration did not complete")),
    }
}
