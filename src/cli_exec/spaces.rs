use super::*;

pub(crate) fn handle_list_command(app: &App, uninitialized: bool, json: bool) -> Result<()> {
    let filter = if uninitialized {
        SpaceFilter::Uninitialized
    } else {
        SpaceFilter::All
    };
    let mut screen = app.open_space_picker(filter).map_err(|e| surface(&e))?;
    screen.refresh().map_err(|e| surface(&e))?;
    app.drive(&mut screen, NETWORK_WAIT)?;

    let list = screen.list();
    if let Some(err) = list.last_error() {
        return Err(surface(err)).context("list spaces");
    }
    let names: Vec<&str> = list.spaces().iter().map(|s| s.name.as_str()).collect();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "spaces": names }))
                .context("serialize space list json")?
        );
        return Ok(());
    }
    match list.view() {
        ListView::Spaces(_) => {
            for name in names {
                println!("{}", name);
            }
        }
        _ => println!("No spaces found."),
    }
    Ok(())
}

pub(crate) fn handle_create_command(app: &App, name: &str) -> Result<()> {
    let mut screen = app.open_create_space()?;
    screen.create(name).map_err(|e| surface(&e))?;
    app.drive(&mut screen, NETWORK_WAIT)?;

    let mutation = screen.mutation();
    if let Some(err) = mutation.create_error() {
        return Err(surface(err)).context(format!("create space {}", name.trim()));
    }
    println!("Created {}", name.trim());
    Ok(())
}

/// Loads the list first; only listed spaces can be deleted.
pub(crate) fn handle_delete_command(app: &App, names: &[String]) -> Result<()> {
    let mut screen = app.open_delete_space()?;
    screen.refresh().map_err(|e| surface(&e))?;
    app.drive(&mut screen, NETWORK_WAIT)?;
    if let Some(err) = screen.list().last_error() {
        return Err(surface(err)).context("list spaces");
    }

    let mut failed = 0usize;
    let mut submitted = Vec::new();
    for name in names {
        match screen.delete(name) {
            Ok(true) => submitted.push(name),
            Ok(false) => {}
            Err(err) => {
                eprintln!("Failed to delete {}: {}", name, surface(&err));
                failed += 1;
            }
        }
    }
    app.drive(&mut screen, NETWORK_WAIT)?;

    for name in submitted {
        match screen.mutation().delete_error(name) {
            Some(err) => {
                eprintln!("Failed to delete {}: {}", name, err);
                failed += 1;
            }
            None => println!("Deleted {}", name),
        }
    }
    if failed > 0 {
        bail!("{} of {} delete(s) failed", failed, names.len());
    }
    Ok(())
}
