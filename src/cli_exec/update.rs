use super::*;

/// Splits `path[:tag]`. A suffix that is not a number stays part of the path.
fn parse_file_arg(arg: &str) -> (PathBuf, Option<&str>) {
    if let Some((path, tag)) = arg.rsplit_once(':')
        && !path.is_empty()
        && !tag.is_empty()
        && tag.trim().trim_start_matches('-').chars().all(|c| c.is_ascii_digit())
    {
        return (PathBuf::from(path), Some(tag));
    }
    (PathBuf::from(arg), None)
}

pub(crate) fn handle_update_command(app: &App, space: Option<&str>, files: &[String]) -> Result<()> {
    let mut screen = app.open_update()?;
    screen.refresh().map_err(|e| surface(&e))?;
    app.drive(&mut screen, NETWORK_WAIT)?;
    if let Some(err) = screen.spaces().last_error() {
        return Err(surface(err)).context("list uninitialized spaces");
    }
    if !screen.can_add_files() {
        bail!("no uninitialized space to update");
    }
    if let Some(name) = space {
        screen.select_space(name).map_err(|e| surface(&e))?;
    }

    for arg in files {
        let (path, tag) = parse_file_arg(arg);
        let id = screen.add_file(path).map_err(|e| surface(&e))?;
        if let Some(tag) = tag {
            screen.set_tag(id, tag);
        }
    }

    let target = screen
        .stager()
        .target()
        .map(|s| s.name.clone())
        .unwrap_or_default();
    for row in screen.stager().rows() {
        tracing::debug!(file = %row.name, tag = %row.tag, "staged selection");
    }

    screen.submit().map_err(|e| surface(&e)).context("update")?;
    app.drive(&mut screen, INDEX_WAIT)?;

    let stager = screen.stager();
    if let Some(err) = stager.last_error() {
        return Err(surface(err)).context(format!("update {}", target));
    }
    match stager.last_summary() {
        Some(summary) => println!("{}", summary),
        None => println!("Updated {}", target),
    }
    Ok(())
}
