use anyhow::{bail, Context};
use anchorkit::{init_logging, EditorConfig, PathEditor, Transform, BUILD_DATE, VERSION};

const USAGE: &str = "usage: anchorkit <path-data> [--json]";

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let mut data = None;
    let mut json = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "--version" => {
                println!("anchorkit {} ({})", VERSION, BUILD_DATE);
                return Ok(());
            }
            _ if data.is_none() => data = Some(arg),
            _ => bail!(USAGE),
        }
    }
    let Some(data) = data else {
        bail!(USAGE);
    };

    let config = EditorConfig::default_path()
        .and_then(|path| EditorConfig::load_or_default(&path))
        .context("loading editor settings")?;
    tracing::debug!("editor settings: {:?}", config);

    let mut editor = PathEditor::with_config(config);
    let outcome = editor
        .load(&data, Transform::identity())
        .context("loading path data")?;

    if json {
        println!("{}", outcome.to_json()?);
        return Ok(());
    }

    println!("{}", outcome.path);
    for anchor in &outcome.anchors {
        println!(
            "anchor {} at {} subpath {}{}{}",
            anchor.id,
            anchor.position,
            anchor.subpath,
            if anchor.endpoint { " endpoint" } else { "" },
            if anchor.mirrored { " mirrored" } else { "" },
        );
    }
    for handle in &outcome.handles {
        println!(
            "handle {} of {} ({:?}) at {}",
            handle.id, handle.anchor, handle.side, handle.position
        );
    }
    Ok(())
}
