use anyhow::Result;
use futures::StreamExt;
use std::io::Write;

use crate::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::gallery::{Gallery, Outcome};
use crate::validate::all_files_ok;

/// Upload `paths` and print human-readable results as they arrive
///
/// A connection failure while creating the gallery is reported on `err` and
/// ends the run with exit code 1. Any other creation error is returned.
pub async fn render_text<G, W, E>(
    gallery: &mut G,
    paths: &[String],
    out: &mut W,
    err: &mut E,
) -> Result<i32>
where
    G: Gallery + ?Sized,
    W: Write,
    E: Write,
{
    if !all_files_ok(paths, err)? {
        return Ok(EXIT_FAILURE);
    }

    if let Err(e) = gallery.create().await {
        if e.is_connection() {
            writeln!(err, "{}", e)?;
            return Ok(EXIT_FAILURE);
        }
        return Err(e.into());
    }

    writeln!(out, "Gallery: {}", gallery.url().unwrap_or_default())?;
    writeln!(out, "   Edit: {}", gallery.edit_url().unwrap_or_default())?;
    out.flush()?;

    let mut exit_code = EXIT_SUCCESS;
    let mut submissions = gallery.add(paths);
    while let Some(sub) = submissions.next().await {
        writeln!(out, "* {}", sub.filename())?;
        match sub.outcome() {
            Outcome::Uploaded(urls) => {
                writeln!(out, "      Image: {}", urls.image_url)?;
                writeln!(out, "  Thumbnail: {}", urls.thumbnail_url)?;
                writeln!(out, "    Webpage: {}", urls.web_url)?;
            }
            Outcome::Failed { error } => {
                writeln!(out, "  {}", error)?;
                exit_code = EXIT_FAILURE;
            }
        }
        out.flush()?;
    }

    Ok(exit_code)
}
