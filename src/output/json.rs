use anyhow::Result;
use futures::StreamExt;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::Write;

use crate::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::gallery::{Gallery, Submission};
use crate::validate::all_files_ok;

/// Upload `paths` and print all results as one JSON array
///
/// Gallery URLs are not printed separately; every element carries them.
/// Gallery creation errors are returned to the caller untouched.
pub async fn render_json<G, W, E>(
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

    gallery.create().await?;

    let mut exit_code = EXIT_SUCCESS;
    let mut submissions = Vec::with_capacity(paths.len());
    let mut stream = gallery.add(paths);
    while let Some(sub) = stream.next().await {
        tracing::debug!("Received result for {}", sub.filepath());
        if !sub.success() {
            exit_code = EXIT_FAILURE;
        }
        submissions.push(sub);
    }

    write_document(&submissions, out)?;
    Ok(exit_code)
}

fn write_document<W: Write>(submissions: &[Submission], out: &mut W) -> Result<()> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut *out, formatter);
    submissions.serialize(&mut serializer)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::fake::{mixed_submissions, urls, Call, FakeGallery};
    use crate::output::test_support::image_files;
    use crate::utils::ImgboxError;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_fails_unless_all_files_ok() {
        let mut gallery = FakeGallery::new(mixed_submissions());
        let paths = vec!["path/to/foo.jpg".to_string()];
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let exit_code = render_json(&mut gallery, &paths, &mut out, &mut err)
            .await
            .unwrap();

        assert_eq!(exit_code, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "");
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "path/to/foo.jpg: No such file\n"
        );
        assert!(gallery.calls.is_empty());
    }

    #[tokio::test]
    async fn test_encounters_no_errors() {
        let (_dir, paths) = image_files(&["foo.jpg"]);
        let mut gallery =
            FakeGallery::new(vec![Submission::uploaded("path/to/foo.jpg", urls("foo"))]);
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let exit_code = render_json(&mut gallery, &paths, &mut out, &mut err)
            .await
            .unwrap();

        assert_eq!(exit_code, 0);
        assert_eq!(String::from_utf8(err).unwrap(), "");
        let document: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            document,
            json!([{
                "filename": "foo.jpg",
                "filepath": "path/to/foo.jpg",
                "success": true,
                "error": null,
                "image_url": "img/foo",
                "thumbnail_url": "thumb/foo",
                "web_url": "web/foo",
                "gallery_url": "gallery/foo",
                "edit_url": "edit/foo",
            }])
        );
        assert_eq!(gallery.calls, vec![Call::Create, Call::Add(paths.clone())]);
    }

    #[tokio::test]
    async fn test_handles_error_from_adding_to_gallery() {
        let (_dir, paths) = image_files(&["foo.jpg", "bar.jpg", "baz.jpg"]);
        let mut gallery = FakeGallery::new(mixed_submissions());
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let exit_code = render_json(&mut gallery, &paths, &mut out, &mut err)
            .await
            .unwrap();

        assert_eq!(exit_code, 1);
        assert_eq!(String::from_utf8(err).unwrap(), "");
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("<Gallery URL>"));
        let document: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            document,
            json!([
                {
                    "filename": "foo.jpg",
                    "filepath": "path/to/foo.jpg",
                    "success": true,
                    "error": null,
                    "image_url": "img/foo",
                    "thumbnail_url": "thumb/foo",
                    "web_url": "web/foo",
                    "gallery_url": "gallery/foo",
                    "edit_url": "edit/foo",
                },
                {
                    "filename": "bar.jpg",
                    "filepath": "path/to/bar.jpg",
                    "success": false,
                    "error": "Oops",
                    "image_url": null,
                    "thumbnail_url": null,
                    "web_url": null,
                    "gallery_url": null,
                    "edit_url": null,
                },
                {
                    "filename": "baz.jpg",
                    "filepath": "path/to/baz.jpg",
                    "success": true,
                    "error": null,
                    "image_url": "img/baz",
                    "thumbnail_url": "thumb/baz",
                    "web_url": "web/baz",
                    "gallery_url": "gallery/baz",
                    "edit_url": "edit/baz",
                },
            ])
        );
    }

    #[tokio::test]
    async fn test_creation_errors_are_not_caught() {
        let (_dir, paths) = image_files(&["foo.jpg"]);
        let mut gallery =
            FakeGallery::failing_create(ImgboxError::Connection("Creation failed".to_string()));
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let result = render_json(&mut gallery, &paths, &mut out, &mut err).await;

        assert_eq!(result.unwrap_err().to_string(), "Creation failed");
        assert!(out.is_empty());
        assert!(err.is_empty());
        assert_eq!(gallery.calls, vec![Call::Create]);
    }

    #[test]
    fn test_document_uses_four_space_indent() {
        let mut out = Vec::new();
        write_document(&[Submission::failed("a.jpg", "Oops")], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("[\n    {\n        \""));
        assert!(text.ends_with("]\n"));
    }
}
