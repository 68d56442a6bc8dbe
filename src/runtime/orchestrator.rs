use anyhow::Result;
use futures::FutureExt;
use std::any::Any;
use std::io::{self, BufRead, IsTerminal, Write};
use std::panic::AssertUnwindSafe;

use crate::{
    app::{load_config, Config, ServiceConfig},
    cli::{Cli, OutputFormat},
    constants::{BUGTRACKER_URL, EXIT_FAILURE, EXIT_UNEXPECTED},
    gallery::{Gallery, GalleryOptions, ImgboxGallery},
    input::collect_files,
    output::{render_json, render_text},
    utils::ImgboxError,
};

/// Main runtime orchestrator
pub struct Orchestrator {
    cli: Cli,
    config: Config,
}

impl Orchestrator {
    /// Create a new orchestrator from CLI args
    pub fn new(cli: Cli) -> Result<Self> {
        let config = load_config(cli.config.as_deref())?;
        Ok(Self::with_config(cli, config))
    }

    pub fn with_config(cli: Cli, config: Config) -> Self {
        Self { cli, config }
    }

    /// Gallery options from CLI flags, falling back to configured defaults
    pub fn gallery_options(&self) -> GalleryOptions {
        let defaults = &self.config.upload;
        GalleryOptions {
            title: self.cli.title.clone(),
            adult: self.cli.adult || defaults.adult,
            thumb_width: self.cli.thumb_width.unwrap_or(defaults.thumb_width),
            square_thumbs: self.cli.square_thumbs || defaults.square_thumbs,
            comments_enabled: self.cli.comments || defaults.comments,
        }
    }

    /// Run the orchestrator and return the process exit code
    pub async fn run(self) -> i32 {
        let stdin = io::stdin();
        let stdin = if stdin.is_terminal() {
            None
        } else {
            Some(stdin.lock())
        };

        self.run_with(
            stdin,
            ImgboxGallery::new,
            &mut io::stdout(),
            &mut io::stderr(),
        )
        .await
    }

    /// Collect files, then build a gallery with `make_gallery` and upload
    ///
    /// `stdin` is `None` when standard input is an interactive terminal. No
    /// gallery is built if there are no files to upload.
    pub async fn run_with<R, G, F, W, E>(
        &self,
        stdin: Option<R>,
        make_gallery: F,
        out: &mut W,
        err: &mut E,
    ) -> i32
    where
        R: BufRead,
        G: Gallery,
        F: FnOnce(GalleryOptions, &ServiceConfig) -> Result<G, ImgboxError>,
        W: Write,
        E: Write,
    {
        let files = match collect_files(&self.cli.files, stdin) {
            Ok(files) => files,
            Err(e) => {
                let _ = writeln!(err, "{}", e);
                return EXIT_FAILURE;
            }
        };
        tracing::debug!("Uploading {} file(s)", files.len());

        let mut gallery = match make_gallery(self.gallery_options(), &self.config.service) {
            Ok(gallery) => gallery,
            Err(e) => return report_unexpected(&format!("{:?}", e), err),
        };

        self.run_gallery(&mut gallery, &files, out, err).await
    }

    /// Render uploads to `gallery` and close it afterwards, whatever happened
    ///
    /// Errors and panics escaping the renderer are reported with a pointer to
    /// the bug tracker and map to exit code 100.
    pub async fn run_gallery<G, W, E>(
        &self,
        gallery: &mut G,
        files: &[String],
        out: &mut W,
        err: &mut E,
    ) -> i32
    where
        G: Gallery + ?Sized,
        W: Write,
        E: Write,
    {
        let outcome = {
            let render = async {
                match self.cli.output_format() {
                    OutputFormat::Text => render_text(gallery, files, out, err).await,
                    OutputFormat::Json => render_json(gallery, files, out, err).await,
                }
            };
            AssertUnwindSafe(render).catch_unwind().await
        };

        if let Err(e) = gallery.close().await {
            tracing::warn!("Failed to close gallery: {}", e);
        }

        match outcome {
            Ok(Ok(exit_code)) => exit_code,
            Ok(Err(e)) => report_unexpected(&format!("{:?}", e), err),
            Err(payload) => report_unexpected(&panic_message(payload.as_ref()), err),
        }
    }
}

fn report_unexpected<E: Write>(diagnostic: &str, err: &mut E) -> i32 {
    let _ = writeln!(
        err,
        "{}\n\nPlease report this as a bug: {}",
        diagnostic.trim_end(),
        BUGTRACKER_URL
    );
    EXIT_UNEXPECTED
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };
    format!("panicked: {}", message)
}
