//! Office suite + poppler rasterizer.
//!
//! Presentations go through `soffice --headless --convert-to pdf` and the
//! resulting PDF through `pdftoppm -png`. PDF inputs skip the first step.
//! Every child runs under a timeout and is killed when it expires.

use super::traits::{ConversionOptions, SlideRasterizer};
use crate::error::{ConversionErrorKind, DeckDiffError, Result};
use crate::model::manifest::image_file_name;
use regex::Regex;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::LazyLock;
use wait_timeout::ChildExt;

/// Office binaries tried in order.
const OFFICE_BINARIES: &[&str] = &["soffice", "libreoffice"];

const PDFTOPPM: &str = "pdftoppm";

/// Prefix handed to `pdftoppm`; pages come back as `page-1.png` or `page-01.png`.
const PAGE_PREFIX: &str = "page";

static PAGE_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^page-(\d+)\.png$").expect("static regex"));

/// Whether `command` resolves on `PATH`.
#[must_use]
pub fn command_exists(command: &str) -> bool {
    which::which(command).is_ok()
}

/// Rasterizer backed by LibreOffice and poppler-utils.
#[derive(Debug, Clone, Default)]
pub struct OfficeRasterizer {
    options: ConversionOptions,
}

impl OfficeRasterizer {
    #[must_use]
    pub const fn new(options: ConversionOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Convert a presentation to PDF inside `workdir`.
    fn to_pdf(&self, input: &Path, workdir: &Path) -> Result<PathBuf> {
        let binary = OFFICE_BINARIES
            .iter()
            .find(|b| command_exists(b))
            .ok_or_else(|| {
                DeckDiffError::conversion(
                    format!("converting {}", input.display()),
                    ConversionErrorKind::ToolNotFound(OFFICE_BINARIES.join(" or ")),
                )
            })?;

        let mut command = Command::new(binary);
        command
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(workdir)
            .arg(input);
        run_tool(binary, command, workdir, &self.options)?;

        let mut pdf_name = input.file_stem().unwrap_or_default().to_os_string();
        pdf_name.push(".pdf");
        let pdf = workdir.join(pdf_name);
        if !pdf.is_file() {
            return Err(DeckDiffError::conversion(
                format!("{binary} produced no PDF for {}", input.display()),
                ConversionErrorKind::NoOutput,
            ));
        }
        Ok(pdf)
    }

    /// Render every PDF page to `slide_NNN.png` inside `workdir`.
    fn to_images(&self, pdf: &Path, workdir: &Path) -> Result<Vec<PathBuf>> {
        if !command_exists(PDFTOPPM) {
            return Err(DeckDiffError::conversion(
                format!("rendering {}", pdf.display()),
                ConversionErrorKind::ToolNotFound(PDFTOPPM.to_string()),
            ));
        }

        let mut command = Command::new(PDFTOPPM);
        command
            .arg("-png")
            .arg("-r")
            .arg(self.options.dpi.to_string())
            .arg(pdf)
            .arg(workdir.join(PAGE_PREFIX));
        run_tool(PDFTOPPM, command, workdir, &self.options)?;

        let images = collect_page_images(workdir)?;
        if images.is_empty() {
            return Err(DeckDiffError::conversion(
                format!("rendering {}", pdf.display()),
                ConversionErrorKind::NoOutput,
            ));
        }
        Ok(images)
    }
}

impl SlideRasterizer for OfficeRasterizer {
    fn rasterize(&self, input: &Path, workdir: &Path) -> Result<Vec<PathBuf>> {
        if !self.supports(input) {
            return Err(DeckDiffError::conversion(
                "selecting rasterizer",
                ConversionErrorKind::UnsupportedInput(input.display().to_string()),
            ));
        }
        fs::create_dir_all(workdir).map_err(|e| DeckDiffError::io(workdir, e))?;

        let is_pdf = input
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        let pdf = if is_pdf {
            input.to_path_buf()
        } else {
            self.to_pdf(input, workdir)?
        };

        let images = self.to_images(&pdf, workdir)?;
        tracing::info!(
            "Rendered {} slides from {} at {} dpi",
            images.len(),
            input.display(),
            self.options.dpi
        );
        Ok(images)
    }

    fn name(&self) -> &'static str {
        "office"
    }

    fn supported_extensions(&self) -> &[&'static str] {
        &["pptx", "ppt", "odp", "key", "pdf"]
    }
}

/// Run one external tool to completion, killing it on timeout.
///
/// Stderr goes to `<tool>.log` in `workdir` and is quoted back on failure.
fn run_tool(tool: &str, mut command: Command, workdir: &Path, options: &ConversionOptions) -> Result<()> {
    let log_path = workdir.join(format!("{tool}.log"));
    let log = File::create(&log_path).map_err(|e| DeckDiffError::io(&log_path, e))?;
    command.stdout(Stdio::null()).stderr(Stdio::from(log));

    tracing::debug!("running {command:?}");
    let mut child = command.spawn().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DeckDiffError::conversion("spawning", ConversionErrorKind::ToolNotFound(tool.to_string()))
        } else {
            DeckDiffError::io(tool, e)
        }
    })?;

    let status = child
        .wait_timeout(options.timeout)
        .map_err(|e| DeckDiffError::io(tool, e))?;
    match status {
        Some(status) if status.success() => Ok(()),
        Some(status) => {
            let stderr = fs::read_to_string(&log_path).unwrap_or_default();
            Err(DeckDiffError::conversion(
                format!("running {tool}"),
                ConversionErrorKind::ToolFailed {
                    tool: tool.to_string(),
                    status: status
                        .code()
                        .map_or_else(|| "signal".to_string(), |c| c.to_string()),
                    stderr: stderr.trim().to_string(),
                },
            ))
        }
        None => {
            let _ = child.kill();
            let _ = child.wait();
            tracing::warn!("{tool} timed out after {}s, killed", options.timeout.as_secs());
            Err(DeckDiffError::conversion(
                format!("running {tool}"),
                ConversionErrorKind::TimedOut {
                    tool: tool.to_string(),
                    seconds: options.timeout.as_secs(),
                },
            ))
        }
    }
}

/// Rename `page-N.png` files to `slide_NNN.png` and return them in page order.
fn collect_page_images(workdir: &Path) -> Result<Vec<PathBuf>> {
    let mut pages: Vec<(usize, PathBuf)> = Vec::new();
    for entry in fs::read_dir(workdir).map_err(|e| DeckDiffError::io(workdir, e))? {
        let path = entry.map_err(|e| DeckDiffError::io(workdir, e))?.path();
        let number = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| PAGE_IMAGE.captures(n))
            .and_then(|caps| caps[1].parse::<usize>().ok());
        if let Some(number) = number {
            pages.push((number, path));
        }
    }
    pages.sort_by_key(|(number, _)| *number);

    pages
        .into_iter()
        .map(|(number, path)| {
            let renamed = workdir.join(image_file_name(number));
            fs::rename(&path, &renamed).map_err(|e| DeckDiffError::io(&path, e))?;
            Ok(renamed)
        })
        .collect()
}
