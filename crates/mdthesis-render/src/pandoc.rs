//! Pandoc invocation
//!
//! Command construction is kept in pure functions so argument lists are
//! testable without a pandoc install; `run` does the spawning, output
//! capture, and exit-status mapping.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, warn};

use mdthesis_model::ThesisMeta;

use crate::error::{RenderError, Result};
use crate::toolchain;

/// Captured outcome of a successful toolchain run
#[derive(Debug)]
pub struct RenderReport {
    /// The invoked command line, for display
    pub command: String,
    /// Child stdout, verbatim
    pub stdout: String,
    /// Child stderr, verbatim (pandoc warns here even on success)
    pub stderr: String,
}

/// Drives pandoc for PDF and HTML output
pub struct PandocRenderer {
    pandoc: String,
    pdf_engine: Option<PathBuf>,
    texlive_bin_dir: Option<PathBuf>,
}

impl PandocRenderer {
    /// Create a renderer invoking the given pandoc binary
    pub fn new(pandoc: impl Into<String>) -> Self {
        Self {
            pandoc: pandoc.into(),
            pdf_engine: None,
            texlive_bin_dir: None,
        }
    }

    /// Explicit xelatex path, bypassing PATH discovery when it exists
    pub fn with_pdf_engine(mut self, engine: Option<PathBuf>) -> Self {
        self.pdf_engine = engine;
        self
    }

    /// TeX Live bin directory prepended to the child PATH
    pub fn with_texlive_bin_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.texlive_bin_dir = dir;
        self
    }

    /// Render markdown to PDF via xelatex
    pub fn render_pdf(
        &self,
        markdown: &Path,
        output: &Path,
        meta: &ThesisMeta,
    ) -> Result<RenderReport> {
        let engine = toolchain::discover_pdf_engine(self.pdf_engine.as_deref());
        let args = pdf_args(markdown, output, &engine, meta);
        self.run(&args)
    }

    /// Render markdown to standalone HTML
    ///
    /// Tries `--embed-resources` first; pandoc releases predating it get a
    /// second attempt with the legacy `--self-contained` flag.
    pub fn render_html(&self, markdown: &Path, output: &Path) -> Result<RenderReport> {
        match self.run(&html_args(markdown, output, false)) {
            Err(RenderError::CommandFailed { stderr, .. }) => {
                warn!("pandoc rejected --embed-resources, retrying with --self-contained");
                debug!("first attempt stderr: {}", stderr);
                self.run(&html_args(markdown, output, true))
            }
            other => other,
        }
    }

    /// Spawn pandoc with the given arguments and capture its output
    fn run(&self, args: &[OsString]) -> Result<RenderReport> {
        let command = display_command(&self.pandoc, args);
        debug!("running: {}", command);

        let mut cmd = Command::new(&self.pandoc);
        cmd.args(args);
        if let Some(path) = toolchain::child_path(self.texlive_bin_dir.as_deref()) {
            cmd.env("PATH", path);
        }

        let output = cmd.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RenderError::BinaryNotFound(self.pandoc.clone())
            } else {
                RenderError::Io(e)
            }
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(RenderError::CommandFailed {
                binary: self.pandoc.clone(),
                status: output.status,
                stderr,
            });
        }

        Ok(RenderReport {
            command,
            stdout,
            stderr,
        })
    }
}

/// Arguments for a PDF run
fn pdf_args(markdown: &Path, output: &Path, engine: &Path, meta: &ThesisMeta) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        markdown.into(),
        "-o".into(),
        output.into(),
        {
            let mut flag = OsString::from("--pdf-engine=");
            flag.push(engine);
            flag
        },
        "--listings".into(),
    ];
    for (key, value) in meta.pdf_variables() {
        args.push("-V".into());
        args.push(format!("{}={}", key, value).into());
    }
    args
}

/// Arguments for a standalone HTML run
fn html_args(markdown: &Path, output: &Path, legacy_self_contained: bool) -> Vec<OsString> {
    let embed: OsString = if legacy_self_contained {
        "--self-contained".into()
    } else {
        "--embed-resources".into()
    };
    vec![
        markdown.into(),
        "-o".into(),
        output.into(),
        "-s".into(),
        embed,
        "--standalone".into(),
    ]
}

/// Human-readable command line for reports and logs
fn display_command(binary: &str, args: &[OsString]) -> String {
    let mut parts = vec![binary.to_string()];
    parts.extend(args.iter().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_args() {
        let mut meta = ThesisMeta::default();
        meta.mainfont = Some("NanumMyeongjo".to_string());

        let args = pdf_args(
            Path::new("output/thesis.md"),
            Path::new("output/thesis.pdf"),
            Path::new("/opt/texlive/bin/xelatex"),
            &meta,
        );
        let rendered: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(rendered[0], "output/thesis.md");
        assert!(rendered.contains(&"--pdf-engine=/opt/texlive/bin/xelatex".to_string()));
        assert!(rendered.contains(&"--listings".to_string()));
        assert!(rendered.contains(&"-V".to_string()));
        assert!(rendered.contains(&"lang=en".to_string()));
        assert!(rendered.contains(&"mainfont=NanumMyeongjo".to_string()));
        assert!(rendered.contains(&"geometry:margin=3cm".to_string()));
    }

    #[test]
    fn test_html_args_flag_selection() {
        let modern = html_args(Path::new("t.md"), Path::new("t.html"), false);
        assert!(modern.contains(&OsString::from("--embed-resources")));

        let legacy = html_args(Path::new("t.md"), Path::new("t.html"), true);
        assert!(legacy.contains(&OsString::from("--self-contained")));
        assert!(!legacy.contains(&OsString::from("--embed-resources")));
    }

    #[test]
    fn test_missing_binary_maps_to_not_found() {
        let renderer = PandocRenderer::new("mdthesis-test-no-such-binary");
        let err = renderer
            .run(&[OsString::from("--version")])
            .unwrap_err();
        assert!(matches!(err, RenderError::BinaryNotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_captures_output_and_status() {
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        let stub = dir.path().join("pandoc-stub");
        std::fs::write(&stub, "#!/bin/sh\necho converted\necho warned >&2\nexit 0\n").unwrap();
        std::fs::set_permissions(&stub, std::fs::Permissions::from_mode(0o755)).unwrap();

        let renderer = PandocRenderer::new(stub.to_string_lossy().into_owned());
        let report = renderer.run(&[]).unwrap();
        assert_eq!(report.stdout.trim(), "converted");
        assert_eq!(report.stderr.trim(), "warned");

        let failing = dir.path().join("pandoc-fail");
        std::fs::write(&failing, "#!/bin/sh\necho boom >&2\nexit 43\n").unwrap();
        std::fs::set_permissions(&failing, std::fs::Permissions::from_mode(0o755)).unwrap();

        let renderer = PandocRenderer::new(failing.to_string_lossy().into_owned());
        let err = renderer.run(&[]).unwrap_err();
        match err {
            RenderError::CommandFailed { status, stderr, .. } => {
                assert_eq!(status.code(), Some(43));
                assert_eq!(stderr.trim(), "boom");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_render_html_falls_back_to_self_contained() {
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        // Rejects --embed-resources the way pandoc 2.x does, accepts the
        // legacy flag
        let stub = dir.path().join("pandoc-old");
        std::fs::write(
            &stub,
            "#!/bin/sh\nfor a in \"$@\"; do\n  if [ \"$a\" = \"--embed-resources\" ]; then\n    echo 'Unknown option --embed-resources' >&2\n    exit 6\n  fi\ndone\nexit 0\n",
        )
        .unwrap();
        std::fs::set_permissions(&stub, std::fs::Permissions::from_mode(0o755)).unwrap();

        let renderer = PandocRenderer::new(stub.to_string_lossy().into_owned());
        let report = renderer
            .render_html(Path::new("t.md"), Path::new("t.html"))
            .unwrap();
        assert!(report.command.contains("--self-contained"));
    }
}
