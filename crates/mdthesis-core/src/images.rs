//! Image reference normalization and asset staging
//!
//! Section fragments reference plot images in whatever form the authors
//! pasted them (GitHub blob URLs, relative result paths). Rewriting
//! normalizes every recognizable reference to `images/<file>` so the
//! assembled document resolves against the staged image directory.
//!
//! Staging then materializes that directory: real plots are copied from the
//! plots directory, and anything still missing gets a placeholder PNG so the
//! external renderer never aborts on a broken include. Placeholders are
//! minimal but valid images; xelatex rejects files that merely end in
//! `.png`.

use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use flate2::write::ZlibEncoder;
use flate2::{Compression, Crc};
use log::{debug, info, warn};
use regex::Regex;

use crate::error::Result;

/// Placeholder dimensions
const PLACEHOLDER_SIZE: u32 = 100;

/// Normalize image references to `images/<file>`
///
/// Applied patterns, in order:
/// 1. GitHub blob URLs pointing into the analysis plots directory
/// 2. Any image path containing a directory component
///
/// References that already read `images/<file>` are rewritten to
/// themselves; anything unrecognized is left untouched.
pub fn rewrite_image_paths(content: &str) -> String {
    static GITHUB_RE: OnceLock<Regex> = OnceLock::new();
    static PATH_RE: OnceLock<Regex> = OnceLock::new();

    let github = GITHUB_RE.get_or_init(|| {
        Regex::new(
            r"!\[([^\]]*)\]\(https://github\.com/[^)]*?/blob/[^)]*?/research_results/analysis_plots/([^)]+)\)",
        )
        .unwrap()
    });
    let path = PATH_RE.get_or_init(|| {
        Regex::new(r"!\[([^\]]*)\]\([^)]*?/([^/)]+\.(?:png|jpe?g|gif|svg))\)").unwrap()
    });

    let rewritten = github.replace_all(content, "![$1](images/$2)");
    let rewritten = path.replace_all(&rewritten, "![$1](images/$2)");
    rewritten.into_owned()
}

/// File names referenced as `images/<file>` in a markdown document
pub fn referenced_images(markdown: &str) -> BTreeSet<String> {
    static REF_RE: OnceLock<Regex> = OnceLock::new();
    let re = REF_RE
        .get_or_init(|| Regex::new(r"!\[[^\]]*\]\(images/([^)]+)\)").unwrap());

    re.captures_iter(markdown)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Outcome of an asset staging pass
#[derive(Debug, Default)]
pub struct StagedAssets {
    /// Real plots copied from the plots directory
    pub copied: Vec<String>,
    /// Placeholders generated for missing assets
    pub generated: Vec<String>,
}

impl StagedAssets {
    /// Total number of staged files
    pub fn len(&self) -> usize {
        self.copied.len() + self.generated.len()
    }

    /// Whether nothing was staged
    pub fn is_empty(&self) -> bool {
        self.copied.is_empty() && self.generated.is_empty()
    }
}

/// Stages referenced images into the output image directory
pub struct AssetStager {
    plots_dir: PathBuf,
    images_dir: PathBuf,
}

impl AssetStager {
    /// Create a stager copying from `plots_dir` into `images_dir`
    pub fn new(plots_dir: impl Into<PathBuf>, images_dir: impl Into<PathBuf>) -> Self {
        Self {
            plots_dir: plots_dir.into(),
            images_dir: images_dir.into(),
        }
    }

    /// Stage every image referenced by the assembled document
    ///
    /// Copies the real plot when it exists, otherwise generates a
    /// placeholder PNG. A missing real asset is a warning, never an error.
    pub fn stage(&self, markdown: &str) -> Result<StagedAssets> {
        fs::create_dir_all(&self.images_dir)?;

        let mut staged = StagedAssets::default();
        for name in referenced_images(markdown) {
            let source = self.plots_dir.join(&name);
            let target = self.images_dir.join(&name);

            if source.is_file() {
                fs::copy(&source, &target)?;
                let size = fs::metadata(&target)?.len();
                info!("staged {} ({} bytes)", target.display(), size);
                staged.copied.push(name);
            } else {
                warn!(
                    "plot {} not found under {}, generating placeholder",
                    name,
                    self.plots_dir.display()
                );
                write_placeholder_png(&target, PLACEHOLDER_SIZE, PLACEHOLDER_SIZE)?;
                debug!("placeholder written: {}", target.display());
                staged.generated.push(name);
            }
        }
        Ok(staged)
    }
}

/// Write a solid white RGB PNG
///
/// Hand-assembled chunk stream: signature, IHDR, one zlib IDAT of
/// filter-0 rows, IEND. Valid per the PNG spec so downstream renderers
/// accept it.
fn write_placeholder_png(path: &Path, width: u32, height: u32) -> Result<()> {
    let mut png = Vec::new();
    png.extend_from_slice(&[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);

    // IHDR: 8-bit RGB, no interlace
    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[8, 2, 0, 0, 0]);
    push_chunk(&mut png, b"IHDR", &ihdr);

    // Each scanline: filter byte 0 followed by white pixels
    let stride = 1 + width as usize * 3;
    let mut raw = Vec::with_capacity(stride * height as usize);
    for _ in 0..height {
        raw.push(0);
        raw.resize(raw.len() + width as usize * 3, 0xff);
    }
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&raw)?;
    let idat = encoder.finish()?;
    push_chunk(&mut png, b"IDAT", &idat);

    push_chunk(&mut png, b"IEND", &[]);
    fs::write(path, png)?;
    Ok(())
}

/// Append a PNG chunk: length, type, data, CRC32 over type+data
fn push_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);

    let mut crc = Crc::new();
    crc.update(kind);
    crc.update(data);
    out.extend_from_slice(&crc.sum().to_be_bytes());
}
