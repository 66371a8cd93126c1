//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use mdthesis_core::assembler::ThesisAssembler;
use mdthesis_core::collector::SectionCollector;
use mdthesis_core::config::ProjectConfig;
use mdthesis_core::images::{rewrite_image_paths, AssetStager};
use mdthesis_core::tables::collect_tables;
use mdthesis_model::Thesis;
use mdthesis_render::{PandocRenderer, RenderError};

#[derive(Parser)]
#[command(name = "mdthesis")]
#[command(author, version, about = "Assemble a thesis from markdown fragments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble output/thesis.md and stage image assets
    Build {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Append collected CSV tables as a final appendix
        #[arg(long)]
        tables_appendix: bool,
    },

    /// Build, then render standalone HTML
    Html {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Use the builtin formatter instead of pandoc
        #[arg(long)]
        builtin: bool,
    },

    /// Build, then render a PDF via pandoc/xelatex
    Pdf {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            config,
            tables_appendix,
        } => {
            build_command(config.as_deref(), tables_appendix)?;
        }
        Commands::Html { config, builtin } => {
            html_command(config.as_deref(), builtin)?;
        }
        Commands::Pdf { config } => {
            pdf_command(config.as_deref())?;
        }
    }

    Ok(())
}

/// Artifacts of a build, reused by the render commands
pub struct BuildOutput {
    /// Loaded project configuration
    pub config: ProjectConfig,
    /// Collected thesis (sections, metadata, tables)
    pub thesis: Thesis,
    /// Path of the assembled markdown document
    pub markdown_path: PathBuf,
}

/// Execute the build command
pub fn build_command(config_path: Option<&Path>, tables_appendix: bool) -> Result<BuildOutput> {
    println!("mdthesis v{}", mdthesis_core::VERSION);

    let config =
        ProjectConfig::load(config_path).context("Failed to load project configuration")?;
    println!("Assembling: {}", config.paths.paper_dir.display());

    // Collect sections and normalize their image references
    let mut thesis = Thesis::new();
    thesis.sections = SectionCollector::new(&config.paths.paper_dir)
        .collect()
        .context("Failed to collect sections")?;
    for section in &mut thesis.sections {
        section.body = rewrite_image_paths(&section.body);
    }
    println!("  {} sections collected", thesis.sections.len());

    // Table data rides along whenever the appendix is requested
    let want_tables = tables_appendix || config.document.tables_appendix;
    if want_tables {
        thesis.tables = collect_tables(&config.paths.results_dir)
            .context("Failed to collect result tables")?;
        println!("  {} tables collected", thesis.tables.len());
    }

    thesis.meta = config.document_meta(&thesis);

    // Assemble the document
    let mut assembler_config = config.assembler_config();
    assembler_config.tables_appendix = want_tables;
    let markdown = ThesisAssembler::with_config(assembler_config)
        .assemble(&thesis)
        .context("Failed to assemble thesis markdown")?;

    fs::create_dir_all(&config.paths.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.paths.output_dir.display()
        )
    })?;
    let markdown_path = config.paths.markdown_file();
    fs::write(&markdown_path, &markdown)
        .with_context(|| format!("Failed to write {}", markdown_path.display()))?;
    println!("  Created: {}", markdown_path.display());

    // Stage every referenced image next to the document
    let staged = AssetStager::new(&config.paths.plots_dir, config.paths.images_dir())
        .stage(&markdown)
        .context("Failed to stage image assets")?;
    if !staged.is_empty() {
        println!(
            "  Staged {} images ({} copied, {} placeholders)",
            staged.len(),
            staged.copied.len(),
            staged.generated.len()
        );
    }

    Ok(BuildOutput {
        config,
        thesis,
        markdown_path,
    })
}

/// Execute the html command
pub fn html_command(config_path: Option<&Path>, builtin: bool) -> Result<()> {
    let build = build_command(config_path, false)?;
    let html_path = build.config.paths.html_file();

    if builtin {
        return builtin_html(&build, &html_path);
    }

    let renderer = PandocRenderer::new(build.config.toolchain.pandoc.clone())
        .with_texlive_bin_dir(build.config.toolchain.texlive_bin_dir.clone());

    match renderer.render_html(&build.markdown_path, &html_path) {
        Ok(report) => {
            print_report_output(&report.stdout, &report.stderr);
            println!("  Created: {}", html_path.display());
            Ok(())
        }
        Err(RenderError::BinaryNotFound(binary)) => {
            // No pandoc install: degrade to the builtin formatter
            println!("  {} not found, using builtin formatter", binary);
            builtin_html(&build, &html_path)
        }
        Err(e) => Err(e).context("HTML rendering failed"),
    }
}

/// Render HTML with the builtin formatter
fn builtin_html(build: &BuildOutput, html_path: &Path) -> Result<()> {
    let markdown = fs::read_to_string(&build.markdown_path)
        .with_context(|| format!("Failed to read {}", build.markdown_path.display()))?;
    let page = mdthesis_html::render_page(&build.thesis.meta, &markdown);
    fs::write(html_path, page)
        .with_context(|| format!("Failed to write {}", html_path.display()))?;
    println!("  Created: {}", html_path.display());
    Ok(())
}

/// Execute the pdf command
pub fn pdf_command(config_path: Option<&Path>) -> Result<()> {
    let build = build_command(config_path, false)?;
    let pdf_path = build.config.paths.pdf_file();

    let renderer = PandocRenderer::new(build.config.toolchain.pandoc.clone())
        .with_pdf_engine(build.config.toolchain.pdf_engine.clone())
        .with_texlive_bin_dir(build.config.toolchain.texlive_bin_dir.clone());

    match renderer.render_pdf(&build.markdown_path, &pdf_path, &build.thesis.meta) {
        Ok(report) => {
            print_report_output(&report.stdout, &report.stderr);
            println!("  Created: {}", pdf_path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("PDF rendering failed. The markdown is ready at {};", build.markdown_path.display());
            eprintln!("try `mdthesis html` for a renderer-free preview.");
            Err(e).context("PDF rendering failed")
        }
    }
}

/// Pass toolchain output through to the user
fn print_report_output(stdout: &str, stderr: &str) {
    if !stdout.trim().is_empty() {
        println!("{}", stdout.trim_end());
    }
    if !stderr.trim().is_empty() {
        eprintln!("{}", stderr.trim_end());
    }
}
