//! doxyman — generate man pages from doxygen XML output.
//!
//! One doxygen XML header description in, one summary man page plus one
//! man page per documented function out. Struct files referenced from
//! parameter types are parsed into the same model before rendering.

mod model;
mod options;
mod parser;
mod render;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use model::Header;
use options::Options;
use parser::validate::{SchemaOracle, WellFormed};
use render::man::ManRenderer;

#[derive(Parser)]
#[command(
    name = "doxyman",
    version,
    about = "Generate man pages from doxygen XML output"
)]
struct Cli {
    /// Doxygen XML file describing one header (with struct files beside it)
    files: Vec<PathBuf>,

    /// Suppress warnings
    #[arg(long)]
    nowarn: bool,

    /// Don't generate the summary man page
    #[arg(long)]
    nosummary: bool,

    /// Don't generate the copyright section
    #[arg(long)]
    nocopyright: bool,

    /// Don't parse referenced xml files
    #[arg(long)]
    nofollow: bool,

    /// Don't validate xml files against compound.xsd
    #[arg(long)]
    novalidate: bool,

    /// Don't add all functions under SEE ALSO
    #[arg(long)]
    noseealsoall: bool,

    /// Don't sort functions under SEE ALSO
    #[arg(long)]
    nosort: bool,

    /// Don't print structs in function man pages
    #[arg(long)]
    nostructs: bool,

    /// Just dump the parsed model to stdout
    #[arg(short = 'd', long)]
    dump: bool,

    /// Output directory
    #[arg(short = 'o', long = "out", default_value = "out")]
    out: PathBuf,

    /// Man page section
    #[arg(short = 's', long, default_value = "3")]
    section: String,

    /// Short man page header/footer string, e.g. 'Linux'
    #[arg(long, default_value = "XXXpkg")]
    short_pkg: String,

    /// Man page header/footer string, e.g. "Linux Programmer's Manual"
    #[arg(long, default_value = "The XXX Manual")]
    pkg: String,

    /// Include path prefix
    #[arg(short = 'i', long, default_value = "")]
    include_prefix: String,
}

impl Cli {
    fn to_options(&self) -> Options {
        Options {
            enable_warnings: !self.nowarn,
            just_dump: self.dump,
            enable_summary_page: !self.nosummary,
            enable_copyright: !self.nocopyright,
            enable_follow_refs: !self.nofollow,
            enable_validate: !self.novalidate,
            enable_seealso_all: !self.noseealsoall,
            enable_sort: !self.nosort,
            enable_structs: !self.nostructs,
            output_dir: self.out.clone(),
            man_section: self.section.clone(),
            short_pkg: self.short_pkg.clone(),
            pkg: self.pkg.clone(),
            include_prefix: self.include_prefix.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let opts = cli.to_options();
    let input = check_input(&cli.files)?;
    run(&opts, &input)
}

/// Exactly one existing input file.
fn check_input(files: &[PathBuf]) -> Result<PathBuf> {
    if files.is_empty() {
        bail!("no XML input file specified");
    }
    if files.len() > 1 {
        bail!("more than one input file specified");
    }
    let input = files[0].clone();
    if !input.exists() {
        bail!("input file {} does not exist", input.display());
    }
    Ok(input)
}

fn run(opts: &Options, input: &Path) -> Result<()> {
    let base_path = input.parent().unwrap_or_else(|| Path::new("."));
    let oracle = WellFormed;

    let mut header = Header::default();
    parse_pipeline(opts, input, base_path, &oracle, &mut header)?;

    if opts.just_dump {
        print!("{}", render::dump::render(&header));
        return Ok(());
    }

    write_pages(opts, &header)
}

/// Validate and parse the primary file, run the advisory checks, sort,
/// then resolve cross-file references into the same model.
fn parse_pipeline(
    opts: &Options,
    input: &Path,
    base_path: &Path,
    oracle: &dyn SchemaOracle,
    header: &mut Header,
) -> Result<()> {
    parser::validate::check_file(input, base_path, oracle, opts)?;
    parser::parse_file(input, header)?;

    if opts.enable_warnings {
        for msg in header.check() {
            eprintln!("warning: {}", msg);
        }
    }
    header.sort(opts.enable_sort);

    parser::refs::resolve(header, base_path, opts, oracle)
}

fn write_pages(opts: &Options, header: &Header) -> Result<()> {
    fs::create_dir_all(&opts.output_dir).with_context(|| {
        format!("could not create output dir: {}", opts.output_dir.display())
    })?;

    let renderer = ManRenderer::new(opts);

    if opts.enable_summary_page {
        write_page(opts, &header.name, &renderer.summary_page(header))?;
    }
    for f in &header.functions {
        write_page(opts, &f.name, &renderer.function_page(f, header))?;
    }
    Ok(())
}

/// One page per output unit, named `<entity-name>.<section>`.
fn write_page(opts: &Options, name: &str, content: &str) -> Result<()> {
    let path = opts.output_dir.join(format!("{}.{}", name, opts.man_section));
    fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))
}
