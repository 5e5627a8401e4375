use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use xcodetocmake::config::{ConversionConfig, FileConfig, RunParameters};
use xcodetocmake::{convert, logging};

#[derive(Parser)]
#[command(
    name = "xcodetocmake",
    about = "Generate a CMakeLists.txt from an Xcode project"
)]
struct Cli {
    /// Path to the .xcodeproj directory
    project: Option<PathBuf>,

    /// Library to link against (repeat for more, e.g. -l pthread -l OpenGL)
    #[arg(short = 'l', long = "link", value_name = "NAME", action = clap::ArgAction::Append)]
    links: Vec<String>,

    /// List header files as comments
    #[arg(long)]
    headers: bool,

    /// Link the project's frameworks
    #[arg(long)]
    frameworks: bool,

    /// Copy resource files next to the build
    #[arg(long)]
    resources: bool,

    /// Same as --headers --frameworks --resources
    #[arg(long)]
    all: bool,

    /// Where to write the generated file
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// TOML file with run parameters
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let params = RunParameters {
        project: cli.project,
        dependencies: cli.links,
        output: cli.output,
        include_headers: cli.headers || cli.all,
        include_frameworks: cli.frameworks || cli.all,
        include_resources: cli.resources || cli.all,
    };

    let config = ConversionConfig::resolve(file, params)?;
    let written = convert(&config)?;
    println!("{} generated.", written.display());

    Ok(())
}
