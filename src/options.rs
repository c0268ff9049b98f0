use std::{path::PathBuf, str::FromStr};

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(about = "Lays out gallery pages on a gap-free bento grid")]
pub struct Options {
    #[structopt(flatten)]
    pub global: GlobalOptions,

    #[structopt(subcommand)]
    pub command: Subcommand,
}

#[derive(Debug, StructOpt)]
pub struct GlobalOptions {
    /// Sets verbosity level. Can be specified multiple times.
    #[structopt(long = "verbose", short, global = true, parse(from_occurrences))]
    pub verbosity: u8,
}

#[derive(Debug, StructOpt)]
pub enum Subcommand {
    /// Pack a number of items into a grid and print the resulting layout.
    Layout(LayoutOptions),

    /// Discover every gallery in a project, lay each one out, and write a
    /// layout manifest and stylesheet for the site to consume.
    Build(BuildOptions),
}

#[derive(Debug, StructOpt)]
pub struct LayoutOptions {
    /// The number of items to lay out.
    #[structopt(long)]
    pub count: usize,

    /// The number of columns in the grid.
    #[structopt(long, default_value = "6")]
    pub columns: usize,

    /// How to print the layout.
    ///
    /// Options:
    ///
    /// - diagram: A text drawing of the grid, one letter per item
    ///
    /// - css: A stylesheet targeting `.bento-grid .gallery-item` elements
    ///
    /// - json: The placements and grid styles as JSON
    #[structopt(long, default_value = "diagram")]
    pub format: LayoutFormat,
}

#[derive(Debug, StructOpt)]
pub struct BuildOptions {
    /// The path to a bento.toml file, or a folder containing one. Defaults to
    /// the current working directory.
    pub project_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutFormat {
    Diagram,
    Css,
    Json,
}

impl FromStr for LayoutFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<LayoutFormat, Self::Err> {
        match value {
            "diagram" => Ok(LayoutFormat::Diagram),
            "css" => Ok(LayoutFormat::Css),
            "json" => Ok(LayoutFormat::Json),

            _ => Err(String::from(
                "Invalid layout format. Valid options are 'diagram', 'css', and 'json'.",
            )),
        }
    }
}
