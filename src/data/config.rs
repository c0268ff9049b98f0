use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

static CONFIG_FILENAME: &str = "bento.toml";

/// Configuration for a bento project, contained in a bento.toml file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// The name of the project, currently only used in logging.
    pub name: String,

    /// The folder containing one subfolder per gallery, relative to this
    /// config file.
    #[serde(default = "default_gallery_root")]
    pub gallery_root: PathBuf,

    /// Where the layout manifest and stylesheet should be written, relative to
    /// this config file.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// How many columns gallery grids have. Curated layouts are only used when
    /// they were designed for this width.
    #[serde(default = "default_columns")]
    pub columns: usize,

    /// The CSS selector of the grid container in the site's templates.
    #[serde(default = "default_grid_selector")]
    pub grid_selector: String,

    /// The CSS selector of a single gallery item inside the grid container.
    #[serde(default = "default_item_selector")]
    pub item_selector: String,

    /// File extensions, without the leading dot, that are treated as gallery
    /// media. Matching is case-insensitive.
    #[serde(default = "default_media_extensions")]
    pub media_extensions: Vec<String>,

    /// The path that this config came from. Paths from this config should be
    /// relative to the folder containing this file.
    #[serde(skip)]
    pub file_path: PathBuf,
}

impl Config {
    pub fn read_from_folder_or_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let meta = fs::metadata(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        if meta.is_file() {
            Self::read_from_file(path)
        } else {
            Self::read_from_folder(path)
        }
    }

    pub fn read_from_folder<P: AsRef<Path>>(folder_path: P) -> Result<Self, ConfigError> {
        let folder_path = folder_path.as_ref();
        let file_path = &folder_path.join(CONFIG_FILENAME);

        Self::read_from_file(file_path)
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        let mut config: Self = toml::from_slice(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_owned(),
            source,
        })?;
        config.file_path = path.to_owned();

        for extension in &mut config.media_extensions {
            *extension = extension.trim_start_matches('.').to_lowercase();
        }

        Ok(config)
    }

    /// The path that paths in this Config should be considered relative to.
    pub fn folder(&self) -> &Path {
        self.file_path.parent().unwrap_or_else(|| Path::new(""))
    }
}

fn default_gallery_root() -> PathBuf {
    PathBuf::from("gallery")
}

fn default_output() -> PathBuf {
    PathBuf::from("_data")
}

fn default_columns() -> usize {
    6
}

fn default_grid_selector() -> String {
    String::from(".bento-grid")
}

fn default_item_selector() -> String {
    String::from(".gallery-item")
}

fn default_media_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "gif", "webp", "mp4", "webm", "heic"]
        .iter()
        .map(|extension| extension.to_string())
        .collect()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{source} in {}", path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{source} in {}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl ConfigError {
    /// Tells whether this ConfigError originated because of a path not
    /// existing.
    pub fn is_not_found(&self) -> bool {
        match self {
            ConfigError::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
