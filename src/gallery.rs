//! Discovers galleries on disk and derives the names and captions the site
//! shows for them.
//!
//! Every direct subfolder of the gallery root is one gallery, unless its name
//! starts with `.` or `_`. Media files directly inside the folder become the
//! gallery's items. Files named `cover_*` are ordered first so that the first
//! item is always the cover photo.

use std::{
    cmp::Ordering,
    fs, io,
    path::{Path, PathBuf},
};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use walkdir::WalkDir;

const COVER_PREFIX: &str = "cover_";
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm"];
const MAX_BASE_NAME_LEN: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    pub slug: String,
    pub title: String,
    pub folder_name: String,
    pub description: String,
    pub images: Vec<GalleryImage>,
}

impl Gallery {
    pub fn url(&self) -> String {
        format!("/galleries/{}/", self.slug)
    }

    pub fn preview_image(&self) -> &str {
        self.images
            .first()
            .map(|image| image.filename.as_str())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryImage {
    pub original_filename: String,

    /// The sequence-numbered name this file is published under, like
    /// `kids-yoga-020.jpg`.
    pub filename: String,
    pub title: String,
    pub caption: String,
    pub kind: MediaKind,

    /// `(index + 1) * 10`, leaving room to slot new files between existing
    /// ones without renaming everything.
    pub sequence_number: usize,
    pub size: SizeClass,
    pub featured: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaKind {
    Image,
    Video,
}

/// A hint for templates about how prominent an item should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    /// The first item and every ninth one after it are large and featured,
    /// every other third item is medium.
    pub fn for_index(index: usize) -> (SizeClass, bool) {
        if index % 9 == 0 {
            (SizeClass::Large, true)
        } else if index % 3 == 0 {
            (SizeClass::Medium, false)
        } else {
            (SizeClass::Small, false)
        }
    }
}

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("Could not read gallery folder {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error(transparent)]
    WalkDir {
        #[from]
        source: walkdir::Error,
    },
}

/// Finds every gallery under `root`, sorted by title.
///
/// `extensions` lists the lowercase file extensions, without a leading dot,
/// that count as media. A missing root is not an error; it just has no
/// galleries.
pub fn discover_galleries(
    root: &Path,
    extensions: &[String],
) -> Result<Vec<Gallery>, GalleryError> {
    match fs::metadata(root) {
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::warn!("Gallery directory not found: {}", root.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(GalleryError::Io {
                path: root.to_owned(),
                source,
            })
        }
    }

    let mut galleries = Vec::new();

    let folders = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()));

    for entry in folders {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let folder_name = match entry.file_name().to_str() {
            Some(name) => name.to_owned(),
            None => {
                log::warn!(
                    "Folder {} had invalid Unicode, skipping it...",
                    entry.path().display()
                );
                continue;
            }
        };

        if folder_name.starts_with('.') || folder_name.starts_with('_') {
            log::debug!("Skipping hidden gallery folder {}", folder_name);
            continue;
        }

        let files = list_media_files(entry.path(), extensions)?;
        if files.is_empty() {
            log::debug!("Skipping empty gallery folder {}", folder_name);
            continue;
        }

        galleries.push(build_gallery(folder_name, &files));
    }

    galleries.sort_by(|a, b| compare_titles(&a.title, &b.title));

    log::info!(
        "Found {} galleries with {} total files",
        galleries.len(),
        galleries
            .iter()
            .map(|gallery| gallery.images.len())
            .sum::<usize>()
    );

    Ok(galleries)
}

/// Lists the media file names directly inside `folder`, covers first and
/// each group sorted by name.
fn list_media_files(folder: &Path, extensions: &[String]) -> Result<Vec<String>, GalleryError> {
    let mut covers = Vec::new();
    let mut regular = Vec::new();

    for entry in WalkDir::new(folder).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = match entry.file_name().to_str() {
            Some(name) => name.to_owned(),
            None => {
                log::warn!(
                    "File {} had invalid Unicode, skipping it...",
                    entry.path().display()
                );
                continue;
            }
        };

        let is_media = lowercase_extension(&name)
            .map(|ext| extensions.iter().any(|allowed| *allowed == ext))
            .unwrap_or(false);

        if !is_media {
            continue;
        }

        if name.to_lowercase().starts_with(COVER_PREFIX) {
            covers.push(name);
        } else {
            regular.push(name);
        }
    }

    covers.sort();
    regular.sort();
    covers.extend(regular);

    Ok(covers)
}

fn build_gallery(folder_name: String, files: &[String]) -> Gallery {
    let slug = slugify(&folder_name);
    let title = title_case(&folder_name);
    let description = describe_folder(&folder_name, &title);

    let images = files
        .iter()
        .enumerate()
        .map(|(index, file)| build_image(&folder_name, &slug, &title, index, file))
        .collect();

    Gallery {
        slug,
        title,
        folder_name,
        description,
        images,
    }
}

fn build_image(
    folder_name: &str,
    slug: &str,
    title: &str,
    index: usize,
    file: &str,
) -> GalleryImage {
    let kind = match lowercase_extension(file) {
        Some(ext) if VIDEO_EXTENSIONS.contains(&ext.as_str()) => MediaKind::Video,
        _ => MediaKind::Image,
    };

    let number = index + 1;
    let sequence_number = number * 10;
    let (size, featured) = SizeClass::for_index(index);

    let item_title = match kind {
        MediaKind::Image => format!("{} {}", title, number),
        MediaKind::Video => format!("{} Video {}", title, number),
    };

    GalleryImage {
        original_filename: file.to_owned(),
        filename: sequence_filename(slug, sequence_number, file),
        title: item_title,
        caption: caption_for(folder_name, kind),
        kind,
        sequence_number,
        size,
        featured,
    }
}

/// Lowercases a folder name, joins words with `-`, and drops anything that
/// isn't a lowercase letter, digit, or dash.
pub fn slugify(name: &str) -> String {
    lazy_static::lazy_static! {
        static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
        static ref DISALLOWED: Regex = Regex::new(r"[^a-z0-9-]").unwrap();
    }

    let lower = name.to_lowercase();
    let dashed = WHITESPACE.replace_all(&lower, "-");

    DISALLOWED.replace_all(&dashed, "").into_owned()
}

/// Upper-cases the first letter of every space-separated word.
pub fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// `{base}-{sequence}{ext}`, where long slugs are cut down to their first
/// three words and the original extension is kept as-is.
pub fn sequence_filename(slug: &str, sequence_number: usize, original: &str) -> String {
    let base = if slug.len() > MAX_BASE_NAME_LEN {
        slug.split('-').take(3).collect::<Vec<_>>().join("-")
    } else {
        slug.to_owned()
    };

    let ext = Path::new(original)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default();

    format!("{}-{:03}{}", base, sequence_number, ext)
}

fn describe_folder(folder_name: &str, title: &str) -> String {
    let lower = folder_name.to_lowercase();

    let description = if lower.contains("kids") {
        "Yoga classes specially designed for children to build strength, flexibility, and mindfulness"
    } else if lower.contains("therapy") || lower.contains("therapies") {
        "Personalized therapeutic yoga sessions tailored to individual needs for pain relief and healing"
    } else if lower.contains("regular") {
        "Group yoga classes for all levels focusing on props-based practice and alignment"
    } else if lower.contains("social") {
        "Community outreach programs and free yoga sessions for social welfare"
    } else if lower.contains("video") {
        "Therapeutic yoga practice videos and demonstrations"
    } else {
        return format!(
            "Photo and video gallery of {} sessions",
            title.to_lowercase()
        );
    };

    description.to_owned()
}

fn caption_for(folder_name: &str, kind: MediaKind) -> String {
    let lower = folder_name.to_lowercase();

    let caption = if lower.contains("kids") {
        "Fun and engaging yoga for children"
    } else if lower.contains("therapy") {
        "Personalized healing session"
    } else if lower.contains("regular") {
        "Group practice session"
    } else if lower.contains("social") {
        "Free yoga for the community"
    } else {
        match kind {
            MediaKind::Image => "Yoga session",
            MediaKind::Video => "Video demonstration",
        }
    };

    caption.to_owned()
}

fn lowercase_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
