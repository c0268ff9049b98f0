use std::{
    fs, io,
    path::{Path, PathBuf},
};

use gridpack::{PackOutput, Strategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    gallery::{Gallery, MediaKind, SizeClass},
    style::{apply_placements, ApplyError, ItemStyle, StyleMap},
};

static MANIFEST_FILENAME: &str = "bento-layout.json";

/// Every gallery of a project along with its computed grid layout, as of the
/// last build. Site templates read this file to render gallery pages.
///
/// Galleries are listed in the order they were discovered, which is sorted
/// by title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutManifest {
    pub galleries: Vec<GalleryManifest>,
}

impl LayoutManifest {
    pub fn gallery(&self, slug: &str) -> Option<&GalleryManifest> {
        self.galleries.iter().find(|gallery| gallery.slug == slug)
    }

    pub fn read_from_folder<P: AsRef<Path>>(folder_path: P) -> Result<Self, ManifestError> {
        let file_path = folder_path.as_ref().join(MANIFEST_FILENAME);

        let contents = fs::read(&file_path).map_err(|source| ManifestError::Io {
            file_path: file_path.clone(),
            source,
        })?;
        let manifest = serde_json::from_slice(&contents)
            .map_err(|source| ManifestError::Json { file_path, source })?;

        Ok(manifest)
    }

    pub fn write_to_folder<P: AsRef<Path>>(&self, folder_path: P) -> Result<(), ManifestError> {
        let file_path = folder_path.as_ref().join(MANIFEST_FILENAME);

        let serialized =
            serde_json::to_vec_pretty(self).map_err(|source| ManifestError::Json {
                file_path: file_path.clone(),
                source,
            })?;
        fs::write(&file_path, serialized).map_err(|source| ManifestError::Io {
            file_path: file_path.clone(),
            source,
        })?;

        log::trace!("Saved layout manifest to {}", file_path.display());

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GalleryManifest {
    pub slug: String,
    pub title: String,
    pub folder_name: String,
    pub description: String,
    pub url: String,
    pub preview_image: String,
    pub images: Vec<ImageManifest>,
    pub layout: GridLayout,
}

impl GalleryManifest {
    pub fn new(gallery: &Gallery, output: &PackOutput) -> Result<Self, ApplyError> {
        let images = gallery
            .images
            .iter()
            .map(|image| ImageManifest {
                original_filename: image.original_filename.clone(),
                filename: image.filename.clone(),
                title: image.title.clone(),
                caption: image.caption.clone(),
                kind: image.kind,
                sequence_number: image.sequence_number,
                size: image.size,
                featured: image.featured,
            })
            .collect();

        Ok(Self {
            slug: gallery.slug.clone(),
            title: gallery.title.clone(),
            folder_name: gallery.folder_name.clone(),
            description: gallery.description.clone(),
            url: gallery.url(),
            preview_image: gallery.preview_image().to_owned(),
            images,
            layout: GridLayout::new(output)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImageManifest {
    pub original_filename: String,
    pub filename: String,
    pub title: String,
    pub caption: String,
    pub kind: MediaKind,
    pub sequence_number: usize,
    pub size: SizeClass,
    pub featured: bool,
}

/// A packed layout in the shape templates need: one entry per item, in item
/// order, plus the container's row template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GridLayout {
    pub strategy: LayoutStrategy,
    pub columns: usize,
    pub row_count: usize,

    /// Only set for layouts that pin items to explicit rows.
    #[serde(default)]
    pub grid_template_rows: Option<String>,
    pub items: Vec<PlacedItem>,
}

impl GridLayout {
    pub fn new(output: &PackOutput) -> Result<Self, ApplyError> {
        let handles: Vec<usize> = (0..output.placements().len()).collect();

        let mut styles = StyleMap::new();
        apply_placements(&mut styles, &handles, output)?;

        let items = output
            .placements()
            .iter()
            .map(|placement| PlacedItem {
                index: placement.item_index(),
                column_start: placement.column_start(),
                row_start: placement.row_start(),
                column_span: placement.column_span(),
                row_span: placement.row_span(),
                style: styles.styles[&placement.item_index()].clone(),
            })
            .collect();

        Ok(Self {
            strategy: output.strategy().into(),
            columns: output.columns(),
            row_count: output.row_count(),
            grid_template_rows: styles.row_template,
            items,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlacedItem {
    pub index: usize,
    pub column_start: usize,
    pub row_start: usize,
    pub column_span: usize,
    pub row_span: usize,

    #[serde(flatten)]
    pub style: ItemStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStrategy {
    Curated,
    Fallback,
}

impl From<Strategy> for LayoutStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Curated => LayoutStrategy::Curated,
            Strategy::Fallback => LayoutStrategy::Fallback,
        }
    }
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Could not read or write manifest {}: {source}", file_path.display())]
    Io {
        file_path: PathBuf,
        source: io::Error,
    },

    #[error("Invalid layout manifest {}: {source}", file_path.display())]
    Json {
        file_path: PathBuf,
        source: serde_json::Error,
    },
}

impl ManifestError {
    pub fn is_not_found(&self) -> bool {
        match self {
            ManifestError::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use gridpack::BentoPacker;

    #[test]
    fn grid_layout_for_fallback() {
        let output = BentoPacker::new(6).unwrap().pack_count(3);
        let layout = GridLayout::new(&output).unwrap();

        assert_eq!(layout.strategy, LayoutStrategy::Fallback);
        assert_eq!(layout.row_count, 2);
        assert_eq!(layout.grid_template_rows.as_deref(), Some("repeat(2, auto)"));
        assert_eq!(layout.items[1].column_start, 2);
        assert_eq!(layout.items[1].style.grid_column, "3 / span 2");
    }

    #[test]
    fn placed_item_flattens_style() {
        let output = BentoPacker::new(6).unwrap().pack_count(8);
        let layout = GridLayout::new(&output).unwrap();
        let value = serde_json::to_value(&layout.items[3]).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "index": 3,
                "column-start": 0,
                "row-start": 1,
                "column-span": 4,
                "row-span": 2,
                "grid-column": "span 4",
                "grid-row": "span 2",
            })
        );
    }

    #[test]
    fn missing_manifest_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = LayoutManifest::read_from_folder(dir.path()).unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn manifest_survives_a_write() {
        let dir = tempfile::tempdir().unwrap();
        let output = BentoPacker::new(6).unwrap().pack_count(5);

        let mut manifest = LayoutManifest::default();
        manifest.galleries.push(GalleryManifest {
            slug: "kids-yoga".to_owned(),
            title: "Kids Yoga".to_owned(),
            folder_name: "kids yoga".to_owned(),
            description: String::new(),
            url: "/galleries/kids-yoga/".to_owned(),
            preview_image: "kids-yoga-010.jpg".to_owned(),
            images: Vec::new(),
            layout: GridLayout::new(&output).unwrap(),
        });

        manifest.write_to_folder(dir.path()).unwrap();
        let read_back = LayoutManifest::read_from_folder(dir.path()).unwrap();

        assert_eq!(read_back, manifest);
        assert_eq!(read_back.gallery("kids-yoga").unwrap().title, "Kids Yoga");
        assert!(read_back.gallery("social").is_none());
    }
}
