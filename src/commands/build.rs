use std::{collections::BTreeMap, env};

use fs_err as fs;
use gridpack::{BentoPacker, Strategy};
use indicatif::ProgressBar;

use crate::{
    data::{Config, GalleryManifest, LayoutManifest},
    gallery::discover_galleries,
    options::BuildOptions,
    style::{apply_placements, Stylesheet},
};

static STYLESHEET_FILENAME: &str = "bento.css";

pub fn build(options: BuildOptions) -> anyhow::Result<()> {
    let project_path = match options.project_path {
        Some(path) => path,
        None => env::current_dir()?,
    };

    let config = match Config::read_from_folder_or_file(&project_path) {
        Ok(config) => config,
        Err(err) if err.is_not_found() => anyhow::bail!(
            "Could not find a bento.toml at {}: {}",
            project_path.display(),
            err
        ),
        Err(err) => return Err(err.into()),
    };
    log::info!("Building bento layouts for \"{}\"", config.name);

    let packer = BentoPacker::new(config.columns)?;
    let gallery_root = config.folder().join(&config.gallery_root);
    let output_folder = config.folder().join(&config.output);

    let galleries = discover_galleries(&gallery_root, &config.media_extensions)?;

    // A slug is both the gallery URL and its CSS selector, so it must be unique.
    let mut folders_by_slug = BTreeMap::new();
    for gallery in &galleries {
        if let Some(other) = folders_by_slug.insert(gallery.slug.as_str(), &gallery.folder_name) {
            anyhow::bail!(
                "Gallery folders \"{}\" and \"{}\" both have the slug \"{}\"; rename one of them",
                other,
                gallery.folder_name,
                gallery.slug
            );
        }
    }

    let previous = match LayoutManifest::read_from_folder(&output_folder) {
        Ok(manifest) => manifest,
        Err(err) if err.is_not_found() => LayoutManifest::default(),
        Err(err) => return Err(err.into()),
    };

    let progress = ProgressBar::new(galleries.len() as u64);
    let mut manifest = LayoutManifest::default();
    let mut css = String::new();

    for gallery in &galleries {
        let output = packer.pack(&gallery.images);

        match output.strategy() {
            Strategy::Curated => log::info!(
                "Curated bento layout applied for {} items in {}",
                gallery.images.len(),
                gallery.title
            ),
            Strategy::Fallback => log::info!(
                "Algorithmic fallback applied for {} items in {}",
                gallery.images.len(),
                gallery.title
            ),
        }

        let container = format!("{}[data-gallery=\"{}\"]", config.grid_selector, gallery.slug);
        let mut sheet = Stylesheet::new(container, config.item_selector.as_str());
        let handles: Vec<usize> = (1..=gallery.images.len()).collect();
        apply_placements(&mut sheet, &handles, &output)?;

        css.push_str(&format!("/* {} */\n", gallery.title));
        css.push_str(&sheet.render());

        let entry = GalleryManifest::new(gallery, &output)?;
        match previous.gallery(&gallery.slug) {
            Some(old) if old.layout == entry.layout => {
                log::debug!("Layout for {} is unchanged", gallery.title)
            }
            Some(_) => log::info!("Layout for {} changed since the last build", gallery.title),
            None => log::debug!("New gallery {}", gallery.title),
        }

        manifest.galleries.push(entry);
        progress.inc(1);
    }

    progress.finish_and_clear();

    fs::create_dir_all(&output_folder)?;
    manifest.write_to_folder(&output_folder)?;
    fs::write(output_folder.join(STYLESHEET_FILENAME), css)?;

    log::info!(
        "Wrote layouts for {} galleries to {}",
        manifest.galleries.len(),
        output_folder.display()
    );

    Ok(())
}
