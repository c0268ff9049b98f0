//! Turns packed placements into CSS grid directives and applies them to a
//! rendering surface.

use std::{collections::BTreeMap, fmt};

use gridpack::{PackOutput, Placement, Strategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The `grid-column` and `grid-row` values for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ItemStyle {
    pub grid_column: String,
    pub grid_row: String,
}

impl ItemStyle {
    /// Curated layouts rely on the grid's own auto-placement, so they only
    /// carry spans. Fallback placements pin each item to its cell with a
    /// 1-based line number.
    pub fn for_placement(strategy: Strategy, placement: &Placement) -> Self {
        match strategy {
            Strategy::Curated => Self {
                grid_column: format!("span {}", placement.column_span()),
                grid_row: format!("span {}", placement.row_span()),
            },
            Strategy::Fallback => Self {
                grid_column: format!(
                    "{} / span {}",
                    placement.column_start() + 1,
                    placement.column_span()
                ),
                grid_row: format!(
                    "{} / span {}",
                    placement.row_start() + 1,
                    placement.row_span()
                ),
            },
        }
    }
}

/// The `grid-template-rows` value for the grid container, only set by the
/// fallback packer.
pub fn row_template(output: &PackOutput) -> Option<String> {
    match output.strategy() {
        Strategy::Fallback if !output.is_empty() => {
            Some(format!("repeat({}, auto)", output.row_count()))
        }
        _ => None,
    }
}

/// Something that grid styles can be written to, like a stylesheet or a
/// document tree. Handles identify the items on the surface.
pub trait GridSurface {
    type Handle;

    fn clear_item(&mut self, handle: &Self::Handle);
    fn set_item_style(&mut self, handle: &Self::Handle, style: ItemStyle);
    fn set_row_template(&mut self, template: String);
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplyError {
    #[error("Got {handles} item handles for a layout of {placements} placements")]
    HandleMismatch { handles: usize, placements: usize },
}

/// Applies a packed layout to `surface`. `handles[i]` must be the item that
/// was at position `i` when the layout was packed.
///
/// Every item's previous style is cleared before the new styles are written.
pub fn apply_placements<S: GridSurface>(
    surface: &mut S,
    handles: &[S::Handle],
    output: &PackOutput,
) -> Result<(), ApplyError> {
    let placements = output.placements();

    if handles.len() != placements.len() {
        return Err(ApplyError::HandleMismatch {
            handles: handles.len(),
            placements: placements.len(),
        });
    }

    if handles.is_empty() {
        return Ok(());
    }

    for handle in handles {
        surface.clear_item(handle);
    }

    for placement in placements {
        let style = ItemStyle::for_placement(output.strategy(), placement);
        surface.set_item_style(&handles[placement.item_index()], style);
    }

    if let Some(template) = row_template(output) {
        surface.set_row_template(template);
    }

    Ok(())
}

/// A static stylesheet that positions items with `:nth-child` selectors.
///
/// Handles are the 1-based positions of items among their siblings.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    container_selector: String,
    item_selector: String,
    rules: BTreeMap<usize, ItemStyle>,
    row_template: Option<String>,
}

impl Stylesheet {
    pub fn new<C: Into<String>, I: Into<String>>(container_selector: C, item_selector: I) -> Self {
        Self {
            container_selector: container_selector.into(),
            item_selector: item_selector.into(),
            rules: BTreeMap::new(),
            row_template: None,
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(template) = &self.row_template {
            writeln!(f, "{} {{", self.container_selector)?;
            writeln!(f, "  grid-template-rows: {};", template)?;
            writeln!(f, "}}")?;
        }

        for (position, style) in &self.rules {
            writeln!(
                f,
                "{} > {}:nth-child({}) {{",
                self.container_selector, self.item_selector, position
            )?;
            writeln!(f, "  grid-column: {};", style.grid_column)?;
            writeln!(f, "  grid-row: {};", style.grid_row)?;
            writeln!(f, "}}")?;
        }

        Ok(())
    }
}

impl GridSurface for Stylesheet {
    type Handle = usize;

    fn clear_item(&mut self, handle: &usize) {
        self.rules.remove(handle);
    }

    fn set_item_style(&mut self, handle: &usize, style: ItemStyle) {
        self.rules.insert(*handle, style);
    }

    fn set_row_template(&mut self, template: String) {
        self.row_template = Some(template);
    }
}

/// Collects styles in memory, keyed by whatever handle the caller uses for
/// its items.
#[derive(Debug, Clone)]
pub struct StyleMap<K: Ord + Clone> {
    pub styles: BTreeMap<K, ItemStyle>,
    pub row_template: Option<String>,
}

impl<K: Ord + Clone> StyleMap<K> {
    pub fn new() -> Self {
        Self {
            styles: BTreeMap::new(),
            row_template: None,
        }
    }
}

impl<K: Ord + Clone> Default for StyleMap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone> GridSurface for StyleMap<K> {
    type Handle = K;

    fn clear_item(&mut self, handle: &K) {
        self.styles.remove(handle);
    }

    fn set_item_style(&mut self, handle: &K, style: ItemStyle) {
        self.styles.insert(handle.clone(), style);
    }

    fn set_row_template(&mut self, template: String) {
        self.row_template = Some(template);
    }
}
