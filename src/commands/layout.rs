use std::io::{self, Write};

use gridpack::{BentoPacker, Strategy};

use crate::{
    data::GridLayout,
    options::{LayoutFormat, LayoutOptions},
    style::{apply_placements, Stylesheet},
};

pub fn layout(options: LayoutOptions) -> anyhow::Result<()> {
    let packer = BentoPacker::new(options.columns)?;
    let output = packer.pack_count(options.count);

    match output.strategy() {
        Strategy::Curated => log::info!("Curated bento layout applied for {} items", options.count),
        Strategy::Fallback => log::info!(
            "Algorithmic fallback applied for {} items ({} rows)",
            options.count,
            output.row_count()
        ),
    }

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    match options.format {
        LayoutFormat::Diagram => {
            writeln!(stdout, "{}", output.diagram())?;
        }
        LayoutFormat::Css => {
            let mut sheet = Stylesheet::new(".bento-grid", ".gallery-item");
            let handles: Vec<usize> = (1..=options.count).collect();
            apply_placements(&mut sheet, &handles, &output)?;

            write!(stdout, "{}", sheet.render())?;
        }
        LayoutFormat::Json => {
            let layout = GridLayout::new(&output)?;
            serde_json::to_writer_pretty(&mut stdout, &layout)?;
            writeln!(stdout)?;
        }
    }

    stdout.flush()?;

    Ok(())
}
