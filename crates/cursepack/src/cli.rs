use std::path::PathBuf;

use clap::builder::styling::AnsiColor::{BrightBlue, White, Yellow};
use clap::builder::Styles;
use clap::Parser;

/// Styling for [`clap`]'s CLI interface.
const STYLES: Styles = Styles::styled()
    .usage(Yellow.on_default().bold())
    .literal(BrightBlue.on_default().bold())
    .placeholder(White.on_default().bold())
    .header(Yellow.on_default().bold());

#[derive(Parser, Debug)]
#[command(version, author, about, styles(STYLES))]
pub struct Options {
    /// Path to the CurseForge modpack bundle (a `.zip` file).
    pub archive_path: PathBuf,

    /// Directory to install the modpack into. Created if missing.
    pub output_path: PathBuf,
}
