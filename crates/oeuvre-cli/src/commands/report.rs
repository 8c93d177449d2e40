use anyhow::Result;
use oeuvre_core::report::{era_report, lyrics_backup};

use super::Workspace;

/// Print the era report of complete songs.
///
/// The report always covers full works, whatever `--category` says.
pub fn show_report(ws: &Workspace) -> Result<()> {
    println!("{}", era_report(&ws.catalog, &ws.eras));
    Ok(())
}

/// Print the lyrics backup.
pub fn show_lyrics(ws: &Workspace) -> Result<()> {
    println!("{}", lyrics_backup(&ws.catalog));
    Ok(())
}
