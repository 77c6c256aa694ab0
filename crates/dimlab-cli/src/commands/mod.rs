//! Command implementations.

use crate::error::{CliError, Result};
use std::path::PathBuf;

pub mod browse;
pub mod label_hypotheses;
pub mod label_topics;
pub mod sample;
pub mod score;

pub use self::browse::execute_browse;
pub use self::label_hypotheses::execute_label_hypotheses;
pub use self::label_topics::execute_label_topics;
pub use self::sample::execute_sample;
pub use self::score::execute_score;

/// Path of the shared readline history file.
pub(crate) fn history_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    let dimlab_dir = home.join(".dimlab");
    std::fs::create_dir_all(&dimlab_dir)?;
    Ok(dimlab_dir.join("history.txt"))
}
