use std::{fs, path::Path};

use crate::{errors::Result, ledger::Transaction};

/// Writes the full transaction list atomically by staging to a temporary file.
pub fn save_transactions(transactions: &[Transaction], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(transactions)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Loads a transaction file written by [`save_transactions`].
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
