use super::discovery::discover_files;
use super::{EtlOptions, PhaseReport, RowStats};
use crate::warehouse::{Loader, SqliteWarehouse};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{error, info};

/// Runs `handler` on every matching file under `root`, one transaction per
/// file, committing after each one.
///
/// A failing file is rolled back. It then aborts the run unless
/// `continue_on_error` is set, in which case it is counted and skipped.
pub(crate) fn process_data<F>(
    store: &mut SqliteWarehouse,
    root: &Path,
    options: &EtlOptions,
    mut handler: F,
) -> Result<PhaseReport>
where
    F: FnMut(&Loader<'_>, &Path) -> Result<RowStats>,
{
    let files = discover_files(root, &options.file_extension)?;
    let total = files.len();
    info!("{} files found in {}", total, root.display());

    let mut report = PhaseReport {
        files_found: total,
        ..Default::default()
    };

    for (i, path) in files.iter().enumerate() {
        match process_file(store, path, options, &mut handler) {
            Ok(stats) => {
                report.files_loaded += 1;
                report.rows += stats;
            }
            Err(e) => {
                report.files_failed += 1;
                if !options.continue_on_error {
                    return Err(e);
                }
                error!("Skipping {}: {:#}", path.display(), e);
            }
        }
        info!("{}/{} files processed.", i + 1, total);
    }

    Ok(report)
}

fn process_file<F>(
    store: &mut SqliteWarehouse,
    path: &Path,
    options: &EtlOptions,
    handler: &mut F,
) -> Result<RowStats>
where
    F: FnMut(&Loader<'_>, &Path) -> Result<RowStats>,
{
    let tx = store.begin_file()?;
    // Returning early drops the transaction, which rolls the file back
    let stats = handler(&Loader::new(&tx, options.songplay_policy), path)
        .with_context(|| format!("Failed to process {}", path.display()))?;
    tx.commit()
        .with_context(|| format!("Failed to commit {}", path.display()))?;
    Ok(stats)
}
