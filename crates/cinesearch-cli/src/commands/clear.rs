use crate::output::Output;
use cinesearch_config::{LocalReviewStore, PathManager};
use color_eyre::Result;
use std::fs;

pub fn run_clear(all: bool, credentials: bool, snapshot: bool, paths: &PathManager, output: &Output) -> Result<()> {
    if all {
        clear_credentials(paths, output)?;
        clear_snapshot(paths, output);
        output.success("Credentials and review snapshot cleared");
        return Ok(());
    }

    if credentials {
        clear_credentials(paths, output)?;
    }
    if snapshot {
        clear_snapshot(paths, output);
    }

    if !credentials && !snapshot {
        output.warn("No clear option specified. Use --credentials, --snapshot, or --all");
        output.println("\nExample: cinesearch clear --snapshot");
    }

    Ok(())
}

fn clear_credentials(paths: &PathManager, output: &Output) -> Result<()> {
    let credentials_file = paths.credentials_file();

    if credentials_file.exists() {
        fs::remove_file(&credentials_file).map_err(|e| {
            color_eyre::eyre::eyre!("Failed to remove credentials file at {}: {}", credentials_file.display(), e)
        })?;
        output.success(format!("Cleared credentials: {}", credentials_file.display()));
    } else {
        output.info("No credentials file found to clear");
    }

    Ok(())
}

fn clear_snapshot(paths: &PathManager, output: &Output) {
    let store = LocalReviewStore::new(paths.data_dir());
    if store.clear() {
        output.success(format!("Cleared review snapshot: {}", store.path().display()));
    } else {
        output.info("No review snapshot found to clear");
    }
}
