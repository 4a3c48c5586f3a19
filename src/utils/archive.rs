use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Bundle the run artifacts into a single gzip-compressed tar archive.
///
/// The archive holds the harness executable, the input CSV, the HTML report,
/// and the full log directory tree, each stored under its bare name so an
/// extracted bundle is self-describing regardless of where the run happened.
pub fn create_bundle(
    archive_path: &Path,
    input_csv: &Path,
    output_html: &Path,
    log_dir: &Path,
) -> Result<PathBuf> {
    let file = File::create(archive_path)
        .with_context(|| format!("Failed to create archive: {}", archive_path.display()))?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    match std::env::current_exe() {
        Ok(exe) => {
            let name = bare_name(&exe).unwrap_or_else(|| "gst-validate-batch".to_string());
            builder
                .append_path_with_name(&exe, &name)
                .with_context(|| format!("Failed to archive executable: {}", exe.display()))?;
        }
        Err(err) => log::warn!("Skipping harness executable in archive: {}", err),
    }

    builder
        .append_path_with_name(input_csv, entry_name(input_csv)?)
        .with_context(|| format!("Failed to archive CSV: {}", input_csv.display()))?;
    builder
        .append_path_with_name(output_html, entry_name(output_html)?)
        .with_context(|| format!("Failed to archive report: {}", output_html.display()))?;
    builder
        .append_dir_all(entry_name(log_dir)?, log_dir)
        .with_context(|| format!("Failed to archive log directory: {}", log_dir.display()))?;

    let encoder = builder
        .into_inner()
        .context("Failed to finish tar stream")?;
    encoder.finish().context("Failed to finish gzip stream")?;

    Ok(archive_path.to_path_buf())
}

fn bare_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

fn entry_name(path: &Path) -> Result<String> {
    bare_name(path)
        .ok_or_else(|| anyhow::anyhow!("Path has no file name: {}", path.display()))
}

#[cfg(test)]
fn extract_bundle(archive_path: &Path, target_dir: &Path) -> Result<()> {
    let tar_gz = File::open(archive_path)?;
    let tar = flate2::read::GzDecoder::new(tar_gz);
    let mut archive = tar::Archive::new(tar);
    archive.unpack(target_dir)?;
    Ok(())
}
