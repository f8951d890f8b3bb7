use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;
use zip::ZipArchive;

use crate::ui::Ui;

/// Extract the `.jsonl` entries of a zip file into `dest_dir`, flattening
/// any directory prefix. Returns the number of files written.
pub fn extract_zip(zip_path: &Path, dest_dir: &Path, ui: &mut impl Ui) -> Result<u64> {
    let file = File::open(zip_path)
        .with_context(|| format!("Failed to open zip file: {:?}", zip_path))?;
    let reader = BufReader::new(file);
    let mut archive = ZipArchive::new(reader).context("Failed to read zip archive")?;

    fs::create_dir_all(dest_dir).context("Failed to create destination directory")?;

    let total_files = archive.len() as u64;
    let mut extracted = 0;

    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .context("Failed to read file from archive")?;

        // Get the file name, stripping any directory prefix
        let name = file.name().to_string();
        let file_name = Path::new(&name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&name)
            .to_string();

        ui.set_progress(i as u64 + 1, total_files, "Extracting");

        if !file_name.ends_with(".jsonl") {
            continue;
        }

        let dest_path = dest_dir.join(&file_name);
        let mut dest_file = File::create(&dest_path)
            .with_context(|| format!("Failed to create file: {:?}", dest_path))?;

        io::copy(&mut file, &mut dest_file)
            .with_context(|| format!("Failed to extract: {}", file_name))?;
        extracted += 1;
    }

    ui.log(format!("Extracted {} files to {:?}", extracted, dest_dir));
    Ok(extracted)
}
