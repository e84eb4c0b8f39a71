use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use bytes::Bytes;
use tools::encode::text::{normalize_buf, Text};
use tracing::info;

/// Plain file names get a `.txt` extension, anything that already has an extension is kept as is.
pub fn with_txt_extension(path: &Path) -> PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().is_none() {
        path.set_extension("txt");
    }
    path
}

/// Reads a file and keeps only its letters.
pub fn read_text(path: &Path) -> Result<Text> {
    let path = with_txt_extension(path);
    let raw = Bytes::from(
        fs::read(&path).with_context(|| format!("Error opening file {}", path.display()))?,
    );
    let text = normalize_buf(raw);
    info!(path = %path.display(), letters = text.len(), "read text file");
    Ok(text)
}

/// Writes the letters without any grouping.
pub fn write_text(path: &Path, text: &Text) -> Result<PathBuf> {
    let path = with_txt_extension(path);
    fs::write(&path, text.to_string())
        .with_context(|| format!("Error writing file {}", path.display()))?;
    info!(path = %path.display(), letters = text.len(), "wrote text file");
    Ok(path)
}

#[test]
fn test_with_txt_extension() {
    assert_eq!(with_txt_extension(Path::new("secret")), PathBuf::from("secret.txt"));
    assert_eq!(with_txt_extension(Path::new("secret.txt")), PathBuf::from("secret.txt"));
    assert_eq!(with_txt_extension(Path::new("dir/data.enc")), PathBuf::from("dir/data.enc"));
}
