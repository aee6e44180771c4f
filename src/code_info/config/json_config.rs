use std::{error::Error, fs::File, io::BufReader, path::Path};

use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
pub struct JsonConfig {
    #[serde(default)]
    pub mock_classes: Vec<String>,
    #[serde(default)]
    pub php_major_version: Option<u8>,
    #[serde(default)]
    pub max_comparison_depth: Option<usize>,
    #[serde(default)]
    pub verbosity: Option<String>,
}

pub(crate) fn read_from_file(path: &Path) -> Result<JsonConfig, Box<dyn Error>> {
    // Open the file in read-only mode with buffer.
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    Ok(serde_json::from_reader(reader)?)
}
