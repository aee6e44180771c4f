use std::{error::Error, path::Path, str::FromStr};

use sigil_logger::Verbosity;

pub mod json_config;

#[derive(Clone, Debug)]
pub struct Config {
    /// Lowercase class-name patterns that identify test doubles.
    pub mock_classes: Vec<glob::Pattern>,
    pub php_major_version: u8,
    pub max_comparison_depth: usize,
    pub verbosity: Verbosity,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            mock_classes: Vec::new(),
            php_major_version: 8,
            max_comparison_depth: 256,
            verbosity: Verbosity::Simple,
        }
    }

    pub fn update_from_file(&mut self, config_path: &Path) -> Result<(), Box<dyn Error>> {
        let json_config = json_config::read_from_file(config_path)?;

        self.mock_classes = json_config
            .mock_classes
            .iter()
            .map(|v| glob::Pattern::new(&v.to_ascii_lowercase()))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(php_major_version) = json_config.php_major_version {
            self.php_major_version = php_major_version;
        }

        if let Some(max_comparison_depth) = json_config.max_comparison_depth {
            self.max_comparison_depth = max_comparison_depth;
        }

        if let Some(verbosity) = json_config.verbosity {
            self.verbosity = Verbosity::from_str(&verbosity)?;
        }

        Ok(())
    }

    pub fn is_mock_class(&self, fq_class_name: &str) -> bool {
        let lc_name = fq_class_name.to_ascii_lowercase();

        self.mock_classes
            .iter()
            .any(|pattern| pattern.matches(&lc_name))
    }
}
