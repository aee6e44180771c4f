use serde::{Deserialize, Serialize};

/// The file a comparison is made from, used as the calling context when
/// recording ambiguous member access.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FilePath(pub String);

impl FilePath {
    pub fn get_relative_path(&self, root_dir: &str) -> String {
        if self.0.starts_with(root_dir) && self.0.len() > root_dir.len() {
            self.0[root_dir.len() + 1..].to_string()
        } else {
            self.0.clone()
        }
    }
}
