//! Extracted-text audit trail.
//!
//! Each successfully extracted article can be saved as `<URL_ID>.txt` so a
//! run's numbers can be checked against the text they were computed from.
//! Nothing downstream reads these files back.

use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;

/// Writer for per-article text artifacts.
#[derive(Debug, Clone)]
pub struct ArticleArtifact {
    dir: PathBuf,
}

impl ArticleArtifact {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    /// Path of the artifact for `url_id`. Path separators in the id are replaced.
    pub fn path_for(&self, url_id: &str) -> PathBuf {
        let name: String = url_id
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
            .collect();
        self.dir.join(format!("{}.txt", name))
    }

    /// Writes `Title: ...` / `Content:` for one article, creating the directory if needed.
    pub fn write(&self, url_id: &str, title: &str, content: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(url_id);
        fs::write(&path, render(title, content))?;
        Ok(path)
    }
}

fn render(title: &str, content: &str) -> String {
    format!("Title: {}\n\nContent:\n{}", title, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_artifact() {
        let tmp = TempDir::new().unwrap();
        let artifact = ArticleArtifact::new(tmp.path().join("extracted"));

        let path = artifact.write("blackassign0001", "A title", "Body text.").unwrap();

        assert_eq!(path, tmp.path().join("extracted").join("blackassign0001.txt"));
        let written = fs::read_to_string(path).unwrap();
        assert_eq!(written, "Title: A title\n\nContent:\nBody text.");
    }

    #[test]
    fn test_path_for_sanitizes_separators() {
        let artifact = ArticleArtifact::new("/tmp/out");
        assert_eq!(artifact.path_for("a/b:c"), PathBuf::from("/tmp/out/a_b_c.txt"));
    }
}
