//! Knowledge base loading.
//!
//! The knowledge base is a single static text file injected into every
//! prompt. It is read fresh on each request so edits take effect without a
//! restart. A failed read degrades to an error string in place of content;
//! the request itself still completes.

use log::warn;
use std::io::ErrorKind;
use std::path::PathBuf;

pub struct KnowledgeBase {
    path: PathBuf,
}

impl KnowledgeBase {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> String {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("knowledge base file {} not found", self.path.display());
                "Error: knowledge base file not found.".to_string()
            }
            Err(e) => {
                warn!(
                    "failed to read knowledge base file {}: {}",
                    self.path.display(),
                    e
                );
                format!("Error reading knowledge base file: {}", e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_returns_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kb.txt");
        std::fs::write(&path, "Shipping takes 3 business days.").unwrap();

        let kb = KnowledgeBase::new(path);
        assert_eq!(kb.load(), "Shipping takes 3 business days.");
    }

    #[test]
    fn load_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kb.txt");
        std::fs::write(&path, "Store hours: 9am-6pm.").unwrap();

        let kb = KnowledgeBase::new(path);
        assert_eq!(kb.load(), kb.load());
    }

    #[test]
    fn missing_file_degrades_to_error_string() {
        let dir = tempfile::tempdir().unwrap();
        let kb = KnowledgeBase::new(dir.path().join("does-not-exist.txt"));
        assert_eq!(kb.load(), "Error: knowledge base file not found.");
    }
}
