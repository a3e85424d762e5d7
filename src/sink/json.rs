// src/sink/json.rs
// =============================================================================
// Writes one JSON document per extracted page.
//
// File names come straight from the page URL: every ':' and '/' becomes '_'
// and ".json" is appended, so https://x.com/a lands in https___x.com_a.json.
//
// Each file is written to a ".tmp" sibling first and then renamed into place.
// If the process is interrupted mid-write, the only thing left behind is a
// stray .tmp file; a finished .json is never half written.
// =============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::PageSink;
use crate::error::CrawlError;
use crate::parser::PageRecord;

#[derive(Debug, Clone)]
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, CrawlError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, url: &str) -> PathBuf {
        self.dir.join(file_name_for(url))
    }
}

impl PageSink for JsonFileSink {
    fn accept(&self, record: PageRecord) -> Result<(), CrawlError> {
        let path = self.path_for(&record.url);
        let json = serde_json::to_string(&record)?;
        write_atomic(&path, json.as_bytes())?;
        info!(url = %record.url, file = %path.display(), "Data exported");
        Ok(())
    }
}

pub fn file_name_for(url: &str) -> String {
    format!("{}.json", url.replace([':', '/'], "_"))
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), CrawlError> {
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents)?;

    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(url: &str) -> PageRecord {
        PageRecord {
            url: url.to_string(),
            title: "Post".to_string(),
            paragraphs: vec!["Body text".to_string()],
            form_links: vec![],
        }
    }

    #[test]
    fn test_file_name_for_url() {
        assert_eq!(file_name_for("https://x.com/a"), "https___x.com_a.json");
        assert_eq!(
            file_name_for("http://localhost:8080/blog/"),
            "http___localhost_8080_blog_.json"
        );
    }

    #[test]
    fn test_writes_record_as_json() {
        let dir = TempDir::new().unwrap();
        let sink = JsonFileSink::new(dir.path()).unwrap();

        sink.accept(record("https://x.com/post")).unwrap();

        let path = dir.path().join("https___x.com_post.json");
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            written,
            serde_json::json!({
                "Title": "Post",
                "Paragraphs": ["Body text"],
                "Form Links": []
            })
        );
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let sink = JsonFileSink::new(dir.path()).unwrap();

        sink.accept(record("https://x.com/post")).unwrap();
        sink.accept(record("https://x.com/post")).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["https___x.com_post.json"]);
    }

    #[test]
    fn test_creates_output_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("out").join("pages");
        let sink = JsonFileSink::new(&nested).unwrap();
        sink.accept(record("https://x.com/")).unwrap();
        assert!(nested.join("https___x.com_.json").exists());
    }
}
