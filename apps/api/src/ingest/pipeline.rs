//! Fire-and-forget resume parsing.
//!
//! One background unit per upload: extract text, derive skills, persist the
//! parsed state in a single update. The unit never reports back to the
//! caller. A resume whose parse dies stays `parsed = false`, and a resume
//! deleted mid-parse is a silent no-op. No retry, no timeout, no
//! concurrency bound.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::ingest::extract::extract_file_text;
use crate::ingest::store::ResumeStore;
use crate::matching::skills::extract_skills;

/// Runs the parsing unit for one uploaded resume to completion. Every
/// failure is logged and swallowed; the upload flow is never affected.
pub async fn parse_resume<S: ResumeStore>(store: &S, resume_id: i64, path: &Path) {
    info!("Parsing resume {resume_id} from {}", path.display());

    let text = extract_text_blocking(path.to_path_buf()).await;
    let skills = extract_skills(&text);

    match store.complete_parse(resume_id, &text, &skills).await {
        Ok(true) => info!("Resume {resume_id} parsed ({} skills)", skills.len()),
        Ok(false) => debug!("Resume {resume_id} deleted before parsing finished"),
        Err(e) => warn!("Failed to persist parse result for resume {resume_id}: {e}"),
    }
}

/// Runs the synchronous extractors on the blocking pool. An extractor that
/// panics on a hostile file surfaces as a join error here and degrades to
/// empty text.
async fn extract_text_blocking(path: PathBuf) -> String {
    let path_display = path.display().to_string();
    match tokio::task::spawn_blocking(move || extract_file_text(&path)).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Extraction task for {path_display} did not complete: {e}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Default)]
    struct StoredResume {
        content_text: String,
        skills: Vec<String>,
        parsed: bool,
    }

    #[derive(Default)]
    struct InMemoryStore {
        rows: Mutex<HashMap<i64, StoredResume>>,
    }

    impl InMemoryStore {
        fn insert_unparsed(&self, id: i64) {
            self.rows.lock().unwrap().insert(id, StoredResume::default());
        }

        fn get(&self, id: i64) -> Option<StoredResume> {
            self.rows.lock().unwrap().get(&id).cloned()
        }
    }

    #[async_trait]
    impl ResumeStore for InMemoryStore {
        async fn complete_parse(
            &self,
            resume_id: i64,
            content_text: &str,
            skills: &[String],
        ) -> anyhow::Result<bool> {
            let mut rows = self.rows.lock().unwrap();
            match rows.get_mut(&resume_id) {
                Some(row) => {
                    row.content_text = content_text.to_string();
                    row.skills = skills.to_vec();
                    row.parsed = true;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }

    #[tokio::test]
    async fn test_text_resume_reaches_parsed_with_skills() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "Experienced in Python, ML, NLP, SQL").unwrap();

        let store = InMemoryStore::default();
        store.insert_unparsed(1);
        parse_resume(&store, 1, &path).await;

        let row = store.get(1).unwrap();
        assert!(row.parsed);
        assert_eq!(row.content_text, "Experienced in Python, ML, NLP, SQL");
        assert_eq!(row.skills, ["ml", "nlp", "python", "sql"]);
    }

    #[tokio::test]
    async fn test_missing_file_still_reaches_parsed() {
        let store = InMemoryStore::default();
        store.insert_unparsed(7);
        parse_resume(&store, 7, Path::new("definitely/not/here.pdf")).await;

        // The pipeline completes instead of silently sticking
        let row = store.get(7).unwrap();
        assert!(row.parsed);
        assert!(row.content_text.is_empty());
        assert!(row.skills.is_empty());
    }

    #[tokio::test]
    async fn test_deleted_row_is_a_silent_noop() {
        let store = InMemoryStore::default();
        // Row 42 was deleted before the background unit ran
        parse_resume(&store, 42, Path::new("gone.txt")).await;
        assert!(store.get(42).is_none());
    }

    #[tokio::test]
    async fn test_concurrent_uploads_parse_independently() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        std::fs::write(&first, "Heavy Python and SQL background").unwrap();
        std::fs::write(&second, "Docker and Kubernetes operations").unwrap();

        let store = Arc::new(InMemoryStore::default());
        store.insert_unparsed(1);
        store.insert_unparsed(2);

        let (s1, s2) = (store.clone(), store.clone());
        let t1 = tokio::spawn(async move { parse_resume(&*s1, 1, &first).await });
        let t2 = tokio::spawn(async move { parse_resume(&*s2, 2, &second).await });
        t1.await.unwrap();
        t2.await.unwrap();

        assert_eq!(store.get(1).unwrap().skills, ["python", "sql"]);
        assert_eq!(store.get(2).unwrap().skills, ["docker", "kubernetes"]);
    }
}
