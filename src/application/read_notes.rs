//! Read note files use case

use crate::application::NoteStore;
use crate::error::Result;
use crate::infrastructure::{Dialect, NoteReader, ReaderConfig};
use log::info;
use std::path::{Path, PathBuf};

/// Reads note files in order and merges them into one store.
///
/// Later files refresh notes that earlier files already provided.
pub struct ReadNotesService {
    dialect: Dialect,
    config: ReaderConfig,
}

impl ReadNotesService {
    pub fn new(dialect: Dialect, config: ReaderConfig) -> Self {
        ReadNotesService { dialect, config }
    }

    pub fn execute(&self, paths: &[PathBuf]) -> Result<NoteStore> {
        let mut store = NoteStore::new();
        for path in paths {
            self.read_into(&mut store, path)?;
        }
        Ok(store)
    }

    fn read_into(&self, store: &mut NoteStore, path: &Path) -> Result<()> {
        let reader = NoteReader::open(path, self.dialect)?.with_config(self.config.clone());
        let dialect = reader.dialect();
        let summary = store.merge(reader.parse()?);
        info!(
            "read {}: {} new, {} refreshed ({} dialect)",
            path.display(),
            summary.added,
            summary.updated,
            dialect
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NoteState;
    use crate::error::NoteError;
    use std::fs;
    use tempfile::TempDir;

    const FIRST: &str = r#"<osm>
<note lat="1.0" lon="2.0"><id>5</id><status>open</status><date_created>2015-01-01 00:00:00 UTC</date_created>
<comment><date>2015-01-01 00:00:00 UTC</date><uid>7</uid><user>alice</user><text>hi</text></comment></note>
</osm>"#;

    const SECOND: &str = r#"<osm>
<note lat="1.0" lon="2.0"><id>5</id><status>closed</status><date_created>2015-01-01 00:00:00 UTC</date_created>
<comment><date>2015-01-01 00:00:00 UTC</date><uid>7</uid><user>alice</user><text>hi</text></comment>
<comment><date>2015-01-02 00:00:00 UTC</date><uid>8</uid><user>bob</user><text>fixed</text></comment></note>
</osm>"#;

    #[test]
    fn test_later_files_refresh_earlier_notes() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("first.xml");
        let second = temp.path().join("second.xml");
        fs::write(&first, FIRST).unwrap();
        fs::write(&second, SECOND).unwrap();

        let service = ReadNotesService::new(Dialect::Api, ReaderConfig::default());
        let store = service.execute(&[first, second]).unwrap();

        assert_eq!(store.len(), 1);
        let note = store.get(5).unwrap();
        assert_eq!(note.state(), NoteState::Closed);
        assert_eq!(note.comments().len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let service = ReadNotesService::new(Dialect::Api, ReaderConfig::default());
        let result = service.execute(&[temp.path().join("nope.xml")]);
        assert!(matches!(result, Err(NoteError::Io(_))));
    }
}
