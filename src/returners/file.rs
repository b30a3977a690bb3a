use super::{ReturnOptions, Returner};
use crate::error::{Error, Result};
use crate::render::RenderResults;
use std::fs;
use tracing::{debug, info};

/// Writes `<result key>.txt` per result into the result directory
pub struct FileReturner;

impl Returner for FileReturner {
    fn name(&self) -> &'static str {
        "file"
    }

    fn dispatch(&self, results: &RenderResults, options: &ReturnOptions) -> Result<()> {
        let dir = &options.result_dir;
        fs::create_dir_all(dir).map_err(|source| Error::Return {
            path: dir.clone(),
            source,
        })?;

        for (name, text) in results.iter() {
            let path = dir.join(format!("{name}.txt"));
            debug!(path = ?path, "Saving results");
            fs::write(&path, text).map_err(|source| Error::Return { path, source })?;
        }

        info!(count = results.len(), dir = ?dir, "Results saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_one_file_per_result() {
        let temp_dir = TempDir::new().unwrap();
        let options = ReturnOptions {
            result_dir: temp_dir.path().join("nested").join("out"),
        };
        let results: RenderResults = [("rt-1", "interface Gi1/1\n!"), ("rt-2", "")]
            .into_iter()
            .collect();

        FileReturner.dispatch(&results, &options).unwrap();

        let rt1 = fs::read_to_string(options.result_dir.join("rt-1.txt")).unwrap();
        assert_eq!(rt1, "interface Gi1/1\n!");
        assert!(options.result_dir.join("rt-2.txt").exists());
    }

    #[test]
    fn test_unwritable_directory_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        fs::write(&blocker, "").unwrap();
        let options = ReturnOptions {
            result_dir: blocker.join("out"),
        };
        let results: RenderResults = [("r1", "x")].into_iter().collect();

        let err = FileReturner.dispatch(&results, &options).unwrap_err();

        assert!(matches!(err, Error::Return { .. }));
    }
}
