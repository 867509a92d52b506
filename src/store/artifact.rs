//! Promotion of finished sitemap files to durable storage.

use crate::error::{Result, SitemapError};
use crate::log;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Destination for the files of a finished run.
pub trait ArtifactStore: Send + Sync {
    /// Commit `files` (entry files first, index last) and return the
    /// committed path of each, in the same order.
    fn commit(&self, files: &[PathBuf]) -> Result<Vec<PathBuf>>;
}

/// Leaves files where the builder wrote them.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkingDirStore;

impl ArtifactStore for WorkingDirStore {
    fn commit(&self, files: &[PathBuf]) -> Result<Vec<PathBuf>> {
        Ok(files.to_vec())
    }
}

/// Moves files into a target directory.
///
/// A commit runs in two phases. Every file is first copied to a hidden
/// temporary name inside the target; if any copy fails, the staged copies are
/// removed and the target is left as it was. Staged files are then renamed
/// over their final names in the given order, which puts the index after
/// every file it references. Working files are removed only once every rename
/// succeeded.
///
/// A rename failing partway through the second phase leaves the files renamed
/// so far in place next to the previous index. Entry files of an earlier,
/// larger run are not removed; the new index no longer references them.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    dir: PathBuf,
}

/// A file copied into the target under its temporary name.
struct Staged<'a> {
    source: &'a Path,
    staging: PathBuf,
    target: PathBuf,
}

impl DirectoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn stage<'a>(&self, source: &'a Path) -> Result<Staged<'a>> {
        let name = source.file_name().ok_or_else(|| {
            SitemapError::io(
                source,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
            )
        })?;
        let staging = self
            .dir
            .join(format!(".{}.tmp", name.to_string_lossy()));

        fs::copy(source, &staging).map_err(|err| {
            fs::remove_file(&staging).ok();
            SitemapError::io(&staging, err)
        })?;

        Ok(Staged {
            source,
            staging,
            target: self.dir.join(name),
        })
    }
}

fn remove_staged(staged: &[Staged<'_>]) {
    for file in staged {
        fs::remove_file(&file.staging).ok();
    }
}

impl ArtifactStore for DirectoryStore {
    fn commit(&self, files: &[PathBuf]) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.dir).map_err(|err| SitemapError::io(&self.dir, err))?;

        let mut staged = Vec::with_capacity(files.len());
        for file in files {
            match self.stage(file) {
                Ok(file) => staged.push(file),
                Err(err) => {
                    remove_staged(&staged);
                    return Err(err);
                }
            }
        }

        for (i, file) in staged.iter().enumerate() {
            if let Err(err) = fs::rename(&file.staging, &file.target) {
                remove_staged(&staged[i..]);
                return Err(SitemapError::io(&file.target, err));
            }
        }

        for file in &staged {
            fs::remove_file(file.source).ok();
        }

        log!("sitemap"; "promoted {} files to {}", staged.len(), self.dir.display());
        Ok(staged.into_iter().map(|file| file.target).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_working_dir_store_is_identity() {
        let files = vec![PathBuf::from("/tmp/a.xml"), PathBuf::from("/tmp/b.xml")];
        assert_eq!(WorkingDirStore.commit(&files).unwrap(), files);
    }

    #[test]
    fn test_directory_store_moves_files() {
        let work = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let target = out.path().join("public");

        let a = work.path().join("sitemap1.xml");
        let index = work.path().join("sitemap.xml");
        fs::write(&a, "<urlset/>").unwrap();
        fs::write(&index, "<sitemapindex/>").unwrap();

        let store = DirectoryStore::new(&target);
        let committed = store.commit(&[a.clone(), index.clone()]).unwrap();

        assert_eq!(
            committed,
            vec![target.join("sitemap1.xml"), target.join("sitemap.xml")]
        );
        assert_eq!(fs::read_to_string(&committed[0]).unwrap(), "<urlset/>");
        assert!(!a.exists());
        assert!(!index.exists());

        let leftovers: Vec<_> = fs::read_dir(&target)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_directory_store_replaces_existing() {
        let work = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();

        fs::write(out.path().join("sitemap.xml"), "old").unwrap();
        let index = work.path().join("sitemap.xml");
        fs::write(&index, "new").unwrap();

        DirectoryStore::new(out.path()).commit(&[index]).unwrap();
        assert_eq!(
            fs::read_to_string(out.path().join("sitemap.xml")).unwrap(),
            "new"
        );
    }

    #[test]
    fn test_directory_store_missing_source() {
        let work = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let err = DirectoryStore::new(out.path())
            .commit(&[work.path().join("gone.xml")])
            .unwrap_err();
        assert!(matches!(err, SitemapError::Io(..)));
    }

    #[test]
    fn test_directory_store_failed_staging_leaves_target_untouched() {
        let work = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();

        fs::write(out.path().join("sitemap1.xml"), "old entries").unwrap();
        fs::write(out.path().join("sitemap.xml"), "old index").unwrap();

        let first = work.path().join("sitemap1.xml");
        fs::write(&first, "new entries").unwrap();
        let missing = work.path().join("sitemap2.xml");

        let err = DirectoryStore::new(out.path())
            .commit(&[first.clone(), missing])
            .unwrap_err();
        assert!(matches!(err, SitemapError::Io(..)));

        assert_eq!(
            fs::read_to_string(out.path().join("sitemap1.xml")).unwrap(),
            "old entries"
        );
        assert_eq!(
            fs::read_to_string(out.path().join("sitemap.xml")).unwrap(),
            "old index"
        );
        assert!(first.exists());

        let mut names: Vec<_> = fs::read_dir(out.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, ["sitemap.xml", "sitemap1.xml"]);
    }
}
