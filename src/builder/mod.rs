//! Sitemap file builder.
//!
//! Accumulates URL entries into numbered `<urlset>` files under a working
//! directory, starting a new file whenever the next entry would break the
//! per-file entry count or byte size limit, then writes the index and hands
//! everything to an [`ArtifactStore`].
//!
//! ```text
//! add_url_entry ──► open file ──(full)──► sitemap1.xml, sitemap2.xml, ...
//!                                                   │
//! persist_site_map ──► last file ──► sitemap.xml (index) ──► ArtifactStore
//! ```
//!
//! File names are fixed by the configuration, so two builders sharing a
//! working directory overwrite each other's files.

mod xml;

pub use xml::{SITEMAP_NS, minify_xml};

use crate::{
    config::SitemapSettings,
    core::resolve_location,
    debug,
    error::{Result, SitemapError},
    log,
    model::{SiteMapArtifacts, SiteMapConfiguration, SiteMapFile, SiteMapUrlEntry},
    store::ArtifactStore,
    utils::date::DateTimeUtc,
};
use std::{
    fs, mem,
    path::{Path, PathBuf},
};
use xml::IndexRecord;

/// Entries of the file currently being filled.
#[derive(Debug, Default)]
struct OpenFile {
    body: String,
    url_count: usize,
}

pub struct SiteMapBuilder<'a> {
    configuration: &'a SiteMapConfiguration,
    settings: &'a SitemapSettings,
    store: &'a dyn ArtifactStore,
    working_dir: PathBuf,
    header: String,
    footer: String,
    open: OpenFile,
    files: Vec<SiteMapFile>,
    /// Every path written so far, for cleanup on failure.
    written: Vec<PathBuf>,
}

impl<'a> SiteMapBuilder<'a> {
    /// Create a builder writing into `working_dir`, creating it if needed.
    ///
    /// The configuration is validated first, so file names never collide.
    pub fn new(
        configuration: &'a SiteMapConfiguration,
        settings: &'a SitemapSettings,
        working_dir: impl Into<PathBuf>,
        store: &'a dyn ArtifactStore,
    ) -> Result<Self> {
        configuration.validate()?;
        let working_dir = working_dir.into();
        fs::create_dir_all(&working_dir).map_err(|err| SitemapError::io(&working_dir, err))?;

        Ok(Self {
            configuration,
            settings,
            store,
            working_dir,
            header: xml::urlset_header(settings.minify),
            footer: xml::urlset_footer(settings.minify),
            open: OpenFile::default(),
            files: Vec::new(),
            written: Vec::new(),
        })
    }

    pub fn configuration(&self) -> &SiteMapConfiguration {
        self.configuration
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Entries added so far, written or still buffered.
    pub fn url_count(&self) -> usize {
        self.files.iter().map(|file| file.url_count).sum::<usize>() + self.open.url_count
    }

    /// Append an entry, rolling over to a new file when the open one is full.
    pub fn add_url_entry(&mut self, mut entry: SiteMapUrlEntry) -> Result<()> {
        entry.loc = resolve_location(&entry.loc, self.settings.base_url.as_ref()).map_err(
            |reason| SitemapError::InvalidEntry {
                loc: entry.loc.clone(),
                reason,
            },
        )?;

        let fragment = xml::render_url(&entry, self.settings.minify);
        let envelope = self.header.len() + self.footer.len();
        let limit = self.settings.max_file_bytes;

        if envelope + fragment.len() > limit {
            return Err(SitemapError::EntryTooLarge {
                loc: entry.loc,
                size: fragment.len(),
                limit,
            });
        }

        let full_by_count = self.open.url_count >= self.configuration.max_urls_per_file;
        let full_by_size = envelope + self.open.body.len() + fragment.len() > limit;
        if self.open.url_count > 0 && (full_by_count || full_by_size) {
            self.flush_open_file()?;
        }

        self.open.body.push_str(&fragment);
        self.open.url_count += 1;
        Ok(())
    }

    /// Write the remaining entries and the index, then commit all files.
    ///
    /// At least one entry file is always produced, empty if nothing was
    /// added. On failure the files written to the working directory are
    /// removed on a best-effort basis.
    pub fn persist_site_map(mut self) -> Result<SiteMapArtifacts> {
        match self.write_remaining() {
            Ok(artifacts) => Ok(artifacts),
            Err(err) => {
                self.discard();
                Err(err)
            }
        }
    }

    /// Remove every file this builder wrote. Errors are ignored.
    pub fn discard(self) {
        for path in &self.written {
            fs::remove_file(path).ok();
        }
        debug!("sitemap"; "discarded {} working files", self.written.len());
    }

    fn write_remaining(&mut self) -> Result<SiteMapArtifacts> {
        if self.open.url_count > 0 || self.files.is_empty() {
            self.flush_open_file()?;
        }

        let index = self.write_index()?;

        let mut paths: Vec<PathBuf> = self.files.iter().map(|file| file.path.clone()).collect();
        paths.push(index.clone());
        let mut committed = self.store.commit(&paths)?;

        let index_path = committed.pop().unwrap_or(index);
        let mut files = mem::take(&mut self.files);
        for (file, path) in files.iter_mut().zip(committed) {
            file.path = path;
        }

        Ok(SiteMapArtifacts {
            configuration: self.configuration.module_name.clone(),
            index_location: self.location_of(&self.configuration.index_file_name)?,
            index_path,
            files,
            unhandled: Vec::new(),
        })
    }

    fn flush_open_file(&mut self) -> Result<()> {
        let open = mem::take(&mut self.open);
        let name = self.configuration.file_name(self.files.len() + 1);
        let path = self.working_dir.join(&name);

        let mut content =
            String::with_capacity(self.header.len() + open.body.len() + self.footer.len());
        content.push_str(&self.header);
        content.push_str(&open.body);
        content.push_str(&self.footer);

        self.write_file(&path, &content)?;
        log!("sitemap"; "{} ({} urls)", name, open.url_count);

        let location = self.location_of(&name)?;
        self.files.push(SiteMapFile {
            name,
            path,
            location,
            url_count: open.url_count,
            byte_len: content.len(),
        });
        Ok(())
    }

    fn write_index(&mut self) -> Result<PathBuf> {
        let lastmod = DateTimeUtc::now();
        let records: Vec<IndexRecord<'_>> = self
            .files
            .iter()
            .map(|file| IndexRecord {
                loc: &file.location,
                lastmod,
            })
            .collect();
        let content = xml::render_index(&records, self.settings.minify);

        let path = self.working_dir.join(&self.configuration.index_file_name);
        self.write_file(&path, &content)?;
        log!("sitemap"; "{} (index of {} files)", self.configuration.index_file_name, self.files.len());
        Ok(path)
    }

    fn write_file(&mut self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).map_err(|err| SitemapError::io(path, err))?;
        self.written.push(path.to_path_buf());
        Ok(())
    }

    /// Public location of a produced file, as recorded in the index.
    fn location_of(&self, name: &str) -> Result<String> {
        match &self.settings.base_url {
            Some(base) => base
                .join(name)
                .map_err(|reason| SitemapError::InvalidEntry {
                    loc: name.to_string(),
                    reason,
                }),
            None => Ok(name.to_string()),
        }
    }
}
