#![allow(dead_code)]

use bundle_loader::archive::{IntoArchive, PackageArchive, ZipPackage};
use bundle_loader::dylib::DylibLoader;
use bundle_loader::{Error, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One observed call into the scripted loader.
#[derive(Debug)]
pub enum LoadEvent {
    ByName(String),
    ByPath { path: PathBuf, bytes: Vec<u8> },
}

/// Scripted stand-in for the platform dynamic loader.
///
/// Records every call; a by-path load succeeds only when the file's bytes
/// match `accepted`.
pub struct ScriptedLoader {
    pub direct_succeeds: bool,
    pub accepted: Option<Vec<u8>>,
    pub events: RefCell<Vec<LoadEvent>>,
}

impl ScriptedLoader {
    pub fn new(direct_succeeds: bool, accepted: Option<Vec<u8>>) -> Self {
        Self {
            direct_succeeds,
            accepted,
            events: RefCell::new(Vec::new()),
        }
    }

    /// Loader whose search-path tier always fails.
    pub fn failing_direct(accepted: Option<Vec<u8>>) -> Self {
        Self::new(false, accepted)
    }

    /// The byte payloads of all by-path load attempts, in order.
    pub fn by_path_loads(&self) -> Vec<Vec<u8>> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                LoadEvent::ByPath { bytes, .. } => Some(bytes.clone()),
                LoadEvent::ByName(_) => None,
            })
            .collect()
    }

    /// The temp-file paths of all by-path load attempts, in order.
    pub fn by_path_files(&self) -> Vec<PathBuf> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                LoadEvent::ByPath { path, .. } => Some(path.clone()),
                LoadEvent::ByName(_) => None,
            })
            .collect()
    }
}

fn stub_load_error(msg: String) -> Error {
    Error::Load {
        msg: msg.clone().into(),
        source: Box::new(io::Error::other(msg)),
    }
}

impl DylibLoader for &ScriptedLoader {
    fn load_by_name(&self, mapped_name: &str) -> Result<()> {
        self.events
            .borrow_mut()
            .push(LoadEvent::ByName(mapped_name.to_string()));
        if self.direct_succeeds {
            Ok(())
        } else {
            Err(stub_load_error(format!("no such library: {mapped_name}")))
        }
    }

    fn load_by_path(&self, path: &Path) -> Result<()> {
        let bytes = std::fs::read(path).unwrap();
        self.events.borrow_mut().push(LoadEvent::ByPath {
            path: path.to_path_buf(),
            bytes: bytes.clone(),
        });
        match &self.accepted {
            Some(accepted) if *accepted == bytes => Ok(()),
            _ => Err(stub_load_error(format!("rejected {}", path.display()))),
        }
    }
}

/// An in-memory archive entry for [`ProbeArchive`].
pub enum Entry {
    Bytes(Vec<u8>),
    /// A reader that fails partway through, simulating a truncated or
    /// corrupted extraction.
    Broken,
}

struct BrokenReader {
    emitted: bool,
}

impl Read for BrokenReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.emitted {
            Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "entry stream truncated",
            ))
        } else {
            self.emitted = true;
            let len = buf.len().min(16);
            buf[..len].fill(0xAB);
            Ok(len)
        }
    }
}

/// An in-memory archive that records every probed inner path.
pub struct ProbeArchive {
    entries: HashMap<String, Entry>,
    probes: Rc<RefCell<Vec<String>>>,
}

impl ProbeArchive {
    /// Builds the archive and returns a shared handle onto its probe log.
    pub fn new(
        entries: impl IntoIterator<Item = (&'static str, Entry)>,
    ) -> (Self, Rc<RefCell<Vec<String>>>) {
        let probes = Rc::new(RefCell::new(Vec::new()));
        let archive = Self {
            entries: entries
                .into_iter()
                .map(|(name, entry)| (name.to_string(), entry))
                .collect(),
            probes: probes.clone(),
        };
        (archive, probes)
    }
}

impl PackageArchive for ProbeArchive {
    fn entry_reader<'a>(&'a mut self, inner_path: &str) -> Result<Option<Box<dyn Read + 'a>>> {
        self.probes.borrow_mut().push(inner_path.to_string());
        Ok(self.entries.get(inner_path).map(|entry| match entry {
            Entry::Bytes(bytes) => Box::new(Cursor::new(bytes.clone())) as Box<dyn Read>,
            Entry::Broken => Box::new(BrokenReader { emitted: false }) as Box<dyn Read>,
        }))
    }
}

impl IntoArchive for ProbeArchive {
    type Archive = Self;

    fn into_archive(self) -> Result<Self> {
        Ok(self)
    }
}

/// An archive input that fails the test if resolution ever tries to open it.
pub struct NoOpenArchive;

impl IntoArchive for NoOpenArchive {
    type Archive = ZipPackage;

    fn into_archive(self) -> Result<ZipPackage> {
        panic!("archive was opened even though the direct load succeeded");
    }
}

/// Writes a zip archive with the given entries to `path`.
pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    for (name, bytes) in entries {
        let options = zip::write::SimpleFileOptions::default();
        writer.start_file(*name, options).unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap();
}

/// Number of files currently present in a directory.
pub fn dir_entry_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

/// A deterministic patterned payload of the given length.
pub fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}
