//! # Fuentes de contenido
//! src/content/source.rs
//!
//! Abstracción sobre un recurso de tamaño conocido que se puede leer por
//! rangos de bytes: un archivo en disco o un buffer en memoria.

use super::mime;
use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Recurso direccionable por bytes
pub trait ContentSource {
    /// Tamaño total en bytes
    fn size(&self) -> u64;

    /// Lee exactamente `length` bytes desde `offset`
    ///
    /// Falla si el recurso desapareció o si hay menos bytes de los pedidos.
    fn read_range(&self, offset: u64, length: u64) -> io::Result<Vec<u8>>;

    /// MIME type si se puede determinar
    fn mime_type(&self) -> Option<String>;
}

/// Archivo en disco; se abre de nuevo en cada lectura
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    size: u64,
}

impl FileSource {
    /// Toma el tamaño de los metadatos del archivo
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let size = fs::metadata(&path)?.len();
        Ok(Self { path, size })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentSource for FileSource {
    fn size(&self) -> u64 {
        self.size
    }

    fn read_range(&self, offset: u64, length: u64) -> io::Result<Vec<u8>> {
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(offset))?;

        let mut buffer = Vec::new();
        file.take(length).read_to_end(&mut buffer)?;

        if (buffer.len() as u64) < length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "{} shrank: wanted {} bytes at {}, got {}",
                    self.path.display(),
                    length,
                    offset,
                    buffer.len()
                ),
            ));
        }

        Ok(buffer)
    }

    fn mime_type(&self) -> Option<String> {
        mime::from_path(&self.path).map(String::from)
    }
}

/// Contenido en memoria, útil para handlers propios y pruebas
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    data: Vec<u8>,
    mime_type: Option<String>,
}

impl MemorySource {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: &str) -> Self {
        self.mime_type = Some(mime_type.to_string());
        self
    }
}

impl ContentSource for MemorySource {
    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn read_range(&self, offset: u64, length: u64) -> io::Result<Vec<u8>> {
        let out_of_bounds = || {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("range {}+{} exceeds {} bytes", offset, length, self.data.len()),
            )
        };

        let start = usize::try_from(offset).map_err(|_| out_of_bounds())?;
        let length = usize::try_from(length).map_err(|_| out_of_bounds())?;
        let end = start.checked_add(length).ok_or_else(out_of_bounds)?;

        self.data
            .get(start..end)
            .map(<[u8]>::to_vec)
            .ok_or_else(out_of_bounds)
    }

    fn mime_type(&self) -> Option<String> {
        self.mime_type.clone()
    }
}
