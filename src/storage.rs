//! # File Store
//! src/storage.rs
//!
//! Lectura y escritura de archivos dentro del directorio raíz configurado con
//! `--directory`. Solo lo usa la ruta `/files`.
//!
//! - `find`: directorio ausente → se crea y el archivo "no existe" (no es error).
//! - `write`: crea el directorio si hace falta y sobrescribe el archivo.
//!
//! Cualquier fallo de I/O vuelve como [`FileStoreError`]; el handler lo
//! convierte en un 500 sin tumbar el servidor.
//!
//! No hay coordinación entre escrituras concurrentes al mismo nombre: la
//! carrera se resuelve en el sistema de archivos.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errores de I/O del file store
#[derive(Debug, Error)]
pub enum FileStoreError {
    /// No se pudo convertir la raíz a ruta absoluta (ej: raíz vacía)
    #[error("cannot resolve storage root {root:?}: {source}")]
    Resolve { root: PathBuf, source: io::Error },

    #[error("cannot create storage root {root:?}: {source}")]
    CreateRoot { root: PathBuf, source: io::Error },

    #[error("cannot list storage root {root:?}: {source}")]
    List { root: PathBuf, source: io::Error },

    /// El archivo existía pero falló su lectura
    #[error("cannot read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Archivo encontrado en el store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub contents: Vec<u8>,
    pub size: u64,
}

/// Adaptador sobre el directorio raíz de `/files`
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Busca `name` en la raíz (sin recursión)
    ///
    /// Retorna `Ok(None)` si no existe un archivo regular con ese nombre exacto.
    pub fn find(&self, name: &str) -> Result<Option<StoredFile>, FileStoreError> {
        let root = self.resolve_root()?;

        if !root.is_dir() {
            tracing::debug!(root = %root.display(), "Directorio no existe, creándolo");
            Self::create_root(&root)?;
            return Ok(None);
        }

        let entries = fs::read_dir(&root).map_err(|source| FileStoreError::List {
            root: root.clone(),
            source,
        })?;

        // Entradas ilegibles se saltan: no pueden ser el archivo buscado
        let matching = entries.filter_map(Result::ok).find(|entry| {
            entry.file_name() == name
                && entry.file_type().map(|kind| !kind.is_dir()).unwrap_or(false)
        });

        let Some(entry) = matching else {
            return Ok(None);
        };

        let path = entry.path();
        let contents = fs::read(&path).map_err(|source| FileStoreError::Read {
            path: path.clone(),
            source,
        })?;
        let size = contents.len() as u64;

        tracing::debug!(path = %path.display(), size, "Archivo encontrado");

        Ok(Some(StoredFile { contents, size }))
    }

    /// Escribe `body` completo en `name`, sobrescribiendo si existe
    pub fn write(&self, name: &str, body: &[u8]) -> Result<(), FileStoreError> {
        let root = self.resolve_root()?;
        Self::create_root(&root)?;

        let path = root.join(name);
        fs::write(&path, body).map_err(|source| FileStoreError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), bytes = body.len(), "Archivo escrito");

        Ok(())
    }

    fn resolve_root(&self) -> Result<PathBuf, FileStoreError> {
        std::path::absolute(&self.root).map_err(|source| FileStoreError::Resolve {
            root: self.root.clone(),
            source,
        })
    }

    fn create_root(root: &Path) -> Result<(), FileStoreError> {
        fs::create_dir_all(root).map_err(|source| FileStoreError::CreateRoot {
            root: root.to_path_buf(),
            source,
        })
    }
}
