//! Listado plano de directorios y clasificación de archivos por extensión.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DirectoryError;

/// Tipo de imagen según la extensión del archivo.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Other,
}

impl ImageKind {
    /// Se compara el final del nombre completo, así `.png` a secas también cuenta.
    pub fn from_path(path: &Path) -> Self {
        let name = display_name(path).to_lowercase();

        if name.ends_with(".jpg") || name.ends_with(".jpeg") {
            Self::Jpeg
        } else if name.ends_with(".png") {
            Self::Png
        } else {
            Self::Other
        }
    }
}

/// Devuelve los archivos que cuelgan directamente de `root`, en el orden del listado.
///
/// Los subdirectorios se omiten y no se recorren. Las entradas que no se pueden
/// leer se descartan sin interrumpir el listado.
pub fn list_files(root: &Path) -> Result<Vec<PathBuf>, DirectoryError> {
    if !root.is_dir() {
        return Err(DirectoryError::NotADirectory(root.to_path_buf()));
    }

    let entries = fs::read_dir(root).map_err(|source| DirectoryError::Read {
        path: root.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                tracing::warn!(dir = %root.display(), %error, "entrada de directorio ilegible");
                continue;
            }
        };

        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        files.push(path);
    }

    Ok(files)
}

/// Nombre visible del archivo, tal como se muestra en los reportes.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn classifies_extensions_case_insensitively() {
        assert_eq!(ImageKind::from_path(Path::new("a.JPG")), ImageKind::Jpeg);
        assert_eq!(ImageKind::from_path(Path::new("a.jpeg")), ImageKind::Jpeg);
        assert_eq!(ImageKind::from_path(Path::new("a.Png")), ImageKind::Png);
        assert_eq!(ImageKind::from_path(Path::new("a.gif")), ImageKind::Other);
        assert_eq!(ImageKind::from_path(Path::new("jpg")), ImageKind::Other);
    }

    #[test]
    fn list_files_skips_subdirectories() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("one.jpg"), b"x")?;
        fs::write(dir.path().join("two.txt"), b"y")?;
        fs::create_dir(dir.path().join("nested.jpg"))?;
        fs::write(dir.path().join("nested.jpg").join("inner.jpg"), b"z")?;

        let mut names: Vec<String> = list_files(dir.path())?
            .iter()
            .map(|path| display_name(path))
            .collect();
        names.sort();

        assert_eq!(names, vec!["one.jpg".to_string(), "two.txt".to_string()]);
        Ok(())
    }

    #[test]
    fn list_files_rejects_regular_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("photo.jpg");
        fs::write(&file, b"x")?;

        assert!(matches!(
            list_files(&file),
            Err(DirectoryError::NotADirectory(_))
        ));
        Ok(())
    }
}
