//! Texture references and the sources that resolve them.
//!
//! Bodies only carry a [TextureRef], which is a file name. A [TextureSource]
//! turns that into a [Texture] the scene graph can attach to a node, or fails
//! with a [TextureError]. The scene builder waits on that result before it
//! textures anything, so a missing asset is reported up front instead of
//! leaving a blank mesh behind.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TextureError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureRef(String);

impl TextureRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// A texture whose backing file has been located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    pub name: String,
    pub path: PathBuf,
}

pub trait TextureSource {
    fn resolve(&self, texture: &TextureRef) -> Result<Texture, TextureError>;
}

impl<T> TextureSource for &T
where
    T: TextureSource,
{
    fn resolve(&self, texture: &TextureRef) -> Result<Texture, TextureError> {
        (*self).resolve(texture)
    }
}

/// Looks textures up as files inside a directory.
#[derive(Debug, Clone)]
pub struct DirectoryTextures {
    root: PathBuf,
}

impl DirectoryTextures {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TextureSource for DirectoryTextures {
    fn resolve(&self, texture: &TextureRef) -> Result<Texture, TextureError> {
        let path = self.root.join(texture.name());
        let name = texture.name().to_owned();
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Ok(Texture { name, path }),
            Ok(_) => Err(TextureError::NotAFile { name, path }),
            Err(_) => Err(TextureError::NotFound { name, path }),
        }
    }
}

/// Resolves every reference without touching the disk. Used by headless
/// tools that never upload anything.
#[derive(Debug, Clone, Default)]
pub struct UncheckedTextures {
    root: PathBuf,
}

impl UncheckedTextures {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TextureSource for UncheckedTextures {
    fn resolve(&self, texture: &TextureRef) -> Result<Texture, TextureError> {
        Ok(Texture {
            name: texture.name().to_owned(),
            path: self.root.join(texture.name()),
        })
    }
}
