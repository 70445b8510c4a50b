//! Texture handles and the asset-loading seam.
//!
//! Decoding and uploading pixels is the loader's business; the core only
//! tracks which layer of a renderer's texture array an asset landed in and how
//! large it is, which is all layout and UV mapping need.

use std::collections::HashMap;

use crate::{Error, LocalBoxFuture, Result, Vec2};

/// Decoded image metadata returned by a [`TextureLoader`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
}

/// A texture living at `index` in a renderer's texture array.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextureHandle {
    pub index: u32,
    pub size: Vec2,
}

impl TextureHandle {
    pub fn new(index: u32, image: TextureImage) -> Self {
        Self {
            index,
            size: Vec2::new(image.width as f32, image.height as f32),
        }
    }
}

pub trait TextureLoader {
    /// Fetches and decodes `path`. Retrying is up to the implementation.
    fn load(&self, path: &str) -> LocalBoxFuture<'_, Result<TextureImage>>;
}

/// Textures keyed by their asset path (relative to the texture base path).
#[derive(Clone, Debug, Default)]
pub struct TextureSet {
    by_path: HashMap<String, TextureHandle>,
}

impl TextureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, handle: TextureHandle) {
        self.by_path.insert(path.into(), handle);
    }

    pub fn get(&self, path: &str) -> Result<TextureHandle> {
        self.by_path.get(path).copied().ok_or_else(|| Error::AssetLoad {
            path: path.to_string(),
            reason: "texture was not loaded".into(),
        })
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    /// Loads every path in order; a path that fails is skipped and keeps its
    /// array index unused.
    pub async fn load_all(
        &mut self,
        loader: &dyn TextureLoader,
        base: &str,
        paths: &[String],
    ) -> usize {
        let mut loaded = 0;
        for (i, path) in paths.iter().enumerate() {
            let full = format!("{base}{path}");
            match loader.load(&full).await {
                Ok(image) => {
                    self.insert(path.clone(), TextureHandle::new(i as u32, image));
                    loaded += 1;
                }
                Err(e) => {
                    log::warn!("skipping texture '{full}': {e}");
                }
            }
        }
        loaded
    }
}
