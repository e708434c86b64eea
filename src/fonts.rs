//! Font assets and caching.
//!
//! The poster template uses three font roles, loaded from the bundled
//! assets directory on first use and cached for the life of the library.

use ab_glyph::FontArc;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::PathBuf;

use crate::error::CartellError;

/// The three font roles used by the poster template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontId {
    /// Display script font for the event series name
    Script,
    /// Condensed light weight for captions and body lines
    Light,
    /// Condensed bold weight for emphasized lines
    Bold,
}

impl FontId {
    /// File name of the font asset under the fonts directory.
    pub fn file_name(self) -> &'static str {
        match self {
            FontId::Script => "LobsterTwo-Bold.ttf",
            FontId::Light => "RobotoCondensed-Light.ttf",
            FontId::Bold => "RobotoCondensed-Bold.ttf",
        }
    }
}

/// Lazy-loading cache of font assets keyed by role.
pub struct FontLibrary {
    dir: PathBuf,
    cache: HashMap<FontId, FontArc>,
}

impl FontLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: HashMap::new(),
        }
    }

    /// Resolve a font role, reading and parsing the asset on first use.
    pub fn get(&mut self, id: FontId) -> Result<&FontArc, CartellError> {
        match self.cache.entry(id) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let path = self.dir.join(id.file_name());
                let bytes = fs::read(&path)
                    .map_err(|e| CartellError::FontLoad(format!("{}: {}", path.display(), e)))?;
                let font = FontArc::try_from_vec(bytes)
                    .map_err(|e| CartellError::FontLoad(format!("{}: {}", path.display(), e)))?;
                Ok(entry.insert(font))
            }
        }
    }
}
