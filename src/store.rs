use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{RecipeError, Result};
use crate::recipe::Recipe;

/// How [`RecipeStore::load`] brought (or failed to bring) the persisted
/// file into memory. Absence of the file is not an error.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The file existed and parsed; holds the number of records kept.
    Loaded(usize),
    /// No file at the path yet; starting with an empty book.
    Fresh,
    /// The file existed but could not be used; started empty anyway.
    Recovered(RecipeError),
}

/// The in-memory recipe book plus the path it persists to.
///
/// Keys are recipe names: case-sensitive, unique, trimmed, non-empty.
/// All mutation goes through [`RecipeStore::upsert`]; persistence is
/// whole-file only, via [`RecipeStore::save`]. The store is a plain owned
/// value handed to the session at startup — there is no global.
#[derive(Debug)]
pub struct RecipeStore {
    path: PathBuf,
    recipes: HashMap<String, Recipe>,
}

impl RecipeStore {
    /// An empty book that will persist to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            recipes: HashMap::new(),
        }
    }

    /// Read the persisted file if present.
    ///
    /// Never fails: an unreadable or malformed file degrades to an empty
    /// book, with the cause carried in the outcome so the caller can tell
    /// the user. Individual malformed records are skipped, not fatal —
    /// one hand-edited entry must not take the rest of the book with it.
    pub fn load(path: impl Into<PathBuf>) -> (Self, LoadOutcome) {
        let path = path.into();
        if !path.exists() {
            return (Self::new(path), LoadOutcome::Fresh);
        }

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(source) => {
                let err = RecipeError::StorageRead {
                    path: path.clone(),
                    source,
                };
                warn!("{err}");
                return (Self::new(path), LoadOutcome::Recovered(err));
            }
        };

        let raw: serde_json::Map<String, Value> = match serde_json::from_str(&text) {
            Ok(raw) => raw,
            Err(source) => {
                let err = RecipeError::StorageParse {
                    path: path.clone(),
                    source,
                };
                warn!("{err}");
                return (Self::new(path), LoadOutcome::Recovered(err));
            }
        };

        let mut recipes = HashMap::new();
        for (name, value) in raw {
            match Recipe::from_stored(value) {
                Some(recipe) => {
                    recipes.insert(name, recipe);
                }
                None => warn!("skipping malformed record '{name}' in {}", path.display()),
            }
        }

        info!("loaded {} recipes from {}", recipes.len(), path.display());
        let count = recipes.len();
        (Self { path, recipes }, LoadOutcome::Loaded(count))
    }

    /// Serialize the whole book, replacing the previous file.
    ///
    /// Writes a sibling temp file first and renames it over the target,
    /// so a save that fails partway leaves the previous content intact.
    /// The in-memory book is never touched by a failed save.
    pub fn save(&self) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.recipes).map_err(|e| {
            RecipeError::StorageWrite {
                path: self.path.clone(),
                source: std::io::Error::other(e),
            }
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| RecipeError::StorageWrite {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &text).map_err(|source| RecipeError::StorageWrite {
            path: self.path.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| RecipeError::StorageWrite {
            path: self.path.clone(),
            source,
        })?;

        debug!(
            "saved {} recipes to {}",
            self.recipes.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Insert or replace the record under `name`.
    ///
    /// The name is trimmed; a name that is empty after trimming is
    /// rejected before any mutation. Returns `true` when an existing
    /// record was replaced. Asking the user before replacing is the
    /// caller's job — the store itself never prompts.
    pub fn upsert(&mut self, name: &str, recipe: Recipe) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RecipeError::InvalidInput(
                "recipe name can't be empty".into(),
            ));
        }
        Ok(self.recipes.insert(name.to_string(), recipe).is_some())
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, name: &str) -> Result<&Recipe> {
        self.recipes
            .get(name)
            .ok_or_else(|| RecipeError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.recipes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Iterate records in the map's own (unspecified) order.
    ///
    /// Listing sorts on top of this; the search operations deliberately
    /// do not.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Recipe)> + '_ {
        self.recipes.iter().map(|(name, recipe)| (name.as_str(), recipe))
    }

    /// Path this book loads from and saves to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
