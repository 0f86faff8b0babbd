//! The Nmbr9 tile set: shapes, values, and compiled placement automata

use crate::engine::propagators::Nfa;
use crate::model::instance::Instance;
use crate::spatial::pattern::reified_placement_pattern;
use crate::spatial::shape::TileShape;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, LazyLock, Mutex, PoisonError};
use tracing::debug;

/// Canonical outline of each tile value, `' '` empty, `'X'` tile, `'.'` border
pub const BASE_TILES: [&[&str]; 10] = [
    &[" ... ", ".XXX.", ".X X.", ".X X.", ".XXX.", " ... "],
    &[" .. ", ".XX.", " .X.", " .X.", " .X.", "  . "],
    &["  .. ", " .XX.", " .XX.", ".XX. ", ".XXX.", " ... "],
    &[" ... ", ".XXX.", " ..X.", " .XX.", ".XXX.", " ... "],
    &["  .. ", " .XX.", " .X. ", ".XXX.", " .XX.", "  .. "],
    &[" ... ", ".XXX.", ".XXX.", " ..X.", ".XXX.", " ... "],
    &[" ..  ", ".XX. ", ".X.  ", ".XXX.", ".XXX.", " ... "],
    &[" ... ", ".XXX.", " .X. ", ".XX. ", ".X.  ", " .   "],
    &["  .. ", " .XX.", " .XX.", ".XX. ", ".XX. ", " ..  "],
    &[" ... ", ".XXX.", ".XXX.", ".XX. ", ".XX. ", " ..  "],
];

/// One tile value with its orientations and placement automaton
#[derive(Debug, Clone)]
pub struct TileSource {
    value_index: usize,
    value: i32,
    area: usize,
    shapes: Vec<TileShape>,
    automaton: Arc<Nfa>,
}

impl TileSource {
    /// Build the source for tile `value` on a `grid_size` board
    ///
    /// # Panics
    ///
    /// Panics if `value` has no canonical tile or the tile does not fit.
    pub fn new(value: usize, grid_size: usize) -> Self {
        let rows = BASE_TILES
            .get(value)
            .unwrap_or_else(|| panic!("no tile with value {value}"));
        let base = TileShape::parse(rows);
        let shapes = base.unique_rotations();
        let automaton = Arc::new(reified_placement_pattern(&shapes, grid_size).compile());
        Self {
            value_index: value,
            value: value as i32,
            area: base.area(),
            shapes,
            automaton,
        }
    }

    /// Index of the value family in [`BASE_TILES`], shared by all copies
    pub const fn value_index(&self) -> usize {
        self.value_index
    }

    /// Points per level
    pub const fn value(&self) -> i32 {
        self.value
    }

    /// Number of covered cells
    pub const fn area(&self) -> usize {
        self.area
    }

    /// Distinct orientations
    pub fn shapes(&self) -> &[TileShape] {
        &self.shapes
    }

    /// Automaton over `[control] ++ placement cells`
    pub fn automaton(&self) -> Arc<Nfa> {
        Arc::clone(&self.automaton)
    }
}

/// The tile source behind every part of an instance
///
/// Parts `v·copies .. (v+1)·copies` share the source for value `v`.
#[derive(Debug, Clone)]
pub struct TileCatalog {
    instance: Instance,
    parts: Vec<Arc<TileSource>>,
}

impl TileCatalog {
    /// Build the catalog for `instance` without consulting the cache
    pub fn build(instance: &Instance) -> Self {
        let mut parts = Vec::with_capacity(instance.number_of_parts());
        for value in 0..=instance.max_value() {
            let source = Arc::new(TileSource::new(value, instance.grid_size()));
            debug!(
                value,
                orientations = source.shapes().len(),
                states = source.automaton.state_count(),
                "tile source compiled"
            );
            for _ in 0..instance.copies() {
                parts.push(Arc::clone(&source));
            }
        }
        Self {
            instance: *instance,
            parts,
        }
    }

    /// Shared catalog for `instance`, built on first request
    pub fn for_instance(instance: &Instance) -> Arc<Self> {
        let mut cache = CATALOG_CACHE.lock().unwrap_or_else(PoisonError::into_inner);
        cache.get_or_build(instance)
    }

    /// Instance the catalog was built for
    pub const fn instance(&self) -> &Instance {
        &self.instance
    }

    /// Source of `part`
    ///
    /// # Panics
    ///
    /// Panics if `part` is not a part of the instance.
    pub fn source(&self, part: usize) -> &TileSource {
        self.parts
            .get(part)
            .unwrap_or_else(|| panic!("part {part} out of range"))
    }

    /// Sources in part order, copies adjacent
    pub fn sources(&self) -> impl Iterator<Item = &TileSource> {
        self.parts.iter().map(AsRef::as_ref)
    }

    /// Number of parts
    pub const fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the catalog has no parts
    pub const fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Hit and miss counters of a [`CatalogCache`]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: usize,
    /// Lookups that built a new catalog
    pub misses: usize,
}

/// Catalogs keyed by instance
#[derive(Default, Debug)]
pub struct CatalogCache {
    catalogs: HashMap<Instance, Arc<TileCatalog>>,
    stats: CacheStats,
}

impl CatalogCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached catalog for `instance`, building it on a miss
    pub fn get_or_build(&mut self, instance: &Instance) -> Arc<TileCatalog> {
        match self.catalogs.entry(*instance) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                Arc::clone(entry.get())
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                Arc::clone(entry.insert(Arc::new(TileCatalog::build(instance))))
            }
        }
    }

    /// Lookup counters
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Number of cached catalogs
    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    /// Whether nothing is cached
    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}

static CATALOG_CACHE: LazyLock<Mutex<CatalogCache>> =
    LazyLock::new(|| Mutex::new(CatalogCache::new()));
