//! Persisted hotspot positions and navigation targets.
//!
//! [`PositionStore`] is the key/value contract the shell implements (browser
//! `localStorage` in production, [`MemoryStore`] in tests). [`PositionBook`]
//! sits on top and resolves a position as
//! persisted override → promoted baseline → compiled default, logging and
//! falling back whenever the store fails.

use std::collections::BTreeMap;
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::catalog::{Catalog, TargetMap};
use crate::types::Position;

pub type PositionMap = BTreeMap<String, Position>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("position store unavailable")]
    Unavailable,
    #[error("malformed stored positions: {0}")]
    Malformed(String),
    #[error("storage backend: {0}")]
    Backend(String),
}

pub trait PositionStore {
    fn get(&self, id: &str) -> Result<Option<Position>, StoreError> {
        Ok(self.get_all()?.get(id).copied())
    }

    fn get_all(&self) -> Result<PositionMap, StoreError>;

    fn set(&mut self, id: &str, position: Position) -> Result<(), StoreError>;

    fn clear_all(&mut self) -> Result<(), StoreError>;

    /// Positions promoted by "save as defaults". Stores without a baseline
    /// slot report none.
    fn load_baseline(&self) -> Result<PositionMap, StoreError> {
        Ok(PositionMap::new())
    }

    fn save_baseline(&mut self, _positions: &PositionMap) -> Result<(), StoreError> {
        Ok(())
    }

    fn clear_baseline(&mut self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Pinned navigation targets. Stores without a target slot report none.
    fn load_targets(&self) -> Result<TargetMap, StoreError> {
        Ok(TargetMap::new())
    }

    fn save_targets(&mut self, _targets: &TargetMap) -> Result<(), StoreError> {
        Ok(())
    }

    fn clear_targets(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    overrides: PositionMap,
    baseline: PositionMap,
    targets: TargetMap,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PositionStore for MemoryStore {
    fn get(&self, id: &str) -> Result<Option<Position>, StoreError> {
        Ok(self.overrides.get(id).copied())
    }

    fn get_all(&self) -> Result<PositionMap, StoreError> {
        Ok(self.overrides.clone())
    }

    fn set(&mut self, id: &str, position: Position) -> Result<(), StoreError> {
        self.overrides.insert(id.to_string(), position);
        Ok(())
    }

    fn clear_all(&mut self) -> Result<(), StoreError> {
        self.overrides.clear();
        Ok(())
    }

    fn load_baseline(&self) -> Result<PositionMap, StoreError> {
        Ok(self.baseline.clone())
    }

    fn save_baseline(&mut self, positions: &PositionMap) -> Result<(), StoreError> {
        self.baseline = positions.clone();
        Ok(())
    }

    fn clear_baseline(&mut self) -> Result<(), StoreError> {
        self.baseline.clear();
        Ok(())
    }

    fn load_targets(&self) -> Result<TargetMap, StoreError> {
        Ok(self.targets.clone())
    }

    fn save_targets(&mut self, targets: &TargetMap) -> Result<(), StoreError> {
        self.targets = targets.clone();
        Ok(())
    }

    fn clear_targets(&mut self) -> Result<(), StoreError> {
        self.targets.clear();
        Ok(())
    }
}

/// On-disk record, `[{ "id": "sofa", "position": { "x": 25, "y": 70 } }, ...]`.
#[derive(Serialize, Deserialize)]
struct StoredPosition {
    id: String,
    position: Position,
}

pub fn encode_positions(positions: &PositionMap) -> Result<String, StoreError> {
    let records: Vec<StoredPosition> = positions
        .iter()
        .map(|(id, &position)| StoredPosition { id: id.clone(), position })
        .collect();
    serde_json::to_string(&records).map_err(|e| StoreError::Malformed(e.to_string()))
}

/// Later records win when an id repeats.
pub fn decode_positions(text: &str) -> Result<PositionMap, StoreError> {
    let records: Vec<StoredPosition> =
        serde_json::from_str(text).map_err(|e| StoreError::Malformed(e.to_string()))?;
    Ok(records.into_iter().map(|r| (r.id, r.position)).collect())
}

#[derive(Serialize, Deserialize)]
struct StoredTarget {
    id: String,
    target: f64,
}

pub fn encode_targets(targets: &TargetMap) -> Result<String, StoreError> {
    let records: Vec<StoredTarget> = targets
        .iter()
        .map(|(id, &target)| StoredTarget { id: id.clone(), target })
        .collect();
    serde_json::to_string(&records).map_err(|e| StoreError::Malformed(e.to_string()))
}

pub fn decode_targets(text: &str) -> Result<TargetMap, StoreError> {
    let records: Vec<StoredTarget> =
        serde_json::from_str(text).map_err(|e| StoreError::Malformed(e.to_string()))?;
    Ok(records.into_iter().map(|r| (r.id, r.target)).collect())
}

pub struct PositionBook<S: PositionStore> {
    store: S,
    compiled: PositionMap,
    baseline: PositionMap,
}

impl<S: PositionStore> PositionBook<S> {
    pub fn new(store: S, catalog: &Catalog) -> Self {
        let compiled: PositionMap = catalog
            .points()
            .iter()
            .map(|p| (p.id.clone(), p.position))
            .collect();
        let mut baseline = compiled.clone();
        match store.load_baseline() {
            Ok(saved) => {
                for (id, pos) in saved {
                    if let Some(slot) = baseline.get_mut(&id) {
                        *slot = pos;
                    }
                }
            }
            Err(e) => warn!("positions: baseline load failed, using compiled defaults: {e}"),
        }
        Self { store, compiled, baseline }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn compiled_default(&self, id: &str) -> Option<Position> {
        self.compiled.get(id).copied()
    }

    pub fn get(&self, id: &str) -> Option<Position> {
        let fallback = self.baseline.get(id).copied();
        match self.store.get(id) {
            Ok(Some(pos)) => Some(pos),
            Ok(None) => fallback,
            Err(e) => {
                warn!("positions: read of {id:?} failed, using default: {e}");
                fallback
            }
        }
    }

    /// Startup merge of overrides onto the baseline, one store read.
    pub fn resolve_all(&self) -> PositionMap {
        let mut resolved = self.baseline.clone();
        match self.store.get_all() {
            Ok(saved) => {
                for (id, pos) in saved {
                    if let Some(slot) = resolved.get_mut(&id) {
                        *slot = pos;
                    }
                }
            }
            Err(e) => warn!("positions: load failed, using defaults: {e}"),
        }
        resolved
    }

    pub fn set(&mut self, id: &str, position: Position) {
        if let Err(e) = self.store.set(id, position) {
            warn!("positions: write of {id:?} failed: {e}");
        }
    }

    /// Drops every persisted override; the baseline is kept.
    pub fn clear_all(&mut self) {
        if let Err(e) = self.store.clear_all() {
            warn!("positions: clear failed: {e}");
        }
    }

    /// Drops overrides and any promoted baseline, back to compiled defaults.
    pub fn reset(&mut self) {
        self.clear_all();
        if let Err(e) = self.store.clear_baseline() {
            warn!("positions: baseline clear failed: {e}");
        }
        self.baseline = self.compiled.clone();
    }

    pub fn load_targets(&self) -> TargetMap {
        self.store.load_targets().unwrap_or_else(|e| {
            warn!("targets: load failed, using range midpoints: {e}");
            TargetMap::new()
        })
    }

    pub fn save_targets(&mut self, targets: &TargetMap) {
        if let Err(e) = self.store.save_targets(targets) {
            warn!("targets: save failed: {e}");
        }
    }

    pub fn clear_targets(&mut self) {
        if let Err(e) = self.store.clear_targets() {
            warn!("targets: clear failed: {e}");
        }
    }

    /// Promotes `working` to the baseline used when no override exists.
    pub fn save_as_defaults(&mut self, working: &PositionMap) {
        for (id, pos) in working {
            if let Some(slot) = self.baseline.get_mut(id) {
                *slot = *pos;
            }
        }
        if let Err(e) = self.store.save_baseline(&self.baseline) {
            warn!("positions: baseline save failed: {e}");
        }
    }
}
