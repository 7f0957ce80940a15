use room_core::catalog::TargetMap;
use room_core::store::{decode_positions, decode_targets, encode_positions, encode_targets, PositionMap};
use room_core::{Position, PositionStore, StoreError};
use web_sys::Storage;

const POSITIONS_KEY: &str = "video_highlights_positions";
const DEFAULTS_KEY: &str = "video_highlights_defaults";
const TARGETS_KEY: &str = "video_highlights_targets";

/// Hotspot positions and pinned jump targets in `localStorage`, one JSON
/// array per key.
///
/// Every call reaches for the storage object again; private browsing modes
/// may refuse it at any time, which surfaces as [`StoreError::Unavailable`].
#[derive(Default)]
pub struct LocalStorageStore;

fn storage() -> Result<Storage, StoreError> {
    web_sys::window()
        .ok_or(StoreError::Unavailable)?
        .local_storage()
        .map_err(|e| StoreError::Backend(format!("{e:?}")))?
        .ok_or(StoreError::Unavailable)
}

fn read_text(key: &str) -> Result<Option<String>, StoreError> {
    storage()?
        .get_item(key)
        .map_err(|e| StoreError::Backend(format!("{e:?}")))
}

fn write_text(key: &str, text: &str) -> Result<(), StoreError> {
    storage()?
        .set_item(key, text)
        .map_err(|e| StoreError::Backend(format!("{e:?}")))
}

fn read(key: &str) -> Result<PositionMap, StoreError> {
    match read_text(key)? {
        Some(text) => decode_positions(&text),
        None => Ok(PositionMap::new()),
    }
}

fn write(key: &str, positions: &PositionMap) -> Result<(), StoreError> {
    write_text(key, &encode_positions(positions)?)
}

fn remove(key: &str) -> Result<(), StoreError> {
    storage()?
        .remove_item(key)
        .map_err(|e| StoreError::Backend(format!("{e:?}")))
}

impl PositionStore for LocalStorageStore {
    fn get_all(&self) -> Result<PositionMap, StoreError> {
        read(POSITIONS_KEY)
    }

    fn set(&mut self, id: &str, position: Position) -> Result<(), StoreError> {
        let mut all = read(POSITIONS_KEY).unwrap_or_else(|e| {
            log::warn!("positions: dropping unreadable saved set: {e}");
            PositionMap::new()
        });
        all.insert(id.to_string(), position);
        write(POSITIONS_KEY, &all)
    }

    fn clear_all(&mut self) -> Result<(), StoreError> {
        remove(POSITIONS_KEY)
    }

    fn load_baseline(&self) -> Result<PositionMap, StoreError> {
        read(DEFAULTS_KEY)
    }

    fn save_baseline(&mut self, positions: &PositionMap) -> Result<(), StoreError> {
        write(DEFAULTS_KEY, positions)
    }

    fn clear_baseline(&mut self) -> Result<(), StoreError> {
        remove(DEFAULTS_KEY)
    }

    fn load_targets(&self) -> Result<TargetMap, StoreError> {
        match read_text(TARGETS_KEY)? {
            Some(text) => decode_targets(&text),
            None => Ok(TargetMap::new()),
        }
    }

    fn save_targets(&mut self, targets: &TargetMap) -> Result<(), StoreError> {
        write_text(TARGETS_KEY, &encode_targets(targets)?)
    }

    fn clear_targets(&mut self) -> Result<(), StoreError> {
        remove(TARGETS_KEY)
    }
}
