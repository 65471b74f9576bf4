use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::backend::{InMemoryBackend, StoreBackend};
use crate::error::StoreError;
use crate::types::{
    Collection, Effect, Invocation, Parameter, Performance, Preset, Recording, Segment,
    Segmentation,
};

/// Fields needed to insert a recording; `id` is generated if omitted.
pub struct NewRecording {
    pub path: String,
    pub description: String,
}

/// Fields needed to insert a segmentation; `id` is generated if omitted.
pub struct NewSegmentation {
    pub method: String,
    pub parameters: serde_json::Value,
    pub description: String,
}

/// Fields needed to insert a segment; `row` is assigned by the caller after
/// `VectorIndex::add` succeeds.
pub struct NewSegment {
    pub recording_path: String,
    pub segmentation_id: String,
    pub start: f32,
    pub end: f32,
    pub description: String,
    pub embedding_text: String,
    pub row: usize,
    pub freq_low: Option<f32>,
    pub freq_high: Option<f32>,
    pub duration_seconds: Option<f32>,
}

/// Fields needed to insert an effect; `id` is generated if omitted.
pub struct NewEffect {
    pub path: String,
    pub name: String,
    pub description: String,
}

/// Fields needed to insert a preset; `row` is assigned by the caller after
/// `VectorIndex::add` succeeds.
pub struct NewPreset {
    pub effect_path: String,
    pub parameters: Vec<Parameter>,
    pub description: String,
    pub embedding_text: String,
    pub row: usize,
}

/// Schema-validated, referential-integrity-checked collection store.
///
/// Holds every document in memory (this library targets a single sound
/// library, not web scale) and mirrors inserts into a pluggable
/// [`StoreBackend`] for durability. The row → (collection, id) side-map
/// recommended in spec.md §9 is kept directly, so `find_by_row` is one
/// lookup rather than probing segments then presets.
pub struct DocumentStore {
    backend: Box<dyn StoreBackend>,

    recordings: RwLock<HashMap<String, Recording>>,
    recordings_by_path: RwLock<HashMap<String, String>>,

    segmentations: RwLock<HashMap<String, Segmentation>>,

    segments: RwLock<HashMap<String, Segment>>,

    effects: RwLock<HashMap<String, Effect>>,
    effects_by_path: RwLock<HashMap<String, String>>,

    presets: RwLock<HashMap<String, Preset>>,

    performances: RwLock<HashMap<String, Performance>>,

    row_owners: RwLock<Vec<Option<(Collection, String)>>>,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new(Box::new(InMemoryBackend::new()))
    }
}

impl DocumentStore {
    /// Constructs an empty store over `backend`, then hydrates every
    /// in-memory index (including the path and row side-maps) from whatever
    /// the backend already holds, so a durable backend (e.g. `mongo`)
    /// actually restores state across a restart instead of starting empty
    /// every time spec.md §4.3's store is reopened.
    pub fn new(backend: Box<dyn StoreBackend>) -> Self {
        let store = Self {
            backend,
            recordings: RwLock::new(HashMap::new()),
            recordings_by_path: RwLock::new(HashMap::new()),
            segmentations: RwLock::new(HashMap::new()),
            segments: RwLock::new(HashMap::new()),
            effects: RwLock::new(HashMap::new()),
            effects_by_path: RwLock::new(HashMap::new()),
            presets: RwLock::new(HashMap::new()),
            performances: RwLock::new(HashMap::new()),
            row_owners: RwLock::new(Vec::new()),
        };
        if let Err(err) = store.hydrate() {
            tracing::warn!(error = %err, "failed to hydrate document store from backend, starting empty");
        }
        store
    }

    /// Scans every collection the backend holds and rebuilds the in-memory
    /// maps, the path side-maps, and the row → (collection, id) side-map.
    /// Called once at construction; a fresh `InMemoryBackend` scans to
    /// nothing, so this is a no-op for ephemeral/test stores.
    fn hydrate(&self) -> Result<(), StoreError> {
        let mut recordings = self.recordings.write().map_err(|_| StoreError::backend("poisoned lock"))?;
        let mut recordings_by_path = self
            .recordings_by_path
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        self.backend.scan("recordings", &mut |bytes| {
            let record: Recording = serde_json::from_slice(bytes)
                .map_err(|e| StoreError::Validation(format!("corrupt recording record: {e}")))?;
            recordings_by_path.insert(record.path.clone(), record.id.clone());
            recordings.insert(record.id.clone(), record);
            Ok(())
        })?;
        drop(recordings);
        drop(recordings_by_path);

        let mut segmentations = self
            .segmentations
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        self.backend.scan("segmentations", &mut |bytes| {
            let record: Segmentation = serde_json::from_slice(bytes)
                .map_err(|e| StoreError::Validation(format!("corrupt segmentation record: {e}")))?;
            segmentations.insert(record.id.clone(), record);
            Ok(())
        })?;
        drop(segmentations);

        let mut effects = self.effects.write().map_err(|_| StoreError::backend("poisoned lock"))?;
        let mut effects_by_path = self
            .effects_by_path
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        self.backend.scan("effects", &mut |bytes| {
            let record: Effect = serde_json::from_slice(bytes)
                .map_err(|e| StoreError::Validation(format!("corrupt effect record: {e}")))?;
            effects_by_path.insert(record.path.clone(), record.id.clone());
            effects.insert(record.id.clone(), record);
            Ok(())
        })?;
        drop(effects);
        drop(effects_by_path);

        let mut segments = self.segments.write().map_err(|_| StoreError::backend("poisoned lock"))?;
        let mut row_owners = self.row_owners.write().map_err(|_| StoreError::backend("poisoned lock"))?;
        self.backend.scan("segments", &mut |bytes| {
            let record: Segment = serde_json::from_slice(bytes)
                .map_err(|e| StoreError::Validation(format!("corrupt segment record: {e}")))?;
            if record.row >= row_owners.len() {
                row_owners.resize(record.row + 1, None);
            }
            row_owners[record.row] = Some((Collection::Segment, record.id.clone()));
            segments.insert(record.id.clone(), record);
            Ok(())
        })?;
        drop(segments);

        let mut presets = self.presets.write().map_err(|_| StoreError::backend("poisoned lock"))?;
        self.backend.scan("presets", &mut |bytes| {
            let record: Preset = serde_json::from_slice(bytes)
                .map_err(|e| StoreError::Validation(format!("corrupt preset record: {e}")))?;
            if record.row >= row_owners.len() {
                row_owners.resize(record.row + 1, None);
            }
            row_owners[record.row] = Some((Collection::Preset, record.id.clone()));
            presets.insert(record.id.clone(), record);
            Ok(())
        })?;
        drop(presets);
        drop(row_owners);

        let mut performances = self
            .performances
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        self.backend.scan("performances", &mut |bytes| {
            let record: Performance = serde_json::from_slice(bytes)
                .map_err(|e| StoreError::Validation(format!("corrupt performance record: {e}")))?;
            performances.insert(record.id.clone(), record);
            Ok(())
        })?;
        drop(performances);

        Ok(())
    }

    fn persist<T: serde::Serialize>(
        &self,
        collection: &str,
        key: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)
            .map_err(|err| StoreError::Validation(format!("serialization failed: {err}")))?;
        self.backend.put(collection, key, &bytes)
    }

    fn claim_row(&self, row: usize, owner: Collection, id: &str) -> Result<(), StoreError> {
        let mut owners = self.row_owners.write().map_err(|_| StoreError::backend("poisoned lock"))?;
        if row >= owners.len() {
            owners.resize(row + 1, None);
        }
        if let Some((_, existing)) = &owners[row] {
            return Err(StoreError::Conflict {
                kind: "row",
                key: format!("row {row} already owned by {existing}"),
            });
        }
        owners[row] = Some((owner, id.to_string()));
        Ok(())
    }

    #[instrument(skip(self, recording))]
    pub fn insert_recording(&self, recording: NewRecording) -> Result<String, StoreError> {
        let mut by_path = self
            .recordings_by_path
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        if by_path.contains_key(&recording.path) {
            return Err(StoreError::Conflict {
                kind: "recording path",
                key: recording.path,
            });
        }
        let id = Uuid::new_v4().to_string();
        let record = Recording {
            id: id.clone(),
            path: recording.path.clone(),
            description: recording.description,
            created_at: Utc::now(),
        };
        self.persist("recordings", &id, &record)?;
        by_path.insert(recording.path, id.clone());
        drop(by_path);
        self.recordings
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .insert(id.clone(), record);
        Ok(id)
    }

    #[instrument(skip(self, segmentation))]
    pub fn insert_segmentation(
        &self,
        segmentation: NewSegmentation,
    ) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let record = Segmentation {
            id: id.clone(),
            method: segmentation.method,
            parameters: segmentation.parameters,
            description: segmentation.description,
        };
        self.persist("segmentations", &id, &record)?;
        self.segmentations
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .insert(id.clone(), record);
        Ok(id)
    }

    #[instrument(skip(self, segment))]
    pub fn insert_segment(&self, segment: NewSegment) -> Result<String, StoreError> {
        if segment.start >= segment.end {
            return Err(StoreError::Validation(format!(
                "segment start {} must be < end {}",
                segment.start, segment.end
            )));
        }
        if !self
            .recordings_by_path
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .contains_key(&segment.recording_path)
        {
            return Err(StoreError::DanglingReference(format!(
                "unknown recording path: {}",
                segment.recording_path
            )));
        }
        if !self
            .segmentations
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .contains_key(&segment.segmentation_id)
        {
            return Err(StoreError::DanglingReference(format!(
                "unknown segmentation id: {}",
                segment.segmentation_id
            )));
        }

        let id = Uuid::new_v4().to_string();
        self.claim_row(segment.row, Collection::Segment, &id)?;

        let record = Segment {
            id: id.clone(),
            recording_path: segment.recording_path,
            segmentation_id: segment.segmentation_id,
            start: segment.start,
            end: segment.end,
            description: segment.description,
            embedding_text: segment.embedding_text,
            row: segment.row,
            freq_low: segment.freq_low,
            freq_high: segment.freq_high,
            duration_seconds: segment.duration_seconds,
            created_at: Utc::now(),
        };
        self.persist("segments", &id, &record)?;
        self.segments
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .insert(id.clone(), record);
        Ok(id)
    }

    #[instrument(skip(self, effect))]
    pub fn insert_effect(&self, effect: NewEffect) -> Result<String, StoreError> {
        let mut by_path = self
            .effects_by_path
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        if by_path.contains_key(&effect.path) {
            return Err(StoreError::Conflict {
                kind: "effect path",
                key: effect.path,
            });
        }
        let id = Uuid::new_v4().to_string();
        let record = Effect {
            id: id.clone(),
            path: effect.path.clone(),
            name: effect.name,
            description: effect.description,
            created_at: Utc::now(),
        };
        self.persist("effects", &id, &record)?;
        by_path.insert(effect.path, id.clone());
        drop(by_path);
        self.effects
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .insert(id.clone(), record);
        Ok(id)
    }

    #[instrument(skip(self, preset))]
    pub fn insert_preset(&self, preset: NewPreset) -> Result<String, StoreError> {
        if !self
            .effects_by_path
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .contains_key(&preset.effect_path)
        {
            return Err(StoreError::DanglingReference(format!(
                "unknown effect path: {}",
                preset.effect_path
            )));
        }

        let id = Uuid::new_v4().to_string();
        self.claim_row(preset.row, Collection::Preset, &id)?;

        let record = Preset {
            id: id.clone(),
            effect_path: preset.effect_path,
            parameters: preset.parameters,
            description: preset.description,
            embedding_text: preset.embedding_text,
            row: preset.row,
            created_at: Utc::now(),
        };
        self.persist("presets", &id, &record)?;
        self.presets
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .insert(id.clone(), record);
        Ok(id)
    }

    /// Appends an invocation to a performance, creating it first if absent.
    pub fn append_invocation(
        &self,
        performance_id: &str,
        invocation: Invocation,
    ) -> Result<(), StoreError> {
        let mut performances = self
            .performances
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        let performance = performances
            .entry(performance_id.to_string())
            .or_insert_with(|| Performance {
                id: performance_id.to_string(),
                date: Utc::now(),
                invocations: Vec::new(),
            });
        performance.invocations.push(invocation);
        let snapshot = performance.clone();
        drop(performances);
        self.persist("performances", performance_id, &snapshot)
    }

    pub fn find_recording(&self, id: &str) -> Option<Recording> {
        self.recordings.read().ok()?.get(id).cloned()
    }

    pub fn find_recording_by_path(&self, path: &str) -> Option<Recording> {
        let by_path = self.recordings_by_path.read().ok()?;
        let id = by_path.get(path)?;
        self.recordings.read().ok()?.get(id).cloned()
    }

    pub fn find_segmentation(&self, id: &str) -> Option<Segmentation> {
        self.segmentations.read().ok()?.get(id).cloned()
    }

    pub fn find_segment(&self, id: &str) -> Option<Segment> {
        self.segments.read().ok()?.get(id).cloned()
    }

    pub fn find_effect(&self, id: &str) -> Option<Effect> {
        self.effects.read().ok()?.get(id).cloned()
    }

    pub fn find_effect_by_path(&self, path: &str) -> Option<Effect> {
        let by_path = self.effects_by_path.read().ok()?;
        let id = by_path.get(path)?;
        self.effects.read().ok()?.get(id).cloned()
    }

    pub fn find_preset(&self, id: &str) -> Option<Preset> {
        self.presets.read().ok()?.get(id).cloned()
    }

    pub fn find_performance(&self, id: &str) -> Option<Performance> {
        self.performances.read().ok()?.get(id).cloned()
    }

    /// Returns the (collection, id) owning `row`, if any.
    pub fn find_by_row(&self, row: usize) -> Option<(Collection, String)> {
        self.row_owners.read().ok()?.get(row).cloned().flatten()
    }

    pub fn recording_count(&self) -> usize {
        self.recordings.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn segmentation_count(&self) -> usize {
        self.segmentations.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn segment_count(&self) -> usize {
        self.segments.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn effect_count(&self) -> usize {
        self.effects.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn preset_count(&self) -> usize {
        self.presets.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn performance_count(&self) -> usize {
        self.performances.read().map(|m| m.len()).unwrap_or(0)
    }

    /// All segments, for `rebuild_index` iteration order (insertion order is
    /// not guaranteed by `HashMap`, so callers that need a stable order
    /// should sort by `id` or `created_at` themselves).
    pub fn all_segments(&self) -> Vec<Segment> {
        self.segments
            .read()
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn all_presets(&self) -> Vec<Preset> {
        self.presets
            .read()
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Used by `rebuild_index` to reassign a document's row after a fresh
    /// `VectorIndex::add`. Does not move the old row's ownership; the caller
    /// is rebuilding the whole index from scratch so the old table is
    /// discarded wholesale beforehand via [`DocumentStore::reset_rows`].
    pub fn reassign_segment_row(&self, id: &str, row: usize) -> Result<(), StoreError> {
        self.claim_row(row, Collection::Segment, id)?;
        let mut segments = self
            .segments
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        let segment = segments
            .get_mut(id)
            .ok_or_else(|| StoreError::DanglingReference(format!("unknown segment id: {id}")))?;
        segment.row = row;
        let snapshot = segment.clone();
        drop(segments);
        self.persist("segments", id, &snapshot)
    }

    pub fn reassign_preset_row(&self, id: &str, row: usize) -> Result<(), StoreError> {
        self.claim_row(row, Collection::Preset, id)?;
        let mut presets = self
            .presets
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        let preset = presets
            .get_mut(id)
            .ok_or_else(|| StoreError::DanglingReference(format!("unknown preset id: {id}")))?;
        preset.row = row;
        let snapshot = preset.clone();
        drop(presets);
        self.persist("presets", id, &snapshot)
    }

    /// Clears the row side-map, used at the start of `rebuild_index` before
    /// rows are reassigned in iteration order.
    pub fn reset_rows(&self) -> Result<(), StoreError> {
        self.row_owners
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> DocumentStore {
        DocumentStore::default()
    }

    fn seed_recording(store: &DocumentStore, path: &str) -> String {
        store
            .insert_recording(NewRecording {
                path: path.to_string(),
                description: "forest ambience".to_string(),
            })
            .unwrap()
    }

    fn seed_segmentation(store: &DocumentStore) -> String {
        store
            .insert_segmentation(NewSegmentation {
                method: "onset".to_string(),
                parameters: serde_json::json!({}),
                description: "onset detection".to_string(),
            })
            .unwrap()
    }

    #[test]
    fn insert_segment_requires_known_recording() {
        let store = store();
        let segmentation_id = seed_segmentation(&store);
        let err = store
            .insert_segment(NewSegment {
                recording_path: "missing.wav".to_string(),
                segmentation_id,
                start: 0.0,
                end: 1.0,
                description: "wind".to_string(),
                embedding_text: "wind".to_string(),
                row: 0,
                freq_low: None,
                freq_high: None,
                duration_seconds: None,
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::DanglingReference(_)));
    }

    #[test]
    fn insert_segment_requires_known_segmentation() {
        let store = store();
        let recording_path = seed_recording(&store, "forest.wav");
        let _ = recording_path;
        let err = store
            .insert_segment(NewSegment {
                recording_path: "forest.wav".to_string(),
                segmentation_id: "missing-seg".to_string(),
                start: 0.0,
                end: 1.0,
                description: "wind".to_string(),
                embedding_text: "wind".to_string(),
                row: 0,
                freq_low: None,
                freq_high: None,
                duration_seconds: None,
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::DanglingReference(_)));
    }

    #[test]
    fn insert_segment_rejects_inverted_bounds() {
        let store = store();
        seed_recording(&store, "forest.wav");
        let segmentation_id = seed_segmentation(&store);
        let err = store
            .insert_segment(NewSegment {
                recording_path: "forest.wav".to_string(),
                segmentation_id,
                start: 0.8,
                end: 0.2,
                description: "wind".to_string(),
                embedding_text: "wind".to_string(),
                row: 0,
                freq_low: None,
                freq_high: None,
                duration_seconds: None,
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn insert_segment_succeeds_and_is_findable_by_row() {
        let store = store();
        seed_recording(&store, "forest.wav");
        let segmentation_id = seed_segmentation(&store);
        let id = store
            .insert_segment(NewSegment {
                recording_path: "forest.wav".to_string(),
                segmentation_id,
                start: 0.0,
                end: 1.0,
                description: "wind".to_string(),
                embedding_text: "wind".to_string(),
                row: 3,
                freq_low: Some(200.0),
                freq_high: Some(2000.0),
                duration_seconds: Some(4.0),
            })
            .unwrap();

        let (collection, owner_id) = store.find_by_row(3).unwrap();
        assert!(matches!(collection, Collection::Segment));
        assert_eq!(owner_id, id);
        assert_eq!(store.segment_count(), 1);
    }

    #[test]
    fn duplicate_row_is_a_conflict() {
        let store = store();
        seed_recording(&store, "forest.wav");
        let segmentation_id = seed_segmentation(&store);
        store
            .insert_segment(NewSegment {
                recording_path: "forest.wav".to_string(),
                segmentation_id: segmentation_id.clone(),
                start: 0.0,
                end: 0.5,
                description: "wind a".to_string(),
                embedding_text: "wind".to_string(),
                row: 0,
                freq_low: None,
                freq_high: None,
                duration_seconds: None,
            })
            .unwrap();

        let err = store
            .insert_segment(NewSegment {
                recording_path: "forest.wav".to_string(),
                segmentation_id,
                start: 0.5,
                end: 1.0,
                description: "wind b".to_string(),
                embedding_text: "wind".to_string(),
                row: 0,
                freq_low: None,
                freq_high: None,
                duration_seconds: None,
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { kind: "row", .. }));
    }

    #[test]
    fn duplicate_recording_path_is_a_conflict() {
        let store = store();
        seed_recording(&store, "forest.wav");
        let err = store
            .insert_recording(NewRecording {
                path: "forest.wav".to_string(),
                description: "duplicate".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { kind: "recording path", .. }));
    }

    #[test]
    fn insert_preset_requires_known_effect() {
        let store = store();
        let err = store
            .insert_preset(NewPreset {
                effect_path: "missing-effect".to_string(),
                parameters: vec![],
                description: "warm".to_string(),
                embedding_text: "warm".to_string(),
                row: 0,
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::DanglingReference(_)));
    }

    #[test]
    fn insert_preset_succeeds_after_effect_exists() {
        let store = store();
        store
            .insert_effect(NewEffect {
                path: "tape-delay".to_string(),
                name: "Tape Delay".to_string(),
                description: "warm analog delay".to_string(),
            })
            .unwrap();

        let id = store
            .insert_preset(NewPreset {
                effect_path: "tape-delay".to_string(),
                parameters: vec![Parameter {
                    name: "feedback".to_string(),
                    value: serde_json::json!(0.3),
                }],
                description: "warm".to_string(),
                embedding_text: "warm delay".to_string(),
                row: 0,
            })
            .unwrap();

        let (collection, owner_id) = store.find_by_row(0).unwrap();
        assert!(matches!(collection, Collection::Preset));
        assert_eq!(owner_id, id);
    }

    #[test]
    fn append_invocation_creates_performance_on_first_use() {
        let store = store();
        store
            .append_invocation(
                "session-1",
                Invocation {
                    raw_text: "deep forest wind".to_string(),
                    matched_segment_id: Some("seg-1".to_string()),
                    matched_effect_id: None,
                    time_offset_seconds: 1.5,
                },
            )
            .unwrap();
        let performance = store.find_performance("session-1").unwrap();
        assert_eq!(performance.invocations.len(), 1);
        assert_eq!(store.performance_count(), 1);
    }

    /// `DocumentStore::new` must hydrate every in-memory index (including
    /// the path and row side-maps) from whatever's already in the backend,
    /// so a durable backend restores state across a restart.
    #[test]
    fn new_hydrates_from_a_backend_that_already_holds_documents() {
        let backend = InMemoryBackend::new();
        let recording = Recording {
            id: "rec-1".to_string(),
            path: "sounds/a.wav".to_string(),
            description: "forest wind".to_string(),
            created_at: Utc::now(),
        };
        backend
            .put("recordings", &recording.id, &serde_json::to_vec(&recording).unwrap())
            .unwrap();

        let segment = Segment {
            id: "seg-1".to_string(),
            recording_path: "sounds/a.wav".to_string(),
            segmentation_id: "seg-method-1".to_string(),
            start: 0.0,
            end: 1.0,
            description: "forest wind".to_string(),
            embedding_text: "forest wind".to_string(),
            row: 2,
            freq_low: None,
            freq_high: None,
            duration_seconds: None,
            created_at: Utc::now(),
        };
        backend
            .put("segments", &segment.id, &serde_json::to_vec(&segment).unwrap())
            .unwrap();

        let store = DocumentStore::new(Box::new(backend));

        assert_eq!(store.recording_count(), 1);
        assert_eq!(store.find_recording_by_path("sounds/a.wav").unwrap().id, "rec-1");
        assert_eq!(store.segment_count(), 1);
        let (collection, owner_id) = store.find_by_row(2).unwrap();
        assert!(matches!(collection, Collection::Segment));
        assert_eq!(owner_id, "seg-1");
    }
}
