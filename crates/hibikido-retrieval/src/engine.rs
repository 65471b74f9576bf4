use std::sync::{Arc, RwLock};

use tracing::instrument;

use hibikido_compose::Composer;
use hibikido_embed::EmbeddingProvider;
use hibikido_index::VectorIndex;
use hibikido_store::{
    Collection, DocumentStore, NewEffect, NewPreset, NewRecording, NewSegment, NewSegmentation,
    Parameter,
};

use crate::error::RetrievalError;
use crate::types::{EffectFields, Hit, PresetFields, RebuildReport, RecordingFields, SegmentFields};

/// Binds the embedding provider, vector index, document store and text
/// composer (C1-C4) into the two public operations spec.md §4.5 names:
/// ingest and search. Grounded on the teacher's `matcher::engine::Matcher`
/// (a struct holding the shared index plus stage configs, exposing one
/// pipeline method per operation).
///
/// Ingest, rebuild and search share one `RwLock`: search takes a read lock,
/// ingest/rebuild take the write lock, which is spec.md §5's "single writer
/// lock on the retrieval engine suffices" requirement.
pub struct RetrievalEngine {
    store: Arc<DocumentStore>,
    index: Arc<VectorIndex>,
    embedder: Arc<dyn EmbeddingProvider>,
    composer: Composer,
    write_lock: RwLock<()>,
    default_segmentation_id: RwLock<Option<String>>,
}

impl RetrievalEngine {
    pub fn new(
        store: Arc<DocumentStore>,
        index: Arc<VectorIndex>,
        embedder: Arc<dyn EmbeddingProvider>,
        composer: Composer,
    ) -> Self {
        Self {
            store,
            index,
            embedder,
            composer,
            write_lock: RwLock::new(()),
            default_segmentation_id: RwLock::new(None),
        }
    }

    #[instrument(skip(self, fields))]
    pub fn ingest_segment(&self, fields: SegmentFields) -> Result<String, RetrievalError> {
        let _guard = self.write_lock.write().map_err(|_| RetrievalError::PersistFailed("poisoned lock".into()))?;
        self.ingest_segment_locked(fields)
    }

    fn ingest_segment_locked(&self, fields: SegmentFields) -> Result<String, RetrievalError> {
        let recording = self
            .store
            .find_recording_by_path(&fields.recording_path)
            .ok_or_else(|| RetrievalError::NotFound(format!("recording path: {}", fields.recording_path)))?;
        let segmentation = self
            .store
            .find_segmentation(&fields.segmentation_id)
            .ok_or_else(|| RetrievalError::NotFound(format!("segmentation id: {}", fields.segmentation_id)))?;

        let embedding_text =
            self.composer
                .compose_segment(&fields.description, &segmentation.description, &recording.description);
        let vector = self.embedder.embed(&embedding_text)?;
        let row = self.index.add(vector)?;

        let id = self.store.insert_segment(NewSegment {
            recording_path: fields.recording_path,
            segmentation_id: fields.segmentation_id,
            start: fields.start,
            end: fields.end,
            description: fields.description,
            embedding_text,
            row,
            freq_low: fields.freq_low,
            freq_high: fields.freq_high,
            duration_seconds: fields.duration_seconds,
        })?;
        Ok(id)
    }

    #[instrument(skip(self, fields))]
    pub fn ingest_preset(&self, fields: PresetFields) -> Result<String, RetrievalError> {
        let _guard = self.write_lock.write().map_err(|_| RetrievalError::PersistFailed("poisoned lock".into()))?;
        self.ingest_preset_locked(fields)
    }

    fn ingest_preset_locked(&self, fields: PresetFields) -> Result<String, RetrievalError> {
        let effect = self
            .store
            .find_effect_by_path(&fields.effect_path)
            .ok_or_else(|| RetrievalError::NotFound(format!("effect path: {}", fields.effect_path)))?;

        let embedding_text = self.composer.compose_preset(&fields.description, &effect.description);
        let vector = self.embedder.embed(&embedding_text)?;
        let row = self.index.add(vector)?;

        let parameters = fields
            .parameters
            .into_iter()
            .map(|(name, value)| Parameter { name, value })
            .collect();

        let id = self.store.insert_preset(NewPreset {
            effect_path: fields.effect_path,
            parameters,
            description: fields.description,
            embedding_text,
            row,
        })?;
        Ok(id)
    }

    /// Auto-ingests a full-length segment `(0.0, 1.0)` using a lazily
    /// created default segmentation, per spec.md §4.5.
    #[instrument(skip(self, fields))]
    pub fn ingest_recording(&self, fields: RecordingFields) -> Result<String, RetrievalError> {
        let _guard = self.write_lock.write().map_err(|_| RetrievalError::PersistFailed("poisoned lock".into()))?;
        let recording_id = self.store.insert_recording(NewRecording {
            path: fields.path.clone(),
            description: fields.description.clone(),
        })?;

        let segmentation_id = self.default_segmentation_id_locked()?;
        self.ingest_segment_locked(SegmentFields {
            recording_path: fields.path,
            segmentation_id,
            start: 0.0,
            end: 1.0,
            description: fields.description,
            freq_low: None,
            freq_high: None,
            duration_seconds: None,
        })?;
        Ok(recording_id)
    }

    /// Auto-ingests an empty-parameter default preset, per spec.md §4.5.
    #[instrument(skip(self, fields))]
    pub fn ingest_effect(&self, fields: EffectFields) -> Result<String, RetrievalError> {
        let _guard = self.write_lock.write().map_err(|_| RetrievalError::PersistFailed("poisoned lock".into()))?;
        let effect_id = self.store.insert_effect(NewEffect {
            path: fields.path.clone(),
            name: fields.name,
            description: fields.description.clone(),
        })?;

        self.ingest_preset_locked(PresetFields {
            effect_path: fields.path,
            parameters: Vec::new(),
            description: fields.description,
        })?;
        Ok(effect_id)
    }

    fn default_segmentation_id_locked(&self) -> Result<String, RetrievalError> {
        {
            let cached = self
                .default_segmentation_id
                .read()
                .map_err(|_| RetrievalError::PersistFailed("poisoned lock".into()))?;
            if let Some(id) = cached.as_ref() {
                return Ok(id.clone());
            }
        }
        let id = self.store.insert_segmentation(NewSegmentation {
            method: "full-recording".to_string(),
            parameters: serde_json::json!({}),
            description: "full-length segment".to_string(),
        })?;
        *self
            .default_segmentation_id
            .write()
            .map_err(|_| RetrievalError::PersistFailed("poisoned lock".into()))? = Some(id.clone());
        Ok(id)
    }

    /// `query_text -> enhance -> embed -> top-k vector search -> resolve
    /// rows to documents -> filter by min_score`, preserving descending
    /// score order (spec.md §4.5).
    #[instrument(skip(self))]
    pub fn search(&self, query_text: &str, k: usize, min_score: f32) -> Result<Vec<Hit>, RetrievalError> {
        let _guard = self.write_lock.read().map_err(|_| RetrievalError::PersistFailed("poisoned lock".into()))?;
        if k == 0 {
            return Ok(Vec::new());
        }

        let enhanced = self.composer.enhance_query(query_text);
        let vector = self.embedder.embed(&enhanced)?;
        let hits = self.index.search(&vector, k)?;

        let mut resolved = Vec::with_capacity(hits.len());
        for (row, score) in hits {
            if score < min_score {
                continue;
            }
            match self.store.find_by_row(row) {
                Some((Collection::Segment, id)) => {
                    if let Some(segment) = self.store.find_segment(&id) {
                        resolved.push(Hit::Segment { row, score, segment });
                    }
                }
                Some((Collection::Preset, id)) => {
                    if let Some(preset) = self.store.find_preset(&id) {
                        resolved.push(Hit::Preset { row, score, preset });
                    }
                }
                None => {
                    tracing::debug!(row, "orphaned row with no owning document, skipping");
                }
            }
        }
        Ok(resolved)
    }

    /// Drops the vector index and rebuilds it from every stored segment
    /// then every stored preset, re-deriving embedding text and
    /// reassigning rows in iteration order (spec.md §4.5). Documents are
    /// visited in `id` order so repeated rebuilds are idempotent even
    /// though the store's internal maps don't preserve insertion order.
    ///
    /// Atomicity policy (spec.md §7's open choice, resolved here): each
    /// document is re-embedded independently. A document whose re-embed
    /// fails keeps its previous row assignment (now stale against the
    /// fresh index) and is recorded in the returned report rather than
    /// aborting the whole rebuild.
    #[instrument(skip(self))]
    pub fn rebuild_index(&self) -> Result<RebuildReport, RetrievalError> {
        let _guard = self.write_lock.write().map_err(|_| RetrievalError::PersistFailed("poisoned lock".into()))?;

        self.index.clear()?;
        self.store.reset_rows()?;

        let mut report = RebuildReport::default();

        let mut segments = self.store.all_segments();
        segments.sort_by(|a, b| a.id.cmp(&b.id));
        for segment in segments {
            let segmentation = self.store.find_segmentation(&segment.segmentation_id);
            let recording = self.store.find_recording_by_path(&segment.recording_path);
            let (segmentation_desc, recording_desc) = match (&segmentation, &recording) {
                (Some(s), Some(r)) => (s.description.clone(), r.description.clone()),
                _ => {
                    report
                        .failed
                        .push((segment.id.clone(), "dangling reference during rebuild".to_string()));
                    continue;
                }
            };
            let embedding_text = self
                .composer
                .compose_segment(&segment.description, &segmentation_desc, &recording_desc);
            match self
                .embedder
                .embed(&embedding_text)
                .map_err(RetrievalError::from)
                .and_then(|vector| self.index.add(vector).map_err(RetrievalError::from))
            {
                Ok(row) => {
                    self.store.reassign_segment_row(&segment.id, row)?;
                    report.rebuilt += 1;
                }
                Err(err) => report.failed.push((segment.id.clone(), err.to_string())),
            }
        }

        let mut presets = self.store.all_presets();
        presets.sort_by(|a, b| a.id.cmp(&b.id));
        for preset in presets {
            let effect = self.store.find_effect_by_path(&preset.effect_path);
            let effect_desc = match effect {
                Some(e) => e.description,
                None => {
                    report
                        .failed
                        .push((preset.id.clone(), "dangling reference during rebuild".to_string()));
                    continue;
                }
            };
            let embedding_text = self.composer.compose_preset(&preset.description, &effect_desc);
            match self
                .embedder
                .embed(&embedding_text)
                .map_err(RetrievalError::from)
                .and_then(|vector| self.index.add(vector).map_err(RetrievalError::from))
            {
                Ok(row) => {
                    self.store.reassign_preset_row(&preset.id, row)?;
                    report.rebuilt += 1;
                }
                Err(err) => report.failed.push((preset.id.clone(), err.to_string())),
            }
        }

        Ok(report)
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn index(&self) -> &VectorIndex {
        &self.index
    }
}
