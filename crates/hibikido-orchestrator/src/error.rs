/// Kept for symmetry with the rest of the workspace's per-crate error
/// enums (see `SPEC_FULL.md` §2's ambient stack). Unused in practice:
/// spec.md §7 item 6 states plainly that a candidate which cannot
/// currently be admitted is not an error, it just stays queued, and
/// lock-poisoning here is recovered from rather than propagated (see
/// `Orchestrator`'s `unwrap_or_else(|e| e.into_inner())` calls).
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {}
