//! The git-backed object store (spec §4.3) — a linear chain of commits, one
//! per frame, each pointing at a tree with a single blob entry holding that
//! frame's serialized [`crate::container::FrameRecord`].
//!
//! Backed by `gix` (spec §4.3a): rather than juggling two object-store
//! backends (a raw loose-object writer alongside a full repository reader,
//! flagged as a design smell in the reference notes), every read and write
//! here goes through one `gix::Repository` handle.

use std::path::Path;

use crate::error::GitFlixError;

const FRAME_ENTRY_NAME: &str = "frame.bin";
const CHAIN_REF: &str = "refs/heads/gitflix";

fn store_error(detail: impl std::fmt::Display) -> GitFlixError {
    GitFlixError::ObjectStoreError { commit_id: None, detail: detail.to_string() }
}

fn store_error_at(commit_id: gix::ObjectId, detail: impl std::fmt::Display) -> GitFlixError {
    GitFlixError::ObjectStoreError { commit_id: Some(commit_id.to_string()), detail: detail.to_string() }
}

/// Thin wrapper around a `gix::Repository` exposing exactly the operations
/// the encoder and decode pipelines need: append a frame, fetch a blob by
/// commit, and walk the chain from the tip back to the root.
pub struct Repo {
    inner: gix::Repository,
}

impl Repo {
    /// Opens an existing bare repository at `path`, or creates one if it
    /// doesn't exist yet.
    pub fn open_or_init(path: &Path) -> Result<Self, GitFlixError> {
        let inner = match gix::open(path) {
            Ok(repo) => repo,
            Err(_) => gix::init_bare(path).map_err(store_error)?,
        };
        Ok(Repo { inner })
    }

    /// Appends a frame as a new commit on top of `parent` (or as a root
    /// commit when `parent` is `None`). Returns the new commit's id.
    pub fn write_frame(
        &self,
        frame_number: u32,
        serialized_record: &[u8],
        parent: Option<gix::ObjectId>,
    ) -> Result<gix::ObjectId, GitFlixError> {
        let blob_id = self.inner.write_blob(serialized_record).map_err(store_error)?.detach();

        let mut editor = self.inner.edit_tree(gix::ObjectId::empty_tree(gix::hash::Kind::Sha1)).map_err(store_error)?;
        editor
            .upsert(FRAME_ENTRY_NAME, gix::object::tree::EntryKind::Blob, blob_id)
            .map_err(store_error)?;
        let tree_id = editor.write().map_err(store_error)?.detach();

        let parents: Vec<gix::ObjectId> = parent.into_iter().collect();
        let commit_id = self
            .inner
            .commit(CHAIN_REF, format!("frame {frame_number}"), tree_id, parents)
            .map_err(store_error)?
            .detach();
        Ok(commit_id)
    }

    /// Reads back the serialized frame record stored at `commit_id`.
    pub fn get_blob(&self, commit_id: gix::ObjectId) -> Result<Vec<u8>, GitFlixError> {
        let commit = self
            .inner
            .find_object(commit_id)
            .map_err(|e| store_error_at(commit_id, e))?
            .try_into_commit()
            .map_err(|e| store_error_at(commit_id, e))?;
        let tree = commit.tree().map_err(|e| store_error_at(commit_id, e))?;
        let entry = tree
            .find_entry(FRAME_ENTRY_NAME)
            .ok_or_else(|| store_error_at(commit_id, "commit tree is missing the frame blob entry"))?;
        let blob = self
            .inner
            .find_object(entry.object_id())
            .map_err(|e| store_error_at(commit_id, e))?
            .try_into_blob()
            .map_err(|e| store_error_at(commit_id, e))?;
        Ok(blob.data.clone())
    }

    /// Walks the chain from `tip` back to the root commit, inclusive,
    /// returning commit ids in encode order (oldest first).
    pub fn walk_chain(&self, tip: gix::ObjectId) -> Result<Vec<gix::ObjectId>, GitFlixError> {
        let mut ids: Vec<gix::ObjectId> = self
            .inner
            .rev_walk(std::iter::once(tip))
            .all()
            .map_err(store_error)?
            .map(|info| info.map(|i| i.id).map_err(store_error))
            .collect::<Result<_, _>>()?;
        ids.reverse();
        Ok(ids)
    }

    /// Resolves the current tip of the frame chain, if any frames have been
    /// written yet.
    pub fn head(&self) -> Result<Option<gix::ObjectId>, GitFlixError> {
        match self.inner.find_reference(CHAIN_REF) {
            Ok(mut reference) => Ok(Some(reference.peel_to_id_in_place().map_err(store_error)?.detach())),
            Err(gix::reference::find::existing::Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(store_error(e)),
        }
    }
}
