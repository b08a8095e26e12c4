use std::collections::HashMap;
use std::path::PathBuf;

use crate::parser::MediaItem;

/// Episodes that share a parent directory and are resolved and renamed
/// as one unit.
#[derive(Debug)]
pub struct SeriesBatch {
    pub parent_path: PathBuf,
    pub parent_name: String,
    pub episodes: Vec<MediaItem>,
}

/// Group episode items by their parent directory, preserving scan order
/// both across batches and within each batch. Non-episode items are
/// silently dropped.
pub fn group_by_parent(items: Vec<MediaItem>) -> Vec<SeriesBatch> {
    let mut batches: Vec<SeriesBatch> = Vec::new();
    let mut index: HashMap<PathBuf, usize> = HashMap::new();

    for item in items {
        if !item.is_episode() {
            continue;
        }
        let parent = match item.path.parent() {
            Some(p) => p.to_path_buf(),
            None => continue,
        };
        match index.get(&parent) {
            Some(&i) => batches[i].episodes.push(item),
            None => {
                let parent_name = parent
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or_default()
                    .to_string();
                index.insert(parent.clone(), batches.len());
                batches.push(SeriesBatch {
                    parent_path: parent,
                    parent_name,
                    episodes: vec![item],
                });
            }
        }
    }
    batches
}

// ─── Tests ───────────────────────────────────────────────────────────────────
