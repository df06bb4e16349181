use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::input::{InputError, system_candidate};
use crate::model::systems::{ALL_SYSTEMS, System};

/// Known systems with at least one file in `predictions_dir`, in table order.
pub fn discover_systems(predictions_dir: &Path) -> Result<Vec<System>, InputError> {
    let mut candidates = BTreeSet::new();
    for entry in fs::read_dir(predictions_dir)? {
        let name = entry?.file_name();
        let name = name.to_string_lossy();
        candidates.insert(system_candidate(&name).to_string());
    }

    let systems = ALL_SYSTEMS
        .into_iter()
        .filter(|system| candidates.contains(system.name()))
        .collect::<Vec<_>>();

    for candidate in &candidates {
        if System::from_name(candidate).is_none() {
            tracing::debug!(candidate = %candidate, "ignoring predictions for unknown system");
        }
    }
    tracing::info!(
        systems = ?systems.iter().map(|s| s.name()).collect::<Vec<_>>(),
        "discovered submitted systems"
    );
    Ok(systems)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_discover.rs"]
mod tests;
