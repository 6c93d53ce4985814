//! `rankdiff list`: show stored snapshot ids, oldest first

use rankdiff_core::SnapshotStore;
use rankdiff_engine::config::RankdiffConfig;
use rankdiff_store::FsSnapshotStore;

pub fn execute(config: &RankdiffConfig) -> anyhow::Result<i32> {
    let store = FsSnapshotStore::new(&config.store.regfiles_dir);
    let ids = store.list()?;

    if ids.is_empty() {
        eprintln!(
            "No snapshots found in {}",
            config.store.regfiles_dir.display()
        );
    }
    for id in ids {
        println!("{}", id);
    }
    Ok(0)
}
