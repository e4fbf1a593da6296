use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use log::{error, info};

use super::loader::{load_from_source, CatalogError, CatalogSource};
use super::Catalog;

/// 현재 카탈로그 스냅샷을 보관한다.
///
/// 읽는 쪽은 `snapshot()`으로 받은 `Arc`를 계산이 끝날 때까지 쥐고 있으므로,
/// 다시 로드하는 중에도 항상 완성된 카탈로그만 본다. 새 카탈로그는 완전히
/// 만들어진 뒤에 한 번에 교체된다.
pub struct CatalogStore {
    current: ArcSwap<Catalog>,
    generation: AtomicU64,
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: ArcSwap::from_pointee(catalog),
            generation: AtomicU64::new(0),
        }
    }

    /// 소스에서 로드하고, 실패하면 오류를 기록한 뒤 빈 카탈로그로 시작한다.
    pub fn load_or_empty(source: &CatalogSource) -> Self {
        match load_from_source(source) {
            Ok(catalog) => Self::new(catalog),
            Err(e) => {
                error!("catalog load failed ({source}): {e}; continuing without recommendations");
                Self::new(Catalog::empty())
            }
        }
    }

    pub fn snapshot(&self) -> Arc<Catalog> {
        self.current.load_full()
    }

    /// 교체 횟수. 스냅샷이 바뀔 때마다 1씩 증가한다.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn replace(&self, catalog: Catalog) {
        self.current.store(Arc::new(catalog));
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// 다시 로드한다. 실패하면 기존 스냅샷을 유지하고 오류를 돌려준다.
    pub fn reload(&self, source: &CatalogSource) -> Result<Arc<Catalog>, CatalogError> {
        let catalog = load_from_source(source)?;
        self.replace(catalog);
        info!("catalog snapshot replaced (generation {})", self.generation());
        Ok(self.snapshot())
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn failed_reload_keeps_previous_snapshot() {
        let store = CatalogStore::default();
        let before = store.snapshot();
        let result = store.reload(&CatalogSource::File {
            path: PathBuf::from("/no/such/catalog.json"),
        });
        assert!(result.is_err());
        assert_eq!(store.generation(), 0);
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn held_snapshot_is_unaffected_by_replace() {
        let store = CatalogStore::default();
        let held = store.snapshot();
        store.replace(Catalog::empty());
        assert!(!held.is_empty());
        assert!(store.snapshot().is_empty());
        assert_eq!(store.generation(), 1);
    }

    #[test]
    fn unreadable_source_starts_empty() {
        let store = CatalogStore::load_or_empty(&CatalogSource::File {
            path: PathBuf::from("/no/such/catalog.json"),
        });
        assert!(store.snapshot().is_empty());
    }
}
