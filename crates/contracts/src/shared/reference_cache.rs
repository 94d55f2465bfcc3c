//! Session-wide cache of reference option lists (salesmen, warehouses).
//!
//! Each list moves `Empty → Loading → Loaded` and is never invalidated.
//! Callers that arrive while a list is loading await the same in-flight
//! future, so any number of concurrent `ensure_loaded` calls produce exactly
//! one request. A failed load returns the list to `Empty`; calling
//! `ensure_loaded` again retries.

use async_trait::async_trait;
use futures::future::{FutureExt, LocalBoxFuture, Shared};
use serde::Deserialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::api_error::ApiError;
use super::filter::FilterOption;
use super::lenient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReferenceKind {
    Salesman,
    Warehouse,
}

impl ReferenceKind {
    pub fn options_path(self) -> &'static str {
        match self {
            Self::Salesman => "/api/salesmen/options",
            Self::Warehouse => "/api/warehouses/options",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Salesman => "Salesman",
            Self::Warehouse => "Warehouse",
        }
    }
}

/// Entry of `GET /api/{salesmen,warehouses}/options`
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceOptionDto {
    #[serde(deserialize_with = "lenient::id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

impl From<ReferenceOptionDto> for FilterOption {
    fn from(dto: ReferenceOptionDto) -> Self {
        let label = match dto.code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => format!("{} ({})", dto.name, code),
            _ => dto.name,
        };
        FilterOption::new(dto.id, label)
    }
}

/// Where option lists come from
#[async_trait(?Send)]
pub trait OptionSource {
    async fn load_options(&self, kind: ReferenceKind) -> Result<Vec<FilterOption>, ApiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Empty,
    Loading,
    Loaded,
}

type PendingLoad = Shared<LocalBoxFuture<'static, Result<Rc<Vec<FilterOption>>, ApiError>>>;

enum Slot {
    Loading(PendingLoad),
    Loaded(Rc<Vec<FilterOption>>),
}

pub struct ReferenceCache {
    source: Rc<dyn OptionSource>,
    slots: RefCell<HashMap<ReferenceKind, Slot>>,
}

impl ReferenceCache {
    pub fn new(source: Rc<dyn OptionSource>) -> Self {
        Self {
            source,
            slots: RefCell::new(HashMap::new()),
        }
    }

    pub fn state(&self, kind: ReferenceKind) -> LoadState {
        match self.slots.borrow().get(&kind) {
            None => LoadState::Empty,
            Some(Slot::Loading(_)) => LoadState::Loading,
            Some(Slot::Loaded(_)) => LoadState::Loaded,
        }
    }

    /// Loaded options, or an empty list while not loaded
    pub fn get(&self, kind: ReferenceKind) -> Vec<FilterOption> {
        match self.slots.borrow().get(&kind) {
            Some(Slot::Loaded(options)) => options.as_ref().clone(),
            _ => Vec::new(),
        }
    }

    pub async fn ensure_loaded(&self, kind: ReferenceKind) -> Result<(), ApiError> {
        let pending = {
            let mut slots = self.slots.borrow_mut();
            let in_flight = match slots.get(&kind) {
                Some(Slot::Loaded(_)) => return Ok(()),
                Some(Slot::Loading(pending)) => Some(pending.clone()),
                None => None,
            };
            match in_flight {
                Some(pending) => pending,
                None => {
                    log::debug!("loading {:?} options", kind);
                    let source = Rc::clone(&self.source);
                    let pending = async move { source.load_options(kind).await.map(Rc::new) }
                        .boxed_local()
                        .shared();
                    slots.insert(kind, Slot::Loading(pending.clone()));
                    pending
                }
            }
        };

        let outcome = pending.clone().await;

        let mut slots = self.slots.borrow_mut();
        // Only the load we awaited may settle the slot
        let still_ours = matches!(
            slots.get(&kind),
            Some(Slot::Loading(current)) if current.ptr_eq(&pending)
        );
        match outcome {
            Ok(options) => {
                if still_ours {
                    slots.insert(kind, Slot::Loaded(options));
                }
                Ok(())
            }
            Err(err) => {
                if still_ours {
                    log::warn!("loading {:?} options failed: {}", kind, err);
                    slots.remove(&kind);
                }
                Err(err)
            }
        }
    }

    /// `ensure_loaded` followed by `get`
    pub async fn options(&self, kind: ReferenceKind) -> Result<Vec<FilterOption>, ApiError> {
        self.ensure_loaded(kind).await?;
        Ok(self.get(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use std::cell::Cell;

    type Reply = Result<Vec<FilterOption>, ApiError>;

    /// Counts calls; each load waits until the test releases it
    #[derive(Default)]
    struct GatedSource {
        calls: Cell<usize>,
        gates: RefCell<Vec<oneshot::Receiver<Reply>>>,
    }

    impl GatedSource {
        fn gate(&self) -> oneshot::Sender<Reply> {
            let (tx, rx) = oneshot::channel();
            self.gates.borrow_mut().push(rx);
            tx
        }
    }

    #[async_trait(?Send)]
    impl OptionSource for GatedSource {
        async fn load_options(&self, _kind: ReferenceKind) -> Reply {
            self.calls.set(self.calls.get() + 1);
            let gate = self.gates.borrow_mut().pop();
            match gate {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(ApiError::transport("cancelled"))),
                None => Err(ApiError::transport("no reply prepared")),
            }
        }
    }

    fn salesmen() -> Vec<FilterOption> {
        vec![
            FilterOption::new("S001", "Ahmed Ali"),
            FilterOption::new("S002", "Sara Khan"),
        ]
    }

    #[test]
    fn concurrent_calls_share_one_fetch() {
        let source = Rc::new(GatedSource::default());
        let release = source.gate();
        let cache = Rc::new(ReferenceCache::new(source.clone()));
        let results = Rc::new(RefCell::new(Vec::new()));

        let mut pool = LocalPool::new();
        for _ in 0..5 {
            let cache = Rc::clone(&cache);
            let results = Rc::clone(&results);
            pool.spawner()
                .spawn_local(async move {
                    let r = cache.ensure_loaded(ReferenceKind::Salesman).await;
                    results.borrow_mut().push(r);
                })
                .unwrap();
        }

        pool.run_until_stalled();
        assert_eq!(source.calls.get(), 1);
        assert_eq!(cache.state(ReferenceKind::Salesman), LoadState::Loading);
        assert!(cache.get(ReferenceKind::Salesman).is_empty());

        release.send(Ok(salesmen())).unwrap();
        pool.run();

        assert_eq!(source.calls.get(), 1);
        assert_eq!(results.borrow().len(), 5);
        assert!(results.borrow().iter().all(Result::is_ok));
        assert_eq!(cache.state(ReferenceKind::Salesman), LoadState::Loaded);
        assert_eq!(cache.get(ReferenceKind::Salesman), salesmen());
    }

    #[test]
    fn loaded_list_is_not_fetched_again() {
        let source = Rc::new(GatedSource::default());
        let release = source.gate();
        release.send(Ok(salesmen())).unwrap();
        let cache = ReferenceCache::new(source.clone());

        block_on(cache.ensure_loaded(ReferenceKind::Salesman)).unwrap();
        block_on(cache.ensure_loaded(ReferenceKind::Salesman)).unwrap();
        let options = block_on(cache.options(ReferenceKind::Salesman)).unwrap();

        assert_eq!(source.calls.get(), 1);
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn lists_are_cached_per_kind() {
        let source = Rc::new(GatedSource::default());
        source.gate().send(Ok(vec![FilterOption::new("W1", "Main")])).unwrap();
        source.gate().send(Ok(salesmen())).unwrap();
        let cache = ReferenceCache::new(source.clone());

        block_on(cache.ensure_loaded(ReferenceKind::Salesman)).unwrap();
        assert_eq!(cache.state(ReferenceKind::Warehouse), LoadState::Empty);
        block_on(cache.ensure_loaded(ReferenceKind::Warehouse)).unwrap();

        assert_eq!(source.calls.get(), 2);
        assert_eq!(cache.get(ReferenceKind::Warehouse).len(), 1);
    }

    #[test]
    fn failed_load_returns_to_empty_and_can_be_retried() {
        let source = Rc::new(GatedSource::default());
        source
            .gate()
            .send(Err(ApiError::Http { status: 503 }))
            .unwrap();
        let cache = ReferenceCache::new(source.clone());

        let err = block_on(cache.ensure_loaded(ReferenceKind::Warehouse)).unwrap_err();
        assert_eq!(err, ApiError::Http { status: 503 });
        assert_eq!(cache.state(ReferenceKind::Warehouse), LoadState::Empty);

        source.gate().send(Ok(vec![FilterOption::new("W1", "Main")])).unwrap();
        block_on(cache.ensure_loaded(ReferenceKind::Warehouse)).unwrap();
        assert_eq!(source.calls.get(), 2);
        assert_eq!(cache.state(ReferenceKind::Warehouse), LoadState::Loaded);
    }

    #[test]
    fn option_dto_label_includes_code() {
        let dtos: Vec<ReferenceOptionDto> = serde_json::from_value(serde_json::json!([
            {"id": 7, "name": "John Doe", "code": "S001"},
            {"id": "W2", "name": "Main Warehouse", "code": null},
            {"id": "W3", "name": "Depot"}
        ]))
        .unwrap();
        let options: Vec<FilterOption> = dtos.into_iter().map(Into::into).collect();
        assert_eq!(options[0], FilterOption::new("7", "John Doe (S001)"));
        assert_eq!(options[1], FilterOption::new("W2", "Main Warehouse"));
        assert_eq!(options[2].label, "Depot");
    }
}
