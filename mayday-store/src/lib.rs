//! MAYDAY Store - Alert Storage Trait and In-Memory Implementation
//!
//! Defines the storage abstraction for alert records. The shipped
//! implementation keeps records in process memory behind an RwLock;
//! durability is out of scope for this service.

use mayday_core::{Alert, AlertId, AlertStatus, MaydayError, MaydayResult, NewAlert, StoreError};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

// ============================================================================
// STORE TRAIT
// ============================================================================

/// Storage trait for alert records.
///
/// The store owns id assignment: `create` stamps a fresh UUIDv7 id, the
/// PENDING status, and the acceptance timestamp before inserting.
pub trait AlertStore: Send + Sync {
    /// Persist a new alert and return the full stamped record.
    fn create(&self, new: NewAlert) -> MaydayResult<Alert>;

    /// Get an alert by id.
    fn get(&self, id: AlertId) -> MaydayResult<Option<Alert>>;

    /// List every alert in insertion order.
    fn list_all(&self) -> MaydayResult<Vec<Alert>>;

    /// List alerts whose kind matches exactly, in insertion order.
    fn list_by_kind(&self, kind: &str) -> MaydayResult<Vec<Alert>>;

    /// Replace the status of an existing alert and return the updated record.
    /// Fails with `StoreError::NotFound` when the id is absent.
    fn update_status(&self, id: AlertId, status: AlertStatus) -> MaydayResult<Alert>;

    /// Number of stored alerts.
    fn count(&self) -> MaydayResult<usize>;
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

#[derive(Debug, Default)]
struct StoreInner {
    alerts: HashMap<AlertId, Alert>,
    // Insertion-order index so listing is deterministic
    order: Vec<AlertId>,
}

/// In-memory alert store. Cheap to clone behind an `Arc<dyn AlertStore>`;
/// the map and its insertion-order index live under one lock so they can
/// never drift apart.
#[derive(Debug, Default)]
pub struct InMemoryAlertStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryAlertStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> MaydayResult<RwLockReadGuard<'_, StoreInner>> {
        self.inner
            .read()
            .map_err(|_| MaydayError::Store(StoreError::LockPoisoned))
    }

    fn write(&self) -> MaydayResult<RwLockWriteGuard<'_, StoreInner>> {
        self.inner
            .write()
            .map_err(|_| MaydayError::Store(StoreError::LockPoisoned))
    }
}

impl AlertStore for InMemoryAlertStore {
    fn create(&self, new: NewAlert) -> MaydayResult<Alert> {
        let alert = Alert::from_new(new);
        let mut inner = self.write()?;
        inner.order.push(alert.alert_id);
        inner.alerts.insert(alert.alert_id, alert.clone());
        Ok(alert)
    }

    fn get(&self, id: AlertId) -> MaydayResult<Option<Alert>> {
        let inner = self.read()?;
        Ok(inner.alerts.get(&id).cloned())
    }

    fn list_all(&self) -> MaydayResult<Vec<Alert>> {
        let inner = self.read()?;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.alerts.get(id))
            .cloned()
            .collect())
    }

    fn list_by_kind(&self, kind: &str) -> MaydayResult<Vec<Alert>> {
        let inner = self.read()?;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.alerts.get(id))
            .filter(|a| a.kind == kind)
            .cloned()
            .collect())
    }

    fn update_status(&self, id: AlertId, status: AlertStatus) -> MaydayResult<Alert> {
        let mut inner = self.write()?;
        let alert = inner
            .alerts
            .get_mut(&id)
            .ok_or(MaydayError::Store(StoreError::NotFound { id }))?;
        alert.status = status;
        Ok(alert.clone())
    }

    fn count(&self) -> MaydayResult<usize> {
        let inner = self.read()?;
        Ok(inner.alerts.len())
    }
}

// ============================================================================
// TESTS
// ============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_new_alert() -> impl Strategy<Value = NewAlert> {
        ("[A-Z]{3,8}", -90.0f64..90.0, -180.0f64..180.0, ".{0,40}").prop_map(
            |(kind, latitude, longitude, narrative)| NewAlert {
                kind,
                latitude,
                longitude,
                narrative,
                reporter_id: "00112233".to_string(),
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Created ids are unique and every created record is listed exactly once.
        #[test]
        fn prop_each_created_alert_listed_once(news in proptest::collection::vec(arb_new_alert(), 1..12)) {
            let store = InMemoryAlertStore::new();
            let mut ids = Vec::new();
            for new in news {
                ids.push(store.create(new).unwrap().alert_id);
            }

            let listed = store.list_all().unwrap();
            prop_assert_eq!(listed.len(), ids.len());
            for id in &ids {
                prop_assert_eq!(listed.iter().filter(|a| a.alert_id == *id).count(), 1);
            }
        }

        /// The kind filter returns exactly the matching subset, in order.
        #[test]
        fn prop_kind_filter_is_exact_subset(news in proptest::collection::vec(arb_new_alert(), 0..12)) {
            let store = InMemoryAlertStore::new();
            for new in news {
                store.create(new).unwrap();
            }

            let all = store.list_all().unwrap();
            for kind in all.iter().map(|a| a.kind.clone()).collect::<std::collections::HashSet<_>>() {
                let filtered = store.list_by_kind(&kind).unwrap();
                let expected: Vec<AlertId> = all
                    .iter()
                    .filter(|a| a.kind == kind)
                    .map(|a| a.alert_id)
                    .collect();
                let got: Vec<AlertId> = filtered.iter().map(|a| a.alert_id).collect();
                prop_assert_eq!(got, expected);
            }
        }

        /// Updating a missing id never succeeds and never disturbs stored data.
        #[test]
        fn prop_update_missing_id_fails(new in arb_new_alert()) {
            let store = InMemoryAlertStore::new();
            let created = store.create(new).unwrap();

            let missing = mayday_core::new_alert_id();
            prop_assert!(store.update_status(missing, AlertStatus::Resolved).is_err());

            let untouched = store.get(created.alert_id).unwrap().unwrap();
            prop_assert_eq!(untouched.status, AlertStatus::Pending);
        }
    }
}
