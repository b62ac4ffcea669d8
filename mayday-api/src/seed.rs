//! Demo Data Seeding
//!
//! Optional startup seeding so a fresh instance has something to show on the
//! dashboard. Runs only against an empty store.

use mayday_core::{AlertStatus, MaydayResult, NewAlert};
use mayday_store::AlertStore;

/// Load a handful of demo alerts, skipping stores that already hold data.
/// Returns how many alerts were inserted.
pub fn seed_demo_alerts(store: &dyn AlertStore) -> MaydayResult<usize> {
    if store.count()? > 0 {
        tracing::debug!("store already populated, skipping demo seed");
        return Ok(0);
    }

    let demos = demo_alerts();
    let total = demos.len();
    for (new_alert, status) in demos {
        let alert = store.create(new_alert)?;
        if status != AlertStatus::Pending {
            store.update_status(alert.alert_id, status)?;
        }
    }

    tracing::info!(count = total, "seeded demo alerts");
    Ok(total)
}

fn demo_alerts() -> Vec<(NewAlert, AlertStatus)> {
    vec![
        (
            NewAlert {
                kind: "FIRE".to_string(),
                latitude: 36.8065,
                longitude: 10.1815,
                narrative: "Smoke rising from a warehouse roof".to_string(),
                reporter_id: "11223344".to_string(),
            },
            AlertStatus::Pending,
        ),
        (
            NewAlert {
                kind: "ACCIDENT".to_string(),
                latitude: 36.8625,
                longitude: 10.1956,
                narrative: "Two-car collision at the ring road exit".to_string(),
                reporter_id: "55667788".to_string(),
            },
            AlertStatus::InProgress,
        ),
        (
            NewAlert {
                kind: "MEDICAL".to_string(),
                latitude: 36.8008,
                longitude: 10.1866,
                narrative: "Elderly man collapsed at the tram stop".to_string(),
                reporter_id: "99001122".to_string(),
            },
            AlertStatus::Resolved,
        ),
        (
            NewAlert {
                kind: "FLOOD".to_string(),
                latitude: 36.7538,
                longitude: 10.2286,
                narrative: "Underpass flooding after heavy rain".to_string(),
                reporter_id: "33445566".to_string(),
            },
            AlertStatus::Cancelled,
        ),
        (
            NewAlert {
                kind: "FIRE".to_string(),
                latitude: 36.8188,
                longitude: 10.1658,
                narrative: "Dumpster fire near the market".to_string(),
                reporter_id: "77889900".to_string(),
            },
            AlertStatus::Pending,
        ),
    ]
}
