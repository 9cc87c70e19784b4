//! # Schema Registry
//!
//! Schemas ship inside the binary, versioned by directory. The registry is a
//! process-wide map populated on first access. There is no API to replace or
//! mutate an entry.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde_json::Value;
use soav_core::SchedulerType;

/// Version directory the bundled schemas are loaded from.
pub const SCHEMA_VERSION: &str = "v1";

static REGISTRY: OnceLock<HashMap<SchedulerType, Value>> = OnceLock::new();

fn bundled_source(scheduler: SchedulerType) -> &'static str {
    match scheduler {
        SchedulerType::InstantDispatch => {
            include_str!("../schemas/v1/instant-dispatch.schema.json")
        }
        SchedulerType::PeriodicBatch => include_str!("../schemas/v1/periodic-batch.schema.json"),
        SchedulerType::DependencyBatch => {
            include_str!("../schemas/v1/dependency-batch.schema.json")
        }
    }
}

fn registry() -> &'static HashMap<SchedulerType, Value> {
    REGISTRY.get_or_init(|| {
        SchedulerType::ALL
            .into_iter()
            .filter_map(|scheduler| match serde_json::from_str(bundled_source(scheduler)) {
                Ok(value) => Some((scheduler, value)),
                Err(e) => {
                    tracing::error!(
                        schema = %schema_resource_name(scheduler),
                        "bundled schema is not valid JSON: {e}"
                    );
                    None
                }
            })
            .collect()
    })
}

/// Bundle-relative name of a scheduler's schema, e.g. `v1/periodic-batch.schema.json`.
pub fn schema_resource_name(scheduler: SchedulerType) -> String {
    format!("{SCHEMA_VERSION}/{scheduler}.schema.json")
}

/// Look up the schema for a scheduler type.
pub fn schema_for(scheduler: SchedulerType) -> Option<&'static Value> {
    registry().get(&scheduler)
}

/// Look up a schema by scheduler identifier.
///
/// Returns `None` for identifiers outside the known set. Callers treat that
/// as "nothing to validate against".
pub fn get_schema(identifier: &str) -> Option<&'static Value> {
    let scheduler = identifier.parse::<SchedulerType>().ok()?;
    schema_for(scheduler)
}
