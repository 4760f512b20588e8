//! Record id helpers
//!
//! Prefixed, collision-free ids for records the engine mints itself.
//! Callers that bring their own ids (sync'd from a device) bypass these.

use uuid::Uuid;

pub fn recommendation_id() -> String {
    format!("rec_{}", short())
}

pub fn patch_id() -> String {
    format!("pch_{}", short())
}

pub fn weather_features_id(source: &str) -> String {
    format!("wxf_{}_{}", source, short())
}

fn short() -> String {
    let id = Uuid::new_v4().simple().to_string();
    id[..12].to_string()
}
