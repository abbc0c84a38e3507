//! Environment names
//!
//! Each sensor id maps one-to-one to a named physical location. The
//! table is static; ids outside it are displayed as their raw number.

use crate::reading::SensorId;

/// Known sensor id → environment name pairs, in picker order.
pub const KNOWN_ENVIRONMENTS: &[(SensorId, &str)] = &[
    (1, "Kitchen"),
    (2, "Living Room"),
    (3, "Bedroom"),
    (4, "Office"),
];

/// Look up the environment name for a sensor id.
pub fn environment_name(id: SensorId) -> Option<&'static str> {
    KNOWN_ENVIRONMENTS
        .iter()
        .find(|(known, _)| *known == id)
        .map(|(_, name)| *name)
}

/// Display name for a sensor id, falling back to the raw identifier
/// for ids outside the known set.
pub fn display_name(id: SensorId) -> String {
    match environment_name(id) {
        Some(name) => name.to_string(),
        None => id.to_string(),
    }
}
