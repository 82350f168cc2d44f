use render::{PropertyBlock, parse_blocks_json};

use crate::error::AppError;

/// Parse a client-submitted deploy snapshot.
///
/// The snapshot is stored verbatim as `fixed_data`, so it must parse as a
/// block array before it is frozen; a malformed snapshot would otherwise
/// poison the production endpoint until the next deploy.
pub fn parse_snapshot(data: &str) -> Result<Vec<PropertyBlock>, AppError> {
    parse_blocks_json(data)
        .map_err(|e| AppError::Validation(format!("Snapshot is not a valid block array: {e}")))
}
