use rand::RngCore;

/// Generate a property access token: 32 lowercase hex characters.
///
/// Created once when the property document is first materialized and never
/// rotated afterwards.
pub fn generate_access_token() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
