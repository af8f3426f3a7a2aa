use rand::RngCore;

const SECRET_CODE_BYTES: usize = 8;

/// Mint the opaque credential a device presents for lookups: 8 random
/// bytes, hex-encoded.
pub fn generate_secret_code() -> String {
    let mut bytes = [0u8; SECRET_CODE_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
