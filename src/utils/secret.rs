use rand::RngCore;

const SECRET_BYTES: usize = 20;

/// Produces a fresh access token secret: 160 random bits as lowercase hex.
pub(crate) fn generate() -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
