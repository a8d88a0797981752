use bcrypt::{hash, verify};

// bcrypt's own cost bounds (the crate keeps these constants private)
const BCRYPT_MIN_COST: u32 = 4;
const BCRYPT_MAX_COST: u32 = 31;

/// Password storage scheme. Handlers never compare passwords themselves, so
/// the scheme can change without touching request handling.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String, String>;

    /// `stored` is whatever `hash` produced at registration
    fn verify(&self, stored: &str, supplied: &str) -> bool;
}

/// Salted bcrypt hashes
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost: cost.clamp(BCRYPT_MIN_COST, BCRYPT_MAX_COST) }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, plain: &str) -> Result<String, String> {
        hash(plain, self.cost).map_err(|e| format!("Failed to hash password: {}", e))
    }

    fn verify(&self, stored: &str, supplied: &str) -> bool {
        match verify(supplied, stored) {
            Ok(valid) => valid,
            Err(e) => {
                // Not a bcrypt hash (e.g. a legacy plain-text row)
                log::warn!("⚠️  Password verification error: {}", e);
                false
            }
        }
    }
}
