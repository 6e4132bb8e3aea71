//! bcrypt implementation of the core `PasswordHasher` port.
//!
//! Hashing is CPU bound, so both operations run on the blocking thread pool.

use async_trait::async_trait;

use craiyon_core::services::PasswordHasher;

/// Salted bcrypt hashing with a configurable work factor
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, String> {
        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| format!("Hashing task failed: {}", e))?
            .map_err(|e| e.to_string())
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, String> {
        let password = password.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| format!("Verification task failed: {}", e))?
            .map_err(|e| e.to_string())
    }
}
