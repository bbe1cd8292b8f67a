use base64::Engine;
use rand::Rng;
use uuid::Uuid;

/// State for a single login attempt.
///
/// Created when a login starts and consumed by the code exchange; it is
/// never stored anywhere else.
#[derive(Debug)]
pub struct AuthSession {
    state: String,
    code_verifier: String,
}

impl AuthSession {
    pub fn new() -> Self {
        Self {
            state: Uuid::new_v4().to_string(),
            code_verifier: generate_code_verifier(),
        }
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    /// With `code_challenge_method=plain` the challenge is the verifier itself.
    pub fn code_challenge(&self) -> &str {
        &self.code_verifier
    }

    pub fn code_verifier(&self) -> &str {
        &self.code_verifier
    }

    /// Exact, case-sensitive comparison against the returned `state`.
    pub fn matches_state(&self, returned: &str) -> bool {
        self.state == returned
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}

/// 32 random bytes, base64url without padding
fn generate_code_verifier() -> String {
    let mut rng = rand::rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.random()).collect();
    base64::prelude::BASE64_URL_SAFE_NO_PAD.encode(&random_bytes)
}
