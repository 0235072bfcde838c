use feedback_crypto::SignerError;

/// Signs a token's signing input without exposing the secret to the format layer.
pub trait SignatureProvider: Send + Sync {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError>;
}

/// Checks a token signature for the algorithm named in the token header.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, algorithm: &str, token: &[u8], signature: &[u8]) -> Result<(), SignerError>;
}
