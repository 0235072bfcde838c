use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{Signer, SignerError};

type HmacSha256 = Hmac<Sha256>;

pub struct HS256Signer {}

impl HS256Signer {
    fn mac(secret: &[u8]) -> Result<HmacSha256, SignerError> {
        if secret.is_empty() {
            return Err(SignerError::MissingKey);
        }

        HmacSha256::new_from_slice(secret).map_err(|e| SignerError::CouldNotSign(e.to_string()))
    }
}

impl Signer for HS256Signer {
    fn algorithm(&self) -> &'static str {
        "HS256"
    }

    fn sign(&self, input: &[u8], secret: &[u8]) -> Result<Vec<u8>, SignerError> {
        let mut mac = Self::mac(secret)?;
        mac.update(input);

        Ok(mac.finalize().into_bytes().to_vec())
    }

    fn verify(&self, input: &[u8], signature: &[u8], secret: &[u8]) -> Result<(), SignerError> {
        let mut mac = Self::mac(secret)?;
        mac.update(input);

        // constant time comparison
        mac.verify_slice(signature)
            .map_err(|_| SignerError::InvalidSignature)
    }
}
