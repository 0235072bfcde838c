pub mod hmac_jwt;
pub mod jwt;
