use serde::{Deserialize, Serialize};

use crate::common_models::macros::{impl_as_str, impl_display, impl_from, impl_into};

/// Raw value taken from an `Authorization: Bearer <value>` header.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct BearerCredential(String);
impl_display!(BearerCredential);
impl_from!(BearerCredential; String);
impl_into!(BearerCredential; String);
impl_as_str!(BearerCredential);

/// Locally issued, signed session token. Opaque outside the session token provider.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct SessionToken(String);
impl_display!(SessionToken);
impl_from!(SessionToken; String);
impl_into!(SessionToken; String);
impl_as_str!(SessionToken);

impl From<&str> for SessionToken {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}
