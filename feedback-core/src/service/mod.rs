pub mod error;
pub mod feedback_service;
pub mod token_service;

#[cfg(test)]
pub(crate) mod test_utilities;
