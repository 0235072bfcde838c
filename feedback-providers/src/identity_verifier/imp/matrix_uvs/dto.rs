use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct VerifyUserRequestDTO<'a> {
    pub matrix_server_name: &'a str,
    pub token: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyUserResponseDTO {
    pub results: VerifyUserResultsDTO,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyUserResultsDTO {
    pub user: bool,
}
