use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct NewUserDTO {
    pub username: String,
    pub password: String,
    pub street_address: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct LoginDTO {
    pub username: String,
    pub password: String,
}
