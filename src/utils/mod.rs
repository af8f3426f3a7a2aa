pub mod password;
pub mod secret_code;
