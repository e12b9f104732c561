pub mod structure;
pub mod validator;
