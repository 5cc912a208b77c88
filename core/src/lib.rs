pub mod aggregate;
pub mod export;
pub mod extraction;
pub mod identity;
pub mod points;
pub mod ranking;
pub mod run;
pub mod store;
pub mod validator;

pub mod error;
