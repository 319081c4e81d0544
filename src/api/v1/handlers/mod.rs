pub mod health;
pub mod whoami;
