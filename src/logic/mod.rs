pub mod membership;
pub mod rank;
pub mod roles;
