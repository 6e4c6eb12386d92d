pub mod id;
pub mod membership;
pub mod rank;
pub mod role;
