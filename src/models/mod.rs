pub mod blog;
pub mod category;
pub mod contact;
pub mod project;
pub mod repo;
pub mod skill;
