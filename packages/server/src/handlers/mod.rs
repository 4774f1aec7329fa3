pub mod hackathon;
pub mod health;
pub mod submission;
