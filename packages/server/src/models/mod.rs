pub mod hackathon;
pub mod submission;
