pub mod dto;
pub mod place;
