pub mod availability;
pub mod event;
pub mod image;
pub mod participant;
