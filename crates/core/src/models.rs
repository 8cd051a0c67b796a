pub mod event;
pub mod participant;
pub mod search;
pub mod view;
