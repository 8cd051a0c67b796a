mod attendees_test;
mod events_test;
mod middleware_test;
