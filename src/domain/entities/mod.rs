pub mod edit;
pub mod record;
pub mod schema;
pub mod view;
