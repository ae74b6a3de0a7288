pub mod convert;
pub mod history;
pub mod session;
pub mod setup;
pub mod ui;
