mod action;
mod course;
mod cuisine;
mod event;
mod menu_client;
mod outcome;
mod page;
mod playlist;
mod recipe;

pub use action::*;
pub use course::*;
pub use cuisine::*;
pub use event::*;
pub use menu_client::*;
pub use outcome::*;
pub use page::*;
pub use playlist::*;
pub use recipe::*;
