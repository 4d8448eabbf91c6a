//! Tool Catalog
//!
//! The eight backend capabilities exposed to the model. Each tool maps to
//! exactly one backend operation and owns explicit handles to its
//! collaborators (clients, event book, shared config); nothing reaches for
//! ambient global state.

mod events;
mod news;
mod rss;
mod settings;
mod web;

pub use events::{AddEventTool, DeleteEventTool, GetEventsTool};
pub use news::{SearchNewsTool, TopHeadlinesTool};
pub use rss::ParseRssFeedTool;
pub use settings::UpdateConfigTool;
pub use web::SearchWebTool;
