//! Chat server HTTP adapters

mod mattermost;

pub use mattermost::{MattermostClient, QUICK_REPLY_ROUTE, TRANSLATE_ROUTE};
