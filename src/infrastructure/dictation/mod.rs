mod channel_provider;

pub use channel_provider::{ChannelDictationProvider, DictationFeed};
