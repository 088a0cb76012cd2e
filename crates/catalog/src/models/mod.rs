mod channel;

pub(crate) use self::channel::ChannelRow;
