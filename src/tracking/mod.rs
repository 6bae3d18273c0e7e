pub(crate) mod frame;
pub(crate) mod progress;
pub(crate) mod tracker;
