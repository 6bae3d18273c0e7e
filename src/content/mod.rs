pub(crate) mod chapter;
pub(crate) mod dataset;
pub(crate) mod gate;
