pub(crate) mod renderer;
pub(crate) mod selection;
