pub(crate) mod graph;
pub(crate) mod library;
pub(crate) mod renderer;
pub(crate) mod surface;
