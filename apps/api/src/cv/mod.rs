// CV generation: assemble a sectioned document from the session, then
// render it as markdown in the selected citation style. Pure functions;
// handlers only take a read lock on the session.

pub mod assembler;
pub mod handlers;
pub mod render;
