// Publication list management: CRUD and visibility over the session,
// in-memory attachments, share links and bibliography import.

pub mod handlers;
pub mod import;
pub mod share;
