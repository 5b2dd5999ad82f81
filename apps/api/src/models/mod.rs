pub mod advert;
pub mod profile;
pub mod publication;
