pub mod form;
pub mod response;
