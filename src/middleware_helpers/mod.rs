pub mod error_page;
pub mod request_id;

pub use error_page::expose_error_details;
pub use request_id::{request_id_middleware, REQUEST_ID_HEADER};
