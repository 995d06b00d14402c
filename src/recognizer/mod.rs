pub mod fields;

pub use fields::{extract_email, extract_name, extract_phone, recognize, ResumeRecord, NOT_FOUND};
