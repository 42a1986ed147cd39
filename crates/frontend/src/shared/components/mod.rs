pub mod page_header;
pub mod ui;
pub mod upload_button;
