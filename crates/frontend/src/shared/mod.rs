pub mod components;
pub mod data_store;
pub mod icons;
pub mod list_utils;
pub mod local_storage;
pub mod mock_data;
pub mod page_frame;
pub mod page_standard;
