pub mod actions;
pub mod api;
pub mod barcodes;
pub mod clipboard;
pub mod components;
pub mod config;
pub mod details;
pub mod forms;
pub mod icons;
pub mod instance;
pub mod list_query;
pub mod list_utils;
pub mod modal_frame;
pub mod modal_stack;
pub mod nav;
pub mod page_frame;
pub mod page_standard;
pub mod panels;
pub mod printing;
pub mod storage;
