mod details;

pub use details::LocationDetailsTab;
