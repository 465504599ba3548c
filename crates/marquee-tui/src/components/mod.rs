pub mod detail_overlay;
pub mod favorites_list;
pub mod header;
pub mod help_overlay;
pub mod movie_list;
pub mod search_bar;
pub mod trending_strip;
