mod mock_page_source;

pub use mock_page_source::MockPageSource;
