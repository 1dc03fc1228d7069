//! Firecrawl-backed web access.
//!
//! # Module Structure
//!
//! - [`firecrawl`](crate::web::firecrawl) - HTTP gateway for the Firecrawl API
//! - [`tools`](crate::web::tools) - Search, scrape, and crawl tools

/// HTTP gateway for the Firecrawl API.
pub mod firecrawl;
/// Web search, scrape, and crawl tools.
pub mod tools;
