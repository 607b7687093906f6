//! YouTube adapter. Implements CommentSource via the Data API v3.

pub mod client;
pub mod mapper;

pub use client::YouTubeCommentSource;
