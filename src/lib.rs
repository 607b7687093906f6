//! yt-sentiment: comment sentiment tallies for YouTube videos, Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
