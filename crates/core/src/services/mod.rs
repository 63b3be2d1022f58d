pub mod feed_service;
pub mod normalizer_service;
