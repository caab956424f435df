pub mod binarizer;
pub mod blob_stats;
pub mod candidate;
pub mod frame;
pub mod labeler;
pub mod normalizer;
pub mod pixel;
pub mod union_find;
pub mod utils;
