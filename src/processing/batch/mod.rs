pub mod config;
mod chunker;
mod processor;
mod range;
mod resolver;
mod validator;

pub use chunker::{chunk, chunk_owned};
pub use config::{parse_memory_limit, SizerSettings};
pub use processor::BatchSizer;
pub use range::{effective_size, page_range, page_ranges, PageRanges};
pub use resolver::{BatchSizeResolver, Resolution, SizeSource};
pub use validator::{coerce_size, parse_size, BatchSizeValidator};
