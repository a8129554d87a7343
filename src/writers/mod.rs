pub mod chunked;

pub use chunked::ChunkedJsonWriter;
