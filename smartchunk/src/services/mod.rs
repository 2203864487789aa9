mod ingest;

pub use ingest::DocumentService;
