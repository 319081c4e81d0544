/*
 * Responsibility
 * - Transport-neutral view of an inbound call (metadata + attached attributes)
 * - HTTP headers / gRPC metadata are converted into this shape at the edge
 */
mod context;
mod metadata;

pub use context::CallContext;
pub use metadata::Metadata;
