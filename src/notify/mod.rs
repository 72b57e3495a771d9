/// Downstream notification sinks.

pub mod webhook;
