/// Upstream data sources.
///
/// Only the JMA precipitation table is consumed today; another source
/// would get its own file here.

pub mod jma;

#[cfg(test)]
pub(crate) mod fixtures;
