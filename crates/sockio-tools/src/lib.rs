//! sockio tools library entry.
//!
//! Config loading, the JSON packet description, and the line processors
//! behind the `sockio-tools` binary. Kept as a library so the pieces can be
//! exercised by integration tests.

pub mod config;
pub mod desc;
pub mod run;
