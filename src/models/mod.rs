//! Assignment domain models.
//!
//! Plain data describing the workload (jobs), the processing resources,
//! the produced job → resource mapping, and the timing records an
//! execution engine reports back.
//!
//! # Domain Mappings
//!
//! | u-assign | Cloud | Cluster | Manufacturing |
//! |----------|-------|---------|---------------|
//! | Job | Cloudlet | Batch Job | Order |
//! | Resource | VM | Node | Machine |
//! | Assignment | Broker Binding | Placement | Routing |

mod assignment;
mod completion;
mod job;
mod resource;

pub use assignment::Assignment;
pub use completion::CompletionRecord;
pub use job::{total_length, Job};
pub use resource::Resource;
