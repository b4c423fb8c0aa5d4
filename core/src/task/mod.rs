mod model;

pub use model::{Bucket, Buckets, Task, TaskStatus, DONE_MARKER, NOT_DONE_MARKER};

use std::collections::BTreeMap;

/// Display name to recipient id, loaded once per run and never mutated.
pub type RecipientMap = BTreeMap<String, String>;
