//! Resume-to-job matching: skill extraction over a fixed vocabulary and a
//! blended Jaccard similarity score.

pub mod handlers;
pub mod scorer;
pub mod skills;
