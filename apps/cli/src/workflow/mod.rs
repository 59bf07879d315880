// Two-step batch workflow with a human review pause in the middle:
// collect poems into a review file, then render cards from it.

pub mod collect;
pub mod produce;

pub use collect::run_collect_step;
pub use produce::run_produce_step;
