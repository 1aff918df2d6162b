// Interview quiz workflow: generate a fixed-size question set, score and
// append a completed attempt, list past attempts. No state is kept between
// the three calls.

pub mod handlers;
pub mod prompts;
pub mod scoring;
pub mod workflow;
