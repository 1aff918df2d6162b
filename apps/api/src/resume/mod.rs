// Resume workflow: wholesale save of the markdown body, plus AI rewording of
// a single section fragment. Improvement never touches the stored resume.

pub mod handlers;
pub mod improve;
pub mod prompts;
