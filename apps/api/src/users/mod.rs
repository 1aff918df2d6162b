// User records and onboarding. A user row is created on first authenticated
// access; onboarding fills in the industry that insights and quizzes need.

pub mod handlers;
pub mod onboarding;
