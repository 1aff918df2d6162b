// Industry insights: a lazily filled, per-industry cache of generated market
// reports, refreshed in place once the due timestamp passes.

pub mod cache;
pub mod handlers;
pub mod prompts;
