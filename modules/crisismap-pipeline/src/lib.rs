pub mod aggregate;
pub mod classify;
pub mod export;
pub mod extract;
pub mod gazetteer;
pub mod lexicon;
pub mod normalize;
pub mod pipeline;
pub mod rate_gate;
pub mod resolve;
pub mod source;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;
