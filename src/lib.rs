#![forbid(unsafe_code)]

pub mod candidates;
pub mod dom;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod page;
pub mod reveal;
pub mod sim;
pub mod waves;

pub use dom::{Document, Mutation};
pub use engine::PageEffects;
pub use error::{ShorefxError, ShorefxResult};
pub use fallback::{FallbackResolver, ResolverState};
pub use page::{ImageSpec, MemoryDom, NodeSpec, PageModel};
pub use reveal::RevealObserver;
pub use sim::{PageEvent, Scenario, SimReport, simulate};
pub use waves::{Direction, WaveParams};
