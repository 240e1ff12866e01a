//! decorate Compose - the argument composition engine
//!
//! Given a target function, the arguments of one call and an ordered
//! configuration sequence, this crate derives the `(positional, keyword)`
//! arguments handed to observers.
//!
//! - [`Step`]: One configuration step (include positional, include keyword,
//!   include defaults, prepend the function, append an output)
//! - [`RawStep`]: Undecoded step from a dynamic caller
//! - [`ArgComposer`]: Applies a sequence to a call
//!
//! Steps run strictly in the given order. The composer does not reorder or
//! deduplicate them; `[IncludeKwargs, IncludeDefaults]` is the order in which
//! defaults fill only the keywords left unset.
//!
//! ```ignore
//! use decorate_compose::{ArgComposer, Step};
//!
//! let composed = ArgComposer::new(&function, &call, [
//!     Step::IncludeArgs,
//!     Step::IncludeKwargs,
//!     Step::IncludeDefaults,
//!     Step::PrependFunction,
//! ])
//! .compose();
//!
//! let target = composed.positional[0].as_function();
//! ```

pub mod composer;
pub mod error;
pub mod step;

// Re-export main types
pub use composer::ArgComposer;
pub use error::{ComposeError, ComposeResult};
pub use step::{RawStep, Step, StepTag, decode};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::composer::ArgComposer;
    pub use crate::error::{ComposeError, ComposeResult};
    pub use crate::step::{RawStep, Step, StepTag};
}
