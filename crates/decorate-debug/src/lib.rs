//! decorate Debug - timestamped call and return logging
//!
//! Wrap a function with [`debug`] to log every call's full argument view
//! (positional, keyword and defaults) and its return value:
//!
//! ```text
//! 2021-02-05T17:36:53.276937 | [CALL] 'hello' | args=('World',) | kwargs={'punctuation': '!'}
//! 2021-02-05T17:36:53.277102 | [RETURN] 'hello' | output=Hello, World!
//! ```
//!
//! [`debug_input`] and [`debug_output`] log only one side. [`log_input`] and
//! [`log_output`] log once for arguments or a result obtained elsewhere.

pub mod line;
pub mod log;

pub use line::{Action, CallId, TIMESTAMP_FORMAT};
pub use log::{debug, debug_input, debug_output, input_line, log_input, log_output, output_line};
