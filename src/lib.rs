//! # toolchain-discovery
//!
//! Discovery and environment wiring for third-party build tools: an
//! Intel C/C++ compiler toolchain and the pdflatex typesetting front
//! end.
//!
//! The crate does no building itself. It locates an installed
//! toolchain (via the Windows registry or Linux filesystem layouts),
//! validates the install, and populates a caller-owned
//! [`Environment`] with command names, search paths and markers so a
//! build orchestrator can invoke the right binaries.
//!
//! ## Components
//!
//! - [`CompilerLocator`]: finds an installed compiler for a
//!   (version, ABI) pair and overlays its paths onto the environment
//! - [`pdflatex`]: registers the PDF typesetting action and command
//!   template
//! - [`Host`]: the narrow host-access interface (filesystem, registry,
//!   search path) that keeps both testable without a real machine
//!
//! ## Example
//!
//! ```rust,no_run
//! use toolchain_discovery::{
//!     pdflatex, CompilerLocator, ConfigureOptions, Environment, Platform, SystemHost,
//! };
//!
//! let host = SystemHost;
//! let mut env = Environment::new();
//!
//! let locator = CompilerLocator::new(&host, Platform::current());
//! if locator.exists() {
//!     let warnings = locator
//!         .configure(&mut env, &ConfigureOptions::default())
//!         .expect("compiler configuration failed");
//!     for warning in &warnings {
//!         eprintln!("warning: {warning}");
//!     }
//! }
//!
//! if pdflatex::exists(&host) {
//!     pdflatex::register(&mut env);
//! }
//! ```

mod abi;
mod environment;
mod errors;
mod host;
mod intelc;
mod options;
mod platform;
mod version;

pub mod pdflatex;

pub use abi::{Abi, ParseAbiError};
pub use environment::{Builder, Environment, ToolAction, Value};
pub use errors::{ConfigError, ConfigWarning, LookupError};
pub use host::{Host, SystemHost};
pub use intelc::{BaseToolchain, CompilerLocator};
pub use options::ConfigureOptions;
pub use platform::Platform;
pub use version::ToolVersion;
