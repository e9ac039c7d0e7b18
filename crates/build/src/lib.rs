//! Build integration surface.
//!
//! A [`BuildSession`] is what a bundler plugin holds on to: modules report
//! their rules (or their transformed code) as they finish, the graph reports
//! which modules are still part of the build, and at asset time the session
//! renders the stylesheet and hands it to the orchestrator's [`AssetSink`].

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod session;
pub mod sink;

pub use config::{AppendTarget, BuildConfig, BuildConfigBuilder, OutputMode};
pub use error::{ConfigError, Result};
pub use fingerprint::fingerprint;
pub use session::{BuildSession, Emitted, ModuleOutput, SkipReason};
pub use sink::{AssetSink, CssAsset, InvalidationSink};
pub use strata_rules::{StyleRule, Variant};
pub use strata_store::Invalidation;
