//! Datacompat – immutable entities with fluent builders, and a generator for them.
//!
//! The crate centers on a *stage-then-freeze* construction contract:
//! * A builder is created with the fields that have no sensible default
//!   (for [`person::Person`] that is `extra_info`).
//! * Any number of chained `set_*` calls stage values, in any order, the
//!   last write for a field wins.
//! * A terminal `build()` produces an entity whose fields are private and
//!   only readable through accessors.
//!
//! ## Modules
//! * [`person`] – The `Person` entity and `PersonBuilder`.
//! * [`descriptor`] – The validated model of a `#[data_compat]` declaration.
//! * [`generate`] – Emits Rust source for a declaration.
//! * [`processor`] – Scans source files, collects rejections and writes output.
//! * [`settings`] – Layered configuration of the generator.
//! * [`error`] – Crate error types.
//!
//! ## Declarations
//! The generator reads private structs whose name ends in `Data`:
//! ```text
//! /// Represents a person.
//! #[data_compat]
//! struct PersonData {
//!     /// The full name.
//!     #[default("John")]
//!     name: String,
//!     nickname: Option<String>,
//!     extra_info: String,
//! }
//! ```
//! and writes `person.rs` containing `Person`, `PersonBuilder` and a
//! `person(extra_info, |builder| ..)` initializer. Fields that are neither
//! `Option` nor carry `#[default]` become builder constructor parameters.
//!
//! ## Quick Start
//! ```
//! use datacompat::{processor::Processor, settings::Settings};
//! let processor = Processor::new(Settings::default());
//! let outcome = processor
//!     .process_source("#[data_compat] struct PointData { x: i32, #[default(0)] y: i32 }")
//!     .unwrap();
//! assert!(outcome.is_clean());
//! assert_eq!(outcome.generated[0].file_name, "point.rs");
//! ```

pub mod descriptor;
pub mod error;
pub mod generate;
pub mod person;
pub mod processor;
pub mod settings;

pub use error::{DataCompatError, Result, Violation};
pub use person::{Person, PersonBuilder};
